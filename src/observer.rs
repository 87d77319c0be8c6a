//! Viewport observers: active-section tracking and card scroll-reveal.

use crate::app::{self, SharedApp};
use crate::constants::*;
use crate::dom;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

fn observer_init() -> web::IntersectionObserverInit {
    let init = web::IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(OBSERVER_THRESHOLD));
    init.set_root_margin(OBSERVER_ROOT_MARGIN);
    init
}

/// Build an observer that calls `on_visible` for each entry entering view.
fn observe_entering(
    targets: &[web::Element],
    mut on_visible: impl FnMut(web::Element) + 'static,
) -> Option<web::IntersectionObserver> {
    if targets.is_empty() {
        return None;
    }
    let callback = Closure::wrap(Box::new(move |entries: js_sys::Array| {
        for entry in entries.iter() {
            let Ok(entry) = entry.dyn_into::<web::IntersectionObserverEntry>() else {
                continue;
            };
            if entry.is_intersecting() {
                on_visible(entry.target());
            }
        }
    }) as Box<dyn FnMut(js_sys::Array)>);
    let observer = match web::IntersectionObserver::new_with_options(
        callback.as_ref().unchecked_ref(),
        &observer_init(),
    ) {
        Ok(o) => o,
        Err(e) => {
            log::warn!("[observer] unavailable: {:?}", e);
            return None;
        }
    };
    callback.forget();
    for target in targets {
        observer.observe(target);
    }
    Some(observer)
}

fn hide_for_reveal(el: &web::Element) {
    dom::set_style(el, "opacity", "0");
    dom::set_style(el, "transform", REVEAL_HIDDEN_TRANSFORM);
    dom::set_style(el, "transition", REVEAL_TRANSITION);
}

fn reveal(el: &web::Element) {
    dom::set_style(el, "opacity", "1");
    dom::set_style(el, "transform", REVEAL_SHOWN_TRANSFORM);
}

/// Observers are handed to the stage so teardown can disconnect them.
pub fn wire_observers(app: &SharedApp) {
    let (sections, cards) = {
        let a = app.borrow();
        let cache = a.stage.cache();
        let cards: Vec<web::Element> = cache
            .wish_cards
            .iter()
            .chain(&cache.celebration_cards)
            .chain(&cache.memory_items)
            .cloned()
            .collect();
        (cache.sections.clone(), cards)
    };

    let app_sections = app.clone();
    let section_observer = observe_entering(&sections, move |section| {
        let id = section.id();
        app::dispatch(&app_sections, |fx, out| fx.update_active_section(&id, out));
    });

    for card in &cards {
        hide_for_reveal(card);
    }
    let reveal_observer = observe_entering(&cards, |card| reveal(&card));

    let mut a = app.borrow_mut();
    for observer in [section_observer, reveal_observer].into_iter().flatten() {
        a.stage.keep_observer(observer);
    }
}
