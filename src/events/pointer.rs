use crate::app::{self, SharedApp};
use crate::constants::CARD_HOVER_TRANSFORM;
use crate::dom;
use fete_core::nav::section_id_from_href;
use fete_core::{ElementKey, Mount};
use web_sys as web;

/// Clone the handle for `key` out of the cache, if the page has it.
#[inline]
fn cached(app: &SharedApp, key: ElementKey) -> Option<web::Element> {
    app.borrow().stage.cache().get(key).cloned()
}

fn on_key_click(app: &SharedApp, key: ElementKey, mut handler: impl FnMut(&SharedApp) + 'static) {
    let Some(el) = cached(app, key) else {
        return;
    };
    let app = app.clone();
    dom::on_click(&el, move |_| handler(&app));
}

pub fn wire_buttons(app: &SharedApp) {
    on_key_click(app, ElementKey::CelebrateButton, |app| {
        app::dispatch(app, |fx, out| fx.trigger_main_celebration(out));
    });
    on_key_click(app, ElementKey::WishesButton, |app| {
        app::dispatch(app, |fx, out| fx.scroll_to_section("wishes", out));
    });
    on_key_click(app, ElementKey::ConfettiButton, |app| {
        app::dispatch(app, |fx, out| {
            fx.launch_confetti(out);
        });
    });
    for key in [ElementKey::MusicButton, ElementKey::PlayButton] {
        on_key_click(app, key, |app| {
            app::dispatch(app, |fx, out| {
                fx.toggle_ambient_audio(out);
            });
        });
    }
    on_key_click(app, ElementKey::MobileToggle, |app| {
        app::dispatch(app, |fx, out| fx.toggle_mobile_menu(out));
    });
}

/// Nav links scroll in-page instead of jumping to the fragment.
pub fn wire_nav(app: &SharedApp) {
    let links = app.borrow().stage.cache().nav_links.clone();
    for link in links {
        let app = app.clone();
        let href = link.get_attribute("href").unwrap_or_default();
        dom::on_click(&link, move |ev| {
            ev.prevent_default();
            if let Some(id) = section_id_from_href(&href) {
                app::dispatch(&app, |fx, out| fx.scroll_to_section(id, out));
            }
        });
    }
}

pub fn wire_cake(app: &SharedApp) {
    let flames = app.borrow().stage.cache().flames.clone();
    for (index, flame) in flames.into_iter().enumerate() {
        let app = app.clone();
        dom::on_click(&flame, move |_| {
            app::dispatch(&app, |fx, out| fx.blow_out_candle(index, out));
        });
    }
}

pub fn wire_cards(app: &SharedApp) {
    let (wishes, celebrations) = {
        let a = app.borrow();
        let cache = a.stage.cache();
        (cache.wish_cards.clone(), cache.celebration_cards.clone())
    };
    for card in wishes {
        let lift = card.clone();
        dom::on_event(&card, "mouseenter", move || {
            dom::set_style(&lift, "transform", CARD_HOVER_TRANSFORM);
        });
        let rest = card.clone();
        dom::on_event(&card, "mouseleave", move || {
            dom::set_style(&rest, "transform", "");
        });
    }
    for (index, card) in celebrations.into_iter().enumerate() {
        let app = app.clone();
        dom::on_click(&card, move |_| {
            app::dispatch(&app, |fx, out| fx.ripple(Mount::CelebrationCard(index), out));
        });
    }
}
