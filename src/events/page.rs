use crate::app::{self, SharedApp};
use crate::dom;
use crate::frame;
use fete_core::nav::ScrollThrottle;
use gloo_timers::callback::Timeout;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

/// Scroll work runs at most once per animation frame with the latest offset.
pub fn wire_scroll(app: SharedApp) {
    let Some(window) = web::window() else {
        return;
    };
    let throttle = Rc::new(RefCell::new(ScrollThrottle::default()));
    dom::on_event(&window, "scroll", move || {
        if !throttle.borrow_mut().note(dom::scroll_y()) {
            return;
        }
        let throttle = throttle.clone();
        let app = app.clone();
        frame::on_next_frame(move || {
            let pending = throttle.borrow_mut().take();
            if let Some(scroll_y) = pending {
                app::dispatch(&app, |fx, out| fx.on_scroll_frame(scroll_y, out));
            }
        });
    });
}

/// Settle resizes: only the last event in a burst reaches the controller.
pub fn wire_resize(app: SharedApp) {
    let Some(window) = web::window() else {
        return;
    };
    let delay_ms = app.borrow().controller.config.resize_debounce_ms;
    let pending: Rc<RefCell<Option<Timeout>>> = Rc::new(RefCell::new(None));
    dom::on_event(&window, "resize", move || {
        let app = app.clone();
        let timeout = Timeout::new(delay_ms, move || {
            app::dispatch(&app, |fx, out| fx.on_resize_settled(out));
        });
        // dropping the previous timeout cancels it
        *pending.borrow_mut() = Some(timeout);
    });
}

pub fn wire_visibility(app: SharedApp, document: &web::Document) {
    let doc = document.clone();
    dom::on_event(document, "visibilitychange", move || {
        if doc.visibility_state() == web::VisibilityState::Hidden {
            log::debug!("[page] hidden");
            app::dispatch(&app, |fx, out| fx.on_visibility_hidden(out));
        }
    });
}

pub fn wire_unload(app: SharedApp) {
    if let Some(window) = web::window() {
        dom::on_event(&window, "beforeunload", move || {
            app::dispatch(&app, |fx, out| fx.teardown(out));
        });
    }
}
