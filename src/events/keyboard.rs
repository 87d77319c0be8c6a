use crate::app::{self, SharedApp};
use fete_core::{action_for_key, KeyContext};
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
fn key_context(ev: &web::KeyboardEvent) -> KeyContext {
    let target_is_body = ev
        .target()
        .and_then(|t| t.dyn_into::<web::Element>().ok())
        .map_or(true, |el| el.tag_name().eq_ignore_ascii_case("body"));
    KeyContext {
        ctrl: ev.ctrl_key(),
        meta: ev.meta_key(),
        target_is_body,
    }
}

pub fn handle_global_keydown(ev: &web::KeyboardEvent, app: &SharedApp) {
    let ctx = key_context(ev);
    let step = app.borrow().controller.config.key_scroll_step_px;
    let Some(action) = action_for_key(&ev.key(), ctx, step) else {
        return;
    };
    if action.prevents_default() {
        ev.prevent_default();
    }
    log::debug!("[keys] {action:?}");
    app::dispatch(app, |fx, out| fx.handle_key(action, out));
}

pub fn wire_global_keydown(app: SharedApp) {
    if let Some(window) = web::window() {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                handle_global_keydown(&ev, &app);
            }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
