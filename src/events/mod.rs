mod keyboard;
mod page;
mod pointer;

use crate::app::SharedApp;
use web_sys as web;

/// Install every page listener. Listeners live for the rest of the page.
pub fn wire_all(app: &SharedApp, document: &web::Document) {
    keyboard::wire_global_keydown(app.clone());
    pointer::wire_buttons(app);
    pointer::wire_nav(app);
    pointer::wire_cake(app);
    pointer::wire_cards(app);
    page::wire_scroll(app.clone());
    page::wire_resize(app.clone());
    page::wire_visibility(app.clone(), document);
    page::wire_unload(app.clone());
}
