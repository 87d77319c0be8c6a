#![cfg(target_arch = "wasm32")]
use fete_core::{EffectsController, FxConfig};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod app;
mod cache;
mod constants;
mod dom;
mod events;
mod frame;
mod observer;
mod overlay;
mod stage;
mod styles;

/// Defaults, optionally overridden by a JSON block embedded in the page.
fn load_config(document: &web::Document) -> FxConfig {
    let Some(text) = document
        .get_element_by_id(constants::CONFIG_SCRIPT_ID)
        .and_then(|el| el.text_content())
    else {
        return FxConfig::default();
    };
    let parsed = FxConfig::from_json(&text)
        .map_err(anyhow::Error::from)
        .and_then(|cfg| cfg.validate().map(|()| cfg).map_err(anyhow::Error::from));
    match parsed {
        Ok(cfg) => {
            log::info!("[config] loaded overrides from #{}", constants::CONFIG_SCRIPT_ID);
            cfg
        }
        Err(e) => {
            log::warn!("[config] ignoring #{}: {e}", constants::CONFIG_SCRIPT_ID);
            FxConfig::default()
        }
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("fete-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    if document.body().is_none() {
        anyhow::bail!("no body");
    }

    styles::inject(&document);
    let config = load_config(&document);

    let cache = cache::ElementCache::resolve(&document);
    let inventory = cache.inventory();
    let seed = (js_sys::Math::random() * u64::MAX as f64) as u64;
    let controller = EffectsController::new(config, inventory, seed);
    let app: app::SharedApp = Rc::new(RefCell::new(app::App {
        controller,
        stage: stage::Stage::new(document.clone(), cache),
    }));

    events::wire_all(&app, &document);
    observer::wire_observers(&app);

    app::dispatch(&app, |fx, out| fx.initialize(out));

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        app: app.clone(),
        last_instant: Instant::now(),
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
