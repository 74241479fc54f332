//! Canvas effect studio: a gallery of animated effects sharing one canvas,
//! with a frame-timing sampler and a speed governor that slows animations
//! down when the device can't keep up.
//!
//! `core` and `effects` are platform neutral and build on any target; the
//! browser front-end below only exists on `wasm32`.

pub mod core;
pub mod effects;

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
pub mod canvas;
#[cfg(target_arch = "wasm32")]
mod controls;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod events;
#[cfg(target_arch = "wasm32")]
mod frame;
#[cfg(target_arch = "wasm32")]
mod gallery;
#[cfg(target_arch = "wasm32")]
mod overlay;
#[cfg(target_arch = "wasm32")]
mod runtime;

#[cfg(target_arch = "wasm32")]
pub use web_entry::start;

#[cfg(target_arch = "wasm32")]
mod web_entry {
    use crate::app::App;
    use crate::core::StudioConfig;
    use crate::{controls, dom, events};
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::spawn_local;
    use web_sys as web;

    #[wasm_bindgen(start)]
    pub fn start() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let (config, errors) = StudioConfig::from_query(&dom::location_search());
        console_log::init_with_level(config.log_level).ok();
        log::info!("effect-studio starting");
        for e in &errors {
            log::warn!("[config] {}", e);
        }

        spawn_local(async move {
            if let Err(e) = init(config).await {
                log::error!("init error: {:?}", e);
            }
        });
        Ok(())
    }

    async fn init(config: StudioConfig) -> anyhow::Result<()> {
        let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| anyhow::anyhow!("no document"))?;

        let canvas: web::HtmlCanvasElement = document
            .get_element_by_id("studio-canvas")
            .ok_or_else(|| anyhow::anyhow!("missing #studio-canvas"))?
            .dyn_into::<web::HtmlCanvasElement>()
            .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

        let seed = config.seed.unwrap_or_else(rand::random);
        log::info!("[init] seed={}", seed);

        let app = App::create(document.clone(), canvas, &config, seed)?;
        if let Some(g) = app.borrow().gallery() {
            g.wire(&app);
        }
        controls::wire(&document, &app);
        events::wire_global_keydown(app.clone());

        app.borrow_mut().start();
        Ok(())
    }
}
