use crate::app::App;
use crate::core::{Environment, FrameTarget, HeapUsage, Runtime, SurfaceEvent};
use crate::dom;
use crate::events::DomListener;
use crate::frame::AnimationLoop;
use std::cell::RefCell;
use std::rc::Weak;
use wasm_bindgen::JsValue;
use web_sys as web;

/// Browser runtime: frame requests are rAF loops, listeners are DOM closures.
/// Callbacks reach the app through a weak handle and skip a frame if the app
/// is already borrowed.
pub struct WebRuntime {
    app: Weak<RefCell<App>>,
    canvas: web::HtmlCanvasElement,
}

impl WebRuntime {
    pub fn new(app: Weak<RefCell<App>>, canvas: web::HtmlCanvasElement) -> Self {
        Self { app, canvas }
    }
}

impl Runtime for WebRuntime {
    type Frames = AnimationLoop;
    type Listener = DomListener;

    fn request_frames(&mut self, target: FrameTarget) -> AnimationLoop {
        let app = self.app.clone();
        AnimationLoop::start(move |ts| {
            let Some(app) = app.upgrade() else {
                return false;
            };
            // Busy means another callback holds the app; try again next frame.
            app.try_borrow_mut()
                .map(|mut a| a.on_frame(target, ts))
                .unwrap_or(true)
        })
    }

    fn cancel_frames(&mut self, frames: AnimationLoop) {
        drop(frames);
    }

    fn listen(&mut self, event: SurfaceEvent) -> Option<DomListener> {
        let app = self.app.clone();
        let handler = move |_ev: web::Event| {
            if let Some(app) = app.upgrade() {
                match app.try_borrow_mut() {
                    Ok(mut a) => a.on_event(event),
                    Err(_) => log::warn!("[events] app busy, dropped {:?}", event),
                };
            }
        };
        match event {
            SurfaceEvent::Resize => {
                let window = web::window()?;
                DomListener::attach(&window, "resize", handler)
            }
            SurfaceEvent::PointerEnter => {
                DomListener::attach(&self.canvas, "pointerenter", handler)
            }
            SurfaceEvent::PointerLeave => {
                DomListener::attach(&self.canvas, "pointerleave", handler)
            }
        }
    }

    fn unlisten(&mut self, listener: DomListener) {
        listener.remove();
    }
}

impl Environment for WebRuntime {
    /// `performance.memory` is Chromium-only and non-standard.
    fn heap_usage(&self) -> Option<HeapUsage> {
        let perf = web::window()?.performance()?;
        let memory = js_sys::Reflect::get(&perf, &JsValue::from_str("memory")).ok()?;
        if memory.is_undefined() || memory.is_null() {
            return None;
        }
        let used = number_prop(&memory, "usedJSHeapSize")?;
        let total = number_prop(&memory, "totalJSHeapSize")?;
        Some(HeapUsage::from_bytes(used, total))
    }

    fn logical_cores(&self) -> Option<u32> {
        let navigator = web::window()?.navigator();
        number_prop(&navigator, "hardwareConcurrency")
            .filter(|n| *n >= 1.0)
            .map(|n| n as u32)
    }

    fn device_pixel_ratio(&self) -> f64 {
        dom::device_pixel_ratio()
    }
}

fn number_prop(obj: &JsValue, key: &str) -> Option<f64> {
    js_sys::Reflect::get(obj, &JsValue::from_str(key))
        .ok()?
        .as_f64()
        .filter(|v| v.is_finite())
}
