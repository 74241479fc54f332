use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type Tick = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// A `requestAnimationFrame` loop that reschedules itself after every
/// invocation until its callback returns `false` or the loop is dropped.
///
/// Dropping cancels the pending frame and frees the closure, so a dropped
/// loop never runs again.
pub struct AnimationLoop {
    raf_id: Rc<Cell<Option<i32>>>,
    tick: Tick,
}

impl AnimationLoop {
    pub fn start(mut on_frame: impl FnMut(f64) -> bool + 'static) -> Self {
        let raf_id: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
        let tick: Tick = Rc::new(RefCell::new(None));
        // Weak so the closure doesn't keep itself alive.
        let tick_weak = Rc::downgrade(&tick);
        let raf_for_tick = raf_id.clone();
        *tick.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
            raf_for_tick.set(None);
            if !on_frame(ts) {
                return;
            }
            if let Some(tick) = tick_weak.upgrade() {
                if let Some(cb) = tick.borrow().as_ref() {
                    raf_for_tick.set(request_frame(cb));
                };
            }
        }) as Box<dyn FnMut(f64)>));
        if let Some(cb) = tick.borrow().as_ref() {
            raf_id.set(request_frame(cb));
        }
        Self { raf_id, tick }
    }
}

impl Drop for AnimationLoop {
    fn drop(&mut self) {
        if let Some(id) = self.raf_id.take() {
            if let Some(w) = web::window() {
                _ = w.cancel_animation_frame(id);
            }
        }
        self.tick.borrow_mut().take();
    }
}

fn request_frame(cb: &Closure<dyn FnMut(f64)>) -> Option<i32> {
    let w = web::window()?;
    match w.request_animation_frame(cb.as_ref().unchecked_ref()) {
        Ok(id) => Some(id),
        Err(e) => {
            log::error!("[frame] requestAnimationFrame failed: {:?}", e);
            None
        }
    }
}
