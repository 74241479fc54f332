//! Optional page controls: `#speed-slider` (range input) and `#auto-adjust` (checkbox).

use crate::app::App;
use crate::dom;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

const SPEED_SLIDER_ID: &str = "speed-slider";
const AUTO_ADJUST_ID: &str = "auto-adjust";

fn input_by_id(document: &web::Document, id: &str) -> Option<web::HtmlInputElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<web::HtmlInputElement>().ok())
}

pub fn wire(document: &web::Document, app: &Rc<RefCell<App>>) {
    let slider_app = app.clone();
    let slider_doc = document.clone();
    dom::add_element_listener(document, SPEED_SLIDER_ID, "input", move |_ev| {
        let Some(slider) = input_by_id(&slider_doc, SPEED_SLIDER_ID) else {
            return;
        };
        match slider.value().parse::<f32>() {
            Ok(v) => {
                if let Ok(mut a) = slider_app.try_borrow_mut() {
                    a.set_global_speed(v);
                }
            }
            Err(_) => log::warn!("[controls] bad slider value `{}`", slider.value()),
        }
    });

    let auto_app = app.clone();
    let auto_doc = document.clone();
    dom::add_element_listener(document, AUTO_ADJUST_ID, "change", move |_ev| {
        if let Some(checkbox) = input_by_id(&auto_doc, AUTO_ADJUST_ID) {
            if let Ok(mut a) = auto_app.try_borrow_mut() {
                a.set_auto_adjust(checkbox.checked());
            }
        }
    });
}

/// Reflect studio state back into the controls after keyboard changes.
pub fn sync(document: &web::Document, global_speed: f32, auto_adjust: bool) {
    if let Some(slider) = input_by_id(document, SPEED_SLIDER_ID) {
        slider.set_value(&format!("{:.2}", global_speed));
    }
    if let Some(checkbox) = input_by_id(document, AUTO_ADJUST_ID) {
        checkbox.set_checked(auto_adjust);
    }
}
