//! Effect picker: one button per registry entry, grouped by category.

use crate::app::App;
use crate::core::Registry;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

const GALLERY_ID: &str = "gallery";

pub struct Gallery {
    buttons: Vec<(&'static str, web::Element)>,
}

impl Gallery {
    /// Build the picker into `#gallery`; `None` when the page has no slot for it.
    pub fn build(document: &web::Document, registry: &Registry) -> anyhow::Result<Option<Self>> {
        let Some(root) = document.get_element_by_id(GALLERY_ID) else {
            return Ok(None);
        };
        let js = |e: wasm_bindgen::JsValue| anyhow::anyhow!("{:?}", e);
        root.set_inner_html("");
        let mut buttons = Vec::with_capacity(registry.len());
        for category in registry.categories() {
            let section = document.create_element("section").map_err(js)?;
            let heading = document.create_element("h3").map_err(js)?;
            heading.set_text_content(Some(category.name));
            section.append_child(&heading).map_err(js)?;
            for &name in &category.effects {
                let button = document.create_element("button").map_err(js)?;
                button.set_text_content(Some(name));
                button.set_attribute("data-effect", name).map_err(js)?;
                section.append_child(&button).map_err(js)?;
                buttons.push((name, button));
            }
            root.append_child(&section).map_err(js)?;
        }
        log::info!(
            "[gallery] {} effects in {} categories",
            buttons.len(),
            registry.categories().len()
        );
        Ok(Some(Self { buttons }))
    }

    /// Click selects; enter/leave drives the hover preview. App-lifetime listeners.
    pub fn wire(&self, app: &Rc<RefCell<App>>) {
        for (name, button) in &self.buttons {
            let name: &'static str = *name;
            wire(button, "click", app, move |a| a.select(name));
            wire(button, "mouseenter", app, move |a| a.set_hovered(Some(name)));
            wire(button, "mouseleave", app, |a| a.set_hovered(None));
        }
    }

    pub fn sync(&self, active: Option<&str>, hovered: Option<&str>) {
        for (name, button) in &self.buttons {
            let cl = button.class_list();
            _ = cl.toggle_with_force("active", Some(*name) == active);
            _ = cl.toggle_with_force("hover", Some(*name) == hovered);
        }
    }
}

fn wire(
    el: &web::Element,
    event: &str,
    app: &Rc<RefCell<App>>,
    mut action: impl FnMut(&mut App) + 'static,
) {
    let app = app.clone();
    let closure = Closure::wrap(Box::new(move |_ev: web::Event| {
        if let Ok(mut a) = app.try_borrow_mut() {
            action(&mut a);
        };
    }) as Box<dyn FnMut(_)>);
    _ = el.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}
