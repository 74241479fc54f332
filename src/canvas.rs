use crate::core::{Blend, Color, Surface};
use crate::dom;
use std::f64::consts::TAU;
use wasm_bindgen::JsCast;
use web_sys as web;

/// `Surface` over a 2D canvas context, drawing in CSS pixels.
pub struct CanvasSurface {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
    css_size: (f64, f64),
}

impl CanvasSurface {
    pub fn new(canvas: web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| anyhow::anyhow!("{:?}", e))?
            .ok_or_else(|| anyhow::anyhow!("2d context unavailable"))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        let mut surface = Self {
            canvas,
            ctx,
            css_size: (1.0, 1.0),
        };
        surface.sync_backing_size();
        Ok(surface)
    }

    pub fn canvas(&self) -> &web::HtmlCanvasElement {
        &self.canvas
    }

    /// Re-acquire the backing store at the current layout size. Resizing a
    /// canvas resets its context state, so the pixel-ratio transform is reapplied.
    pub fn sync_backing_size(&mut self) {
        self.css_size = dom::sync_canvas_backing_size(&self.canvas);
        let dpr = dom::device_pixel_ratio();
        _ = self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> (f64, f64) {
        self.css_size
    }

    fn clear(&mut self, color: Color) {
        let (w, h) = self.css_size;
        self.ctx.clear_rect(0.0, 0.0, w, h);
        self.fill_rect(0.0, 0.0, w, h, color);
    }

    fn fade(&mut self, color: Color) {
        let (w, h) = self.css_size;
        self.fill_rect(0.0, 0.0, w, h, color);
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Color) {
        self.ctx.set_fill_style_str(&color.css());
        self.ctx.fill_rect(x, y, w, h);
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Color) {
        self.ctx.set_fill_style_str(&color.css());
        self.ctx.begin_path();
        _ = self.ctx.arc(cx, cy, radius.max(0.0), 0.0, TAU);
        self.ctx.fill();
    }

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Color) {
        self.ctx.set_stroke_style_str(&color.css());
        self.ctx.set_line_width(width);
        self.ctx.begin_path();
        self.ctx.move_to(from.0, from.1);
        self.ctx.line_to(to.0, to.1);
        self.ctx.stroke();
    }

    fn set_blend(&mut self, blend: Blend) {
        let op = match blend {
            Blend::Normal => "source-over",
            Blend::Additive => "lighter",
        };
        _ = self.ctx.set_global_composite_operation(op);
    }
}
