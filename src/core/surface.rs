//! Minimal 2D drawing vocabulary shared by every effect.
//!
//! Coordinates are CSS pixels; the browser surface applies the device pixel
//! ratio underneath.

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// `h` in degrees (wrapped), `s`/`l` in 0..1.
    pub fn hsla(h: f32, s: f32, l: f32, a: f32) -> Self {
        let h = h.rem_euclid(360.0) / 60.0;
        let s = s.clamp(0.0, 1.0);
        let l = l.clamp(0.0, 1.0);
        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = l - c / 2.0;
        let to_u8 = |v: f32| ((v + m).clamp(0.0, 1.0) * 255.0).round() as u8;
        Self {
            r: to_u8(r),
            g: to_u8(g),
            b: to_u8(b),
            a: a.clamp(0.0, 1.0),
        }
    }

    pub fn css(&self) -> String {
        format!("rgba({},{},{},{:.3})", self.r, self.g, self.b, self.a)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Blend {
    #[default]
    Normal,
    /// Additive ("lighter"), for glows.
    Additive,
}

pub trait Surface {
    /// Drawable size in CSS pixels.
    fn size(&self) -> (f64, f64);
    fn clear(&mut self, color: Color);
    /// Paint a translucent full-surface wash; leaves motion trails.
    fn fade(&mut self, color: Color);
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Color);
    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Color);
    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Color);
    fn set_blend(&mut self, blend: Blend);
}
