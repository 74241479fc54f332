//! Plasma from six interfering sine waves, rendered as a coarse grid of cells.

use crate::core::{Color, FrameInput, Renderer, Surface};

const CELL_PX: f64 = 14.0;

/// Wave intensity in `[0, 1]` at normalized coordinates.
#[inline]
pub fn plasma_wave(nx: f64, ny: f64, time: f64) -> f64 {
    let x = nx * 6.0;
    let y = ny * 6.0;
    let v1 = (x * 1.5 + time).sin();
    let v2 = (y * 1.8 + time * 0.8).sin();
    let v3 = ((x + y) * 1.2 + time * 0.6).sin();
    let v4 = ((x * x + y * y).sqrt() * 2.0 - time * 1.2).sin();
    let v5 = (((x - 3.0).powi(2) + (y - 3.0).powi(2)).sqrt() * 1.8 + time).cos();
    let v6 = ((x * 2.0).sin() * (y * 2.0).cos() + time * 0.5).sin();
    let value = (v1 + v2 + v3 + v4 + v5 + v6) / 6.0;
    let breath = 0.85 + 0.15 * (time * 0.3).sin();
    ((value * breath + 1.0) / 2.0).clamp(0.0, 1.0)
}

pub struct PlasmaWaves {
    time: f64,
    cols: usize,
    rows: usize,
    cell_w: f64,
    cell_h: f64,
}

impl PlasmaWaves {
    pub fn new(_seed: u64) -> Self {
        Self {
            time: 0.0,
            cols: 1,
            rows: 1,
            cell_w: CELL_PX,
            cell_h: CELL_PX,
        }
    }

    pub fn boxed(seed: u64) -> Box<dyn Renderer> {
        Box::new(Self::new(seed))
    }

    pub fn grid(&self) -> (usize, usize) {
        (self.cols, self.rows)
    }
}

impl Renderer for PlasmaWaves {
    fn init(&mut self, width: f64, height: f64) {
        self.cols = (width / CELL_PX).ceil().max(1.0) as usize;
        self.rows = (height / CELL_PX).ceil().max(1.0) as usize;
        self.cell_w = width.max(1.0) / self.cols as f64;
        self.cell_h = height.max(1.0) / self.rows as f64;
    }

    /// Keeps the clock so the pattern doesn't jump; only the grid is rebuilt.
    fn resize(&mut self, width: f64, height: f64) {
        let time = self.time;
        self.init(width, height);
        self.time = time;
    }

    fn frame(&mut self, surface: &mut dyn Surface, input: &FrameInput) {
        self.time += input.step();
        let hue_drift = (self.time * 12.0) as f32;
        for row in 0..self.rows {
            let ny = (row as f64 + 0.5) / self.rows as f64;
            for col in 0..self.cols {
                let nx = (col as f64 + 0.5) / self.cols as f64;
                let v = plasma_wave(nx, ny, self.time) as f32;
                surface.fill_rect(
                    col as f64 * self.cell_w,
                    row as f64 * self.cell_h,
                    // Overdraw by a pixel to hide seams between cells.
                    self.cell_w + 1.0,
                    self.cell_h + 1.0,
                    Color::hsla(v * 300.0 + hue_drift, 0.8, 0.2 + 0.4 * v, 1.0),
                );
            }
        }
    }
}
