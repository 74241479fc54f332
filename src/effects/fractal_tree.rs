//! Recursive branching tree swaying in a breeze. Runs at a fixed rate and
//! ignores the speed governor.

use crate::core::{Color, FrameInput, Renderer, Surface};
use glam::Vec2;
use std::f32::consts::FRAC_PI_2;

const DEPTH: u32 = 9;
const SPREAD: f32 = 0.42;
const SHRINK: f32 = 0.72;

pub struct FractalTree {
    time: f32,
    size: Vec2,
    /// Per-instance phase so two mounts don't sway in lockstep.
    phase: f32,
}

impl FractalTree {
    pub fn new(seed: u64) -> Self {
        Self {
            time: 0.0,
            size: Vec2::ONE,
            phase: (seed % 628) as f32 / 100.0,
        }
    }

    pub fn boxed(seed: u64) -> Box<dyn Renderer> {
        Box::new(Self::new(seed))
    }

    fn branch(&self, surface: &mut dyn Surface, start: Vec2, angle: f32, len: f32, depth: u32) {
        let wobble = (self.time * 0.9 + self.phase + depth as f32 * 0.6).sin();
        let sway = wobble * 0.06 * (DEPTH - depth + 1) as f32;
        let dir = Vec2::from_angle(angle + sway);
        // Screen y grows downward.
        let end = start + Vec2::new(dir.x, -dir.y) * len;
        let t = depth as f32 / DEPTH as f32;
        surface.stroke_line(
            (start.x as f64, start.y as f64),
            (end.x as f64, end.y as f64),
            (depth as f64 * 0.9).max(0.6),
            Color::hsla(30.0 + (1.0 - t) * 90.0, 0.6, 0.3 + 0.35 * (1.0 - t), 0.9),
        );
        if depth > 1 {
            self.branch(surface, end, angle + SPREAD, len * SHRINK, depth - 1);
            self.branch(surface, end, angle - SPREAD, len * SHRINK, depth - 1);
        }
    }
}

impl Renderer for FractalTree {
    fn init(&mut self, width: f64, height: f64) {
        self.size = Vec2::new(width as f32, height as f32).max(Vec2::ONE);
    }

    fn frame(&mut self, surface: &mut dyn Surface, input: &FrameInput) {
        self.time += input.step() as f32;
        surface.clear(Color::rgb(8, 10, 14));
        let root = Vec2::new(self.size.x * 0.5, self.size.y * 0.95);
        let trunk = self.size.y * 0.24;
        self.branch(surface, root, FRAC_PI_2, trunk, DEPTH);
    }
}
