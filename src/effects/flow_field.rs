//! Particles advected through a slowly turning sine/cosine vector field.
//! Animates only while the pointer is over the canvas.

use crate::core::{Color, FrameInput, Renderer, Surface};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;

const COUNT: usize = 900;
const FLOW_SPEED: f32 = 70.0;
const FIELD_SCALE: f32 = 0.004;
const LIFETIME_SEC: (f32, f32) = (2.0, 7.0);

struct Tracer {
    pos: Vec2,
    age: f32,
    life: f32,
}

pub struct FlowField {
    rng: StdRng,
    tracers: Vec<Tracer>,
    size: Vec2,
    time: f32,
}

impl FlowField {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            tracers: Vec::new(),
            size: Vec2::ONE,
            time: 0.0,
        }
    }

    pub fn boxed(seed: u64) -> Box<dyn Renderer> {
        Box::new(Self::new(seed))
    }

    pub fn positions(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.tracers.iter().map(|t| t.pos)
    }

    fn spawn(rng: &mut StdRng, size: Vec2) -> Tracer {
        Tracer {
            pos: Vec2::new(rng.gen_range(0.0..size.x), rng.gen_range(0.0..size.y)),
            age: 0.0,
            life: rng.gen_range(LIFETIME_SEC.0..LIFETIME_SEC.1),
        }
    }

    fn angle_at(&self, p: Vec2) -> f32 {
        let a = (p.x * FIELD_SCALE + self.time * 0.3).sin();
        let b = (p.y * FIELD_SCALE - self.time * 0.2).cos();
        a * b * TAU
    }
}

impl Renderer for FlowField {
    fn init(&mut self, width: f64, height: f64) {
        self.size = Vec2::new(width as f32, height as f32).max(Vec2::ONE);
        let size = self.size;
        let rng = &mut self.rng;
        self.tracers = (0..COUNT).map(|_| Self::spawn(rng, size)).collect();
    }

    /// Tracers keep flowing; anything now outside is clamped to the edge.
    fn resize(&mut self, width: f64, height: f64) {
        if self.tracers.is_empty() {
            self.init(width, height);
            return;
        }
        self.size = Vec2::new(width as f32, height as f32).max(Vec2::ONE);
        let size = self.size;
        for t in &mut self.tracers {
            t.pos = t.pos.clamp(Vec2::ZERO, size);
        }
    }

    fn frame(&mut self, surface: &mut dyn Surface, input: &FrameInput) {
        let step = input.step() as f32;
        self.time += step;
        surface.fade(Color::rgba(0, 8, 14, 0.08));
        for i in 0..self.tracers.len() {
            let from = self.tracers[i].pos;
            let angle = self.angle_at(from);
            let to = from + Vec2::from_angle(angle) * FLOW_SPEED * step;
            let t = &mut self.tracers[i];
            t.age += step;
            let outside = to.x < 0.0 || to.y < 0.0 || to.x > self.size.x || to.y > self.size.y;
            if outside || t.age > t.life {
                *t = Self::spawn(&mut self.rng, self.size);
                continue;
            }
            t.pos = to;
            let fade_in = (t.age / 0.5).min(1.0);
            let fade_out = ((t.life - t.age) / 0.5).min(1.0);
            surface.stroke_line(
                (from.x as f64, from.y as f64),
                (to.x as f64, to.y as f64),
                1.0,
                Color::hsla(170.0 + angle.to_degrees() * 0.2, 0.7, 0.6, 0.6 * fade_in * fade_out),
            );
        }
    }
}
