//! Particle swarm circling a wandering attractor, drawn additively over a
//! fading background so each particle leaves a short comet trail.

use crate::core::{Blend, Color, FrameInput, Renderer, Surface};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const COUNT: usize = 260;
const PULL: f32 = 140.0;
// Fraction of velocity kept per 1/60 s
const DAMPING: f32 = 0.985;
const MAX_SPEED: f32 = 420.0;
const TRAIL: Color = Color::rgba(4, 6, 16, 0.18);

struct Particle {
    pos: Vec2,
    vel: Vec2,
    hue: f32,
    radius: f32,
}

pub struct ParticleSwarm {
    rng: StdRng,
    particles: Vec<Particle>,
    size: Vec2,
    time: f32,
}

impl ParticleSwarm {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            particles: Vec::new(),
            size: Vec2::ZERO,
            time: 0.0,
        }
    }

    pub fn boxed(seed: u64) -> Box<dyn Renderer> {
        Box::new(Self::new(seed))
    }

    fn attractor(&self) -> Vec2 {
        let t = self.time;
        let half = self.size * 0.5;
        half + Vec2::new((t * 0.7).cos() * half.x * 0.6, (t * 1.1).sin() * half.y * 0.6)
    }

    pub fn positions(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.particles.iter().map(|p| p.pos)
    }
}

impl Renderer for ParticleSwarm {
    fn init(&mut self, width: f64, height: f64) {
        self.size = Vec2::new(width as f32, height as f32).max(Vec2::ONE);
        let size = self.size;
        let rng = &mut self.rng;
        self.particles = (0..COUNT)
            .map(|_| Particle {
                pos: Vec2::new(rng.gen_range(0.0..size.x), rng.gen_range(0.0..size.y)),
                vel: Vec2::new(rng.gen_range(-40.0..40.0), rng.gen_range(-40.0..40.0)),
                hue: rng.gen_range(180.0..320.0),
                radius: rng.gen_range(0.8..2.4),
            })
            .collect();
    }

    /// Particles keep their motion; positions wrap into the new bounds.
    fn resize(&mut self, width: f64, height: f64) {
        if self.particles.is_empty() {
            self.init(width, height);
            return;
        }
        self.size = Vec2::new(width as f32, height as f32).max(Vec2::ONE);
        let size = self.size;
        for p in &mut self.particles {
            p.pos = wrap(p.pos, size);
        }
    }

    fn frame(&mut self, surface: &mut dyn Surface, input: &FrameInput) {
        let step = input.step() as f32;
        self.time += step;
        let target = self.attractor();
        let keep = DAMPING.powf(step * 60.0);
        let size = self.size;
        for p in &mut self.particles {
            let to = target - p.pos;
            let pull = to.normalize_or_zero() * PULL * (1.0 + to.length() / size.max_element());
            p.vel = ((p.vel + pull * step) * keep).clamp_length_max(MAX_SPEED);
            p.pos = wrap(p.pos + p.vel * step, size);
        }

        surface.set_blend(Blend::Normal);
        surface.fade(TRAIL);
        surface.set_blend(Blend::Additive);
        for p in &self.particles {
            let glow = (p.vel.length() / MAX_SPEED).clamp(0.2, 1.0);
            surface.fill_circle(
                p.pos.x as f64,
                p.pos.y as f64,
                p.radius as f64,
                Color::hsla(p.hue + self.time * 10.0, 0.85, 0.6, glow),
            );
        }
        surface.fill_circle(
            target.x as f64,
            target.y as f64,
            3.0,
            Color::rgba(255, 255, 255, 0.5),
        );
        surface.set_blend(Blend::Normal);
    }
}

/// Torus wrap into `[0, size)` on both axes.
#[inline]
pub fn wrap(p: Vec2, size: Vec2) -> Vec2 {
    Vec2::new(wrap_axis(p.x, size.x), wrap_axis(p.y, size.y))
}

#[inline]
fn wrap_axis(v: f32, size: f32) -> f32 {
    let w = v.rem_euclid(size);
    // A tiny negative rounds up to exactly `size` in f32.
    if w >= size {
        0.0
    } else {
        w
    }
}
