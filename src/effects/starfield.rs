//! Stars flying toward the viewer, projected with a simple 1/z divide and
//! drawn as streaks from their previous projected position.

use crate::core::{Color, FrameInput, Renderer, Surface};
use glam::{Vec2, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const COUNT: usize = 420;
const NEAR: f32 = 0.02;
// Depth units per second at speed 1
const WARP: f32 = 0.35;

pub struct WarpStarfield {
    rng: StdRng,
    stars: Vec<Vec3>,
    size: Vec2,
}

impl WarpStarfield {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            stars: Vec::new(),
            size: Vec2::ONE,
        }
    }

    pub fn boxed(seed: u64) -> Box<dyn Renderer> {
        Box::new(Self::new(seed))
    }

    fn spawn(rng: &mut StdRng, z: f32) -> Vec3 {
        Vec3::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0), z)
    }

    fn project(&self, s: Vec3) -> Vec2 {
        let half = self.size * 0.5;
        half + Vec2::new(s.x, s.y) / s.z * half.max_element()
    }
}

impl Renderer for WarpStarfield {
    fn init(&mut self, width: f64, height: f64) {
        self.size = Vec2::new(width as f32, height as f32).max(Vec2::ONE);
        let rng = &mut self.rng;
        self.stars = (0..COUNT)
            .map(|_| {
                let z = rng.gen_range(NEAR..1.0);
                Self::spawn(rng, z)
            })
            .collect();
    }

    /// Star space is resolution independent; only the projection changes.
    fn resize(&mut self, width: f64, height: f64) {
        if self.stars.is_empty() {
            self.init(width, height);
        } else {
            self.size = Vec2::new(width as f32, height as f32).max(Vec2::ONE);
        }
    }

    fn frame(&mut self, surface: &mut dyn Surface, input: &FrameInput) {
        let dz = WARP * input.step() as f32;
        surface.clear(Color::rgb(2, 2, 10));
        for i in 0..self.stars.len() {
            let before = self.stars[i];
            let mut after = before;
            after.z -= dz;
            let from = self.project(before);
            let to = self.project(after);
            let off_screen = to.x < 0.0 || to.y < 0.0 || to.x > self.size.x || to.y > self.size.y;
            if after.z <= NEAR || off_screen {
                self.stars[i] = Self::spawn(&mut self.rng, 1.0);
                continue;
            }
            self.stars[i] = after;
            let nearness = 1.0 - after.z;
            let color = Color::rgba(200, 220, 255, nearness.clamp(0.15, 1.0));
            surface.stroke_line(
                (from.x as f64, from.y as f64),
                (to.x as f64, to.y as f64),
                (0.5 + 2.0 * nearness) as f64,
                color,
            );
        }
    }
}
