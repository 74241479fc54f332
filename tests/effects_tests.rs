// Host-side tests for the shipped effects: they draw, stay on the surface
// and follow their resize policies.

mod common;

use common::RecordingSurface;
use effect_studio::core::*;
use effect_studio::effects::particles::{wrap, ParticleSwarm};
use effect_studio::effects::plasma::{plasma_wave, PlasmaWaves};
use effect_studio::effects::{self, flow_field::FlowField, fractal_tree::FractalTree};
use glam::Vec2;

const STEP: FrameInput = FrameInput {
    dt_sec: 1.0 / 60.0,
    speed: 1.0,
};

#[test]
fn every_shipped_effect_draws() {
    for d in effects::catalogue() {
        let mut r = (d.factory)(3);
        r.init(400.0, 300.0);
        let mut surf = RecordingSurface::new(400.0, 300.0);
        for _ in 0..3 {
            r.frame(&mut surf, &STEP);
        }
        assert!(surf.draw_calls() > 0, "{} drew nothing", d.name);
        r.release();
    }
}

#[test]
fn particles_wrap_into_a_smaller_surface() {
    let mut p = ParticleSwarm::new(5);
    p.init(800.0, 600.0);
    let mut surf = RecordingSurface::new(800.0, 600.0);
    for _ in 0..30 {
        p.frame(&mut surf, &STEP);
    }
    p.resize(200.0, 100.0);
    for pos in p.positions() {
        assert!((0.0..200.0).contains(&pos.x), "{:?}", pos);
        assert!((0.0..100.0).contains(&pos.y), "{:?}", pos);
    }
    assert_eq!(p.positions().count(), 260);
}

#[test]
fn wrap_stays_below_the_upper_bound() {
    let size = Vec2::new(100.0, 50.0);
    let p = wrap(Vec2::new(-1e-7, -1e-7), size);
    assert!(p.x < size.x && p.y < size.y, "{:?}", p);
    assert_eq!(wrap(Vec2::new(100.0, 50.0), size), Vec2::ZERO);
    assert_eq!(wrap(Vec2::new(-25.0, 75.0), size), Vec2::new(75.0, 25.0));
}

#[test]
fn flow_field_clamps_into_a_smaller_surface() {
    let mut f = FlowField::new(5);
    f.init(800.0, 600.0);
    f.resize(120.0, 80.0);
    for pos in f.positions() {
        assert!((0.0..=120.0).contains(&pos.x), "{:?}", pos);
        assert!((0.0..=80.0).contains(&pos.y), "{:?}", pos);
    }

    let mut surf = RecordingSurface::new(120.0, 80.0);
    for _ in 0..120 {
        f.frame(&mut surf, &STEP);
    }
    for pos in f.positions() {
        assert!((0.0..=120.0).contains(&pos.x), "{:?}", pos);
        assert!((0.0..=80.0).contains(&pos.y), "{:?}", pos);
    }
}

#[test]
fn resize_before_init_initializes() {
    let mut p = ParticleSwarm::new(1);
    p.resize(50.0, 50.0);
    assert_eq!(p.positions().count(), 260);

    let mut f = FlowField::new(1);
    f.resize(50.0, 50.0);
    assert!(f.positions().count() > 0);
}

#[test]
fn plasma_wave_stays_in_unit_range() {
    for i in 0..40 {
        for j in 0..40 {
            for t in [0.0, 1.3, 17.0, 250.5] {
                let v = plasma_wave(i as f64 / 39.0, j as f64 / 39.0, t);
                assert!((0.0..=1.0).contains(&v), "{} at ({}, {}, {})", v, i, j, t);
            }
        }
    }
}

#[test]
fn plasma_grid_follows_the_surface() {
    let mut p = PlasmaWaves::new(0);
    p.init(140.0, 70.0);
    assert_eq!(p.grid(), (10, 5));
    p.resize(141.0, 14.0);
    assert_eq!(p.grid(), (11, 1));

    let mut surf = RecordingSurface::new(141.0, 14.0);
    p.frame(&mut surf, &STEP);
    assert_eq!(surf.rects, 11);
}

#[test]
fn fractal_tree_draws_every_branch() {
    let mut t = FractalTree::new(9);
    t.init(300.0, 300.0);
    let mut surf = RecordingSurface::new(300.0, 300.0);
    t.frame(&mut surf, &STEP);
    assert_eq!(surf.lines, (1 << 9) - 1);
    assert_eq!(surf.clears, 1);
}

#[test]
fn zero_speed_freezes_motion() {
    let mut p = ParticleSwarm::new(2);
    p.init(300.0, 300.0);
    let before: Vec<_> = p.positions().collect();
    let mut surf = RecordingSurface::new(300.0, 300.0);
    let frozen = FrameInput {
        speed: 0.0,
        ..STEP
    };
    p.frame(&mut surf, &frozen);
    let after: Vec<_> = p.positions().collect();
    assert_eq!(before, after);
}
