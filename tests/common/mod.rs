// Shared host-side doubles: a runtime that only schedules when the test pumps
// it, a surface that counts draw calls, and probe renderers.

#![allow(dead_code)]

use effect_studio::core::*;
use std::cell::RefCell;
use std::collections::HashMap;

pub struct ManualRuntime {
    next_id: u32,
    pub live_frames: Vec<(u32, FrameTarget)>,
    pub live_listeners: Vec<(u32, SurfaceEvent)>,
    pub frame_requests: usize,
    pub heap: Option<HeapUsage>,
    pub cores: Option<u32>,
    pub dpr: f64,
}

impl Default for ManualRuntime {
    fn default() -> Self {
        Self {
            next_id: 0,
            live_frames: Vec::new(),
            live_listeners: Vec::new(),
            frame_requests: 0,
            heap: None,
            cores: None,
            dpr: 1.0,
        }
    }
}

impl ManualRuntime {
    pub fn live(&self, target: FrameTarget) -> usize {
        self.live_frames.iter().filter(|(_, t)| *t == target).count()
    }

    pub fn listening(&self, event: SurfaceEvent) -> usize {
        self.live_listeners.iter().filter(|(_, e)| *e == event).count()
    }

    fn id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }
}

impl Runtime for ManualRuntime {
    type Frames = u32;
    type Listener = u32;

    fn request_frames(&mut self, target: FrameTarget) -> u32 {
        let id = self.id();
        self.frame_requests += 1;
        self.live_frames.push((id, target));
        id
    }

    fn cancel_frames(&mut self, frames: u32) {
        self.live_frames.retain(|(id, _)| *id != frames);
    }

    fn listen(&mut self, event: SurfaceEvent) -> Option<u32> {
        let id = self.id();
        self.live_listeners.push((id, event));
        Some(id)
    }

    fn unlisten(&mut self, listener: u32) {
        self.live_listeners.retain(|(id, _)| *id != listener);
    }
}

impl Environment for ManualRuntime {
    fn heap_usage(&self) -> Option<HeapUsage> {
        self.heap
    }

    fn logical_cores(&self) -> Option<u32> {
        self.cores
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.dpr
    }
}

/// Fixed environment for sampler-only tests.
pub struct FixedEnv {
    pub heap: Option<HeapUsage>,
    pub cores: Option<u32>,
    pub dpr: f64,
}

impl Default for FixedEnv {
    fn default() -> Self {
        Self {
            heap: None,
            cores: None,
            dpr: 1.0,
        }
    }
}

impl Environment for FixedEnv {
    fn heap_usage(&self) -> Option<HeapUsage> {
        self.heap
    }

    fn logical_cores(&self) -> Option<u32> {
        self.cores
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.dpr
    }
}

#[derive(Default)]
pub struct RecordingSurface {
    pub width: f64,
    pub height: f64,
    pub clears: usize,
    pub fades: usize,
    pub rects: usize,
    pub circles: usize,
    pub lines: usize,
    pub blend: Blend,
    /// Every coordinate passed in, for bounds checks.
    pub points: Vec<(f64, f64)>,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn draw_calls(&self) -> usize {
        self.clears + self.fades + self.rects + self.circles + self.lines
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn clear(&mut self, _color: Color) {
        self.clears += 1;
    }

    fn fade(&mut self, _color: Color) {
        self.fades += 1;
    }

    fn fill_rect(&mut self, x: f64, y: f64, _w: f64, _h: f64, _color: Color) {
        self.rects += 1;
        self.points.push((x, y));
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, _radius: f64, _color: Color) {
        self.circles += 1;
        self.points.push((cx, cy));
    }

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), _width: f64, _color: Color) {
        self.lines += 1;
        self.points.push(from);
        self.points.push(to);
    }

    fn set_blend(&mut self, blend: Blend) {
        self.blend = blend;
    }
}

// ---------------- Probe renderers ----------------

thread_local! {
    static DRAWS: RefCell<HashMap<&'static str, usize>> = RefCell::new(HashMap::new());
    static RELEASES: RefCell<HashMap<&'static str, usize>> = RefCell::new(HashMap::new());
    static SIZES: RefCell<HashMap<&'static str, (f64, f64)>> = RefCell::new(HashMap::new());
    static SPEEDS: RefCell<HashMap<&'static str, f32>> = RefCell::new(HashMap::new());
}

/// Counters are per thread; clear them so tests sharing a thread stay independent.
pub fn reset_probes() {
    DRAWS.with(|d| d.borrow_mut().clear());
    RELEASES.with(|d| d.borrow_mut().clear());
    SIZES.with(|d| d.borrow_mut().clear());
    SPEEDS.with(|d| d.borrow_mut().clear());
}

pub fn draws(name: &str) -> usize {
    DRAWS.with(|d| d.borrow().get(name).copied().unwrap_or(0))
}

pub fn releases(name: &str) -> usize {
    RELEASES.with(|d| d.borrow().get(name).copied().unwrap_or(0))
}

pub fn last_size(name: &str) -> Option<(f64, f64)> {
    SIZES.with(|d| d.borrow().get(name).copied())
}

pub fn last_speed(name: &str) -> Option<f32> {
    SPEEDS.with(|d| d.borrow().get(name).copied())
}

pub struct Probe {
    name: &'static str,
}

impl Renderer for Probe {
    fn init(&mut self, width: f64, height: f64) {
        SIZES.with(|d| d.borrow_mut().insert(self.name, (width, height)));
    }

    fn frame(&mut self, surface: &mut dyn Surface, input: &FrameInput) {
        DRAWS.with(|d| *d.borrow_mut().entry(self.name).or_insert(0) += 1);
        SPEEDS.with(|d| d.borrow_mut().insert(self.name, input.speed));
        surface.fill_rect(0.0, 0.0, 1.0, 1.0, Color::BLACK);
    }

    fn release(&mut self) {
        RELEASES.with(|d| *d.borrow_mut().entry(self.name).or_insert(0) += 1);
    }
}

fn probe_a(_seed: u64) -> Box<dyn Renderer> {
    Box::new(Probe { name: "Probe A" })
}

fn probe_b(_seed: u64) -> Box<dyn Renderer> {
    Box::new(Probe { name: "Probe B" })
}

fn probe_hover(_seed: u64) -> Box<dyn Renderer> {
    Box::new(Probe { name: "Probe Hover" })
}

fn probe_fixed(_seed: u64) -> Box<dyn Renderer> {
    Box::new(Probe { name: "Probe Fixed" })
}

/// "Probe A" is first and therefore the fallback.
pub fn probe_registry() -> Registry {
    Registry::new(vec![
        EffectDescriptor {
            name: "Probe A",
            category: "Probes",
            factory: probe_a,
            hover_gated: false,
            follows_speed: true,
        },
        EffectDescriptor {
            name: "Probe B",
            category: "Probes",
            factory: probe_b,
            hover_gated: false,
            follows_speed: true,
        },
        EffectDescriptor {
            name: "Probe Hover",
            category: "Gated",
            factory: probe_hover,
            hover_gated: true,
            follows_speed: true,
        },
        EffectDescriptor {
            name: "Probe Fixed",
            category: "Probes",
            factory: probe_fixed,
            hover_gated: false,
            follows_speed: false,
        },
    ])
    .expect("probe registry")
}

/// Drive every live renderer frame request once at `now_ms`, like one rAF tick.
pub fn pump_host(
    host: &mut EffectHost<ManualRuntime>,
    runtime: &mut ManualRuntime,
    surface: &mut RecordingSurface,
    now_ms: f64,
    speed: f32,
) {
    let live: Vec<(u32, FrameTarget)> = runtime.live_frames.clone();
    for (id, target) in live {
        if target == FrameTarget::Renderer && !host.frame(now_ms, surface, speed) {
            runtime.cancel_frames(id);
        }
    }
}

/// One display refresh for the whole studio; requests that decline to continue stop.
pub fn pump_studio(studio: &mut Studio<ManualRuntime>, surface: &mut RecordingSurface, now_ms: f64) {
    let live: Vec<(u32, FrameTarget)> = studio.runtime().live_frames.clone();
    for (id, target) in live {
        if !studio.on_frame(target, now_ms, surface) {
            studio.runtime_mut().cancel_frames(id);
        }
    }
}
