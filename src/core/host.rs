//! Effect host: owns the one mounted renderer and its runtime resources.
//!
//! Lifecycle per mount: build the renderer, size it to the surface, hold a
//! frame request and give it back to the runtime before anything else is
//! mounted. Pointer presence is host state, not mount state, so a hover-gated
//! effect selected under a resting pointer starts animating at once.

use crate::core::constants::MAX_FRAME_DT_SEC;
use crate::core::registry::{EffectDescriptor, Registry};
use crate::core::runtime::{FrameTarget, Runtime, SurfaceEvent};
use crate::core::surface::Surface;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameInput {
    /// Wall-clock step in seconds, clamped; not yet scaled by `speed`.
    pub dt_sec: f64,
    pub speed: f32,
}

impl FrameInput {
    /// Simulation step: the wall-clock step scaled by the speed multiplier.
    #[inline]
    pub fn step(&self) -> f64 {
        self.dt_sec * self.speed as f64
    }
}

pub trait Renderer {
    /// Build initial state for a surface of this size.
    fn init(&mut self, width: f64, height: f64);

    /// Default: rebuild from scratch.
    fn resize(&mut self, width: f64, height: f64) {
        self.init(width, height);
    }

    fn frame(&mut self, surface: &mut dyn Surface, input: &FrameInput);

    /// Called once on unmount, after the host has released its frame request.
    fn release(&mut self) {}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackState {
    Stopped,
    Playing,
    Paused,
}

struct Mounted<R: Runtime> {
    descriptor: EffectDescriptor,
    renderer: Box<dyn Renderer>,
    frames: Option<R::Frames>,
    last_ts: Option<f64>,
}

pub struct EffectHost<R: Runtime> {
    registry: Registry,
    state: PlaybackState,
    mounted: Option<Mounted<R>>,
    hovered: Option<&'static str>,
    pointer_inside: bool,
    rng: StdRng,
}

impl<R: Runtime> EffectHost<R> {
    pub fn new(registry: Registry, seed: u64) -> Self {
        Self {
            registry,
            state: PlaybackState::Stopped,
            mounted: None,
            hovered: None,
            pointer_inside: false,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn active(&self) -> Option<&EffectDescriptor> {
        self.mounted.as_ref().map(|m| &m.descriptor)
    }

    pub fn hovered(&self) -> Option<&'static str> {
        self.hovered
    }

    /// True while the mounted renderer holds a frame request.
    pub fn is_running(&self) -> bool {
        self.mounted.as_ref().is_some_and(|m| m.frames.is_some())
    }

    /// Mount `name` (or the default effect when unknown) and start playing.
    /// Whatever was mounted before is fully released first.
    pub fn select(&mut self, name: &str, size: (f64, f64), runtime: &mut R) -> &'static str {
        self.unmount(runtime);
        let descriptor = *self.registry.resolve(name);
        let mut renderer = (descriptor.factory)(self.rng.gen());
        renderer.init(size.0, size.1);
        self.mounted = Some(Mounted {
            descriptor,
            renderer,
            frames: None,
            last_ts: None,
        });
        self.state = PlaybackState::Playing;
        self.sync_frames(runtime);
        log::info!(
            "[host] mounted {} ({}){}",
            descriptor.name,
            descriptor.category,
            if descriptor.hover_gated {
                " [hover-gated]"
            } else {
                ""
            }
        );
        descriptor.name
    }

    /// `Playing ⇄ Paused`; no effect while stopped.
    pub fn toggle_pause(&mut self, runtime: &mut R) -> PlaybackState {
        self.state = match self.state {
            PlaybackState::Playing => PlaybackState::Paused,
            PlaybackState::Paused => PlaybackState::Playing,
            PlaybackState::Stopped => PlaybackState::Stopped,
        };
        self.sync_frames(runtime);
        log::info!("[host] state={:?}", self.state);
        self.state
    }

    /// Unmount everything and return to `Stopped`.
    pub fn teardown(&mut self, runtime: &mut R) {
        self.unmount(runtime);
        self.hovered = None;
        self.state = PlaybackState::Stopped;
    }

    /// Gallery preview highlight; unknown names clear it.
    pub fn set_hovered(&mut self, name: Option<&str>) {
        self.hovered = name.and_then(|n| self.registry.find(n)).map(|d| d.name);
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        if let Some(m) = self.mounted.as_mut() {
            m.renderer.resize(width, height);
            log::debug!("[host] resize {}x{} -> {}", width, height, m.descriptor.name);
        }
    }

    pub fn pointer_inside(&self) -> bool {
        self.pointer_inside
    }

    /// Tracked whether or not anything is mounted; the next mount inherits it.
    pub fn on_pointer(&mut self, event: SurfaceEvent, runtime: &mut R) {
        self.pointer_inside = match event {
            SurfaceEvent::PointerEnter => true,
            SurfaceEvent::PointerLeave => false,
            SurfaceEvent::Resize => return,
        };
        self.sync_frames(runtime);
    }

    /// Per-frame callback for the renderer target. Returns whether to keep scheduling.
    pub fn frame(&mut self, now_ms: f64, surface: &mut dyn Surface, effective_speed: f32) -> bool {
        if self.state != PlaybackState::Playing {
            return false;
        }
        let Some(m) = self.mounted.as_mut() else {
            return false;
        };
        if m.frames.is_none() {
            return false;
        }
        let dt_sec = match m.last_ts.replace(now_ms) {
            Some(prev) => ((now_ms - prev) / 1000.0).clamp(0.0, MAX_FRAME_DT_SEC),
            None => 0.0,
        };
        let input = FrameInput {
            dt_sec,
            speed: if m.descriptor.follows_speed {
                effective_speed
            } else {
                1.0
            },
        };
        m.renderer.frame(surface, &input);
        true
    }

    /// Hold a frame request exactly when the mounted renderer should animate.
    fn sync_frames(&mut self, runtime: &mut R) {
        let playing = self.state == PlaybackState::Playing;
        let pointer_inside = self.pointer_inside;
        let Some(m) = self.mounted.as_mut() else {
            return;
        };
        let want = playing && (!m.descriptor.hover_gated || pointer_inside);
        match (want, m.frames.is_some()) {
            (true, false) => m.frames = Some(runtime.request_frames(FrameTarget::Renderer)),
            (false, true) => {
                if let Some(f) = m.frames.take() {
                    runtime.cancel_frames(f);
                }
                // Resume must not see the idle gap as one huge step.
                m.last_ts = None;
            }
            _ => {}
        }
    }

    fn unmount(&mut self, runtime: &mut R) {
        let Some(mut m) = self.mounted.take() else {
            return;
        };
        if let Some(f) = m.frames.take() {
            runtime.cancel_frames(f);
        }
        m.renderer.release();
        log::info!("[host] unmounted {}", m.descriptor.name);
    }
}
