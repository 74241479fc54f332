//! Frame timing sampler and the derived performance snapshot.
//!
//! The sampler only sees timestamps; everything it knows about the host
//! (heap, cores, pixel ratio) comes through [`Environment`] so the same code
//! runs against the browser and against the host-side tests.

use crate::core::constants::{
    BYTES_PER_MB, DROPPED_FRAME_MS, LONG_FRAME_MS, MIN_FRAME_DELTA_MS, SAMPLE_WINDOW,
};
use crate::core::runtime::{FrameTarget, Runtime};
use std::collections::VecDeque;

/// JS heap usage in megabytes, rounded to one decimal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeapUsage {
    pub used_mb: f64,
    pub total_mb: f64,
}

impl HeapUsage {
    pub fn from_bytes(used: f64, total: f64) -> Self {
        Self {
            used_mb: round_1(used / BYTES_PER_MB),
            total_mb: round_1(total / BYTES_PER_MB),
        }
    }
}

/// Static-ish facts about the host that the snapshot reports alongside timing.
pub trait Environment {
    /// `None` when the host exposes no heap introspection.
    fn heap_usage(&self) -> Option<HeapUsage>;
    /// `None` when the host does not report a core count.
    fn logical_cores(&self) -> Option<u32>;
    /// Re-read on every snapshot; it changes when a window moves between displays.
    fn device_pixel_ratio(&self) -> f64;
}

#[derive(Clone, Debug, PartialEq)]
pub struct PerformanceSnapshot {
    pub fps: f64,
    pub avg_fps: f64,
    pub min_fps: f64,
    pub max_fps: f64,
    pub long_frames: usize,
    pub dropped_percent: f64,
    pub memory: Option<HeapUsage>,
    pub cores: Option<u32>,
    pub dpr: f64,
    pub window_len: usize,
}

impl PerformanceSnapshot {
    /// Human-readable rows for the diagnostics panel. Absent capabilities
    /// read as `n/a` rather than zero.
    pub fn summary_lines(&self) -> Vec<String> {
        let memory = match self.memory {
            Some(m) => format!("{:.1} / {:.1} MB", m.used_mb, m.total_mb),
            None => "n/a".to_string(),
        };
        let cores = self
            .cores
            .map(|c| c.to_string())
            .unwrap_or_else(|| "n/a".to_string());
        vec![
            format!("FPS {:.0} (avg {:.1})", self.fps, self.avg_fps),
            format!("min {:.1} / max {:.1}", self.min_fps, self.max_fps),
            format!("long frames {}", self.long_frames),
            format!("dropped {:.0}%", self.dropped_percent),
            format!("heap {}", memory),
            format!("cores {} / dpr {:.2}", cores, self.dpr),
        ]
    }
}

/// Bounded FIFO of instantaneous fps samples.
#[derive(Clone, Debug)]
pub struct FrameSampler {
    window: VecDeque<f64>,
    capacity: usize,
    last_ts: Option<f64>,
}

impl Default for FrameSampler {
    fn default() -> Self {
        Self::with_capacity(SAMPLE_WINDOW)
    }
}

impl FrameSampler {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            window: VecDeque::with_capacity(capacity + 1),
            capacity,
            last_ts: None,
        }
    }

    /// Record a frame timestamp (ms). Returns the fps sample, or `None` on the
    /// first call after construction or [`reset_anchor`](Self::reset_anchor).
    pub fn record(&mut self, now_ms: f64) -> Option<f64> {
        let prev = self.last_ts.replace(now_ms)?;
        let delta = (now_ms - prev).max(MIN_FRAME_DELTA_MS);
        let fps = 1000.0 / delta;
        self.window.push_back(fps);
        while self.window.len() > self.capacity {
            self.window.pop_front();
        }
        Some(fps)
    }

    /// Forget the previous timestamp so the next `record` diffs against nothing.
    pub fn reset_anchor(&mut self) {
        self.last_ts = None;
    }

    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn samples(&self) -> impl Iterator<Item = f64> + '_ {
        self.window.iter().copied()
    }

    pub fn snapshot(&self, env: &dyn Environment) -> Option<PerformanceSnapshot> {
        let fps = *self.window.back()?;
        let n = self.window.len();
        let mut sum = 0.0;
        let mut min_fps = f64::INFINITY;
        let mut max_fps = f64::NEG_INFINITY;
        let mut long_frames = 0usize;
        let mut dropped = 0usize;
        for &s in &self.window {
            sum += s;
            min_fps = min_fps.min(s);
            max_fps = max_fps.max(s);
            let frame_ms = 1000.0 / s;
            if frame_ms > LONG_FRAME_MS {
                long_frames += 1;
            }
            if frame_ms > DROPPED_FRAME_MS {
                dropped += 1;
            }
        }
        // Floating-point summation can land a hair outside [min, max] for a uniform window.
        let avg_fps = (sum / n as f64).clamp(min_fps, max_fps);
        Some(PerformanceSnapshot {
            fps,
            avg_fps,
            min_fps,
            max_fps,
            long_frames,
            dropped_percent: (100.0 * dropped as f64 / n as f64).round(),
            memory: env.heap_usage(),
            cores: env.logical_cores(),
            dpr: env.device_pixel_ratio(),
            window_len: n,
        })
    }
}

/// Sampler plus its scheduling: asks the runtime for frames only while active.
pub struct PerformanceMonitor<R: Runtime> {
    sampler: FrameSampler,
    active: bool,
    pending: Option<R::Frames>,
    snapshot: Option<PerformanceSnapshot>,
}

impl<R: Runtime> Default for PerformanceMonitor<R> {
    fn default() -> Self {
        Self::new(FrameSampler::default())
    }
}

impl<R: Runtime> PerformanceMonitor<R> {
    pub fn new(sampler: FrameSampler) -> Self {
        Self {
            sampler,
            active: false,
            pending: None,
            snapshot: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_scheduled(&self) -> bool {
        self.pending.is_some()
    }

    pub fn sampler(&self) -> &FrameSampler {
        &self.sampler
    }

    /// Latest snapshot; survives deactivation so consumers keep the last reading.
    pub fn snapshot(&self) -> Option<&PerformanceSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn set_active(&mut self, active: bool, runtime: &mut R) {
        if self.active == active {
            return;
        }
        self.active = active;
        if active {
            if self.pending.is_none() {
                self.pending = Some(runtime.request_frames(FrameTarget::Sampler));
            }
        } else {
            if let Some(frames) = self.pending.take() {
                runtime.cancel_frames(frames);
            }
            // A gap while inactive is not a frame; don't diff across it.
            self.sampler.reset_anchor();
        }
        log::debug!("[metrics] active={}", active);
    }

    /// Cancels any pending frames and clears the timestamp anchor. The window survives.
    pub fn teardown(&mut self, runtime: &mut R) {
        if let Some(frames) = self.pending.take() {
            runtime.cancel_frames(frames);
        }
        self.active = false;
        self.sampler.reset_anchor();
    }

    /// Per-frame callback. Returns whether the runtime should keep scheduling.
    pub fn on_frame(&mut self, now_ms: f64, env: &dyn Environment) -> bool {
        if !self.active {
            return false;
        }
        if self.sampler.record(now_ms).is_some() {
            self.snapshot = self.sampler.snapshot(env);
        }
        true
    }
}

#[inline]
fn round_1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}
