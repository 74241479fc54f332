//! Speed governor: turns the user's manual multiplier and the sampler's
//! aggregates into the one multiplier renderers apply to their time step.

use crate::core::constants::*;
use crate::core::metrics::PerformanceSnapshot;

/// Step function over the rolling average and dropped-frame percentage.
///
/// The bands overlap; they are checked in this order and the first match
/// wins, so a window with a good average but heavy drops only reaches the
/// drop throttle when it misses the good-performance band.
pub fn multiplier(avg_fps: f64, dropped_percent: f64) -> f32 {
    if avg_fps < BAND_CRITICAL_FPS {
        MULTIPLIER_CRITICAL
    } else if avg_fps < BAND_LOW_FPS {
        MULTIPLIER_LOW
    } else if avg_fps > BAND_GOOD_FPS && dropped_percent < BAND_GOOD_MAX_DROPPED {
        MULTIPLIER_NOMINAL
    } else if dropped_percent > BAND_HEAVY_DROPPED {
        MULTIPLIER_HEAVY_DROPS
    } else {
        MULTIPLIER_NOMINAL
    }
}

#[derive(Clone, Debug)]
pub struct SpeedGovernor {
    global_speed: f32,
    auto_adjust: bool,
    avg_fps: f64,
    dropped_percent: f64,
    effective_speed: f32,
}

impl Default for SpeedGovernor {
    fn default() -> Self {
        Self::new(SPEED_DEFAULT, true)
    }
}

impl SpeedGovernor {
    pub fn new(global_speed: f32, auto_adjust: bool) -> Self {
        let mut g = Self {
            global_speed: SPEED_DEFAULT,
            auto_adjust,
            avg_fps: FALLBACK_AVG_FPS,
            dropped_percent: FALLBACK_DROPPED_PERCENT,
            effective_speed: SPEED_DEFAULT,
        };
        g.set_global_speed(global_speed);
        g
    }

    pub fn global_speed(&self) -> f32 {
        self.global_speed
    }

    pub fn auto_adjust(&self) -> bool {
        self.auto_adjust
    }

    /// Polled by renderers once per frame.
    pub fn effective_speed(&self) -> f32 {
        self.effective_speed
    }

    /// Clamped into `[SPEED_MIN, SPEED_MAX]`; non-finite input is ignored.
    pub fn set_global_speed(&mut self, speed: f32) {
        if !speed.is_finite() {
            log::warn!("[speed] ignoring non-finite speed {}", speed);
            return;
        }
        self.global_speed = speed.clamp(SPEED_MIN, SPEED_MAX);
        self.recompute();
    }

    pub fn nudge(&mut self, delta: f32) {
        // Round to the step grid so repeated nudges don't accumulate float noise.
        let next = ((self.global_speed + delta) / SPEED_STEP).round() * SPEED_STEP;
        self.set_global_speed(next);
    }

    pub fn set_auto_adjust(&mut self, on: bool) {
        self.auto_adjust = on;
        self.recompute();
    }

    /// Feed the latest aggregates; `None` reverts to the fallback assumptions.
    pub fn observe(&mut self, snapshot: Option<&PerformanceSnapshot>) {
        let (avg, dropped) = snapshot
            .map(|s| (s.avg_fps, s.dropped_percent))
            .unwrap_or((FALLBACK_AVG_FPS, FALLBACK_DROPPED_PERCENT));
        self.avg_fps = avg;
        self.dropped_percent = dropped;
        self.recompute();
    }

    fn recompute(&mut self) {
        let prev = self.effective_speed;
        self.effective_speed = if self.auto_adjust {
            self.global_speed * multiplier(self.avg_fps, self.dropped_percent)
        } else {
            self.global_speed
        };
        if prev != self.effective_speed {
            log::debug!(
                "[speed] effective {:.2} -> {:.2} (global={:.2} auto={} avg={:.1} dropped={:.0}%)",
                prev,
                self.effective_speed,
                self.global_speed,
                self.auto_adjust,
                self.avg_fps,
                self.dropped_percent
            );
        }
    }
}
