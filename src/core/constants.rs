/// Frame sampling and speed-governor tuning constants.
///
/// These express the thresholds the diagnostics panel and the governor agree
/// on, so the two never drift apart.
// Rolling window of inter-frame samples
pub const SAMPLE_WINDOW: usize = 120;

// Delta floor (ms) applied before converting to fps; duplicate timestamps read as 1000 fps
pub const MIN_FRAME_DELTA_MS: f64 = 1.0;

// A frame slower than this (ms) counts as a long frame
pub const LONG_FRAME_MS: f64 = 50.0;

// A frame slower than this (ms) missed a 60 Hz vsync
pub const DROPPED_FRAME_MS: f64 = 16.7;

// Manual speed range and keyboard step
pub const SPEED_MIN: f32 = 0.1;
pub const SPEED_MAX: f32 = 3.0;
pub const SPEED_DEFAULT: f32 = 1.0;
pub const SPEED_STEP: f32 = 0.1;

// Values assumed by the governor before the sampler has produced anything
pub const FALLBACK_AVG_FPS: f64 = 60.0;
pub const FALLBACK_DROPPED_PERCENT: f64 = 0.0;

// Governor bands (evaluated in order, first match wins)
pub const BAND_CRITICAL_FPS: f64 = 30.0;
pub const BAND_LOW_FPS: f64 = 45.0;
pub const BAND_GOOD_FPS: f64 = 55.0;
pub const BAND_GOOD_MAX_DROPPED: f64 = 5.0;
pub const BAND_HEAVY_DROPPED: f64 = 20.0;

pub const MULTIPLIER_CRITICAL: f32 = 0.5;
pub const MULTIPLIER_LOW: f32 = 0.75;
pub const MULTIPLIER_HEAVY_DROPS: f32 = 0.6;
pub const MULTIPLIER_NOMINAL: f32 = 1.0;

// Largest simulation step handed to a renderer (seconds); hides tab-switch stalls
pub const MAX_FRAME_DT_SEC: f64 = 0.1;

// Bytes per megabyte for heap readouts
pub const BYTES_PER_MB: f64 = 1024.0 * 1024.0;
