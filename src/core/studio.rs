//! Studio: the one place the sampler, the governor and the effect host meet.
//!
//! Constructed once at startup from a [`StudioConfig`]; every consumer reaches
//! the speed state through it rather than through ambient globals.

use crate::core::config::StudioConfig;
use crate::core::controls::Command;
use crate::core::host::{EffectHost, PlaybackState};
use crate::core::metrics::{Environment, FrameSampler, PerformanceMonitor, PerformanceSnapshot};
use crate::core::registry::Registry;
use crate::core::runtime::{FrameTarget, Runtime, SurfaceEvent};
use crate::core::speed::SpeedGovernor;
use crate::core::surface::Surface;
use smallvec::SmallVec;

pub struct Studio<R: Runtime + Environment> {
    runtime: R,
    host: EffectHost<R>,
    monitor: PerformanceMonitor<R>,
    governor: SpeedGovernor,
    show_stats: bool,
    sample_while_paused: bool,
    initial_effect: Option<String>,
    /// App-lifetime surface listeners: resize plus pointer enter/leave.
    listeners: SmallVec<[R::Listener; 3]>,
}

impl<R: Runtime + Environment> Studio<R> {
    pub fn new(runtime: R, registry: Registry, config: &StudioConfig, seed: u64) -> Self {
        Self {
            runtime,
            host: EffectHost::new(registry, seed),
            monitor: PerformanceMonitor::new(FrameSampler::default()),
            governor: SpeedGovernor::new(config.global_speed, config.auto_adjust),
            show_stats: config.show_stats,
            sample_while_paused: config.sample_while_paused,
            initial_effect: config.initial_effect.clone(),
            listeners: SmallVec::new(),
        }
    }

    /// Subscribe to surface events, mount the initial effect and start sampling.
    pub fn start(&mut self, size: (f64, f64)) {
        if self.listeners.is_empty() {
            for ev in [
                SurfaceEvent::Resize,
                SurfaceEvent::PointerEnter,
                SurfaceEvent::PointerLeave,
            ] {
                if let Some(l) = self.runtime.listen(ev) {
                    self.listeners.push(l);
                }
            }
        }
        let initial = self
            .initial_effect
            .clone()
            .unwrap_or_else(|| self.host.registry().default_effect().name.to_string());
        self.select(&initial, size);
    }

    /// Release every frame request and listener; the studio can be started again.
    pub fn shutdown(&mut self) {
        self.host.teardown(&mut self.runtime);
        self.monitor.teardown(&mut self.runtime);
        for l in self.listeners.drain(..) {
            self.runtime.unlisten(l);
        }
        log::info!("[studio] shut down");
    }

    pub fn runtime(&self) -> &R {
        &self.runtime
    }

    pub fn runtime_mut(&mut self) -> &mut R {
        &mut self.runtime
    }

    pub fn host(&self) -> &EffectHost<R> {
        &self.host
    }

    pub fn governor(&self) -> &SpeedGovernor {
        &self.governor
    }

    pub fn monitor(&self) -> &PerformanceMonitor<R> {
        &self.monitor
    }

    pub fn snapshot(&self) -> Option<&PerformanceSnapshot> {
        self.monitor.snapshot()
    }

    pub fn stats_visible(&self) -> bool {
        self.show_stats
    }

    pub fn select(&mut self, name: &str, size: (f64, f64)) -> &'static str {
        let mounted = self.host.select(name, size, &mut self.runtime);
        self.sync_sampler();
        mounted
    }

    pub fn toggle_pause(&mut self) -> PlaybackState {
        let state = self.host.toggle_pause(&mut self.runtime);
        self.sync_sampler();
        state
    }

    pub fn set_hovered(&mut self, name: Option<&str>) {
        self.host.set_hovered(name);
    }

    pub fn set_global_speed(&mut self, speed: f32) {
        self.governor.set_global_speed(speed);
    }

    pub fn set_auto_adjust(&mut self, on: bool) {
        self.governor.set_auto_adjust(on);
        self.sync_sampler();
    }

    pub fn set_stats_visible(&mut self, on: bool) {
        self.show_stats = on;
        self.sync_sampler();
    }

    /// Apply a keyboard command; `size` is needed when it mounts an effect.
    pub fn apply(&mut self, command: Command, size: (f64, f64)) {
        match command {
            Command::TogglePause => {
                self.toggle_pause();
            }
            Command::NextEffect | Command::PrevEffect => {
                let current = self.host.active().map(|d| d.name).unwrap_or_default();
                let reg = self.host.registry();
                let target = if command == Command::NextEffect {
                    reg.next_after(current).name
                } else {
                    reg.prev_before(current).name
                };
                self.select(target, size);
            }
            Command::Speed(delta) => self.governor.nudge(delta),
            Command::ResetSpeed => self
                .governor
                .set_global_speed(crate::core::constants::SPEED_DEFAULT),
            Command::ToggleAutoAdjust => {
                let on = !self.governor.auto_adjust();
                self.set_auto_adjust(on);
            }
            Command::ToggleStats => {
                let on = !self.show_stats;
                self.set_stats_visible(on);
            }
        }
        log::info!(
            "[keys] {:?} -> speed={:.2} auto={} effective={:.2}",
            command,
            self.governor.global_speed(),
            self.governor.auto_adjust(),
            self.governor.effective_speed()
        );
    }

    /// Runtime callback for surface events.
    pub fn on_event(&mut self, event: SurfaceEvent, size: (f64, f64)) {
        match event {
            SurfaceEvent::Resize => self.host.resize(size.0, size.1),
            SurfaceEvent::PointerEnter | SurfaceEvent::PointerLeave => {
                self.host.on_pointer(event, &mut self.runtime)
            }
        }
    }

    /// Runtime callback, once per display refresh per live frame request.
    /// Returns whether the request should be rescheduled.
    pub fn on_frame(&mut self, target: FrameTarget, now_ms: f64, surface: &mut dyn Surface) -> bool {
        match target {
            FrameTarget::Sampler => {
                let keep = self.monitor.on_frame(now_ms, &self.runtime);
                self.governor.observe(self.monitor.snapshot());
                keep
            }
            FrameTarget::Renderer => {
                self.host
                    .frame(now_ms, surface, self.governor.effective_speed())
            }
        }
    }

    /// The sampler runs while anything consumes it: the stats panel or the governor.
    fn sync_sampler(&mut self) {
        let consumed = self.show_stats || self.governor.auto_adjust();
        let allowed = self.host.state() != PlaybackState::Paused || self.sample_while_paused;
        self.monitor
            .set_active(consumed && allowed, &mut self.runtime);
    }
}
