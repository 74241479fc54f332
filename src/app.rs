use crate::canvas::CanvasSurface;
use crate::core::{Command, FrameTarget, StudioConfig, Studio, Surface, SurfaceEvent};
use crate::gallery::Gallery;
use crate::overlay;
use crate::runtime::WebRuntime;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use web_sys as web;

// DOM writes for the stats panel are throttled; the sampler itself runs every frame.
const OVERLAY_REFRESH: Duration = Duration::from_millis(250);

pub struct App {
    studio: Studio<WebRuntime>,
    surface: CanvasSurface,
    document: web::Document,
    gallery: Option<Gallery>,
    overlay_refreshed: Option<Instant>,
}

impl App {
    /// The studio's runtime needs a handle back to the app, hence the cyclic build.
    pub fn create(
        document: web::Document,
        canvas: web::HtmlCanvasElement,
        config: &StudioConfig,
        seed: u64,
    ) -> anyhow::Result<Rc<RefCell<App>>> {
        let surface = CanvasSurface::new(canvas.clone())?;
        let registry = crate::effects::registry()?;
        let gallery = Gallery::build(&document, &registry)?;
        let app = Rc::new_cyclic(|weak| {
            RefCell::new(App {
                studio: Studio::new(WebRuntime::new(weak.clone(), canvas), registry, config, seed),
                surface,
                document,
                gallery,
                overlay_refreshed: None,
            })
        });
        Ok(app)
    }

    pub fn gallery(&self) -> Option<&Gallery> {
        self.gallery.as_ref()
    }

    pub fn start(&mut self) {
        let size = self.surface.size();
        self.studio.start(size);
        self.sync_ui();
    }

    pub fn on_frame(&mut self, target: FrameTarget, now_ms: f64) -> bool {
        let keep = self.studio.on_frame(target, now_ms, &mut self.surface);
        if target == FrameTarget::Sampler {
            self.refresh_stats(false);
        }
        keep
    }

    pub fn on_event(&mut self, event: SurfaceEvent) {
        if event == SurfaceEvent::Resize {
            self.surface.sync_backing_size();
        }
        self.studio.on_event(event, self.surface.size());
    }

    pub fn select(&mut self, name: &str) {
        let size = self.surface.size();
        self.studio.select(name, size);
        self.sync_ui();
    }

    pub fn apply(&mut self, command: Command) {
        let size = self.surface.size();
        self.studio.apply(command, size);
        self.sync_ui();
    }

    pub fn set_hovered(&mut self, name: Option<&str>) {
        self.studio.set_hovered(name);
        self.sync_gallery();
    }

    pub fn set_global_speed(&mut self, speed: f32) {
        self.studio.set_global_speed(speed);
        self.refresh_stats(true);
    }

    pub fn set_auto_adjust(&mut self, on: bool) {
        self.studio.set_auto_adjust(on);
        self.refresh_stats(true);
    }

    pub fn global_speed(&self) -> f32 {
        self.studio.governor().global_speed()
    }

    pub fn auto_adjust(&self) -> bool {
        self.studio.governor().auto_adjust()
    }

    fn sync_ui(&mut self) {
        self.sync_gallery();
        let host = self.studio.host();
        overlay::update_status(&self.document, host.active().map(|d| d.name), host.state());
        overlay::set_stats_visible(&self.document, self.studio.stats_visible());
        crate::controls::sync(&self.document, self.global_speed(), self.auto_adjust());
        self.refresh_stats(true);
    }

    fn sync_gallery(&self) {
        if let Some(g) = &self.gallery {
            let host = self.studio.host();
            g.sync(host.active().map(|d| d.name), host.hovered());
        }
    }

    fn refresh_stats(&mut self, force: bool) {
        if !self.studio.stats_visible() {
            return;
        }
        let now = Instant::now();
        let due = self
            .overlay_refreshed
            .map_or(true, |t| now.duration_since(t) >= OVERLAY_REFRESH);
        if force || due {
            overlay::update_stats(&self.document, self.studio.snapshot(), self.studio.governor());
            self.overlay_refreshed = Some(now);
        }
    }
}
