//! Scheduling and listener resources, abstracted over the host.
//!
//! In the browser a frame request is a self-rescheduling
//! `requestAnimationFrame` loop and a listener is a registered DOM closure.
//! The core only holds the handles and hands them back for release.

/// Which component a frame request drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FrameTarget {
    Sampler,
    Renderer,
}

/// Events the host can subscribe to on the drawing surface or its window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SurfaceEvent {
    PointerEnter,
    PointerLeave,
    Resize,
}

pub trait Runtime {
    /// Live frame request; dropping it without `cancel_frames` is a leak.
    type Frames;
    /// Live listener registration.
    type Listener;

    /// Start invoking the target once per display refresh until cancelled
    /// or until its callback declines to continue.
    fn request_frames(&mut self, target: FrameTarget) -> Self::Frames;
    fn cancel_frames(&mut self, frames: Self::Frames);

    /// `None` when there is nothing to attach to (e.g. a detached canvas).
    fn listen(&mut self, event: SurfaceEvent) -> Option<Self::Listener>;
    fn unlisten(&mut self, listener: Self::Listener);
}
