// Host-side tests for the effect host lifecycle: mounting, teardown,
// mutual exclusion, pause and hover gating.

mod common;

use common::{draws, pump_host, releases, ManualRuntime, RecordingSurface};
use effect_studio::core::*;

const SIZE: (f64, f64) = (320.0, 240.0);

fn host() -> (EffectHost<ManualRuntime>, ManualRuntime, RecordingSurface) {
    common::reset_probes();
    (
        EffectHost::new(common::probe_registry(), 7),
        ManualRuntime::default(),
        RecordingSurface::new(SIZE.0, SIZE.1),
    )
}

#[test]
fn starts_stopped_with_nothing_mounted() {
    let (mut h, mut rt, mut surf) = host();
    assert_eq!(h.state(), PlaybackState::Stopped);
    assert!(h.active().is_none());
    assert!(!h.frame(0.0, &mut surf, 1.0));
    assert_eq!(h.toggle_pause(&mut rt), PlaybackState::Stopped);
    assert!(rt.live_frames.is_empty());
}

#[test]
fn select_mounts_and_plays() {
    let (mut h, mut rt, mut surf) = host();
    assert_eq!(h.select("Probe A", SIZE, &mut rt), "Probe A");
    assert_eq!(h.state(), PlaybackState::Playing);
    assert_eq!(common::last_size("Probe A"), Some(SIZE));
    assert_eq!(rt.live(FrameTarget::Renderer), 1);

    for i in 0..3 {
        pump_host(&mut h, &mut rt, &mut surf, i as f64 * 16.0, 1.0);
    }
    assert_eq!(draws("Probe A"), 3);
}

#[test]
fn unknown_selection_mounts_the_default() {
    let (mut h, mut rt, _surf) = host();
    assert_eq!(h.select("NonexistentEffect", SIZE, &mut rt), "Probe A");
    assert_eq!(h.active().unwrap().name, "Probe A");
}

#[test]
fn teardown_stops_all_drawing() {
    let (mut h, mut rt, mut surf) = host();
    h.select("Probe A", SIZE, &mut rt);
    for i in 0..5 {
        pump_host(&mut h, &mut rt, &mut surf, i as f64 * 16.0, 1.0);
    }
    let before = draws("Probe A");
    let calls_before = surf.draw_calls();

    h.teardown(&mut rt);
    assert_eq!(h.state(), PlaybackState::Stopped);
    assert!(rt.live_frames.is_empty());
    assert!(rt.live_listeners.is_empty());
    assert_eq!(releases("Probe A"), 1);

    for i in 5..50 {
        pump_host(&mut h, &mut rt, &mut surf, i as f64 * 16.0, 1.0);
        // Even a stray callback draws nothing.
        assert!(!h.frame(i as f64 * 16.0, &mut surf, 1.0));
    }
    assert_eq!(draws("Probe A"), before);
    assert_eq!(surf.draw_calls(), calls_before);
}

#[test]
fn switching_effects_leaves_exactly_one_ticking() {
    let (mut h, mut rt, mut surf) = host();
    h.select("Probe A", SIZE, &mut rt);
    pump_host(&mut h, &mut rt, &mut surf, 0.0, 1.0);
    pump_host(&mut h, &mut rt, &mut surf, 16.0, 1.0);
    assert_eq!(draws("Probe A"), 2);

    h.select("Probe B", SIZE, &mut rt);
    assert_eq!(releases("Probe A"), 1);
    assert_eq!(rt.live(FrameTarget::Renderer), 1);

    for i in 2..12 {
        pump_host(&mut h, &mut rt, &mut surf, i as f64 * 16.0, 1.0);
    }
    assert_eq!(draws("Probe A"), 2);
    assert_eq!(draws("Probe B"), 10);
}

#[test]
fn reselecting_the_same_effect_remounts_it() {
    let (mut h, mut rt, _surf) = host();
    h.select("Probe A", SIZE, &mut rt);
    h.select("Probe A", SIZE, &mut rt);
    assert_eq!(releases("Probe A"), 1);
    assert_eq!(rt.live(FrameTarget::Renderer), 1);
    assert_eq!(rt.frame_requests, 2);
}

#[test]
fn pause_stops_frames_and_resume_restarts_them() {
    let (mut h, mut rt, mut surf) = host();
    h.select("Probe B", SIZE, &mut rt);
    pump_host(&mut h, &mut rt, &mut surf, 0.0, 1.0);

    assert_eq!(h.toggle_pause(&mut rt), PlaybackState::Paused);
    assert!(!h.is_running());
    assert_eq!(rt.live(FrameTarget::Renderer), 0);
    for i in 1..10 {
        pump_host(&mut h, &mut rt, &mut surf, i as f64 * 16.0, 1.0);
    }
    assert_eq!(draws("Probe B"), 1);
    // Paused keeps the renderer; it is hidden, not destroyed.
    assert_eq!(releases("Probe B"), 0);
    assert_eq!(h.active().unwrap().name, "Probe B");

    assert_eq!(h.toggle_pause(&mut rt), PlaybackState::Playing);
    assert_eq!(rt.live(FrameTarget::Renderer), 1);
    pump_host(&mut h, &mut rt, &mut surf, 500.0, 1.0);
    assert_eq!(draws("Probe B"), 2);
}

#[test]
fn selecting_while_paused_plays_the_new_effect() {
    let (mut h, mut rt, _surf) = host();
    h.select("Probe A", SIZE, &mut rt);
    h.toggle_pause(&mut rt);
    h.select("Probe B", SIZE, &mut rt);
    assert_eq!(h.state(), PlaybackState::Playing);
    assert_eq!(rt.live(FrameTarget::Renderer), 1);
}

#[test]
fn hover_gated_effect_idles_until_hovered() {
    let (mut h, mut rt, mut surf) = host();
    h.select("Probe Hover", SIZE, &mut rt);
    assert!(!h.pointer_inside());
    assert_eq!(rt.live(FrameTarget::Renderer), 0);
    for i in 0..5 {
        pump_host(&mut h, &mut rt, &mut surf, i as f64 * 16.0, 1.0);
    }
    assert_eq!(draws("Probe Hover"), 0);

    h.on_pointer(SurfaceEvent::PointerEnter, &mut rt);
    assert_eq!(rt.live(FrameTarget::Renderer), 1);
    for i in 5..8 {
        pump_host(&mut h, &mut rt, &mut surf, i as f64 * 16.0, 1.0);
    }
    assert_eq!(draws("Probe Hover"), 3);

    h.on_pointer(SurfaceEvent::PointerLeave, &mut rt);
    assert_eq!(rt.live(FrameTarget::Renderer), 0);
    for i in 8..20 {
        pump_host(&mut h, &mut rt, &mut surf, i as f64 * 16.0, 1.0);
    }
    assert_eq!(draws("Probe Hover"), 3);
}

#[test]
fn hover_gate_respects_pause() {
    let (mut h, mut rt, _surf) = host();
    h.select("Probe Hover", SIZE, &mut rt);
    h.toggle_pause(&mut rt);
    h.on_pointer(SurfaceEvent::PointerEnter, &mut rt);
    assert_eq!(rt.live(FrameTarget::Renderer), 0);
    h.toggle_pause(&mut rt);
    assert_eq!(rt.live(FrameTarget::Renderer), 1);
}

#[test]
fn switching_away_from_gated_effect_releases_it() {
    let (mut h, mut rt, _surf) = host();
    h.select("Probe Hover", SIZE, &mut rt);
    h.on_pointer(SurfaceEvent::PointerEnter, &mut rt);
    h.select("Probe A", SIZE, &mut rt);
    // The host itself never listens; surface listeners belong to the studio.
    assert!(rt.live_listeners.is_empty());
    assert_eq!(rt.live(FrameTarget::Renderer), 1);
    assert_eq!(releases("Probe Hover"), 1);
}

#[test]
fn gated_effect_selected_under_the_pointer_animates_at_once() {
    let (mut h, mut rt, mut surf) = host();
    h.select("Probe A", SIZE, &mut rt);
    h.on_pointer(SurfaceEvent::PointerEnter, &mut rt);
    assert_eq!(rt.live(FrameTarget::Renderer), 1);

    h.select("Probe Hover", SIZE, &mut rt);
    assert!(h.pointer_inside());
    assert_eq!(rt.live(FrameTarget::Renderer), 1);
    for i in 0..4 {
        pump_host(&mut h, &mut rt, &mut surf, i as f64 * 16.0, 1.0);
    }
    assert_eq!(draws("Probe Hover"), 4);

    h.on_pointer(SurfaceEvent::PointerLeave, &mut rt);
    assert_eq!(rt.live(FrameTarget::Renderer), 0);
}

#[test]
fn pointer_state_is_tracked_with_nothing_mounted() {
    let (mut h, mut rt, _surf) = host();
    h.on_pointer(SurfaceEvent::PointerEnter, &mut rt);
    assert!(h.pointer_inside());
    assert!(rt.live_frames.is_empty());
    h.select("Probe Hover", SIZE, &mut rt);
    assert_eq!(rt.live(FrameTarget::Renderer), 1);
}

#[test]
fn speed_reaches_only_renderers_that_follow_it() {
    let (mut h, mut rt, mut surf) = host();
    h.select("Probe B", SIZE, &mut rt);
    pump_host(&mut h, &mut rt, &mut surf, 0.0, 0.5);
    assert_eq!(common::last_speed("Probe B"), Some(0.5));

    h.select("Probe Fixed", SIZE, &mut rt);
    pump_host(&mut h, &mut rt, &mut surf, 16.0, 0.5);
    assert_eq!(common::last_speed("Probe Fixed"), Some(1.0));
}

#[test]
fn resize_reaches_the_mounted_renderer() {
    let (mut h, mut rt, _surf) = host();
    h.select("Probe A", SIZE, &mut rt);
    h.resize(800.0, 600.0);
    // Default resize policy reinitializes at the new size.
    assert_eq!(common::last_size("Probe A"), Some((800.0, 600.0)));
}

#[test]
fn hover_preview_tracks_known_names_only() {
    let (mut h, _rt, _surf) = host();
    h.set_hovered(Some("Probe B"));
    assert_eq!(h.hovered(), Some("Probe B"));
    h.set_hovered(Some("nope"));
    assert_eq!(h.hovered(), None);
    h.set_hovered(Some("Probe A"));
    h.set_hovered(None);
    assert_eq!(h.hovered(), None);
}
