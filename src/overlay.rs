use crate::core::{PerformanceSnapshot, PlaybackState, SpeedGovernor};
use crate::dom;
use web_sys as web;

const STATS_ID: &str = "stats-overlay";
const STATUS_ID: &str = "status-hint";

#[inline]
pub fn set_stats_visible(document: &web::Document, visible: bool) {
    if let Some(el) = document.get_element_by_id(STATS_ID) {
        dom::set_visible(&el, visible);
    }
}

/// Refresh the diagnostics panel with the latest sampler reading.
pub fn update_stats(
    document: &web::Document,
    snapshot: Option<&PerformanceSnapshot>,
    governor: &SpeedGovernor,
) {
    let Some(el) = document.get_element_by_id(STATS_ID) else {
        return;
    };
    let mut lines = match snapshot {
        Some(s) => s.summary_lines(),
        None => vec!["sampling…".to_string()],
    };
    lines.push(format!(
        "speed {:.2} × → {:.2}{}",
        governor.global_speed(),
        governor.effective_speed(),
        if governor.auto_adjust() { " (auto)" } else { "" }
    ));
    let rows: String = lines
        .iter()
        .map(|l| format!("<div>{}</div>", l))
        .collect();
    el.set_inner_html(&format!(
        "<div style='color: #cfe7ff; font: 12px ui-monospace, monospace; background: rgba(10, 14, 24, 0.8); padding: 8px 12px; border-radius: 6px; border: 1px solid rgba(80, 110, 150, 0.35);'>{}</div>",
        rows
    ));
}

/// One-line status under the canvas: current effect and playback state.
pub fn update_status(document: &web::Document, effect: Option<&str>, state: PlaybackState) {
    if let Some(el) = document.get_element_by_id(STATUS_ID) {
        let state_text = match state {
            PlaybackState::Stopped => "stopped",
            PlaybackState::Playing => "playing",
            PlaybackState::Paused => "paused (space to resume)",
        };
        el.set_text_content(Some(&format!(
            "{} • {}",
            effect.unwrap_or("-"),
            state_text
        )));
    }
}
