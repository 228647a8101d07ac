//! CLI output formatting.
//!
//! Each command has a `format_*` function returning `Vec<String>` for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Sections
//! 001 Images → /
//!     Title: DOMAIN KING
//! 002 About → /about
//!     Title: About - DOMAIN KING
//!
//! Behaviour
//!     Swipe threshold: 50px
//!     Transition lock: 800ms
//!     Animation backend: auto
//!     History: enabled
//! ```
//!
//! ## Simulate
//!
//! ```text
//!      0ms  apply    transform #0 → 0px (snap)
//!      0ms  input    key arrow_right
//!      0ms  apply    transform #1 → -1280px (css)
//!      0ms  apply    push /about {section: 1}
//!    800ms  timer    unlock
//!
//! Final: About at /about ("About - DOMAIN KING"), 2 history entries
//! ```

use crate::config::{AnimationBackend, RouterConfig};
use crate::event_loop::{TraceEntry, TraceKind};
use crate::render::{IndicatorMotion, RenderIntent, TransformMotion};
use crate::router::{GesturePhase, Key, RouterEvent, Timer};
use crate::session::SessionReport;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Format a pixel value without a trailing `.0`.
fn px(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}px", value as i64)
    } else {
        format!("{:.1}px", value)
    }
}

fn backend_name(backend: AnimationBackend) -> &'static str {
    match backend {
        AnimationBackend::Auto => "auto",
        AnimationBackend::Tween => "tween",
        AnimationBackend::Css => "css",
    }
}

// ============================================================================
// Check
// ============================================================================

/// Summarize a validated config.
pub fn format_check_output(config: &RouterConfig) -> Vec<String> {
    let mut lines = vec!["Sections".to_string()];
    for (i, spec) in config.sections.iter().enumerate() {
        lines.push(format!("{} {} → {}", format_index(i + 1), spec.label, spec.path));
        lines.push(format!("{}Title: {}", indent(1), spec.title));
    }
    lines.push(String::new());
    lines.push("Behaviour".to_string());
    lines.push(format!(
        "{}Swipe threshold: {}",
        indent(1),
        px(config.gesture.threshold)
    ));
    lines.push(format!(
        "{}Transition lock: {}ms",
        indent(1),
        config.transition.duration_ms
    ));
    lines.push(format!(
        "{}Animation backend: {}",
        indent(1),
        backend_name(config.animation.backend)
    ));
    lines.push(format!(
        "{}History: {}",
        indent(1),
        if config.history.enabled {
            "enabled"
        } else {
            "disabled"
        }
    ));
    lines
}

pub fn print_check_output(config: &RouterConfig) {
    for line in format_check_output(config) {
        println!("{}", line);
    }
}

// ============================================================================
// Simulate
// ============================================================================

fn describe_event(event: &RouterEvent) -> String {
    match event {
        RouterEvent::TabActivated { section } => format!("tab {}", section),
        RouterEvent::Key { key } => match key {
            Key::ArrowLeft => "key arrow_left".to_string(),
            Key::ArrowRight => "key arrow_right".to_string(),
            Key::Other => "key (other)".to_string(),
        },
        RouterEvent::Pointer(pointer) => {
            let phase = match pointer.phase {
                GesturePhase::Start => "start",
                GesturePhase::Move => "move",
                GesturePhase::End => "end",
                GesturePhase::Cancel => "cancel",
            };
            let at = pointer
                .point
                .map(|p| format!(" ({}, {})", p.x, p.y))
                .unwrap_or_default();
            format!("{:?} {}{}", pointer.kind, phase, at).to_lowercase()
        }
        RouterEvent::PopState { path } => format!("popstate {}", path),
        RouterEvent::Resize => "resize".to_string(),
        RouterEvent::Timer { timer } => describe_timer(*timer).to_string(),
    }
}

fn describe_timer(timer: Timer) -> &'static str {
    match timer {
        Timer::Unlock => "unlock",
        Timer::IndicatorResync => "indicator resync",
        Timer::ReadinessPoll => "readiness poll",
    }
}

fn describe_intent(intent: &RenderIntent) -> String {
    match intent {
        RenderIntent::Transform {
            section,
            offset_px,
            motion,
        } => {
            let how = match motion {
                TransformMotion::Tween { duration_ms, .. } => format!("tween {}ms", duration_ms),
                TransformMotion::CssTransition { .. } => "css".to_string(),
                TransformMotion::Snap => "snap".to_string(),
            };
            format!("transform {} → {} ({})", section, px(*offset_px), how)
        }
        RenderIntent::TabState { section, active } => format!(
            "tab {} {}",
            section,
            if *active { "active" } else { "inactive" }
        ),
        RenderIntent::Indicator { bounds, motion } => {
            let how = match motion {
                IndicatorMotion::Tween { .. } => "tween",
                IndicatorMotion::Immediate => "immediate",
            };
            format!(
                "indicator left {} width {} ({})",
                px(bounds.left),
                px(bounds.width),
                how
            )
        }
        RenderIntent::PushHistory { path, state } => {
            format!("push {} {{section: {}}}", path, state.section)
        }
        RenderIntent::SetTitle { title } => format!("title {:?}", title),
    }
}

/// Format one trace line: right-aligned timestamp, a column tag, the detail.
pub fn format_trace_entry(entry: &TraceEntry) -> String {
    let (tag, detail) = match &entry.kind {
        TraceKind::Input { event } => ("input", describe_event(event)),
        TraceKind::Fired { timer } => ("timer", describe_timer(*timer).to_string()),
        TraceKind::Applied { intent } => ("apply", describe_intent(intent)),
        TraceKind::Verdict { verdict } => ("verdict", format!("{:?}", verdict).to_lowercase()),
    };
    format!("{:>6}ms  {:<8} {}", entry.at_ms, tag, detail)
}

/// Format the full simulate output: trace, blank line, final state.
pub fn format_session_report(report: &SessionReport, config: &RouterConfig) -> Vec<String> {
    let mut lines: Vec<String> = report.trace.iter().map(format_trace_entry).collect();
    lines.push(String::new());
    let label = config
        .sections
        .get(report.section.index())
        .map(|s| s.label.as_str())
        .unwrap_or("?");
    lines.push(format!(
        "Final: {} at {} ({:?}), {} history entr{}",
        label,
        report.path,
        report.title,
        report.history_len,
        if report.history_len == 1 { "y" } else { "ies" }
    ));
    if let Some(bounds) = report.indicator {
        lines.push(format!(
            "{}Indicator: left {} width {}",
            indent(1),
            px(bounds.left),
            px(bounds.width)
        ));
    }
    lines
}

pub fn print_session_report(report: &SessionReport, config: &RouterConfig) {
    for line in format_session_report(report, config) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::section::Section;
    use crate::session::{Session, run_session};
    use crate::types::HistoryState;

    #[test]
    fn check_output_lists_sections() {
        let lines = format_check_output(&RouterConfig::default());
        assert_eq!(lines[0], "Sections");
        assert_eq!(lines[1], "001 Images → /");
        assert_eq!(lines[2], "    Title: DOMAIN KING");
        assert_eq!(lines[3], "002 About → /about");
        assert!(lines.contains(&"    Swipe threshold: 50px".to_string()));
        assert!(lines.contains(&"    Transition lock: 800ms".to_string()));
        assert!(lines.contains(&"    History: enabled".to_string()));
    }

    #[test]
    fn trace_entry_alignment() {
        let entry = TraceEntry {
            at_ms: 800,
            kind: TraceKind::Fired {
                timer: Timer::Unlock,
            },
        };
        assert_eq!(format_trace_entry(&entry), "   800ms  timer    unlock");
    }

    #[test]
    fn describe_push_and_transform() {
        let push = RenderIntent::PushHistory {
            path: "/about".into(),
            state: HistoryState { section: 1 },
        };
        assert_eq!(describe_intent(&push), "push /about {section: 1}");

        let transform = RenderIntent::Transform {
            section: Section::ABOUT,
            offset_px: -1280.0,
            motion: TransformMotion::Snap,
        };
        assert_eq!(describe_intent(&transform), "transform #1 → -1280px (snap)");
    }

    #[test]
    fn px_formats_fractions() {
        assert_eq!(px(96.0), "96px");
        assert_eq!(px(95.26), "95.3px");
    }

    #[test]
    fn session_report_ends_with_final_state() {
        let session: Session = serde_json::from_str(
            r#"{ "steps": [ { "event": { "type": "key", "key": "arrow_right" } } ] }"#,
        )
        .unwrap();
        let config = RouterConfig::default();
        let report = run_session(&config, &session).unwrap();
        let lines = format_session_report(&report, &config);

        assert!(lines.iter().any(|l| l.contains("input    key arrow_right")));
        assert!(lines
            .iter()
            .any(|l| l == "Final: About at /about (\"About - DOMAIN KING\"), 2 history entries"));
        assert_eq!(lines.last().unwrap(), "    Indicator: left 96px width 84px");
    }
}
