//! Replays the scripted sessions under `demos/` the way `domain-king simulate`
//! does, and renders the demo page shell.
//!
//! Run with: `cargo test --test session_replay`

use domain_king::config::{self, RouterConfig};
use domain_king::event_loop::TraceKind;
use domain_king::render::RenderIntent;
use domain_king::router::{RouterEvent, Timer};
use domain_king::section::Section;
use domain_king::session::{self, Session};
use domain_king::shell;
use domain_king::types::IndicatorBounds;
use std::path::{Path, PathBuf};

fn demos() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("demos")
}

fn load(name: &str) -> Session {
    session::load_session(&demos().join("sessions").join(name)).unwrap()
}

// ===========================================================================
// Config overlay
// ===========================================================================

#[test]
fn demo_config_overrides_only_what_it_names() {
    let config = config::load_config(&demos()).unwrap();
    assert_eq!(config.gesture.threshold, 60.0);
    assert_eq!(config.indicator.easing, "power3.out");

    let stock = RouterConfig::default();
    assert_eq!(config.sections, stock.sections);
    assert_eq!(config.transition, stock.transition);
}

// ===========================================================================
// Sessions
// ===========================================================================

#[test]
fn swipe_session_ends_on_about_after_back() {
    let config = config::load_config(&demos()).unwrap();
    let report = session::run_session(&config, &load("swipe.json")).unwrap();

    assert_eq!(report.section, Section::ABOUT);
    assert_eq!(report.section_in_view, Some(Section::ABOUT));
    assert_eq!(report.path, "/about");
    // Back restores the section but not the title, which only changes with a push.
    assert_eq!(report.title, "DOMAIN KING");
    assert_eq!(report.history_len, 3);
    assert_eq!(
        report.indicator,
        Some(IndicatorBounds {
            left: 70.0,
            width: 60.0
        })
    );
    assert_eq!(report.elapsed_ms, 2400);
}

#[test]
fn swipe_session_drops_left_arrow_inside_lock() {
    let config = RouterConfig::default();
    let report = session::run_session(&config, &load("swipe.json")).unwrap();

    let pushes: Vec<u64> = report
        .trace
        .iter()
        .filter(|t| {
            matches!(
                t.kind,
                TraceKind::Applied {
                    intent: RenderIntent::PushHistory { .. }
                }
            )
        })
        .map(|t| t.at_ms)
        .collect();
    // Swipe at 0 and the second arrow at 800; the arrow at 200 hit the lock.
    assert_eq!(pushes, vec![0, 800]);

    let unlocks = report
        .trace
        .iter()
        .filter(|t| {
            matches!(
                t.kind,
                TraceKind::Fired {
                    timer: Timer::Unlock
                }
            )
        })
        .count();
    assert_eq!(unlocks, 3);
}

#[test]
fn tabs_session_ignores_drag_from_image() {
    let config = RouterConfig::default();
    let report = session::run_session(&config, &load("tabs.json")).unwrap();

    // The second tab click lands inside the first transition's lock.
    assert_eq!(report.section, Section::GALLERY);
    assert_eq!(report.path, "/");
    assert_eq!(report.history_len, 2);
    assert_eq!(report.elapsed_ms, 800);
    assert!(report.trace.iter().any(|t| matches!(
        &t.kind,
        TraceKind::Input {
            event: RouterEvent::Pointer(_)
        }
    )));
}

#[test]
fn report_serializes_for_json_output() {
    let report = session::run_session(&RouterConfig::default(), &load("tabs.json")).unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["section"], 0);
    assert_eq!(json["path"], "/");
    assert_eq!(json["trace"][0]["kind"], "applied");
}

// ===========================================================================
// Page shell
// ===========================================================================

#[test]
fn demo_content_renders_for_about_path() {
    let config = RouterConfig::default();
    let content = shell::load_content(&demos().join("content.json")).unwrap();
    let html = shell::render_shell(&config, &content, "/about")
        .unwrap()
        .into_string();

    assert!(html.contains("seamless-slider"));
    assert!(html.contains("crown-02.avif"));
    assert!(html.contains("<strong>portfolio</strong>"));
    assert!(html.contains("About Domain King"));
}
