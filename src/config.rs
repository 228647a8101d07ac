//! Router configuration module.
//!
//! Handles loading, validating, and merging `router.toml`. Stock defaults
//! reproduce the two-section Domain King layout; a user file only needs the
//! keys it wants to change.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [[sections]]
//! name = "gallery"
//! path = "/"
//! title = "DOMAIN KING"
//! label = "Images"
//!
//! [[sections]]
//! name = "about"
//! path = "/about"
//! title = "About - DOMAIN KING"
//! label = "About"
//!
//! [gesture]
//! threshold = 50.0           # Minimum horizontal travel for a swipe (px)
//!
//! [transition]
//! duration_ms = 800          # Section change lock, matches the CSS transition
//! tween_easing = "power2.inOut"
//! css = "transform 0.8s cubic-bezier(0.25, 0.46, 0.45, 0.94)"
//!
//! [indicator]
//! tween_duration_s = 0.3
//! easing = "power2.out"
//! defer_ms = 50              # Delay before retrying an unmeasurable tab
//! max_deferrals = 3
//!
//! [history]
//! enabled = true             # Push entries and set titles on user navigation
//!
//! [animation]
//! backend = "auto"           # auto | tween | css
//! readiness_timeout_ms = 3000
//! readiness_poll_ms = 100
//! ```
//!
//! Arrays such as `sections` are replaced wholesale by an overlay, not merged
//! element by element. Unknown keys are rejected to catch typos early.

use crate::section::{SectionSpec, SectionTable};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// File name looked up in the config directory.
pub const CONFIG_FILE: &str = "router.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Router configuration loaded from `router.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RouterConfig {
    /// Sections in slider order.
    pub sections: Vec<SectionSpec>,
    /// Swipe/drag classification.
    pub gesture: GestureConfig,
    /// Section change animation and lock.
    pub transition: TransitionConfig,
    /// Tab indicator animation and layout deferral.
    pub indicator: IndicatorConfig,
    /// Session history integration.
    pub history: HistoryConfig,
    /// Animation backend selection.
    pub animation: AnimationConfig,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            sections: default_sections(),
            gesture: GestureConfig::default(),
            transition: TransitionConfig::default(),
            indicator: IndicatorConfig::default(),
            history: HistoryConfig::default(),
            animation: AnimationConfig::default(),
        }
    }
}

fn default_sections() -> Vec<SectionSpec> {
    vec![
        SectionSpec::new("gallery", "/", "DOMAIN KING", "Images"),
        SectionSpec::new("about", "/about", "About - DOMAIN KING", "About"),
    ]
}

impl RouterConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sections.is_empty() {
            return Err(ConfigError::Validation(
                "sections must not be empty".into(),
            ));
        }
        let mut paths = HashSet::new();
        for spec in &self.sections {
            if !spec.path.starts_with('/') {
                return Err(ConfigError::Validation(format!(
                    "sections.path must start with '/': {:?}",
                    spec.path
                )));
            }
            if !paths.insert(spec.path.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "sections.path must be unique: {:?}",
                    spec.path
                )));
            }
            if spec.name.is_empty() {
                return Err(ConfigError::Validation(
                    "sections.name must not be empty".into(),
                ));
            }
        }
        if !self.gesture.threshold.is_finite() || self.gesture.threshold < 0.0 {
            return Err(ConfigError::Validation(
                "gesture.threshold must be a non-negative number".into(),
            ));
        }
        if self.transition.duration_ms == 0 {
            return Err(ConfigError::Validation(
                "transition.duration_ms must be non-zero".into(),
            ));
        }
        if !self.indicator.tween_duration_s.is_finite() || self.indicator.tween_duration_s < 0.0 {
            return Err(ConfigError::Validation(
                "indicator.tween_duration_s must be a non-negative number".into(),
            ));
        }
        if self.animation.readiness_poll_ms == 0 {
            return Err(ConfigError::Validation(
                "animation.readiness_poll_ms must be non-zero".into(),
            ));
        }
        Ok(())
    }

    /// Validate and build the section table.
    pub fn section_table(&self) -> Result<SectionTable, ConfigError> {
        self.validate()?;
        SectionTable::new(self.sections.clone())
            .ok_or_else(|| ConfigError::Validation("sections must not be empty".into()))
    }
}

/// Swipe/drag classification settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GestureConfig {
    /// Horizontal travel (CSS px) a gesture must exceed to count as a swipe.
    pub threshold: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self { threshold: 50.0 }
    }
}

/// Section change animation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransitionConfig {
    /// How long the transition lock is held. Independent of the animation.
    pub duration_ms: u64,
    /// Easing passed to the animation driver.
    pub tween_easing: String,
    /// CSS `transition` value used when no animation driver is loaded.
    pub css: String,
}

impl TransitionConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            duration_ms: 800,
            tween_easing: "power2.inOut".to_string(),
            css: "transform 0.8s cubic-bezier(0.25, 0.46, 0.45, 0.94)".to_string(),
        }
    }
}

/// Indicator settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndicatorConfig {
    /// Tween duration in seconds.
    pub tween_duration_s: f64,
    /// Tween easing.
    pub easing: String,
    /// Delay before retrying a sync whose tabs were not laid out.
    pub defer_ms: u64,
    /// Maximum number of deferred retries before giving up.
    pub max_deferrals: u32,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            tween_duration_s: 0.3,
            easing: "power2.out".to_string(),
            defer_ms: 50,
            max_deferrals: 3,
        }
    }
}

/// Session history settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HistoryConfig {
    /// When false, section changes never push entries or touch the title.
    pub enabled: bool,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Which animation path the router uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationBackend {
    /// Use the tween driver whenever it is loaded at call time.
    #[default]
    Auto,
    /// Wait (bounded) for the tween driver; fall back to CSS for good on timeout.
    Tween,
    /// Always use CSS transitions.
    Css,
}

/// Animation backend settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnimationConfig {
    pub backend: AnimationBackend,
    /// How long the `tween` backend waits for the driver to load.
    pub readiness_timeout_ms: u64,
    /// Interval between readiness checks.
    pub readiness_poll_ms: u64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            backend: AnimationBackend::Auto,
            readiness_timeout_ms: 3000,
            readiness_poll_ms: 100,
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(RouterConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay, arrays included, replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `router.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<RouterConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: RouterConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `router.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(dir: &Path) -> Result<RouterConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(dir)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `router.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Domain King Router Configuration
# =================================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Sections, in slider order. The first section is the fallback for any
# path that matches no canonical path. Replacing this list replaces all of it.
# ---------------------------------------------------------------------------
[[sections]]
name = "gallery"
path = "/"
title = "DOMAIN KING"
label = "Images"

[[sections]]
name = "about"
path = "/about"
title = "About - DOMAIN KING"
label = "About"

# ---------------------------------------------------------------------------
# Gestures
# ---------------------------------------------------------------------------
[gesture]
# Horizontal travel in CSS pixels a swipe or drag must exceed to navigate.
threshold = 50.0

# ---------------------------------------------------------------------------
# Section transition
# ---------------------------------------------------------------------------
[transition]
# Navigation is locked for this long after every section change.
# Keep it equal to the CSS transition duration below.
duration_ms = 800

# Easing handed to the animation driver.
tween_easing = "power2.inOut"

# CSS transition used when no animation driver is loaded.
css = "transform 0.8s cubic-bezier(0.25, 0.46, 0.45, 0.94)"

# ---------------------------------------------------------------------------
# Tab indicator
# ---------------------------------------------------------------------------
[indicator]
tween_duration_s = 0.3
easing = "power2.out"

# Retry delay and attempts while tabs are not laid out yet.
defer_ms = 50
max_deferrals = 3

# ---------------------------------------------------------------------------
# History
# ---------------------------------------------------------------------------
[history]
# Push a history entry and set the document title on user navigation.
enabled = true

# ---------------------------------------------------------------------------
# Animation backend
# ---------------------------------------------------------------------------
[animation]
# auto:  use the animation driver whenever it is loaded
# tween: wait for the driver to load; on timeout, use CSS for the page view
# css:   never use the animation driver
backend = "auto"
readiness_timeout_ms = 3000
readiness_poll_ms = 100
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_has_two_sections() {
        let config = RouterConfig::default();
        assert_eq!(config.sections.len(), 2);
        assert_eq!(config.sections[0].path, "/");
        assert_eq!(config.sections[1].path, "/about");
        assert_eq!(config.sections[1].title, "About - DOMAIN KING");
    }

    #[test]
    fn default_config_constants() {
        let config = RouterConfig::default();
        assert_eq!(config.gesture.threshold, 50.0);
        assert_eq!(config.transition.duration(), Duration::from_millis(800));
        assert_eq!(config.indicator.tween_duration_s, 0.3);
        assert!(config.history.enabled);
        assert_eq!(config.animation.backend, AnimationBackend::Auto);
    }

    #[test]
    fn parse_partial_config() {
        let config: RouterConfig = toml::from_str(
            r#"
[gesture]
threshold = 80.0
"#,
        )
        .unwrap();
        assert_eq!(config.gesture.threshold, 80.0);
        assert_eq!(config.transition.duration_ms, 800);
        assert_eq!(config.sections.len(), 2);
    }

    #[test]
    fn parse_backend_names() {
        let config: RouterConfig = toml::from_str(
            r#"
[animation]
backend = "css"
"#,
        )
        .unwrap();
        assert_eq!(config.animation.backend, AnimationBackend::Css);
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config, RouterConfig::default());
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE),
            r#"
[transition]
duration_ms = 600

[history]
enabled = false
"#,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.transition.duration_ms, 600);
        assert!(!config.history.enabled);
        // Unspecified values stay stock
        assert_eq!(config.transition.tween_easing, "power2.inOut");
        assert_eq!(config.gesture.threshold, 50.0);
    }

    #[test]
    fn load_config_sections_replace_stock_list() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE),
            r#"
[[sections]]
name = "work"
path = "/"
title = "Work"
label = "Work"

[[sections]]
name = "press"
path = "/press"
title = "Press"
label = "Press"

[[sections]]
name = "contact"
path = "/contact"
title = "Contact"
label = "Contact"
"#,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        let names: Vec<&str> = config.sections.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["work", "press", "contact"]);
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "this is not valid toml [[[").unwrap();
        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn load_config_validates_values() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE),
            r#"
[transition]
duration_ms = 0
"#,
        )
        .unwrap();
        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    // =========================================================================
    // merge_toml tests
    // =========================================================================

    #[test]
    fn merge_toml_table_merge() {
        let base: toml::Value = toml::from_str(
            r#"
[transition]
duration_ms = 800
css = "a"
"#,
        )
        .unwrap();
        let overlay: toml::Value = toml::from_str(
            r#"
[transition]
duration_ms = 500
"#,
        )
        .unwrap();
        let merged = merge_toml(base, overlay);
        let t = merged.get("transition").unwrap();
        assert_eq!(t.get("duration_ms").unwrap().as_integer(), Some(500));
        assert_eq!(t.get("css").unwrap().as_str(), Some("a"));
    }

    #[test]
    fn merge_toml_arrays_replace() {
        let base: toml::Value = toml::from_str("xs = [1, 2, 3]").unwrap();
        let overlay: toml::Value = toml::from_str("xs = [9]").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged.get("xs").unwrap().as_array().unwrap().len(), 1);
    }

    // =========================================================================
    // Unknown key rejection tests
    // =========================================================================

    #[test]
    fn unknown_key_rejected() {
        let result: Result<RouterConfig, _> = toml::from_str(
            r#"
[gesture]
treshold = 50.0
"#,
        );
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown field"));
    }

    #[test]
    fn unknown_section_key_rejected() {
        let result: Result<RouterConfig, _> = toml::from_str(
            r#"
[[sections]]
name = "gallery"
path = "/"
title = "x"
label = "x"
icon = "star"
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn unknown_backend_rejected() {
        let result: Result<RouterConfig, _> = toml::from_str(
            r#"
[animation]
backend = "webgl"
"#,
        );
        assert!(result.is_err());
    }

    // =========================================================================
    // Validation tests
    // =========================================================================

    #[test]
    fn validate_default_config_passes() {
        assert!(RouterConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_empty_sections() {
        let mut config = RouterConfig::default();
        config.sections.clear();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("sections"));
        assert!(config.section_table().is_err());
    }

    #[test]
    fn validate_duplicate_paths() {
        let mut config = RouterConfig::default();
        config.sections[1].path = "/".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_relative_path() {
        let mut config = RouterConfig::default();
        config.sections[1].path = "about".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_negative_threshold() {
        let mut config = RouterConfig::default();
        config.gesture.threshold = -1.0;
        assert!(config.validate().is_err());
        config.gesture.threshold = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_zero_poll_interval() {
        let mut config = RouterConfig::default();
        config.animation.readiness_poll_ms = 0;
        assert!(config.validate().is_err());
    }

    // =========================================================================
    // stock_config_toml tests
    // =========================================================================

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let config: RouterConfig = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(config, RouterConfig::default());
    }

    #[test]
    fn stock_defaults_value_has_all_tables() {
        let val = stock_defaults_value().unwrap();
        for key in ["sections", "gesture", "transition", "indicator", "history", "animation"] {
            assert!(val.get(key).is_some(), "missing {key}");
        }
    }

    #[test]
    fn resolve_config_with_overlay() {
        let base = stock_defaults_value().unwrap();
        let overlay: toml::Value = toml::from_str(
            r#"
[indicator]
defer_ms = 120
"#,
        )
        .unwrap();
        let config = resolve_config(base, Some(overlay)).unwrap();
        assert_eq!(config.indicator.defer_ms, 120);
        assert_eq!(config.indicator.max_deferrals, 3);
    }
}
