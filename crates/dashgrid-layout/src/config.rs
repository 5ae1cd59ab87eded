#![forbid(unsafe_code)]

//! Canvas geometry and engine policy configuration.
//!
//! [`GridConfig`] fixes the canvas coordinate space. [`EnginePolicy`] holds
//! the tunable behavior of the placement solver and the gesture controller.
//! Both load from JSON; `EnginePolicy` also loads from TOML with the
//! `policy-config` feature.
//!
//! # TOML example
//!
//! ```toml
//! [placement]
//! max_radius = 10
//! max_attempts = 50
//! fallback_to_bottom = true
//!
//! [gesture]
//! min_width = 2
//! min_height = 2
//! rounding = "floor"
//! cancel = "keep_streamed"
//! split_on_widget_drop = true
//! ```
//!
//! Missing fields take their defaults, so an empty document is the default
//! policy.

use std::path::Path;

use dashgrid_core::GridMetrics;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::gesture::GesturePolicy;
use crate::placement::PlacementTuning;

/// Default grid width in columns.
pub const DEFAULT_COLUMNS: u32 = 12;

/// Default row height in pixels.
pub const DEFAULT_ROW_HEIGHT_PX: f64 = 100.0;

/// Coordinate space of one canvas. `columns` is fixed once editing begins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridConfig {
    pub columns: u32,
    pub row_height_px: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS,
            row_height_px: DEFAULT_ROW_HEIGHT_PX,
        }
    }
}

impl GridConfig {
    #[must_use]
    pub const fn new(columns: u32, row_height_px: f64) -> Self {
        Self {
            columns,
            row_height_px,
        }
    }

    /// Cell metrics for a canvas `canvas_width_px` wide.
    #[must_use]
    pub fn metrics(&self, canvas_width_px: f64) -> GridMetrics {
        GridMetrics::for_canvas(canvas_width_px, self.columns, self.row_height_px)
    }

    /// Problems with this config; empty when valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.columns == 0 {
            errors.push("grid.columns must be at least 1".to_string());
        }
        if !(self.row_height_px.is_finite() && self.row_height_px > 0.0) {
            errors.push(format!(
                "grid.row_height_px must be finite and > 0, got {}",
                self.row_height_px
            ));
        }
        errors
    }
}

/// Tunable engine behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EnginePolicy {
    pub placement: PlacementTuning,
    pub gesture: GesturePolicy,
}

impl EnginePolicy {
    /// Load from a TOML string.
    #[cfg(feature = "policy-config")]
    pub fn from_toml_str(s: &str) -> Result<Self, PolicyConfigError> {
        let policy: Self = toml::from_str(s)?;
        policy.checked()
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "policy-config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, PolicyConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, PolicyConfigError> {
        let policy: Self = serde_json::from_str(s)?;
        policy.checked()
    }

    /// Load from a JSON file on disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, PolicyConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Load by file extension: `.toml` (with `policy-config`) or JSON.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, PolicyConfigError> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            #[cfg(feature = "policy-config")]
            Some("toml") => Self::from_toml_file(path),
            _ => Self::from_json_file(path),
        }
    }

    /// Validate all parameters.
    ///
    /// Returns a list of validation errors. An empty list means the policy
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.placement.max_radius == 0 {
            errors.push("placement.max_radius must be > 0".to_string());
        }
        if self.placement.max_attempts == 0 && !self.placement.fallback_to_bottom {
            errors.push(
                "placement.max_attempts = 0 requires placement.fallback_to_bottom".to_string(),
            );
        }
        errors.extend(self.gesture.validate());
        errors
    }

    fn checked(self) -> Result<Self, PolicyConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(PolicyConfigError::Validation(errors))
        }
    }
}

/// Errors from loading an [`EnginePolicy`].
#[derive(Debug, Error)]
pub enum PolicyConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[cfg(feature = "policy-config")]
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

#[cfg(test)]
mod tests {
    use dashgrid_core::CellRounding;

    use super::{EnginePolicy, GridConfig, PolicyConfigError};
    use crate::gesture::CancelPolicy;

    #[test]
    fn defaults_match_engine_constants() {
        let policy = EnginePolicy::default();
        assert_eq!(policy.placement.max_radius, 10);
        assert_eq!(policy.placement.max_attempts, 50);
        assert!(policy.placement.fallback_to_bottom);
        assert_eq!(policy.gesture.min_width, 2);
        assert_eq!(policy.gesture.min_height, 2);
        assert_eq!(policy.gesture.rounding, CellRounding::Floor);
        assert_eq!(policy.gesture.cancel, CancelPolicy::KeepStreamed);
        assert!(policy.validate().is_empty());
    }

    #[test]
    fn grid_metrics_divide_canvas_width() {
        let grid = GridConfig::default();
        let metrics = grid.metrics(1200.0);
        assert!((metrics.cell_width_px - 100.0).abs() < f64::EPSILON);
        assert!((metrics.row_height_px - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn grid_validate_rejects_zero_columns() {
        let errors = GridConfig::new(0, f64::NAN).validate();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("grid.columns"));
    }

    #[test]
    fn empty_json_is_default() {
        let policy = EnginePolicy::from_json_str("{}").expect("parses");
        assert_eq!(policy, EnginePolicy::default());
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let policy = EnginePolicy::from_json_str(
            r#"{"gesture":{"rounding":"nearest","cancel":"restore_origin"}}"#,
        )
        .expect("parses");
        assert_eq!(policy.gesture.rounding, CellRounding::Nearest);
        assert_eq!(policy.gesture.cancel, CancelPolicy::RestoreOrigin);
        assert_eq!(policy.gesture.min_width, 2);
        assert_eq!(policy.placement.max_attempts, 50);
    }

    #[test]
    fn invalid_policy_is_rejected_on_load() {
        let err = EnginePolicy::from_json_str(r#"{"gesture":{"min_width":0}}"#)
            .expect_err("min_width 0 is invalid");
        match err {
            PolicyConfigError::Validation(errors) => {
                assert!(errors.iter().any(|e| e.contains("gesture.min_width")));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            EnginePolicy::from_json_str("{"),
            Err(PolicyConfigError::Json(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            EnginePolicy::from_json_file("/nonexistent/dashgrid-policy.json"),
            Err(PolicyConfigError::Io(_))
        ));
    }

    #[cfg(feature = "policy-config")]
    #[test]
    fn toml_roundtrip() {
        let policy = EnginePolicy::from_toml_str(
            r#"
            [placement]
            max_attempts = 80
            fallback_to_bottom = false

            [gesture]
            split_on_widget_drop = false
            "#,
        )
        .expect("parses");
        assert_eq!(policy.placement.max_attempts, 80);
        assert!(!policy.placement.fallback_to_bottom);
        assert!(!policy.gesture.split_on_widget_drop);
        assert_eq!(policy.placement.max_radius, 10);
    }
}
