#![forbid(unsafe_code)]

//! Unified error model.
//!
//! Every subsystem keeps its own typed error. [`Error`] wraps them for hosts
//! that want one `?`-able type, and [`Error::feedback`] classifies each
//! failure: invalid candidates are dropped without a message, contract
//! violations are surfaced.

use dashgrid_layout::{LayoutError, PolicyConfigError, ReplayError, SnapshotError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Layout(#[from] LayoutError),
    #[error(transparent)]
    Config(#[from] PolicyConfigError),
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
    #[error(transparent)]
    Replay(#[from] ReplayError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// How a host should present a failure to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    /// Discard the candidate and keep the current layout; no dialog.
    RejectSilently,
    /// Surface the error: caller and engine disagree, or input is broken.
    Surface,
}

impl Error {
    #[must_use]
    pub fn feedback(&self) -> Feedback {
        match self {
            Self::Layout(err) | Self::Replay(ReplayError::Event { source: err, .. }) => {
                layout_feedback(err)
            }
            Self::Config(_) | Self::Snapshot(_) | Self::Json(_)
            | Self::Io(_) => Feedback::Surface,
        }
    }

    /// Error type label for logs.
    #[must_use]
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Layout(_) => "layout",
            Self::Config(_) => "config",
            Self::Snapshot(_) => "snapshot",
            Self::Replay(_) => "replay",
            Self::Json(_) => "json",
            Self::Io(_) => "io",
        }
    }
}

fn layout_feedback(err: &LayoutError) -> Feedback {
    match err {
        LayoutError::InvalidPosition { .. } | LayoutError::PlacementExhausted { .. } => {
            Feedback::RejectSilently
        }
        LayoutError::NotFound { .. } | LayoutError::DuplicateId { .. } => Feedback::Surface,
    }
}

#[cfg(test)]
mod tests {
    use dashgrid_core::GridPosition;
    use dashgrid_layout::{LayoutError, PositionViolation, ReplayError, WidgetId};

    use super::{Error, Feedback};

    fn id(raw: u64) -> WidgetId {
        WidgetId::new(raw).expect("non-zero id")
    }

    #[test]
    fn invalid_position_is_rejected_silently() {
        let err = Error::from(LayoutError::invalid(
            GridPosition::new(0, 0, 4, 3),
            PositionViolation::Collides { with: id(2) },
        ));
        assert_eq!(err.feedback(), Feedback::RejectSilently);
        assert_eq!(err.error_type(), "layout");
    }

    #[test]
    fn not_found_is_surfaced() {
        let err = Error::from(LayoutError::NotFound { id: id(3) });
        assert_eq!(err.feedback(), Feedback::Surface);
        assert_eq!(err.to_string(), "widget not found: widget-3");
    }

    #[test]
    fn replay_event_error_uses_inner_classification() {
        let err = Error::from(ReplayError::Event {
            index: 4,
            source: LayoutError::NotFound { id: id(1) },
        });
        assert_eq!(err.feedback(), Feedback::Surface);
        assert_eq!(err.error_type(), "replay");
    }

    #[test]
    fn io_is_surfaced() {
        let err = Error::from(std::io::Error::other("disk gone"));
        assert_eq!(err.feedback(), Feedback::Surface);
        assert!(err.to_string().contains("disk gone"));
    }
}
