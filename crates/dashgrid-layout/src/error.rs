#![forbid(unsafe_code)]

//! Layout engine errors.
//!
//! Every geometry or collision violation is detected before any mutation,
//! so an `Err` always means the widget set is unchanged.

use dashgrid_core::GridPosition;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::widget::WidgetId;

pub type Result<T> = std::result::Result<T, LayoutError>;

/// Why a footprint cannot be committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "violation", rename_all = "snake_case")]
pub enum PositionViolation {
    /// Width or height is zero.
    ZeroExtent,
    /// The right edge extends past the last column.
    OutOfBounds { columns: u32 },
    /// The footprint overlaps another widget.
    Collides { with: WidgetId },
    /// Halving the width would leave a side narrower than `min_width`.
    TooNarrowToSplit { min_width: u32 },
}

impl std::fmt::Display for PositionViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroExtent => write!(f, "zero width or height"),
            Self::OutOfBounds { columns } => write!(f, "exceeds {columns} columns"),
            Self::Collides { with } => write!(f, "overlaps {with}"),
            Self::TooNarrowToSplit { min_width } => {
                write!(f, "too narrow to split into two widgets of width {min_width}")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// A caller tried to commit a footprint that fails bounds or collision
    /// checks. Recoverable: re-validate and retry, or discard.
    #[error("invalid position {position:?}: {violation}")]
    InvalidPosition {
        position: GridPosition,
        violation: PositionViolation,
    },

    /// The referenced widget is not in the set. Indicates the caller and the
    /// engine disagree about the widget collection.
    #[error("widget not found: {id}")]
    NotFound { id: WidgetId },

    /// Two widgets carry the same identity.
    #[error("duplicate widget id: {id}")]
    DuplicateId { id: WidgetId },

    /// The spiral search found nothing and the bottom fallback is disabled.
    #[error("no free position found after {attempts} attempts")]
    PlacementExhausted { attempts: u32 },
}

impl LayoutError {
    /// Convenience constructor for [`LayoutError::InvalidPosition`].
    #[must_use]
    pub const fn invalid(position: GridPosition, violation: PositionViolation) -> Self {
        Self::InvalidPosition {
            position,
            violation,
        }
    }

    /// Whether the caller can recover locally by discarding the candidate.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::InvalidPosition { .. } | Self::PlacementExhausted { .. }
        )
    }
}
