#![forbid(unsafe_code)]

//! dashgrid public facade crate.
//!
//! Re-exports the layout engine surface from the internal crates and offers
//! a prelude plus a unified [`Error`] that tells a host how to present each
//! failure.

pub mod error;

pub use error::{Error, Feedback, Result};

// --- Geometry re-exports ---------------------------------------------------

pub use dashgrid_core::{
    CellRounding, GridMetrics, GridPosition, PixelPoint, clamp_to_columns, intersects,
    pixel_to_grid,
};

// --- Layout re-exports -----------------------------------------------------

pub use dashgrid_layout::{
    CancelPolicy, CancelReason, Canvas, CanvasSnapshot, DropPreview, EnginePolicy, Footprint,
    GestureEffect, GesturePhase, GesturePolicy, GestureTrace, GestureTransition, GridConfig,
    InteractionController, InvariantReport, LayoutError, PaletteItem, Placement,
    PlacementStrategy, PlacementTuning, PolicyConfigError, PositionViolation, ReplayError,
    ReplayOutcome, ResizeHandle, SnapshotError, SplitInsert, TraceEvent, Widget, WidgetContent,
    WidgetDraft, WidgetId, WidgetKind, WidgetSet, WidgetStyle, find_valid_position,
    has_collision, replay_trace, solve_placement,
};

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        CancelReason, Canvas, EnginePolicy, Error, Feedback, GestureEffect, GridConfig,
        GridPosition, PaletteItem, PixelPoint, ResizeHandle, Result, Widget, WidgetDraft,
        WidgetId, WidgetKind,
    };

    pub use crate::{core, layout};
}

pub use dashgrid_core as core;
pub use dashgrid_layout as layout;
