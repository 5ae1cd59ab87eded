#![forbid(unsafe_code)]

//! Layout engine for dashgrid dashboard canvases.
//!
//! # Role in dashgrid
//! Widgets live on an integer grid `columns` wide and unbounded downward.
//! This crate keeps them there without overlap while users insert, drag,
//! resize and delete them:
//!
//! - [`collision`]: overlap queries against the live widget set.
//! - [`placement`]: nearest free position (spiral search, bottom fallback).
//! - [`gesture`]: single-slot state machine turning pointer positions into
//!   validated move, resize, insert and split-insert operations.
//! - [`widget_set`]: the authoritative widget collection and id allocator.
//! - [`canvas`]: the host-facing bundle of all of the above plus snapshots.
//!
//! Widget content ([`WidgetContent`]) travels with each widget but the
//! layout path only sees the `{id, position}` [`Footprint`].
//!
//! # Example
//!
//! ```
//! use dashgrid_core::PixelPoint;
//! use dashgrid_layout::{Canvas, EnginePolicy, GridConfig, PaletteItem, WidgetKind};
//!
//! let mut canvas = Canvas::new(GridConfig::default(), EnginePolicy::default(), 1200.0)
//!     .expect("valid config");
//! canvas.begin_insert(PaletteItem::for_kind(WidgetKind::Chart), PixelPoint::new(550.0, 10.0));
//! canvas.pointer_up(PixelPoint::new(550.0, 10.0)).expect("drop");
//! assert_eq!(canvas.list()[0].position.x, 5);
//! ```

pub mod canvas;
pub mod collision;
pub mod config;
pub mod content;
pub mod error;
pub mod gesture;
pub mod placement;
pub mod replay;
pub mod widget;
pub mod widget_set;

pub use canvas::{Canvas, CanvasSnapshot, InvariantReport, SNAPSHOT_SCHEMA_VERSION, SnapshotError};
pub use collision::{Footprint, has_collision};
pub use config::{EnginePolicy, GridConfig, PolicyConfigError};
pub use content::{WidgetContent, WidgetKind};
pub use error::{LayoutError, PositionViolation, Result};
pub use gesture::{
    CancelPolicy, CancelReason, DropPreview, GestureEffect, GestureNoopReason, GesturePhase,
    GesturePolicy, GestureState, GestureTransition, InteractionController, ResizeHandle,
};
pub use placement::{
    Placement, PlacementStrategy, PlacementTuning, find_valid_position, solve_placement,
};
pub use replay::{GestureTrace, ReplayError, ReplayOutcome, TraceEvent, replay_trace};
pub use widget::{PaletteItem, Widget, WidgetDraft, WidgetId, WidgetStyle};
pub use widget_set::{SplitInsert, WidgetSet};
