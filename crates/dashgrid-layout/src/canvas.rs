#![forbid(unsafe_code)]

//! One editable dashboard canvas.
//!
//! [`Canvas`] bundles the grid config, engine policy, the authoritative
//! [`WidgetSet`] and the [`InteractionController`], and is the entry point
//! hosts normally use. Programmatic operations (`add_widget`,
//! `move_widget`, `delete_widget`) go through the placement solver, so the
//! non-overlap invariant holds after every call. They end any active
//! gesture first.

use dashgrid_core::{GridPosition, PixelPoint};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{EnginePolicy, GridConfig};
use crate::error::{LayoutError, PositionViolation, Result};
use crate::gesture::{CancelReason, GestureTransition, InteractionController, ResizeHandle};
use crate::placement::{Placement, solve_placement};
use crate::widget::{PaletteItem, Widget, WidgetDraft, WidgetId};
use crate::widget_set::WidgetSet;

/// Schema version written by [`Canvas::to_snapshot`]. Advisory only: restore
/// accepts any version and validates the widgets themselves.
pub const SNAPSHOT_SCHEMA_VERSION: u32 = 1;

const fn snapshot_schema_version() -> u32 {
    SNAPSHOT_SCHEMA_VERSION
}

/// Serializable canvas state: grid config plus widgets in list order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasSnapshot {
    #[serde(default = "snapshot_schema_version")]
    pub schema_version: u32,
    #[serde(default)]
    pub config: GridConfig,
    #[serde(default)]
    pub widgets: Vec<Widget>,
}

impl CanvasSnapshot {
    pub fn from_json_str(s: &str) -> std::result::Result<Self, SnapshotError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn to_json_pretty(&self) -> std::result::Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Errors from building a canvas out of config or a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("snapshot layout error: {0}")]
    Layout(#[from] LayoutError),
    #[error("invalid canvas config: {}", .0.join("; "))]
    Config(Vec<String>),
}

/// Invariant check result; both lists are empty on a healthy canvas.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InvariantReport {
    pub overlaps: Vec<(WidgetId, WidgetId)>,
    pub out_of_bounds: Vec<WidgetId>,
}

impl InvariantReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.overlaps.is_empty() && self.out_of_bounds.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct Canvas {
    config: GridConfig,
    policy: EnginePolicy,
    canvas_width_px: f64,
    widgets: WidgetSet,
    controller: InteractionController,
}

impl Canvas {
    /// Empty canvas rendered `canvas_width_px` wide.
    pub fn new(
        config: GridConfig,
        policy: EnginePolicy,
        canvas_width_px: f64,
    ) -> std::result::Result<Self, SnapshotError> {
        let mut errors = config.validate();
        errors.extend(policy.validate());
        if !(canvas_width_px.is_finite() && canvas_width_px > 0.0) {
            errors.push(format!(
                "canvas width must be finite and > 0, got {canvas_width_px}"
            ));
        }
        if !errors.is_empty() {
            return Err(SnapshotError::Config(errors));
        }

        Ok(Self {
            config,
            policy,
            canvas_width_px,
            widgets: WidgetSet::new(config.columns),
            controller: InteractionController::new(
                config.metrics(canvas_width_px),
                policy.gesture,
                policy.placement,
            ),
        })
    }

    /// Restore a snapshot without altering any position.
    ///
    /// Rejects out-of-bounds footprints, duplicate ids and overlapping
    /// widgets rather than repairing them.
    pub fn from_snapshot(
        snapshot: CanvasSnapshot,
        policy: EnginePolicy,
        canvas_width_px: f64,
    ) -> std::result::Result<Self, SnapshotError> {
        if snapshot.schema_version != SNAPSHOT_SCHEMA_VERSION {
            tracing::warn!(
                found = snapshot.schema_version,
                current = SNAPSHOT_SCHEMA_VERSION,
                "snapshot schema version differs, restoring as-is"
            );
        }
        let mut canvas = Self::new(snapshot.config, policy, canvas_width_px)?;
        for widget in snapshot.widgets {
            canvas.widgets.restore(widget)?;
        }
        if let Some(&(first, second)) = canvas.widgets.overlaps().first() {
            let position = canvas.widgets.position(second)?;
            return Err(LayoutError::invalid(position, PositionViolation::Collides { with: first }).into());
        }
        tracing::debug!(widgets = canvas.widgets.len(), "canvas restored from snapshot");
        Ok(canvas)
    }

    #[must_use]
    pub fn to_snapshot(&self) -> CanvasSnapshot {
        CanvasSnapshot {
            schema_version: SNAPSHOT_SCHEMA_VERSION,
            config: self.config,
            widgets: self.widgets.list().to_vec(),
        }
    }

    #[must_use]
    pub const fn config(&self) -> &GridConfig {
        &self.config
    }

    #[must_use]
    pub const fn policy(&self) -> &EnginePolicy {
        &self.policy
    }

    #[must_use]
    pub const fn canvas_width_px(&self) -> f64 {
        self.canvas_width_px
    }

    /// Re-derive cell metrics after the host resized the canvas.
    pub fn set_canvas_width(&mut self, canvas_width_px: f64) {
        if canvas_width_px.is_finite() && canvas_width_px > 0.0 {
            self.canvas_width_px = canvas_width_px;
            self.controller
                .set_metrics(self.config.metrics(canvas_width_px));
        } else {
            tracing::warn!(canvas_width_px, "ignoring invalid canvas width");
        }
    }

    #[must_use]
    pub const fn widgets(&self) -> &WidgetSet {
        &self.widgets
    }

    /// Live widget list for rendering.
    #[must_use]
    pub fn list(&self) -> &[Widget] {
        self.widgets.list()
    }

    #[must_use]
    pub const fn controller(&self) -> &InteractionController {
        &self.controller
    }

    /// Hit test for a grid cell.
    #[must_use]
    pub fn widget_at(&self, column: u32, row: u32) -> Option<&Widget> {
        self.widgets.widget_at(column, row)
    }

    /// Place `draft` as close to `draft.position` as possible and insert it.
    pub fn add_widget(&mut self, draft: WidgetDraft) -> Result<(WidgetId, Placement)> {
        self.end_gesture();
        let placement = solve_placement(
            draft.position,
            self.widgets.list(),
            self.widgets.columns(),
            None,
            &self.policy.placement,
        )?;
        let id = self.widgets.insert(WidgetDraft {
            position: placement.position,
            ..draft
        })?;
        Ok((id, placement))
    }

    /// [`add_widget`](Self::add_widget) for a palette item anchored at a
    /// cell.
    pub fn add_from_palette(
        &mut self,
        item: &PaletteItem,
        column: u32,
        row: u32,
    ) -> Result<(WidgetId, Placement)> {
        self.add_widget(item.draft_at(item.footprint_at(column, row)))
    }

    /// Move or resize `id` to the nearest free spot around `preferred`.
    pub fn move_widget(&mut self, id: WidgetId, preferred: GridPosition) -> Result<Placement> {
        self.end_gesture();
        self.widgets.position(id)?;
        let placement = solve_placement(
            preferred,
            self.widgets.list(),
            self.widgets.columns(),
            Some(id),
            &self.policy.placement,
        )?;
        self.widgets.apply_position(id, placement.position)?;
        Ok(placement)
    }

    pub fn delete_widget(&mut self, id: WidgetId) -> Result<Widget> {
        self.end_gesture();
        self.widgets.remove(id)
    }

    #[must_use]
    pub fn check_invariants(&self) -> InvariantReport {
        InvariantReport {
            overlaps: self.widgets.overlaps(),
            out_of_bounds: self.widgets.bounds_violations(),
        }
    }

    pub fn begin_move(&mut self, id: WidgetId, pointer: PixelPoint) -> Result<GestureTransition> {
        self.controller.begin_move(&self.widgets, id, pointer)
    }

    pub fn begin_resize(
        &mut self,
        id: WidgetId,
        handle: ResizeHandle,
        pointer: PixelPoint,
    ) -> Result<GestureTransition> {
        self.controller
            .begin_resize(&self.widgets, id, handle, pointer)
    }

    pub fn begin_insert(&mut self, item: PaletteItem, pointer: PixelPoint) -> GestureTransition {
        self.controller.begin_insert(&self.widgets, item, pointer)
    }

    pub fn pointer_move(&mut self, pointer: PixelPoint) -> Result<GestureTransition> {
        self.controller.pointer_move(&mut self.widgets, pointer)
    }

    pub fn pointer_up(&mut self, pointer: PixelPoint) -> Result<GestureTransition> {
        self.controller.pointer_up(&mut self.widgets, pointer)
    }

    pub fn cancel(&mut self, reason: CancelReason) -> Result<GestureTransition> {
        self.controller.cancel(&mut self.widgets, reason)
    }

    pub fn force_cancel(&mut self) -> Option<GestureTransition> {
        self.controller.force_cancel()
    }

    fn end_gesture(&mut self) {
        if let Some(transition) = self.controller.force_cancel() {
            tracing::debug!(
                transition_id = transition.transition_id,
                from = ?transition.from,
                "gesture ended by programmatic edit"
            );
        }
    }
}
