#![forbid(unsafe_code)]

//! Gesture state machine for move, resize and insert interactions.
//!
//! ```text
//! Idle -> Moving    -> Idle   (pointer up keeps the streamed position)
//! Idle -> Resizing  -> Idle   (pointer up keeps the streamed position)
//! Idle -> Inserting -> Idle   (pointer up places and inserts a widget)
//!    any active     -> Idle   (cancel / force_cancel)
//! ```
//!
//! The controller owns gesture state only. The [`WidgetSet`] is passed in
//! on every call, so a host can drive the machine from any event source and
//! tests need no event loop. There is exactly one gesture slot: a `begin_*`
//! while a gesture is active yields [`GestureNoopReason::GestureAlreadyActive`]
//! and leaves the active gesture untouched.
//!
//! Move and resize stream every valid candidate into the widget set as it
//! is computed. An invalid candidate is reported as
//! [`GestureEffect::Rejected`] and the last valid position stays applied.

use dashgrid_core::{CellRounding, GridMetrics, GridPosition, PixelPoint};
use serde::{Deserialize, Serialize};

use crate::collision::{check_bounds, first_collision, has_collision};
use crate::error::{LayoutError, PositionViolation, Result};
use crate::placement::{PlacementStrategy, PlacementTuning, solve_placement};
use crate::widget::{PaletteItem, WidgetId};
use crate::widget_set::{SplitInsert, WidgetSet};

/// Smallest width a resize may produce.
pub const DEFAULT_MIN_WIDTH: u32 = 2;

/// Smallest height a resize may produce.
pub const DEFAULT_MIN_HEIGHT: u32 = 2;

/// One of the eight resize handles around a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeHandle {
    N,
    S,
    E,
    W,
    Ne,
    Nw,
    Se,
    Sw,
}

impl ResizeHandle {
    pub const ALL: [Self; 8] = [
        Self::N,
        Self::S,
        Self::E,
        Self::W,
        Self::Ne,
        Self::Nw,
        Self::Se,
        Self::Sw,
    ];

    /// Whether the handle drags the left edge.
    #[must_use]
    pub const fn moves_left(self) -> bool {
        matches!(self, Self::W | Self::Nw | Self::Sw)
    }

    #[must_use]
    pub const fn moves_right(self) -> bool {
        matches!(self, Self::E | Self::Ne | Self::Se)
    }

    #[must_use]
    pub const fn moves_top(self) -> bool {
        matches!(self, Self::N | Self::Ne | Self::Nw)
    }

    #[must_use]
    pub const fn moves_bottom(self) -> bool {
        matches!(self, Self::S | Self::Se | Self::Sw)
    }
}

/// Candidate footprint for dragging `handle` of a widget that started at
/// `start` by `(dx, dy)` cells.
///
/// The edge opposite the handle never moves. Width and height never drop
/// below the minimums, the left and top edges stop at 0, and the right edge
/// stops at `columns`. The bottom edge is unbounded.
#[must_use]
pub fn resize_candidate(
    start: GridPosition,
    handle: ResizeHandle,
    dx: i64,
    dy: i64,
    columns: u32,
    min_width: u32,
    min_height: u32,
) -> GridPosition {
    let (x, width) = resize_axis(
        start.x,
        start.width,
        dx,
        AxisEdges {
            leading: handle.moves_left(),
            trailing: handle.moves_right(),
        },
        min_width,
        Some(columns),
    );
    let (y, height) = resize_axis(
        start.y,
        start.height,
        dy,
        AxisEdges {
            leading: handle.moves_top(),
            trailing: handle.moves_bottom(),
        },
        min_height,
        None,
    );
    GridPosition::new(x, y, width, height)
}

#[derive(Clone, Copy)]
struct AxisEdges {
    leading: bool,
    trailing: bool,
}

fn resize_axis(
    origin: u32,
    extent: u32,
    delta: i64,
    edges: AxisEdges,
    min_extent: u32,
    limit: Option<u32>,
) -> (u32, u32) {
    let origin_cells = i64::from(origin);
    let extent_cells = i64::from(extent);
    let min_cells = i64::from(min_extent.max(1));

    if edges.leading {
        let far = origin_cells + extent_cells;
        let max_origin = (far - min_cells).max(0);
        let new_origin = origin_cells.saturating_add(delta).clamp(0, max_origin);
        return (to_cell(new_origin), to_cell(far - new_origin));
    }
    if edges.trailing {
        let mut new_extent = extent_cells.saturating_add(delta).max(min_cells);
        if let Some(limit) = limit {
            new_extent = new_extent.min((i64::from(limit) - origin_cells).max(1));
        }
        return (origin, to_cell(new_extent));
    }
    (origin, extent)
}

fn to_cell(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}

/// What happens to streamed live-feedback positions when a gesture is
/// canceled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CancelPolicy {
    /// Keep the last streamed position.
    #[default]
    KeepStreamed,
    /// Put the widget back where the gesture started.
    RestoreOrigin,
}

/// Gesture tuning knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GesturePolicy {
    pub min_width: u32,
    pub min_height: u32,
    /// Quantization of pointer deltas into cell deltas.
    pub rounding: CellRounding,
    pub cancel: CancelPolicy,
    /// Split the widget under the drop cell instead of placing nearby.
    pub split_on_widget_drop: bool,
}

impl Default for GesturePolicy {
    fn default() -> Self {
        Self {
            min_width: DEFAULT_MIN_WIDTH,
            min_height: DEFAULT_MIN_HEIGHT,
            rounding: CellRounding::Floor,
            cancel: CancelPolicy::KeepStreamed,
            split_on_widget_drop: true,
        }
    }
}

impl GesturePolicy {
    /// Problems with this policy; empty when valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.min_width == 0 {
            errors.push("gesture.min_width must be at least 1".to_string());
        }
        if self.min_height == 0 {
            errors.push("gesture.min_height must be at least 1".to_string());
        }
        errors
    }
}

/// Coarse gesture phase, used in transition diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GesturePhase {
    Idle,
    Moving,
    Resizing,
    Inserting,
}

/// Ghost footprint a host can draw while a gesture is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropPreview {
    pub position: GridPosition,
    /// False when the footprint overlaps a widget, so a drop would be
    /// relocated by the placement solver (or split `over`).
    pub valid: bool,
    /// Widget under the pointer that a drop would split.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub over: Option<WidgetId>,
}

/// Full gesture state.
#[derive(Debug, Clone, PartialEq)]
pub enum GestureState {
    Idle,
    Moving {
        widget: WidgetId,
        origin: PixelPoint,
        start: GridPosition,
        current: GridPosition,
    },
    Resizing {
        widget: WidgetId,
        handle: ResizeHandle,
        origin: PixelPoint,
        start: GridPosition,
        current: GridPosition,
    },
    Inserting {
        item: PaletteItem,
        preview: DropPreview,
    },
}

impl GestureState {
    #[must_use]
    pub const fn phase(&self) -> GesturePhase {
        match self {
            Self::Idle => GesturePhase::Idle,
            Self::Moving { .. } => GesturePhase::Moving,
            Self::Resizing { .. } => GesturePhase::Resizing,
            Self::Inserting { .. } => GesturePhase::Inserting,
        }
    }

    /// Widget being moved or resized.
    #[must_use]
    pub const fn widget(&self) -> Option<WidgetId> {
        match self {
            Self::Moving { widget, .. } | Self::Resizing { widget, .. } => Some(*widget),
            Self::Idle | Self::Inserting { .. } => None,
        }
    }
}

/// Explicit no-op diagnostics for inputs that are safely ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureNoopReason {
    IdleWithoutGesture,
    GestureAlreadyActive,
    /// The pointer moved within the same cell quantum.
    UnchangedCell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CancelReason {
    /// Escape key or an explicit host cancel.
    Explicit,
    /// Pointer released outside the canvas.
    ReleasedOutside,
    /// Cleanup path without a user input.
    Programmatic,
}

/// Effect emitted by one controller step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum GestureEffect {
    Started {
        phase: GesturePhase,
        widget: Option<WidgetId>,
        position: GridPosition,
    },
    /// A valid candidate was streamed into the widget set.
    Applied {
        widget: WidgetId,
        previous: GridPosition,
        position: GridPosition,
    },
    /// The candidate was invalid; the last valid position stays applied.
    Rejected {
        widget: WidgetId,
        candidate: GridPosition,
        violation: PositionViolation,
    },
    Previewed {
        preview: DropPreview,
    },
    Committed {
        widget: WidgetId,
        start: GridPosition,
        position: GridPosition,
    },
    Inserted {
        widget: WidgetId,
        position: GridPosition,
        strategy: PlacementStrategy,
    },
    SplitInserted {
        split: SplitInsert,
    },
    Canceled {
        widget: Option<WidgetId>,
        reason: CancelReason,
        /// Set when the cancel policy moved the widget back.
        restored: Option<GridPosition>,
    },
    Noop {
        reason: GestureNoopReason,
    },
}

/// One controller transition with deterministic telemetry fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GestureTransition {
    pub transition_id: u64,
    pub from: GesturePhase,
    pub to: GesturePhase,
    pub effect: GestureEffect,
}

/// Single-slot gesture machine for one canvas.
#[derive(Debug, Clone)]
pub struct InteractionController {
    state: GestureState,
    metrics: GridMetrics,
    policy: GesturePolicy,
    placement: PlacementTuning,
    transition_counter: u64,
}

impl InteractionController {
    #[must_use]
    pub fn new(metrics: GridMetrics, policy: GesturePolicy, placement: PlacementTuning) -> Self {
        Self {
            state: GestureState::Idle,
            metrics,
            policy,
            placement,
            transition_counter: 0,
        }
    }

    /// Controller with default gesture and placement policies.
    #[must_use]
    pub fn with_metrics(metrics: GridMetrics) -> Self {
        Self::new(metrics, GesturePolicy::default(), PlacementTuning::default())
    }

    #[must_use]
    pub const fn state(&self) -> &GestureState {
        &self.state
    }

    #[must_use]
    pub const fn phase(&self) -> GesturePhase {
        self.state.phase()
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        !matches!(self.state, GestureState::Idle)
    }

    #[must_use]
    pub const fn metrics(&self) -> GridMetrics {
        self.metrics
    }

    /// Update cell metrics after the canvas was resized. Applies to the
    /// next pointer event, including one inside an active gesture.
    pub fn set_metrics(&mut self, metrics: GridMetrics) {
        self.metrics = metrics;
    }

    #[must_use]
    pub const fn policy(&self) -> &GesturePolicy {
        &self.policy
    }

    #[must_use]
    pub const fn placement(&self) -> &PlacementTuning {
        &self.placement
    }

    /// Ghost footprint for the active gesture, if any.
    #[must_use]
    pub fn preview(&self) -> Option<DropPreview> {
        match &self.state {
            GestureState::Idle => None,
            GestureState::Moving { current, .. } | GestureState::Resizing { current, .. } => {
                Some(DropPreview {
                    position: *current,
                    valid: true,
                    over: None,
                })
            }
            GestureState::Inserting { preview, .. } => Some(*preview),
        }
    }

    /// Start moving `widget` from pointer position `pointer`.
    pub fn begin_move(
        &mut self,
        widgets: &WidgetSet,
        widget: WidgetId,
        pointer: PixelPoint,
    ) -> Result<GestureTransition> {
        let from = self.phase();
        if self.is_active() {
            return Ok(self.emit(from, already_active()));
        }
        let start = widgets.position(widget)?;
        self.state = GestureState::Moving {
            widget,
            origin: pointer,
            start,
            current: start,
        };
        tracing::debug!(%widget, ?start, "move gesture started");
        Ok(self.emit(
            from,
            GestureEffect::Started {
                phase: GesturePhase::Moving,
                widget: Some(widget),
                position: start,
            },
        ))
    }

    /// Start resizing `widget` by `handle` from pointer position `pointer`.
    pub fn begin_resize(
        &mut self,
        widgets: &WidgetSet,
        widget: WidgetId,
        handle: ResizeHandle,
        pointer: PixelPoint,
    ) -> Result<GestureTransition> {
        let from = self.phase();
        if self.is_active() {
            return Ok(self.emit(from, already_active()));
        }
        let start = widgets.position(widget)?;
        self.state = GestureState::Resizing {
            widget,
            handle,
            origin: pointer,
            start,
            current: start,
        };
        tracing::debug!(%widget, ?handle, ?start, "resize gesture started");
        Ok(self.emit(
            from,
            GestureEffect::Started {
                phase: GesturePhase::Resizing,
                widget: Some(widget),
                position: start,
            },
        ))
    }

    /// Start dragging a palette item over the canvas.
    pub fn begin_insert(
        &mut self,
        widgets: &WidgetSet,
        item: PaletteItem,
        pointer: PixelPoint,
    ) -> GestureTransition {
        let from = self.phase();
        if self.is_active() {
            return self.emit(from, already_active());
        }
        let preview = insert_preview(&self.metrics, &self.policy, widgets, &item, pointer);
        tracing::debug!(kind = ?item.kind, ?preview, "insert gesture started");
        self.state = GestureState::Inserting { item, preview };
        self.emit(
            from,
            GestureEffect::Started {
                phase: GesturePhase::Inserting,
                widget: None,
                position: preview.position,
            },
        )
    }

    /// Feed one pointer position.
    ///
    /// Fails with [`LayoutError::NotFound`] when the widget under gesture
    /// was removed behind the controller's back; the gesture is dropped.
    pub fn pointer_move(
        &mut self,
        widgets: &mut WidgetSet,
        pointer: PixelPoint,
    ) -> Result<GestureTransition> {
        let from = self.phase();
        let effect = match from {
            GesturePhase::Idle => GestureEffect::Noop {
                reason: GestureNoopReason::IdleWithoutGesture,
            },
            GesturePhase::Moving | GesturePhase::Resizing => {
                self.stream_candidate(widgets, pointer)?
            }
            GesturePhase::Inserting => self.update_preview(widgets, pointer),
        };
        Ok(self.emit(from, effect))
    }

    /// Finish the active gesture at `pointer`.
    ///
    /// Move and resize evaluate an on-canvas `pointer` as one last candidate
    /// and keep the streamed position. Insert splits the widget under the
    /// drop cell when allowed, otherwise solves a placement near the drop cell
    /// and inserts. An insert released off the canvas is canceled with
    /// [`CancelReason::ReleasedOutside`] and leaves `widgets` untouched.
    pub fn pointer_up(
        &mut self,
        widgets: &mut WidgetSet,
        pointer: PixelPoint,
    ) -> Result<GestureTransition> {
        let from = self.phase();
        let on_canvas = self.on_canvas(pointer, widgets.columns());
        let effect = match from {
            GesturePhase::Idle => GestureEffect::Noop {
                reason: GestureNoopReason::IdleWithoutGesture,
            },
            GesturePhase::Inserting if !on_canvas => {
                return self.cancel(widgets, CancelReason::ReleasedOutside);
            }
            GesturePhase::Moving | GesturePhase::Resizing => {
                if on_canvas {
                    self.stream_candidate(widgets, pointer)?;
                }
                match self.take_streamed() {
                    Some((widget, start, position)) => {
                        tracing::debug!(%widget, ?start, ?position, "gesture committed");
                        GestureEffect::Committed {
                            widget,
                            start,
                            position,
                        }
                    }
                    None => GestureEffect::Noop {
                        reason: GestureNoopReason::IdleWithoutGesture,
                    },
                }
            }
            GesturePhase::Inserting => self.drop_insert(widgets, pointer)?,
        };
        Ok(self.emit(from, effect))
    }

    /// Abort the active gesture.
    ///
    /// Under [`CancelPolicy::RestoreOrigin`] a moved or resized widget goes
    /// back to its start position; that footprint was valid when the gesture
    /// began and nothing else mutates the set meanwhile.
    pub fn cancel(
        &mut self,
        widgets: &mut WidgetSet,
        reason: CancelReason,
    ) -> Result<GestureTransition> {
        let from = self.phase();
        if from == GesturePhase::Idle {
            return Ok(self.emit(
                from,
                GestureEffect::Noop {
                    reason: GestureNoopReason::IdleWithoutGesture,
                },
            ));
        }

        let widget = self.state.widget();
        let streamed = self.take_streamed();
        self.state = GestureState::Idle;
        let restored = match (streamed, self.policy.cancel) {
            (Some((id, start, current)), CancelPolicy::RestoreOrigin) if start != current => {
                widgets.apply_position(id, start)?;
                Some(start)
            }
            _ => None,
        };
        tracing::debug!(?widget, ?reason, ?restored, "gesture canceled");
        Ok(self.emit(
            from,
            GestureEffect::Canceled {
                widget,
                reason,
                restored,
            },
        ))
    }

    /// Unconditionally reset to Idle without touching the widget set.
    ///
    /// Returns `None` when already idle.
    pub fn force_cancel(&mut self) -> Option<GestureTransition> {
        let from = self.phase();
        if from == GesturePhase::Idle {
            return None;
        }
        let widget = self.state.widget();
        self.state = GestureState::Idle;
        Some(self.emit(
            from,
            GestureEffect::Canceled {
                widget,
                reason: CancelReason::Programmatic,
                restored: None,
            },
        ))
    }

    fn emit(&mut self, from: GesturePhase, effect: GestureEffect) -> GestureTransition {
        self.transition_counter = self.transition_counter.saturating_add(1);
        GestureTransition {
            transition_id: self.transition_counter,
            from,
            to: self.phase(),
            effect,
        }
    }

    /// Whether `pointer` lies inside the canvas: left of the last column's
    /// right edge, and not above or left of the origin. Rows are unbounded.
    fn on_canvas(&self, pointer: PixelPoint, columns: u32) -> bool {
        let width = self.metrics.cell_width_px * f64::from(columns);
        pointer.x >= 0.0 && pointer.y >= 0.0 && pointer.x < width && pointer.y.is_finite()
    }

    fn cell_delta(&self, origin: PixelPoint, pointer: PixelPoint) -> (i64, i64) {
        let (dx, dy) = pointer.delta_from(origin);
        self.metrics.cell_delta(dx, dy, self.policy.rounding)
    }

    fn stream_candidate(
        &mut self,
        widgets: &mut WidgetSet,
        pointer: PixelPoint,
    ) -> Result<GestureEffect> {
        let columns = widgets.columns();
        let (widget, candidate, current) = match &self.state {
            GestureState::Moving {
                widget,
                origin,
                start,
                current,
            } => {
                let (dx, dy) = self.cell_delta(*origin, pointer);
                (*widget, start.offset(dx, dy).clamp_to_columns(columns), *current)
            }
            GestureState::Resizing {
                widget,
                handle,
                origin,
                start,
                current,
            } => {
                let (dx, dy) = self.cell_delta(*origin, pointer);
                let candidate = resize_candidate(
                    *start,
                    *handle,
                    dx,
                    dy,
                    columns,
                    self.policy.min_width,
                    self.policy.min_height,
                );
                (*widget, candidate, *current)
            }
            GestureState::Idle | GestureState::Inserting { .. } => {
                return Ok(GestureEffect::Noop {
                    reason: GestureNoopReason::IdleWithoutGesture,
                });
            }
        };

        if candidate == current {
            return Ok(GestureEffect::Noop {
                reason: GestureNoopReason::UnchangedCell,
            });
        }
        let violation = check_bounds(&candidate, columns).err().or_else(|| {
            first_collision(&candidate, widgets.list(), Some(widget))
                .map(|with| PositionViolation::Collides { with })
        });
        if let Some(violation) = violation {
            tracing::trace!(%widget, ?candidate, %violation, "candidate rejected");
            return Ok(GestureEffect::Rejected {
                widget,
                candidate,
                violation,
            });
        }

        let previous = match widgets.apply_position(widget, candidate) {
            Ok(previous) => previous,
            Err(err) => {
                self.state = GestureState::Idle;
                return Err(err);
            }
        };
        if let GestureState::Moving { current, .. } | GestureState::Resizing { current, .. } =
            &mut self.state
        {
            *current = candidate;
        }
        tracing::trace!(%widget, ?previous, ?candidate, "candidate applied");
        Ok(GestureEffect::Applied {
            widget,
            previous,
            position: candidate,
        })
    }

    /// Move or resize bookkeeping, leaving the controller idle.
    fn take_streamed(&mut self) -> Option<(WidgetId, GridPosition, GridPosition)> {
        match std::mem::replace(&mut self.state, GestureState::Idle) {
            GestureState::Moving {
                widget,
                start,
                current,
                ..
            }
            | GestureState::Resizing {
                widget,
                start,
                current,
                ..
            } => Some((widget, start, current)),
            other => {
                self.state = other;
                None
            }
        }
    }

    fn update_preview(&mut self, widgets: &WidgetSet, pointer: PixelPoint) -> GestureEffect {
        let GestureState::Inserting { item, preview } = &mut self.state else {
            return GestureEffect::Noop {
                reason: GestureNoopReason::IdleWithoutGesture,
            };
        };
        let next = insert_preview(&self.metrics, &self.policy, widgets, item, pointer);
        if next == *preview {
            return GestureEffect::Noop {
                reason: GestureNoopReason::UnchangedCell,
            };
        }
        *preview = next;
        tracing::trace!(?next, "insert preview updated");
        GestureEffect::Previewed { preview: next }
    }

    fn drop_insert(&mut self, widgets: &mut WidgetSet, pointer: PixelPoint) -> Result<GestureEffect> {
        let GestureState::Inserting { item, .. } =
            std::mem::replace(&mut self.state, GestureState::Idle)
        else {
            return Ok(GestureEffect::Noop {
                reason: GestureNoopReason::IdleWithoutGesture,
            });
        };
        let preview = insert_preview(&self.metrics, &self.policy, widgets, &item, pointer);

        if let Some(target) = preview.over {
            match widgets.split_insert(target, item.draft_at(preview.position), self.policy.min_width)
            {
                Ok(split) => return Ok(GestureEffect::SplitInserted { split }),
                Err(LayoutError::InvalidPosition {
                    violation: PositionViolation::TooNarrowToSplit { .. },
                    ..
                }) => {
                    tracing::debug!(%target, "drop target too narrow to split, placing nearby");
                }
                Err(err) => return Err(err),
            }
        }

        let placement = solve_placement(
            preview.position,
            widgets.list(),
            widgets.columns(),
            None,
            &self.placement,
        )?;
        let widget = widgets.insert(item.draft_at(placement.position))?;
        Ok(GestureEffect::Inserted {
            widget,
            position: placement.position,
            strategy: placement.strategy,
        })
    }
}

fn already_active() -> GestureEffect {
    GestureEffect::Noop {
        reason: GestureNoopReason::GestureAlreadyActive,
    }
}

fn insert_preview(
    metrics: &GridMetrics,
    policy: &GesturePolicy,
    widgets: &WidgetSet,
    item: &PaletteItem,
    pointer: PixelPoint,
) -> DropPreview {
    let (cx, cy) = metrics.cell_at(pointer);
    let (column, row) = (to_cell(cx), to_cell(cy));
    let position = item
        .footprint_at(column, row)
        .clamp_to_columns(widgets.columns());
    let on_canvas = cx >= 0 && cy >= 0;
    let over = if policy.split_on_widget_drop && on_canvas {
        widgets.widget_at(column, row).map(|widget| widget.id)
    } else {
        None
    };
    DropPreview {
        position,
        valid: !has_collision(&position, widgets.list(), None),
        over,
    }
}
