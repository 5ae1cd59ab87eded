#![forbid(unsafe_code)]

//! Authoritative widget collection for one canvas.
//!
//! [`WidgetSet`] is the only owner of widget records. It assigns identities
//! and keeps every widget inside the column bounds, but it does **not**
//! enforce the non-overlap invariant on [`WidgetSet::insert`] or
//! [`WidgetSet::apply_position`]: callers validate candidates with
//! [`crate::collision::has_collision`] or [`crate::placement`] first and only
//! commit positions that passed. [`WidgetSet::commit_position`] performs both
//! checks for callers that want them bundled.

use std::hash::{Hash, Hasher};

use dashgrid_core::GridPosition;
use rustc_hash::{FxHashMap, FxHasher};
use serde::{Deserialize, Serialize};

use crate::collision::{self, check_bounds, first_collision};
use crate::error::{LayoutError, PositionViolation, Result};
use crate::widget::{Widget, WidgetDraft, WidgetId};

/// Result of splitting one widget to make room for another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitInsert {
    pub target: WidgetId,
    /// Target footprint after shrinking.
    pub target_position: GridPosition,
    pub inserted: WidgetId,
    /// Footprint of the new widget (the freed right-hand band).
    pub position: GridPosition,
}

/// Owned, ordered widget collection with monotonic id assignment.
#[derive(Debug, Clone)]
pub struct WidgetSet {
    columns: u32,
    widgets: Vec<Widget>,
    index: FxHashMap<WidgetId, usize>,
    next_id: WidgetId,
}

impl WidgetSet {
    /// Empty set for a grid `columns` wide.
    #[must_use]
    pub fn new(columns: u32) -> Self {
        Self {
            columns,
            widgets: Vec::new(),
            index: FxHashMap::default(),
            next_id: WidgetId::MIN,
        }
    }

    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Read-only view in insertion order.
    #[must_use]
    pub fn list(&self) -> &[Widget] {
        &self.widgets
    }

    pub fn iter(&self) -> impl Iterator<Item = &Widget> {
        self.widgets.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: WidgetId) -> bool {
        self.index.contains_key(&id)
    }

    #[must_use]
    pub fn get(&self, id: WidgetId) -> Option<&Widget> {
        self.index.get(&id).map(|&idx| &self.widgets[idx])
    }

    /// Current footprint of `id`.
    pub fn position(&self, id: WidgetId) -> Result<GridPosition> {
        self.get(id)
            .map(|widget| widget.position)
            .ok_or(LayoutError::NotFound { id })
    }

    /// Identity the next [`insert`](Self::insert) will assign.
    #[must_use]
    pub const fn next_id(&self) -> WidgetId {
        self.next_id
    }

    /// Insert a new widget and assign it a fresh identity.
    ///
    /// Rejects footprints outside the column bounds. Does not check overlap.
    pub fn insert(&mut self, draft: WidgetDraft) -> Result<WidgetId> {
        check_bounds(&draft.position, self.columns)
            .map_err(|violation| LayoutError::invalid(draft.position, violation))?;
        let id = self.next_id;
        if self.index.contains_key(&id) {
            return Err(LayoutError::DuplicateId { id });
        }

        let position = draft.position;
        self.push(draft.into_widget(id));
        if let Some(next) = id.checked_next() {
            self.next_id = next;
        }
        tracing::debug!(%id, ?position, "widget inserted");
        Ok(id)
    }

    /// Re-insert a widget that already carries an identity (snapshot
    /// restore). Later [`insert`](Self::insert) calls continue after the
    /// largest restored id.
    pub fn restore(&mut self, widget: Widget) -> Result<()> {
        check_bounds(&widget.position, self.columns)
            .map_err(|violation| LayoutError::invalid(widget.position, violation))?;
        if self.index.contains_key(&widget.id) {
            return Err(LayoutError::DuplicateId { id: widget.id });
        }
        if widget.id >= self.next_id {
            self.next_id = widget.id.checked_next().unwrap_or(widget.id);
        }
        self.push(widget);
        Ok(())
    }

    /// Move or resize `id` to `position`, returning the previous footprint.
    ///
    /// Fails with [`LayoutError::NotFound`] for unknown ids and
    /// [`LayoutError::InvalidPosition`] for out-of-bounds footprints.
    /// Overlap is the caller's responsibility.
    pub fn apply_position(&mut self, id: WidgetId, position: GridPosition) -> Result<GridPosition> {
        let idx = *self.index.get(&id).ok_or(LayoutError::NotFound { id })?;
        check_bounds(&position, self.columns)
            .map_err(|violation| LayoutError::invalid(position, violation))?;
        let previous = std::mem::replace(&mut self.widgets[idx].position, position);
        tracing::trace!(%id, ?previous, ?position, "widget position applied");
        Ok(previous)
    }

    /// [`apply_position`](Self::apply_position) after also rejecting
    /// footprints that overlap another widget.
    pub fn commit_position(&mut self, id: WidgetId, position: GridPosition) -> Result<GridPosition> {
        if !self.contains(id) {
            return Err(LayoutError::NotFound { id });
        }
        if let Some(with) = first_collision(&position, &self.widgets, Some(id)) {
            return Err(LayoutError::invalid(
                position,
                PositionViolation::Collides { with },
            ));
        }
        self.apply_position(id, position)
    }

    /// Remove `id`, returning its record.
    pub fn remove(&mut self, id: WidgetId) -> Result<Widget> {
        let idx = self.index.remove(&id).ok_or(LayoutError::NotFound { id })?;
        let widget = self.widgets.remove(idx);
        for (offset, later) in self.widgets[idx..].iter().enumerate() {
            self.index.insert(later.id, idx + offset);
        }
        tracing::debug!(%id, "widget removed");
        Ok(widget)
    }

    /// Halve `target`'s width and insert `draft` in the freed right-hand
    /// band at the target's row and height.
    ///
    /// The left half keeps `floor(width / 2)` columns. Both halves must be at
    /// least `min_width` wide. The new footprint lies inside the target's old
    /// one, so no other widget is consulted. `draft.position` is ignored.
    pub fn split_insert(
        &mut self,
        target: WidgetId,
        draft: WidgetDraft,
        min_width: u32,
    ) -> Result<SplitInsert> {
        let original = self.position(target)?;
        let left = original.width / 2;
        let right = original.width - left;
        if left < min_width.max(1) || right < min_width.max(1) {
            return Err(LayoutError::invalid(
                original,
                PositionViolation::TooNarrowToSplit { min_width },
            ));
        }

        let target_position = original.with_size(left, original.height);
        let position = GridPosition::new(original.x + left, original.y, right, original.height);
        self.apply_position(target, target_position)?;
        let inserted = match self.insert(WidgetDraft { position, ..draft }) {
            Ok(id) => id,
            Err(err) => {
                // Restore the target so a failed insert leaves no partial change.
                self.apply_position(target, original)?;
                return Err(err);
            }
        };

        tracing::debug!(%target, %inserted, ?target_position, ?position, "split insert");
        Ok(SplitInsert {
            target,
            target_position,
            inserted,
            position,
        })
    }

    /// Topmost-first hit test for a grid cell.
    #[must_use]
    pub fn widget_at(&self, column: u32, row: u32) -> Option<&Widget> {
        self.widgets
            .iter()
            .find(|widget| widget.position.contains_cell(column, row))
    }

    /// Lowest occupied row boundary, ignoring `exclude`.
    #[must_use]
    pub fn bottom_edge(&self, exclude: Option<WidgetId>) -> u32 {
        collision::bottom_edge(&self.widgets, exclude)
    }

    /// Overlapping pairs; empty while the non-overlap invariant holds.
    #[must_use]
    pub fn overlaps(&self) -> Vec<(WidgetId, WidgetId)> {
        collision::overlapping_pairs(&self.widgets)
    }

    /// Widgets outside the column bounds; always empty for sets built
    /// through this API.
    #[must_use]
    pub fn bounds_violations(&self) -> Vec<WidgetId> {
        self.widgets
            .iter()
            .filter(|widget| check_bounds(&widget.position, self.columns).is_err())
            .map(|widget| widget.id)
            .collect()
    }

    /// Deterministic hash of ids and footprints in list order.
    #[must_use]
    pub fn state_hash(&self) -> u64 {
        let mut hasher = FxHasher::default();
        self.columns.hash(&mut hasher);
        for widget in &self.widgets {
            widget.id.hash(&mut hasher);
            widget.position.hash(&mut hasher);
        }
        hasher.finish()
    }

    fn push(&mut self, widget: Widget) {
        self.index.insert(widget.id, self.widgets.len());
        self.widgets.push(widget);
    }
}
