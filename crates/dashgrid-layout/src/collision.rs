#![forbid(unsafe_code)]

//! Overlap queries against a widget collection.
//!
//! Queries are linear scans. Dashboards hold tens of widgets, so a spatial
//! index would cost more than it saves; callers only depend on the boolean
//! or id result, never on traversal order.

use dashgrid_core::GridPosition;

use crate::error::PositionViolation;
use crate::widget::{Widget, WidgetId};

/// The `{id, position}` projection of a widget.
///
/// This is the only view of a widget the collision index and placement
/// solver take, so they never depend on widget content.
pub trait Footprint {
    fn widget_id(&self) -> WidgetId;
    fn footprint(&self) -> GridPosition;
}

impl Footprint for Widget {
    #[inline]
    fn widget_id(&self) -> WidgetId {
        self.id
    }

    #[inline]
    fn footprint(&self) -> GridPosition {
        self.position
    }
}

impl Footprint for (WidgetId, GridPosition) {
    #[inline]
    fn widget_id(&self) -> WidgetId {
        self.0
    }

    #[inline]
    fn footprint(&self) -> GridPosition {
        self.1
    }
}

impl<T: Footprint + ?Sized> Footprint for &T {
    #[inline]
    fn widget_id(&self) -> WidgetId {
        (**self).widget_id()
    }

    #[inline]
    fn footprint(&self) -> GridPosition {
        (**self).footprint()
    }
}

/// True iff `candidate` intersects any widget other than `exclude`.
pub fn has_collision<I>(candidate: &GridPosition, widgets: I, exclude: Option<WidgetId>) -> bool
where
    I: IntoIterator,
    I::Item: Footprint,
{
    first_collision(candidate, widgets, exclude).is_some()
}

/// First widget (in iteration order) that `candidate` intersects.
pub fn first_collision<I>(
    candidate: &GridPosition,
    widgets: I,
    exclude: Option<WidgetId>,
) -> Option<WidgetId>
where
    I: IntoIterator,
    I::Item: Footprint,
{
    widgets
        .into_iter()
        .filter(|widget| Some(widget.widget_id()) != exclude)
        .find(|widget| candidate.intersects(&widget.footprint()))
        .map(|widget| widget.widget_id())
}

/// Every widget `candidate` intersects, excluding `exclude`.
pub fn colliding_ids<I>(candidate: &GridPosition, widgets: I, exclude: Option<WidgetId>) -> Vec<WidgetId>
where
    I: IntoIterator,
    I::Item: Footprint,
{
    widgets
        .into_iter()
        .filter(|widget| Some(widget.widget_id()) != exclude)
        .filter(|widget| candidate.intersects(&widget.footprint()))
        .map(|widget| widget.widget_id())
        .collect()
}

/// All overlapping pairs, each reported once as `(earlier, later)` in slice
/// order. Empty when the non-overlap invariant holds.
pub fn overlapping_pairs<T: Footprint>(widgets: &[T]) -> Vec<(WidgetId, WidgetId)> {
    let mut pairs = Vec::new();
    for (idx, first) in widgets.iter().enumerate() {
        let first_pos = first.footprint();
        for second in &widgets[idx + 1..] {
            if first_pos.intersects(&second.footprint()) {
                pairs.push((first.widget_id(), second.widget_id()));
            }
        }
    }
    pairs
}

/// Lowest occupied row boundary: max of `y + height` over widgets other
/// than `exclude`, or 0 when there are none.
pub fn bottom_edge<I>(widgets: I, exclude: Option<WidgetId>) -> u32
where
    I: IntoIterator,
    I::Item: Footprint,
{
    widgets
        .into_iter()
        .filter(|widget| Some(widget.widget_id()) != exclude)
        .map(|widget| widget.footprint().bottom())
        .max()
        .map_or(0, |bottom| u32::try_from(bottom).unwrap_or(u32::MAX))
}

/// Bounds check for a `columns`-wide grid.
pub fn check_bounds(position: &GridPosition, columns: u32) -> Result<(), PositionViolation> {
    if position.is_empty() {
        return Err(PositionViolation::ZeroExtent);
    }
    if !position.fits_columns(columns) {
        return Err(PositionViolation::OutOfBounds { columns });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use dashgrid_core::GridPosition;

    use super::{bottom_edge, check_bounds, colliding_ids, first_collision, has_collision, overlapping_pairs};
    use crate::error::PositionViolation;
    use crate::widget::WidgetId;

    fn id(raw: u64) -> WidgetId {
        WidgetId::new(raw).expect("non-zero id")
    }

    fn layout() -> Vec<(WidgetId, GridPosition)> {
        vec![
            (id(1), GridPosition::new(0, 0, 4, 3)),
            (id(2), GridPosition::new(4, 0, 4, 3)),
            (id(3), GridPosition::new(0, 3, 8, 2)),
        ]
    }

    #[test]
    fn empty_set_never_collides() {
        let none: Vec<(WidgetId, GridPosition)> = Vec::new();
        assert!(!has_collision(&GridPosition::new(0, 0, 12, 12), &none, None));
    }

    #[test]
    fn detects_overlap_with_any_widget() {
        let widgets = layout();
        assert!(has_collision(&GridPosition::new(3, 2, 2, 2), &widgets, None));
        assert_eq!(
            colliding_ids(&GridPosition::new(3, 2, 2, 2), &widgets, None),
            vec![id(1), id(2), id(3)]
        );
    }

    #[test]
    fn touching_candidate_is_free() {
        let widgets = layout();
        assert!(!has_collision(&GridPosition::new(8, 0, 4, 5), &widgets, None));
        assert!(!has_collision(&GridPosition::new(0, 5, 12, 1), &widgets, None));
    }

    #[test]
    fn exclude_skips_the_moving_widget() {
        let widgets = layout();
        let nudged = GridPosition::new(1, 0, 3, 3);
        assert!(has_collision(&nudged, &widgets, None));
        assert!(!has_collision(&nudged, &widgets, Some(id(1))));
        assert_eq!(first_collision(&nudged, &widgets, Some(id(2))), Some(id(1)));
    }

    #[test]
    fn overlapping_pairs_reports_each_pair_once() {
        let mut widgets = layout();
        assert!(overlapping_pairs(&widgets).is_empty());
        widgets.push((id(4), GridPosition::new(2, 1, 4, 4)));
        assert_eq!(
            overlapping_pairs(&widgets),
            vec![(id(1), id(4)), (id(2), id(4)), (id(3), id(4))]
        );
    }

    #[test]
    fn bottom_edge_ignores_excluded() {
        let widgets = layout();
        assert_eq!(bottom_edge(&widgets, None), 5);
        assert_eq!(bottom_edge(&widgets, Some(id(3))), 3);
        let none: Vec<(WidgetId, GridPosition)> = Vec::new();
        assert_eq!(bottom_edge(&none, None), 0);
    }

    #[test]
    fn bounds_reject_overflow_and_empty() {
        assert_eq!(check_bounds(&GridPosition::new(8, 0, 4, 1), 12), Ok(()));
        assert_eq!(
            check_bounds(&GridPosition::new(9, 0, 4, 1), 12),
            Err(PositionViolation::OutOfBounds { columns: 12 })
        );
        assert_eq!(
            check_bounds(&GridPosition::new(0, 0, 0, 1), 12),
            Err(PositionViolation::ZeroExtent)
        );
    }
}
