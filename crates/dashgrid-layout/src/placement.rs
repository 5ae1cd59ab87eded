#![forbid(unsafe_code)]

//! Nearest-fit placement for inserted and moved widgets.
//!
//! The solver probes square rings of increasing Chebyshev radius around the
//! preferred cell and falls back to the first free row below every other
//! widget. It is a bounded best-effort heuristic, not a minimum-displacement
//! solver: with the 50-attempt cap only radii 1 to 3 are fully explored, so
//! on densely packed canvases the result can be farther away than an
//! exhaustive search would find.
//!
//! Ring enumeration is column-major (`dx` outer, `dy` inner, both ascending)
//! and counts every perimeter probe as one attempt, clamped duplicates
//! included.

use dashgrid_core::GridPosition;
use serde::{Deserialize, Serialize};

use crate::collision::{Footprint, bottom_edge, has_collision};
use crate::error::{LayoutError, Result};
use crate::widget::WidgetId;

/// Largest ring radius probed by the spiral search.
pub const SPIRAL_MAX_RADIUS: u32 = 10;

/// Cap on spiral candidate evaluations across all radii.
pub const SPIRAL_MAX_ATTEMPTS: u32 = 50;

/// Tunable limits for [`solve_placement`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementTuning {
    pub max_radius: u32,
    pub max_attempts: u32,
    /// Place below the lowest widget when the spiral finds nothing.
    pub fallback_to_bottom: bool,
}

impl Default for PlacementTuning {
    fn default() -> Self {
        Self {
            max_radius: SPIRAL_MAX_RADIUS,
            max_attempts: SPIRAL_MAX_ATTEMPTS,
            fallback_to_bottom: true,
        }
    }
}

/// Which step of the solver produced a placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum PlacementStrategy {
    /// The clamped preferred position was already free.
    Preferred,
    /// Found on the ring at `radius`.
    Spiral { radius: u32 },
    /// Placed at column 0 below every other widget.
    BottomFallback,
}

/// Solver result with diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub position: GridPosition,
    pub strategy: PlacementStrategy,
    /// Spiral candidates evaluated (0 when the preferred spot was free).
    pub attempts: u32,
}

/// Find a collision-free position near `preferred`.
///
/// Never fails: when the spiral search is exhausted the widget goes to
/// `x = 0` directly below the lowest other widget, keeping its size.
/// Uses the default [`PlacementTuning`].
pub fn find_valid_position<T: Footprint>(
    preferred: GridPosition,
    widgets: &[T],
    columns: u32,
    exclude: Option<WidgetId>,
) -> GridPosition {
    match spiral_search(preferred, widgets, columns, exclude, &PlacementTuning::default()) {
        Ok(placement) => placement.position,
        Err(_) => bottom_fallback(preferred, widgets, columns, exclude),
    }
}

/// Policy-driven variant of [`find_valid_position`] that reports how the
/// position was found.
///
/// Returns [`LayoutError::PlacementExhausted`] only when
/// `tuning.fallback_to_bottom` is off.
pub fn solve_placement<T: Footprint>(
    preferred: GridPosition,
    widgets: &[T],
    columns: u32,
    exclude: Option<WidgetId>,
    tuning: &PlacementTuning,
) -> Result<Placement> {
    let _span = tracing::debug_span!(
        "placement.solve",
        columns,
        widgets = widgets.len(),
        preferred = ?preferred,
    )
    .entered();

    match spiral_search(preferred, widgets, columns, exclude, tuning) {
        Ok(placement) => {
            tracing::trace!(
                strategy = ?placement.strategy,
                attempts = placement.attempts,
                position = ?placement.position,
                "placement solved"
            );
            Ok(placement)
        }
        Err(attempts) if tuning.fallback_to_bottom => {
            let position = bottom_fallback(preferred, widgets, columns, exclude);
            tracing::debug!(attempts, position = ?position, "spiral exhausted, placing below");
            Ok(Placement {
                position,
                strategy: PlacementStrategy::BottomFallback,
                attempts,
            })
        }
        Err(attempts) => {
            tracing::debug!(attempts, "spiral exhausted with fallback disabled");
            Err(LayoutError::PlacementExhausted { attempts })
        }
    }
}

/// Steps 1 and 2 of the solver. `Err` carries the attempts spent.
fn spiral_search<T: Footprint>(
    preferred: GridPosition,
    widgets: &[T],
    columns: u32,
    exclude: Option<WidgetId>,
    tuning: &PlacementTuning,
) -> std::result::Result<Placement, u32> {
    let base = preferred.clamp_to_columns(columns);
    if !has_collision(&base, widgets, exclude) {
        return Ok(Placement {
            position: base,
            strategy: PlacementStrategy::Preferred,
            attempts: 0,
        });
    }

    let mut attempts = 0u32;
    for radius in 1..=tuning.max_radius {
        let r = i64::from(radius);
        for dx in -r..=r {
            for dy in -r..=r {
                if dx.abs() != r && dy.abs() != r {
                    continue;
                }
                if attempts >= tuning.max_attempts {
                    return Err(attempts);
                }
                attempts += 1;

                let candidate = base.offset(dx, dy).clamp_to_columns(columns);
                if !has_collision(&candidate, widgets, exclude) {
                    return Ok(Placement {
                        position: candidate,
                        strategy: PlacementStrategy::Spiral { radius },
                        attempts,
                    });
                }
            }
        }
    }
    Err(attempts)
}

fn bottom_fallback<T: Footprint>(
    preferred: GridPosition,
    widgets: &[T],
    columns: u32,
    exclude: Option<WidgetId>,
) -> GridPosition {
    let sized = preferred.clamp_to_columns(columns);
    sized.with_origin(0, bottom_edge(widgets, exclude))
}
