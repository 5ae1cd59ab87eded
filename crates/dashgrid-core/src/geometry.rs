#![forbid(unsafe_code)]

//! Grid geometry primitives.
//!
//! Widgets occupy axis-aligned rectangles on an integer grid that is
//! `columns` cells wide and unbounded downward. All functions here are pure.

use serde::{Deserialize, Serialize};

/// A widget footprint in grid-cell units.
///
/// Top-left anchored, rows and columns indexed from 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridPosition {
    /// Left column (inclusive).
    pub x: u32,
    /// Top row (inclusive).
    pub y: u32,
    /// Width in cells.
    pub width: u32,
    /// Height in cells.
    pub height: u32,
}

impl GridPosition {
    /// Create a new grid position.
    #[inline]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> u64 {
        self.x as u64 + self.width as u64
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> u64 {
        self.y as u64 + self.height as u64
    }

    /// Area in cells.
    #[inline]
    pub const fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Check if the footprint has zero area.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Check if a cell lies inside the footprint.
    #[inline]
    pub const fn contains_cell(&self, column: u32, row: u32) -> bool {
        column >= self.x
            && (column as u64) < self.right()
            && row >= self.y
            && (row as u64) < self.bottom()
    }

    /// Whether the footprint lies within `columns` horizontally.
    #[inline]
    pub const fn fits_columns(&self, columns: u32) -> bool {
        self.right() <= columns as u64
    }

    /// Positive-area overlap test. See [`intersects`].
    #[inline]
    pub const fn intersects(&self, other: &Self) -> bool {
        intersects(self, other)
    }

    /// Clamp into a `columns`-wide grid. See [`clamp_to_columns`].
    #[inline]
    #[must_use]
    pub fn clamp_to_columns(self, columns: u32) -> Self {
        clamp_to_columns(self, columns)
    }

    /// Translate by a signed cell delta, saturating at the grid origin.
    ///
    /// The result is not clamped against the column count.
    #[must_use]
    pub fn offset(self, dx: i64, dy: i64) -> Self {
        Self {
            x: saturating_cell(i64::from(self.x).saturating_add(dx)),
            y: saturating_cell(i64::from(self.y).saturating_add(dy)),
            ..self
        }
    }

    /// Same origin, different size.
    #[inline]
    #[must_use]
    pub const fn with_size(self, width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..self
        }
    }

    /// Same size, different origin.
    #[inline]
    #[must_use]
    pub const fn with_origin(self, x: u32, y: u32) -> Self {
        Self { x, y, ..self }
    }
}

/// True iff the rectangles overlap with positive area.
///
/// Rectangles that merely share an edge do not intersect.
#[inline]
pub const fn intersects(a: &GridPosition, b: &GridPosition) -> bool {
    !(a.right() <= b.x as u64
        || b.right() <= a.x as u64
        || a.bottom() <= b.y as u64
        || b.bottom() <= a.y as u64)
}

/// Clamp `pos` into a grid `columns` cells wide.
///
/// Width is reduced to `columns` first if it does not fit, then `x` is
/// clamped into `[0, columns - width]`. Rows are unbounded, so `y` is only
/// held at `>= 0` by its unsigned type.
#[must_use]
pub fn clamp_to_columns(pos: GridPosition, columns: u32) -> GridPosition {
    let width = pos.width.min(columns);
    let x = pos.x.min(columns - width);
    GridPosition { x, width, ..pos }
}

/// Convert a canvas-relative pixel position to a grid cell by floor division.
///
/// Negative pixel coordinates map to negative cells; callers clamp. A
/// non-finite or non-positive cell size maps every coordinate to 0.
#[must_use]
pub fn pixel_to_grid(px: f64, py: f64, cell_width_px: f64, row_height_px: f64) -> (i64, i64) {
    (
        CellRounding::Floor.quantize(px, cell_width_px),
        CellRounding::Floor.quantize(py, row_height_px),
    )
}

fn saturating_cell(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}

/// Pointer position in canvas-relative pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Pixel delta from `origin` to `self`.
    #[inline]
    pub fn delta_from(self, origin: Self) -> (f64, f64) {
        (self.x - origin.x, self.y - origin.y)
    }
}

/// How a pixel quantity is quantized to whole cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellRounding {
    /// Integer floor division.
    #[default]
    Floor,
    /// Round half away from zero.
    Nearest,
}

impl CellRounding {
    /// Quantize `pixels` into cells of `cell_px` pixels.
    #[must_use]
    pub fn quantize(self, pixels: f64, cell_px: f64) -> i64 {
        if !(cell_px.is_finite() && cell_px > 0.0) || !pixels.is_finite() {
            return 0;
        }
        let cells = pixels / cell_px;
        // `as` saturates at the i64 range.
        match self {
            Self::Floor => cells.floor() as i64,
            Self::Nearest => cells.round() as i64,
        }
    }
}

/// Pixel size of one grid cell for the current canvas width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridMetrics {
    pub cell_width_px: f64,
    pub row_height_px: f64,
}

impl GridMetrics {
    /// Metrics for a canvas `canvas_width_px` wide split into `columns`.
    #[must_use]
    pub fn for_canvas(canvas_width_px: f64, columns: u32, row_height_px: f64) -> Self {
        Self {
            cell_width_px: canvas_width_px / f64::from(columns.max(1)),
            row_height_px,
        }
    }

    /// Cell under a canvas-relative pixel position (floor division).
    #[must_use]
    pub fn cell_at(&self, point: PixelPoint) -> (i64, i64) {
        pixel_to_grid(point.x, point.y, self.cell_width_px, self.row_height_px)
    }

    /// Cell delta for a pixel delta under the given rounding.
    #[must_use]
    pub fn cell_delta(&self, dx_px: f64, dy_px: f64, rounding: CellRounding) -> (i64, i64) {
        (
            rounding.quantize(dx_px, self.cell_width_px),
            rounding.quantize(dy_px, self.row_height_px),
        )
    }
}
