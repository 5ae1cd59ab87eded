#![forbid(unsafe_code)]

//! Core: grid geometry for the dashgrid layout engine.
//!
//! # Role in dashgrid
//! `dashgrid-core` holds the stateless geometry every other crate builds on:
//! widget footprints ([`GridPosition`]), the positive-area overlap test,
//! column clamping, and pixel-to-cell quantization for pointer gestures.
//!
//! # How it fits in the system
//! `dashgrid-layout` owns widgets, collision queries, placement and the
//! gesture controller. It only ever reasons about footprints through the
//! types defined here, which keeps widget content out of the layout path.

pub mod geometry;

pub use geometry::{
    CellRounding, GridMetrics, GridPosition, PixelPoint, clamp_to_columns, intersects,
    pixel_to_grid,
};
