//! Axis-aligned geometry for the level grid
//!
//! Positions and sizes are `Vector` values (glam's `DVec2`). Every overlap
//! query in the simulation goes through [`segments_overlap`], whose boundary
//! behavior is what existing levels were tuned against.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// 2D point or displacement in grid units
///
/// `a + b` adds componentwise, `v * n` scales by a real.
pub type Vector = DVec2;

/// Bounding box of an actor or a terrain cell, stored as its four edges
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn new(left: f64, right: f64, top: f64, bottom: f64) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    /// Box spanning `pos .. pos + size`
    #[inline]
    pub fn from_pos_size(pos: Vector, size: Vector) -> Self {
        Self::new(pos.x, pos.x + size.x, pos.y, pos.y + size.y)
    }

    /// Box of the terrain cell at column `x`, row `y`
    ///
    /// The left edge is pulled in by [`crate::consts::CELL_INSET`], so a cell
    /// only blocks from `x + 0.2` to `x + 1`.
    pub fn cell(x: usize, y: usize) -> Self {
        let (x, y) = (x as f64, y as f64);
        Self::new(x + crate::consts::CELL_INSET, x + 1.0, y, y + 1.0)
    }

    /// Overlap on both projections, see [`segments_overlap`]
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        rects_overlap(self, other)
    }
}

/// Overlap test for two 1-D segments given by raw endpoints.
///
/// True when both segments are identical, or when any endpoint of one sits
/// strictly inside the other. Each endpoint test compares `p > lo` with
/// `p < hi` for equality, so for a reversed pair (`lo > hi`) any point from
/// `hi` to `lo`, ends included, counts as inside. Segments that merely touch
/// do not overlap.
#[inline]
pub fn segments_overlap(a1: f64, a2: f64, b1: f64, b2: f64) -> bool {
    if a1 == b1 && a2 == b2 {
        return true;
    }

    ((b1 > a1) == (b1 < a2))
        || ((b2 > a1) == (b2 < a2))
        || ((a1 > b1) == (a1 < b2))
        || ((a2 > b1) == (a2 < b2))
}

/// Segment overlap on the x projections and on the y projections
#[inline]
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    segments_overlap(a.left, a.right, b.left, b.right)
        && segments_overlap(a.top, a.bottom, b.top, b.bottom)
}
