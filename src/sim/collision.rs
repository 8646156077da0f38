//! Axis-aligned rectangle geometry
//!
//! Positions and sizes are `glam::Vec2` in tile units, y pointing down.
//! A rectangle covers `[pos, pos + size)` on both axes.

use glam::Vec2;

/// An axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    /// Far corner (exclusive)
    #[inline]
    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }

    /// Strict intersection test: rectangles that only share an edge do not overlap
    pub fn overlaps(&self, other: &Rect) -> bool {
        let a = self.max();
        let b = other.max();
        a.x > other.pos.x && b.x > self.pos.x && a.y > other.pos.y && b.y > self.pos.y
    }

    /// Integer cell range covered, as half-open `(x_start..x_end, y_start..y_end)`
    ///
    /// A rectangle aligned to cell boundaries covers only the cells it visibly fills.
    pub fn cell_span(&self) -> (std::ops::Range<i64>, std::ops::Range<i64>) {
        let max = self.max();
        let xs = self.pos.x.floor() as i64..max.x.ceil() as i64;
        let ys = self.pos.y.floor() as i64..max.y.ceil() as i64;
        (xs, ys)
    }
}
