// Grid-space geometry. Positions and velocity vectors live on integer grid
// coordinates; only the rendering transform produces fractional pixels.

use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridPoint {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridVector {
    pub x: i32,
    pub y: i32,
}

impl GridPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn translated(self, v: GridVector) -> GridPoint {
        GridPoint::new(self.x + v.x, self.y + v.y)
    }
}

impl GridVector {
    pub const ZERO: GridVector = GridVector { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A directed line segment: tail at `start`, head at `end`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineSeg {
    pub start: GridPoint,
    pub end: GridPoint,
}

impl LineSeg {
    pub const fn new(start: GridPoint, end: GridPoint) -> Self {
        Self { start, end }
    }

    pub fn vector(&self) -> GridVector {
        GridVector::new(self.end.x - self.start.x, self.end.y - self.start.y)
    }

    /// The whole segment shifted by `v`.
    pub fn translated(&self, v: GridVector) -> LineSeg {
        LineSeg::new(self.start.translated(v), self.end.translated(v))
    }

    pub fn midpoint(&self) -> (f32, f32) {
        let v = self.vector();
        (
            self.start.x as f32 + v.x as f32 * 0.5,
            self.start.y as f32 + v.y as f32 * 0.5,
        )
    }
}
