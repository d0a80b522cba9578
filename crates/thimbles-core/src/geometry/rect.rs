//! Axis-aligned rectangles in frame pixel coordinates
//!
//! Every detection, tracker estimate and cup position in the system is one of these.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A point in frame coordinates, used for rectangle centers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to another point
    pub fn distance_squared(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: &Point) -> f64 {
        self.distance_squared(other).sqrt()
    }
}

/// Axis-aligned rectangle `(x, y, width, height)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// Create a new rectangle
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (exclusive coordinate)
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Bottom edge (exclusive coordinate)
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Area in square pixels
    pub fn area(&self) -> f64 {
        self.width as f64 * self.height as f64
    }

    /// Width over height, `None` for a degenerate rectangle
    pub fn aspect_ratio(&self) -> Option<f64> {
        if self.height == 0 {
            return None;
        }
        Some(self.width as f64 / self.height as f64)
    }

    /// Center point `(x + width/2, y + height/2)`
    pub fn center(&self) -> Point {
        Point::new(
            self.x as f64 + self.width as f64 / 2.0,
            self.y as f64 + self.height as f64 / 2.0,
        )
    }

    /// Distance between the centers of two rectangles
    pub fn center_distance(&self, other: &Rect) -> f64 {
        self.center().distance(&other.center())
    }

    /// Whether `point` lies inside this rectangle grown by `margin` on every side.
    ///
    /// Bounds are inclusive, so a zero margin accepts points on the border.
    pub fn contains_with_margin(&self, point: &Point, margin: f64) -> bool {
        let left = self.x as f64 - margin;
        let top = self.y as f64 - margin;
        let right = self.right() as f64 + margin;
        let bottom = self.bottom() as f64 + margin;

        left <= point.x && point.x <= right && top <= point.y && point.y <= bottom
    }

    /// Whether `point` lies strictly inside the rectangle (border excluded)
    pub fn strictly_contains(&self, point: &Point) -> bool {
        (self.x as f64) < point.x
            && point.x < self.right() as f64
            && (self.y as f64) < point.y
            && point.y < self.bottom() as f64
    }

    /// Translate by `(dx, dy)`
    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }
}

impl From<(i32, i32, i32, i32)> for Rect {
    fn from((x, y, width, height): (i32, i32, i32, i32)) -> Self {
        Self::new(x, y, width, height)
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.x, self.y, self.width, self.height)
    }
}
