//! Canvas geometry.

use serde::{Deserialize, Serialize};

/// A point in canvas coordinates (origin top-left, y down).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Keep the point inside the canvas bounds.
    pub fn clamp_to(self, canvas: CanvasSize) -> Self {
        Self::new(self.x.clamp(0.0, canvas.width), self.y.clamp(0.0, canvas.height))
    }
}

/// Target drawing area in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl Default for CanvasSize {
    /// A typical phone portrait viewport.
    fn default() -> Self {
        Self {
            width: 390.0,
            height: 844.0,
        }
    }
}

impl CanvasSize {
    /// Create a canvas; degenerate sides (zero, negative, NaN) become 1.0.
    pub fn new(width: f64, height: f64) -> Self {
        let side = |v: f64| if v.is_finite() && v >= 1.0 { v } else { 1.0 };
        Self {
            width: side(width),
            height: side(height),
        }
    }

    #[inline]
    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    #[inline]
    pub fn short_side(&self) -> f64 {
        self.width.min(self.height)
    }
}
