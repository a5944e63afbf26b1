use super::{Vector2, ApproxEq};
use nalgebra as na;
use serde::{Deserialize, Serialize};

/// A point in site plan space, in feet.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn origin() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    pub fn to_vector(&self) -> Vector2 {
        Vector2::new(self.x, self.y)
    }

    pub fn to_na(&self) -> na::Point2<f64> {
        na::Point2::new(self.x, self.y)
    }

    /// Translate by a fixed offset.
    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl From<[f64; 2]> for Point2D {
    fn from(arr: [f64; 2]) -> Self {
        Self::new(arr[0], arr[1])
    }
}

impl From<na::Point2<f64>> for Point2D {
    fn from(p: na::Point2<f64>) -> Self {
        Self::new(p.x, p.y)
    }
}

/// Axis-aligned extents of a point set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
            width: max_x - min_x,
            height: max_y - min_y,
        }
    }

    /// Rectangle of the given size centred on `center`.
    pub fn from_center(center: Point2D, width: f64, height: f64) -> Self {
        let hw = width.max(0.0) / 2.0;
        let hh = height.max(0.0) / 2.0;
        Self::new(center.x - hw, center.y - hh, center.x + hw, center.y + hh)
    }

    pub fn min(&self) -> Point2D {
        Point2D::new(self.min_x, self.min_y)
    }

    pub fn max(&self) -> Point2D {
        Point2D::new(self.max_x, self.max_y)
    }

    pub fn contains(&self, p: &Point2D) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }

    /// Corners in counter-clockwise order starting at the minimum corner.
    pub fn corners(&self) -> Vec<Point2D> {
        vec![
            Point2D::new(self.min_x, self.min_y),
            Point2D::new(self.max_x, self.min_y),
            Point2D::new(self.max_x, self.max_y),
            Point2D::new(self.min_x, self.max_y),
        ]
    }

    pub fn is_degenerate(&self) -> bool {
        self.width.approx_eq(&0.0) || self.height.approx_eq(&0.0)
    }
}
