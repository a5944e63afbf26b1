//! 2D geometry utilities for site plan operations.
//!
//! Pure functions over `Point2D` (feet) reused by head placement, pipe
//! routing and material takeoff: distances, centroids, containment tests
//! and candidate grid generation.

use super::{BoundingBox, Point2D, EPSILON};
use nalgebra as na;
use serde::{Deserialize, Serialize};

// =============================================================================
// Point Operations
// =============================================================================

/// Distance between two points.
#[inline]
pub fn distance(p1: Point2D, p2: Point2D) -> f64 {
    na::distance(&p1.to_na(), &p2.to_na())
}

/// Midpoint between two points.
#[inline]
pub fn midpoint(p1: Point2D, p2: Point2D) -> Point2D {
    na::center(&p1.to_na(), &p2.to_na()).into()
}

/// Arithmetic mean of a point set. Returns the origin for an empty set.
pub fn centroid(points: &[Point2D]) -> Point2D {
    if points.is_empty() {
        return Point2D::origin();
    }
    let sum = points
        .iter()
        .fold(na::Vector2::zeros(), |acc, p| acc + p.to_vector());
    let mean = sum / points.len() as f64;
    Point2D::new(mean.x, mean.y)
}

/// Axis-aligned bounding box of a point set. Empty input yields a zero box at the origin.
pub fn bounding_box(points: &[Point2D]) -> BoundingBox {
    if points.is_empty() {
        return BoundingBox::new(0.0, 0.0, 0.0, 0.0);
    }

    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut max_y = f64::NEG_INFINITY;

    for p in points {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }

    BoundingBox::new(min_x, min_y, max_x, max_y)
}

// =============================================================================
// Segment Operations
// =============================================================================

/// Distance from a point to the closest point of segment `a`-`b`.
pub fn distance_point_to_segment(point: Point2D, a: Point2D, b: Point2D) -> f64 {
    let ab = b.to_vector() - a.to_vector();
    let ap = point.to_vector() - a.to_vector();
    let len_sq = ab.norm_squared();

    if len_sq < EPSILON * EPSILON {
        return ap.norm();
    }

    let t = (ap.dot(&ab) / len_sq).clamp(0.0, 1.0);
    (ap - ab * t).norm()
}

/// Unit direction of a segment, or `None` for a zero-length segment.
pub fn segment_direction(a: Point2D, b: Point2D) -> Option<na::Vector2<f64>> {
    let d = b.to_vector() - a.to_vector();
    let len = d.norm();
    if len < EPSILON {
        None
    } else {
        Some(d / len)
    }
}

/// Closed edge list of a polygon: `(p[i], p[i + 1])` wrapping back to the first vertex.
pub fn polygon_edges(polygon: &[Point2D]) -> Vec<(Point2D, Point2D)> {
    let n = polygon.len();
    if n < 2 {
        return vec![];
    }
    (0..n).map(|i| (polygon[i], polygon[(i + 1) % n])).collect()
}

// =============================================================================
// Polygon Operations
// =============================================================================

/// Signed area by the shoelace formula. Positive = CCW winding.
pub fn polygon_signed_area(vertices: &[Point2D]) -> f64 {
    let n = vertices.len();
    if n < 3 {
        return 0.0;
    }

    let mut area = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        area += vertices[i].x * vertices[j].y;
        area -= vertices[j].x * vertices[i].y;
    }
    area / 2.0
}

/// Absolute area of a simple polygon. Self-intersections are not handled.
pub fn polygon_area(vertices: &[Point2D]) -> f64 {
    polygon_signed_area(vertices).abs()
}

/// Ray-casting containment test (even-odd rule).
///
/// Polygons with fewer than three vertices contain nothing. Points on the
/// left/bottom boundary of an axis-aligned rectangle count as inside, points
/// on the right/top boundary as outside.
pub fn point_in_polygon(point: Point2D, polygon: &[Point2D]) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let pi = polygon[i];
        let pj = polygon[j];
        if (pi.y > point.y) != (pj.y > point.y) {
            let x_cross = (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x;
            if point.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }

    inside
}

// =============================================================================
// Grid Generation
// =============================================================================

/// Layout of candidate head positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum GridPattern {
    #[default]
    Square,
    /// Odd rows shifted by half a column spacing.
    Triangular,
}

/// Upper bound on the lattice size a single grid may request.
pub const MAX_GRID_POINTS: usize = 1_000_000;

fn grid_dimensions(width: f64, height: f64, spacing_x: f64, spacing_y: f64) -> Option<(usize, usize)> {
    if !(spacing_x > 0.0 && spacing_y > 0.0) || !spacing_x.is_finite() || !spacing_y.is_finite() {
        return Some((0, 0));
    }
    if !width.is_finite() || !height.is_finite() {
        return Some((0, 0));
    }

    let cols = (width.max(0.0) / spacing_x).ceil();
    let rows = (height.max(0.0) / spacing_y).ceil();
    let limit = MAX_GRID_POINTS as f64;
    if cols >= limit || rows >= limit {
        return None;
    }

    let cols = cols as usize + 1;
    let rows = rows as usize + 1;
    cols.checked_mul(rows)
        .filter(|count| *count <= MAX_GRID_POINTS)
        .map(|_| (cols, rows))
}

/// Number of lattice points `generate_grid_points` would visit, or `None`
/// when it exceeds `MAX_GRID_POINTS`.
pub fn grid_point_count(width: f64, height: f64, spacing_x: f64, spacing_y: f64) -> Option<usize> {
    grid_dimensions(width, height, spacing_x, spacing_y).map(|(cols, rows)| cols * rows)
}

/// Rectangular lattice covering `[origin, origin + extent]`.
///
/// Produces `ceil(width / spacing_x) + 1` columns by `ceil(height / spacing_y) + 1`
/// rows; points beyond the far edge are dropped. Non-positive spacing yields no points,
/// and so does a lattice larger than `MAX_GRID_POINTS`.
pub fn generate_grid_points(
    origin_x: f64,
    origin_y: f64,
    width: f64,
    height: f64,
    spacing_x: f64,
    spacing_y: f64,
    pattern: GridPattern,
) -> Vec<Point2D> {
    let (cols, rows) = match grid_dimensions(width, height, spacing_x, spacing_y) {
        Some((cols, rows)) if cols > 0 => (cols, rows),
        _ => return vec![],
    };

    let width = width.max(0.0);
    let height = height.max(0.0);
    let max_x = origin_x + width;
    let max_y = origin_y + height;

    let mut points = Vec::with_capacity(cols * rows);
    for row in 0..rows {
        let y = origin_y + row as f64 * spacing_y;
        if y > max_y + EPSILON {
            continue;
        }
        let shift = match pattern {
            GridPattern::Triangular if row % 2 == 1 => spacing_x / 2.0,
            _ => 0.0,
        };
        for col in 0..cols {
            let x = origin_x + col as f64 * spacing_x + shift;
            if x > max_x + EPSILON {
                continue;
            }
            points.push(Point2D::new(x, y));
        }
    }

    points
}

// =============================================================================
// Tests
// =============================================================================
