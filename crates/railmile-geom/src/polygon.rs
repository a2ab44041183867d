//! Closed outlines and point containment.

use railmile_math::{Point2, Tolerance};

/// A closed plan-view outline.
///
/// The last vertex connects back to the first implicitly; an explicit
/// closing vertex from the drawing is dropped at construction.
#[derive(Debug, Clone)]
pub struct Polygon {
    /// Vertices of the outline in drawing order.
    pub points: Vec<Point2>,
}

impl Polygon {
    /// Create a polygon from already-normalized points.
    pub fn new(points: Vec<Point2>) -> Self {
        Self { points }
    }

    /// Create a polygon from drawn vertices, dropping a final vertex
    /// that repeats the first (drawings close outlines both ways).
    pub fn from_drawn(mut points: Vec<Point2>, tol: &Tolerance) -> Self {
        if points.len() >= 2 {
            let first = points[0];
            match points.last() {
                Some(last) if tol.points_equal(&first, last) => {
                    points.pop();
                }
                _ => {}
            }
        }
        Self { points }
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the polygon has no vertices.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Signed area of the outline.
    /// Positive for counter-clockwise, negative for clockwise.
    pub fn signed_area(&self) -> f64 {
        let n = self.points.len();
        if n < 3 {
            return 0.0;
        }
        let mut area = 0.0;
        for i in 0..n {
            let j = (i + 1) % n;
            area += self.points[i].x * self.points[j].y;
            area -= self.points[j].x * self.points[i].y;
        }
        area / 2.0
    }

    /// Absolute enclosed area.
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Is the outline wound counter-clockwise?
    pub fn is_ccw(&self) -> bool {
        self.signed_area() > 0.0
    }

    /// Perimeter length including the closing edge.
    pub fn perimeter(&self) -> f64 {
        let n = self.points.len();
        if n < 2 {
            return 0.0;
        }
        let mut length = 0.0;
        for i in 0..n {
            let j = (i + 1) % n;
            length += (self.points[j] - self.points[i]).norm();
        }
        length
    }

    /// Test whether a point lies inside the outline.
    ///
    /// Ray casting with even-odd parity: an outline with fewer than
    /// three vertices contains nothing. Points exactly on an edge may
    /// land on either side of the parity flip; callers that care about
    /// boundary points should not.
    pub fn contains(&self, point: &Point2) -> bool {
        let n = self.points.len();
        if n < 3 {
            return false;
        }
        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let pi = &self.points[i];
            let pj = &self.points[j];
            if ((pi.y > point.y) != (pj.y > point.y))
                && (point.x < (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x)
            {
                inside = !inside;
            }
            j = i;
        }
        inside
    }
}
