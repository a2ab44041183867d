//! Intersections between the railway and feature polylines.

use railmile_math::{Point2, Tolerance, Vec2};

use crate::alignment::Alignment;

/// A location where a feature polyline crosses the railway.
#[derive(Debug, Clone, Copy)]
pub struct Crossing {
    /// Intersection point.
    pub point: Point2,
    /// Unit tangent of the railway segment at the crossing.
    pub rail_tangent: Vec2,
    /// Unit tangent of the feature segment at the crossing.
    pub feature_tangent: Vec2,
    /// Railway segment index.
    pub rail_segment: usize,
    /// Feature segment index.
    pub feature_segment: usize,
}

/// Intersection point of segments `a0..a1` and `b0..b1`, if they cross.
///
/// Parametric solve of the two segment equations. Parallel or degenerate
/// pairs yield `None`; overlapping collinear runs are treated as parallel.
/// Endpoints count as crossing: each parameter may overshoot its segment
/// by the linear tolerance.
pub fn segment_intersection(
    a0: &Point2,
    a1: &Point2,
    b0: &Point2,
    b1: &Point2,
    tol: &Tolerance,
) -> Option<Point2> {
    let d1 = a1 - a0;
    let d2 = b1 - b0;
    let denom = d1.perp(&d2);
    // sin of the crossing angle scaled by both lengths; near zero means
    // parallel directions (or a zero-length segment)
    if denom.abs() <= tol.angular * d1.norm() * d2.norm() {
        return None;
    }
    let diff = b0 - a0;
    let t = diff.perp(&d2) / denom;
    let u = diff.perp(&d1) / denom;
    let t_slack = tol.linear / d1.norm();
    let u_slack = tol.linear / d2.norm();
    if t < -t_slack || t > 1.0 + t_slack || u < -u_slack || u > 1.0 + u_slack {
        return None;
    }
    Some(a0 + d1 * t)
}

/// All points where `feature` crosses the railway alignment.
///
/// Every railway segment is tested against every feature segment, in
/// mileage order. A hit within the linear tolerance of an already
/// accepted point is the same crossing seen from an adjacent segment
/// (a crossing exactly on a shared vertex) and is dropped, so the
/// record kept is always the one with the lowest railway segment index.
/// An empty result simply means the feature never crosses.
pub fn crossings(rail: &Alignment, feature: &[Point2]) -> Vec<Crossing> {
    let tol = rail.tolerance();
    let mut found: Vec<Crossing> = Vec::new();
    for seg in rail.segments() {
        for (j, w) in feature.windows(2).enumerate() {
            let flen = (w[1] - w[0]).norm();
            if tol.is_zero(flen) {
                continue;
            }
            let Some(point) = segment_intersection(&seg.start, &seg.end, &w[0], &w[1], &tol) else {
                continue;
            };
            if found.iter().any(|c| tol.points_equal(&c.point, &point)) {
                continue;
            }
            found.push(Crossing {
                point,
                rail_tangent: seg.tangent(),
                feature_tangent: (w[1] - w[0]) / flen,
                rail_segment: seg.index,
                feature_segment: j,
            });
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    fn east_line() -> Alignment {
        Alignment::new(
            "dl1",
            vec![Point2::new(0.0, 0.0), Point2::new(100.0, 0.0)],
            0.0,
        )
        .expect("valid alignment")
    }

    #[test]
    fn test_segment_intersection_basic() {
        let tol = Tolerance::DEFAULT;
        let p = segment_intersection(
            &Point2::new(0.0, 0.0),
            &Point2::new(10.0, 0.0),
            &Point2::new(5.0, -5.0),
            &Point2::new(5.0, 5.0),
            &tol,
        )
        .expect("crossing");
        assert!((p - Point2::new(5.0, 0.0)).norm() < 1e-9);
    }

    #[test]
    fn test_segment_intersection_misses() {
        let tol = Tolerance::DEFAULT;
        // Lines cross but outside both spans
        assert!(segment_intersection(
            &Point2::new(0.0, 0.0),
            &Point2::new(10.0, 0.0),
            &Point2::new(20.0, -5.0),
            &Point2::new(20.0, 5.0),
            &tol,
        )
        .is_none());
        // Parallel
        assert!(segment_intersection(
            &Point2::new(0.0, 0.0),
            &Point2::new(10.0, 0.0),
            &Point2::new(0.0, 1.0),
            &Point2::new(10.0, 1.0),
            &tol,
        )
        .is_none());
        // Collinear overlap counts as parallel
        assert!(segment_intersection(
            &Point2::new(0.0, 0.0),
            &Point2::new(10.0, 0.0),
            &Point2::new(5.0, 0.0),
            &Point2::new(15.0, 0.0),
            &tol,
        )
        .is_none());
    }

    #[test]
    fn test_segment_intersection_at_endpoint() {
        let tol = Tolerance::DEFAULT;
        let p = segment_intersection(
            &Point2::new(0.0, 0.0),
            &Point2::new(10.0, 0.0),
            &Point2::new(10.0, -5.0),
            &Point2::new(10.0, 5.0),
            &tol,
        )
        .expect("endpoint crossing");
        assert!((p - Point2::new(10.0, 0.0)).norm() < 1e-9);
    }

    #[test]
    fn test_crossings_single() {
        let rail = east_line();
        let feature = [Point2::new(50.0, -10.0), Point2::new(50.0, 10.0)];
        let hits = crossings(&rail, &feature);
        assert_eq!(hits.len(), 1);
        assert!((hits[0].point - Point2::new(50.0, 0.0)).norm() < 1e-9);
        assert_eq!(hits[0].rail_segment, 0);
        assert_eq!(hits[0].feature_segment, 0);
    }

    #[test]
    fn test_crossings_none_for_parallel() {
        let rail = east_line();
        let feature = [Point2::new(0.0, 5.0), Point2::new(100.0, 5.0)];
        assert!(crossings(&rail, &feature).is_empty());
    }

    #[test]
    fn test_crossings_shared_vertex_dedup() {
        // Railway with a vertex at x = 50; the feature passes exactly
        // through it, hitting both adjacent rail segments
        let rail = Alignment::new(
            "r",
            vec![
                Point2::new(0.0, 0.0),
                Point2::new(50.0, 0.0),
                Point2::new(100.0, 0.0),
            ],
            0.0,
        )
        .expect("valid alignment");
        let feature = [Point2::new(50.0, -10.0), Point2::new(50.0, 10.0)];
        let hits = crossings(&rail, &feature);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].rail_segment, 0);
    }

    #[test]
    fn test_crossings_feature_vertex_dedup() {
        // Feature bends exactly on the railway; both feature segments
        // touch the same point, one record survives
        let rail = east_line();
        let feature = [
            Point2::new(40.0, -10.0),
            Point2::new(50.0, 0.0),
            Point2::new(60.0, -10.0),
        ];
        let hits = crossings(&rail, &feature);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].feature_segment, 0);
    }

    #[test]
    fn test_crossings_multiple() {
        // Zig-zag feature crossing the rail twice
        let rail = east_line();
        let feature = [
            Point2::new(20.0, -10.0),
            Point2::new(30.0, 10.0),
            Point2::new(40.0, -10.0),
        ];
        let hits = crossings(&rail, &feature);
        assert_eq!(hits.len(), 2);
        assert!((hits[0].point.x - 25.0).abs() < 1e-9);
        assert!((hits[1].point.x - 35.0).abs() < 1e-9);
    }

    #[test]
    fn test_crossings_symmetric_points() {
        // Swapping which polyline is the rail finds the same points
        let rail = east_line();
        let feature = [Point2::new(30.0, -20.0), Point2::new(50.0, 20.0)];
        let a = crossings(&rail, &feature);
        let rail2 = Alignment::new("f", feature.to_vec(), 0.0).expect("valid alignment");
        let b = crossings(&rail2, rail.vertices());
        assert_eq!(a.len(), 1);
        assert_eq!(b.len(), 1);
        assert!((a[0].point - b[0].point).norm() < 1e-9);
    }
}
