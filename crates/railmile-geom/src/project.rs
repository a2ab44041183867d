//! Forward projection: nearest point on an alignment.

use railmile_math::{Point2, Vec2};

use crate::alignment::Alignment;

/// Which side of the railway a point lies on, relative to the direction
/// of increasing mileage.
///
/// A point exactly on the centerline reports [`Side::Left`] so the
/// classification stays binary and deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Left of the direction of travel.
    Left,
    /// Right of the direction of travel.
    Right,
}

/// Result of projecting a point onto an alignment.
#[derive(Debug, Clone, Copy)]
pub struct Projection {
    /// Mileage at the foot point, including the alignment offset.
    pub mileage: f64,
    /// Unsigned distance from the queried point to the foot, metres.
    pub distance: f64,
    /// Side of the alignment the queried point lies on.
    pub side: Side,
    /// Unit tangent of the supporting segment.
    pub tangent: Vec2,
    /// Foot point on the alignment.
    pub foot: Point2,
    /// Index of the supporting segment.
    pub segment: usize,
}

impl Alignment {
    /// Project a point onto the alignment.
    ///
    /// Walks every segment, clamps the perpendicular foot to the segment
    /// span, and keeps the smallest distance. Ties go to the lowest
    /// segment index, so a point equidistant from two bends resolves to
    /// the more upstream one.
    pub fn project(&self, p: &Point2) -> Projection {
        let mut best_dist = f64::INFINITY;
        let mut best_t = 0.0;
        let mut best_seg = 0;
        let mut best_foot = self.vertices()[0];
        for seg in self.segments() {
            let dir = seg.direction();
            let t = ((p - seg.start).dot(&dir) / dir.norm_squared()).clamp(0.0, 1.0);
            let foot = seg.point_at(t);
            let dist = (p - foot).norm();
            if dist < best_dist {
                best_dist = dist;
                best_t = t;
                best_seg = seg.index;
                best_foot = foot;
            }
        }
        let seg = self.segment(best_seg);
        let tangent = seg.tangent();
        Projection {
            mileage: self.start_mileage()
                + self.cumulative_length_at(best_seg)
                + best_t * seg.length(),
            distance: best_dist,
            side: side_of(&tangent, &(p - best_foot)),
            tangent,
            foot: best_foot,
            segment: best_seg,
        }
    }

    /// Project a point, accepting only feet that land abeam of a segment.
    ///
    /// Unlike [`Alignment::project`] there is no nearest-endpoint
    /// fallback: the perpendicular foot must fall within a segment's own
    /// span (endpoint overshoot up to the linear tolerance is admitted).
    /// Points beyond the alignment's ends, or off the outside of a convex
    /// bend, have no abeam foot and yield `None`.
    pub fn project_abeam(&self, p: &Point2) -> Option<Projection> {
        let mut best: Option<Projection> = None;
        for seg in self.segments() {
            let dir = seg.direction();
            let len = seg.length();
            let raw = (p - seg.start).dot(&dir) / dir.norm_squared();
            let slack = self.tolerance().linear / len;
            if raw < -slack || raw > 1.0 + slack {
                continue;
            }
            let t = raw.clamp(0.0, 1.0);
            let foot = seg.point_at(t);
            let dist = (p - foot).norm();
            if best.as_ref().map_or(true, |b| dist < b.distance) {
                let tangent = dir / len;
                best = Some(Projection {
                    mileage: self.start_mileage() + self.cumulative_length_at(seg.index) + t * len,
                    distance: dist,
                    side: side_of(&tangent, &(p - foot)),
                    tangent,
                    foot,
                    segment: seg.index,
                });
            }
        }
        best
    }
}

/// Side classification from the cross product of the tangent and the
/// foot-to-point offset. Zero cross (on the line) counts as left.
fn side_of(tangent: &Vec2, offset: &Vec2) -> Side {
    if tangent.perp(offset) >= 0.0 {
        Side::Left
    } else {
        Side::Right
    }
}
