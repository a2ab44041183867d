//! Railway alignments: arc-length parameterized centerline polylines.

use railmile_math::{right_normal, Point2, Tolerance, Vec2};

use crate::error::{AlignmentError, Result};

/// A directed straight piece of an alignment between consecutive vertices.
///
/// Segments are produced on demand and never degenerate: construction of
/// the owning [`Alignment`] drops sub-tolerance edges.
#[derive(Debug, Clone, Copy)]
pub struct Segment {
    /// Index of the segment within its alignment.
    pub index: usize,
    /// Start vertex.
    pub start: Point2,
    /// End vertex.
    pub end: Point2,
}

impl Segment {
    /// Direction vector from start to end (not normalized).
    pub fn direction(&self) -> Vec2 {
        self.end - self.start
    }

    /// Segment length in metres.
    pub fn length(&self) -> f64 {
        self.direction().norm()
    }

    /// Unit tangent pointing in the direction of increasing mileage.
    pub fn tangent(&self) -> Vec2 {
        self.direction() / self.length()
    }

    /// Point at parameter `t` in `[0, 1]` along the segment.
    pub fn point_at(&self, t: f64) -> Point2 {
        self.start + self.direction() * t
    }
}

/// A railway centerline with a mileage offset.
///
/// Vertices are deduplicated at construction so consecutive vertices are
/// always farther apart than the linear tolerance; the cumulative
/// arc-length table is therefore strictly increasing. Mileage along the
/// alignment is `mileage_offset + arc length from the first vertex`.
#[derive(Debug, Clone)]
pub struct Alignment {
    name: String,
    vertices: Vec<Point2>,
    /// Arc length from the first vertex to each vertex; same length as
    /// `vertices`, starts at 0, strictly increasing.
    cumulative: Vec<f64>,
    mileage_offset: f64,
    tol: Tolerance,
}

impl Alignment {
    /// Build an alignment from drawn vertices with default tolerances.
    ///
    /// Consecutive vertices closer than the linear tolerance are merged.
    /// Fails with [`AlignmentError::Degenerate`] when fewer than two
    /// distinct vertices remain: a single segment is the minimum that
    /// defines a direction of travel.
    pub fn new(name: impl Into<String>, vertices: Vec<Point2>, mileage_offset: f64) -> Result<Self> {
        Self::with_tolerance(name, vertices, mileage_offset, Tolerance::DEFAULT)
    }

    /// Build an alignment with explicit tolerances.
    pub fn with_tolerance(
        name: impl Into<String>,
        vertices: Vec<Point2>,
        mileage_offset: f64,
        tol: Tolerance,
    ) -> Result<Self> {
        let name = name.into();
        let mut pts: Vec<Point2> = Vec::with_capacity(vertices.len());
        for v in vertices {
            match pts.last() {
                Some(last) if tol.points_equal(last, &v) => continue,
                _ => pts.push(v),
            }
        }
        if pts.len() < 2 {
            return Err(AlignmentError::Degenerate {
                name,
                distinct: pts.len(),
            });
        }
        let cumulative = cumulative_lengths(&pts);
        Ok(Self {
            name,
            vertices: pts,
            cumulative,
            mileage_offset,
            tol,
        })
    }

    /// Name tag carried to output records (usually the drawing layer).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Deduplicated vertices.
    pub fn vertices(&self) -> &[Point2] {
        &self.vertices
    }

    /// Mileage of the first vertex.
    pub fn mileage_offset(&self) -> f64 {
        self.mileage_offset
    }

    /// Tolerances this alignment was built with.
    pub fn tolerance(&self) -> Tolerance {
        self.tol
    }

    /// Arc length from the first vertex to vertex `i`.
    pub fn cumulative_length_at(&self, i: usize) -> f64 {
        self.cumulative[i]
    }

    /// Total arc length in metres.
    pub fn total_length(&self) -> f64 {
        self.cumulative[self.cumulative.len() - 1]
    }

    /// First mileage covered by the alignment (the offset).
    pub fn start_mileage(&self) -> f64 {
        self.mileage_offset
    }

    /// Last mileage covered by the alignment.
    pub fn end_mileage(&self) -> f64 {
        self.mileage_offset + self.total_length()
    }

    /// Number of segments.
    pub fn segment_count(&self) -> usize {
        self.vertices.len() - 1
    }

    /// Segment `i`, connecting vertices `i` and `i + 1`.
    pub fn segment(&self, i: usize) -> Segment {
        Segment {
            index: i,
            start: self.vertices[i],
            end: self.vertices[i + 1],
        }
    }

    /// Iterate over all segments in mileage order.
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        (0..self.segment_count()).map(move |i| self.segment(i))
    }

    /// Copy of this alignment with extra vertices inserted so that no
    /// segment is longer than `max_len` metres.
    ///
    /// Inserted vertices lie exactly on the original segments, so mileage
    /// positions and projections are unchanged; only the sampling density
    /// differs.
    pub fn densified(&self, max_len: f64) -> Self {
        let mut pts = Vec::with_capacity(self.vertices.len());
        pts.push(self.vertices[0]);
        for w in self.vertices.windows(2) {
            let d = (w[1] - w[0]).norm();
            if d > max_len {
                let n = (d / max_len).ceil() as usize;
                for i in 1..n {
                    let t = i as f64 / n as f64;
                    pts.push(w[0] + (w[1] - w[0]) * t);
                }
            }
            pts.push(w[1]);
        }
        let cumulative = cumulative_lengths(&pts);
        Self {
            name: self.name.clone(),
            vertices: pts,
            cumulative,
            mileage_offset: self.mileage_offset,
            tol: self.tol,
        }
    }

    /// Point and unit tangent at the given mileage.
    ///
    /// Mileage within the linear tolerance of either end is clamped into
    /// range, so values round-tripped through printed tables stay usable.
    /// Anything further out is [`AlignmentError::OutOfRange`].
    pub fn at_mileage(&self, mileage: f64) -> Result<(Point2, Vec2)> {
        let start = self.start_mileage();
        let end = self.end_mileage();
        if mileage < start - self.tol.linear || mileage > end + self.tol.linear {
            return Err(AlignmentError::OutOfRange {
                mileage,
                start,
                end,
            });
        }
        let s = (mileage - start).clamp(0.0, self.total_length());
        // partition_point returns the first vertex whose cumulative length
        // exceeds s; step back to the containing segment, clamping so that
        // s == total_length lands on the final segment.
        let i = self
            .cumulative
            .partition_point(|&c| c <= s)
            .saturating_sub(1)
            .min(self.segment_count() - 1);
        let seg = self.segment(i);
        let t = (s - self.cumulative[i]) / seg.length();
        Ok((seg.point_at(t), seg.tangent()))
    }

    /// Point displaced `lateral` metres sideways from the given mileage,
    /// together with the centerline tangent there.
    ///
    /// Positive `lateral` is the right side of the direction of travel,
    /// matching the side reported by projection.
    pub fn locate(&self, mileage: f64, lateral: f64) -> Result<(Point2, Vec2)> {
        let (point, tangent) = self.at_mileage(mileage)?;
        Ok((point + right_normal(&tangent) * lateral, tangent))
    }
}

/// Cumulative arc length at each vertex, starting at 0.
fn cumulative_lengths(pts: &[Point2]) -> Vec<f64> {
    let mut out = Vec::with_capacity(pts.len());
    let mut acc = 0.0;
    out.push(0.0);
    for w in pts.windows(2) {
        acc += (w[1] - w[0]).norm();
        out.push(acc);
    }
    out
}
