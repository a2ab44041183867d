//! The set of railway alignments resolved from a drawing.

use log::warn;
use railmile_geom::{Alignment, Point2, Projection};
use railmile_records::SourcePolyline;

use crate::{DrawingConfig, EngineError, Result};

/// All railway alignments found in a drawing, in layer name order.
///
/// Construction resolves the configured railway layers against the drawn
/// polylines and is the single fallible setup step of a run; afterwards
/// the network is immutable and every query on it is pure.
#[derive(Debug, Clone)]
pub struct RailNetwork {
    alignments: Vec<Alignment>,
}

impl RailNetwork {
    /// Resolve the configured railway layers against drawn polylines.
    ///
    /// A configured layer with no polyline in the drawing is logged and
    /// skipped; a layer whose polyline is degenerate is logged and
    /// skipped; a layer with several polylines uses the first and logs
    /// the rest. Non-finite coordinates abort the run, as does a
    /// configuration that resolves to no alignments at all.
    pub fn from_polylines(config: &DrawingConfig, polylines: &[SourcePolyline]) -> Result<Self> {
        config.validate()?;
        let tol = config.tolerances();
        let mut alignments = Vec::new();
        for (layer, &offset) in &config.rail_layers {
            let mut found = polylines.iter().filter(|p| &p.layer == layer);
            let Some(src) = found.next() else {
                warn!("railway layer '{layer}' has no polyline in the drawing, skipped");
                continue;
            };
            if found.next().is_some() {
                warn!("railway layer '{layer}' has several polylines, using the first");
            }
            let points = plan_points(layer, &src.vertices)?;
            match Alignment::with_tolerance(layer.clone(), points, offset, tol) {
                Ok(alignment) => {
                    let alignment = match config.max_segment_len {
                        Some(max_len) => alignment.densified(max_len),
                        None => alignment,
                    };
                    alignments.push(alignment);
                }
                Err(e) => warn!("railway layer '{layer}' skipped: {e}"),
            }
        }
        if alignments.is_empty() {
            return Err(EngineError::NoAlignments);
        }
        Ok(Self { alignments })
    }

    /// The resolved alignments, ordered by layer name.
    pub fn alignments(&self) -> &[Alignment] {
        &self.alignments
    }

    /// The alignment for a railway layer, if the drawing had one.
    pub fn by_layer(&self, layer: &str) -> Option<&Alignment> {
        self.alignments.iter().find(|a| a.name() == layer)
    }

    /// Project a point onto the nearest alignment across the network.
    ///
    /// Distance ties between railways resolve to the first in layer name
    /// order. `None` only for an empty network, which construction rules
    /// out.
    pub fn nearest_projection(&self, point: &Point2) -> Option<(&Alignment, Projection)> {
        let mut best: Option<(&Alignment, Projection)> = None;
        for alignment in &self.alignments {
            let pr = alignment.project(point);
            if best.as_ref().map_or(true, |(_, b)| pr.distance < b.distance) {
                best = Some((alignment, pr));
            }
        }
        best
    }

    /// Smallest mileage any alignment reports for a point abeam of it.
    ///
    /// Railways the point is not abeam of do not participate; `None`
    /// when that leaves nothing.
    pub fn min_abeam_mileage(&self, point: &Point2) -> Option<f64> {
        self.alignments
            .iter()
            .filter_map(|a| a.project_abeam(point).map(|pr| pr.mileage))
            .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
    }
}

/// Plan-view points of a drawn entity, validating every coordinate.
pub(crate) fn plan_points(layer: &str, vertices: &[[f64; 3]]) -> Result<Vec<Point2>> {
    vertices
        .iter()
        .enumerate()
        .map(|(index, v)| {
            if v.iter().all(|c| c.is_finite()) {
                Ok(Point2::new(v[0], v[1]))
            } else {
                Err(EngineError::MalformedCoordinate {
                    layer: layer.to_string(),
                    index,
                })
            }
        })
        .collect()
}
