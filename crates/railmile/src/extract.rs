//! Forward workflows: drawing entities to mileage-tagged table rows.

use std::cmp::Ordering;

use log::{debug, warn};
use railmile_geom::{crossings, skew_angle, DegMin, Polygon};
use railmile_records::{
    CrossingRow, DistanceRow, EnclosedTextRow, SourcePolyline, SourceText,
};

use crate::network::plan_points;
use crate::{DrawingConfig, RailNetwork, Result};

/// Round to millimetres, the precision of the output tables.
fn round_mm(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}

fn by_mileage(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Does this text entity participate in extraction?
fn text_selected(config: &DrawingConfig, text: &SourceText) -> bool {
    match &config.text_layer {
        Some(layer) => &text.layer == layer,
        None => true,
    }
}

/// Find every crossing between the railways and the feature polylines,
/// as rows of the crossing table sorted by mileage.
///
/// Polylines on railway layers never count as features; the optional
/// layer prefix narrows the rest. The remark column carries the
/// feature's label, falling back to its layer name. A feature that
/// never crosses contributes no rows, which is not an error.
pub fn extract_crossings(
    network: &RailNetwork,
    features: &[SourcePolyline],
    config: &DrawingConfig,
) -> Result<Vec<CrossingRow>> {
    let mut rows = Vec::new();
    for feature in features {
        if config.rail_layers.contains_key(&feature.layer) {
            continue;
        }
        if let Some(prefix) = &config.feature_layer_prefix {
            if !feature.layer.starts_with(prefix.as_str()) {
                continue;
            }
        }
        let points = plan_points(&feature.layer, &feature.vertices)?;
        let remark = feature
            .label
            .clone()
            .unwrap_or_else(|| feature.layer.clone());
        for rail in network.alignments() {
            for hit in crossings(rail, &points) {
                let pr = rail.project(&hit.point);
                let skew = skew_angle(&hit.rail_tangent, &hit.feature_tangent);
                rows.push(CrossingRow {
                    mileage_m: round_mm(pr.mileage),
                    angle: DegMin::from_radians(skew).to_string(),
                    remark: remark.clone(),
                });
            }
        }
    }
    rows.sort_by(|a, b| by_mileage(a.mileage_m, b.mileage_m));
    Ok(rows)
}

/// Measure every selected text against the nearest railway, as rows of
/// the distance table sorted by mileage.
pub fn extract_text_distances(
    network: &RailNetwork,
    texts: &[SourceText],
    config: &DrawingConfig,
) -> Result<Vec<DistanceRow>> {
    let mut rows = Vec::new();
    for text in texts {
        if !text_selected(config, text) {
            continue;
        }
        let anchor = plan_points(&text.layer, std::slice::from_ref(&text.anchor))?;
        if let Some((_, pr)) = network.nearest_projection(&anchor[0]) {
            rows.push(DistanceRow {
                mileage_m: round_mm(pr.mileage),
                distance_m: round_mm(pr.distance),
                side: pr.side.into(),
                text: text.text.clone(),
            });
        }
    }
    rows.sort_by(|a, b| by_mileage(a.mileage_m, b.mileage_m));
    Ok(rows)
}

/// Pair each selected text with the closed outline containing it, as
/// rows of the enclosed text table.
///
/// A text inside several outlines is reported once, against the outline
/// with the smallest area (first drawn wins a tie); the resolution is
/// logged. The row's mileage is the smallest any railway reports with
/// the anchor abeam of it, `None` when no railway is; rows without a
/// mileage sort last.
pub fn extract_enclosed_text(
    network: &RailNetwork,
    outlines: &[SourcePolyline],
    texts: &[SourceText],
    config: &DrawingConfig,
) -> Result<Vec<EnclosedTextRow>> {
    let tol = config.tolerances();
    let mut polygons: Vec<(&SourcePolyline, Polygon)> = Vec::new();
    for outline in outlines {
        let points = plan_points(&outline.layer, &outline.vertices)?;
        let explicitly_closed = match (points.first(), points.last()) {
            (Some(first), Some(last)) => tol.points_equal(first, last),
            _ => false,
        };
        if !outline.closed && !explicitly_closed {
            continue;
        }
        let polygon = Polygon::from_drawn(points, &tol);
        if polygon.len() < 3 {
            warn!(
                "closed polyline on layer '{}' has fewer than 3 vertices, skipped",
                outline.layer
            );
            continue;
        }
        polygons.push((outline, polygon));
    }

    let mut rows = Vec::new();
    for text in texts {
        if !text_selected(config, text) {
            continue;
        }
        let anchor = plan_points(&text.layer, std::slice::from_ref(&text.anchor))?;
        let mut chosen: Option<&(&SourcePolyline, Polygon)> = None;
        let mut containing = 0usize;
        for entry in &polygons {
            if !entry.1.contains(&anchor[0]) {
                continue;
            }
            containing += 1;
            let better = match chosen {
                Some(best) => entry.1.area() < best.1.area(),
                None => true,
            };
            if better {
                chosen = Some(entry);
            }
        }
        let Some(chosen) = chosen else {
            continue;
        };
        if containing > 1 {
            debug!(
                "text '{}' lies inside {containing} outlines, keeping the smallest",
                text.text
            );
        }
        rows.push(EnclosedTextRow {
            mileage_m: network.min_abeam_mileage(&anchor[0]).map(round_mm),
            text: text.text.clone(),
            outline: EnclosedTextRow::outline_string(&chosen.0.vertices),
        });
    }
    rows.sort_by(|a, b| {
        by_mileage(
            a.mileage_m.unwrap_or(f64::INFINITY),
            b.mileage_m.unwrap_or(f64::INFINITY),
        )
    });
    Ok(rows)
}
