//! Inverse workflows: mileage queries to drawable geometry.

use log::warn;
use railmile_geom::Alignment;
use railmile_records::{MileageQuery, PlacedPolyline};

use crate::{DrawingConfig, EngineError, RailNetwork, Result};

/// Resolve the railway a query refers to.
///
/// A layer the configuration does not know is a setup mistake and
/// aborts; a configured layer the drawing happens not to contain skips
/// the query with a log line, mirroring how the network was built.
fn resolve_rail<'a>(
    network: &'a RailNetwork,
    config: &DrawingConfig,
    query: &MileageQuery,
) -> Result<Option<&'a Alignment>> {
    if !config.rail_layers.contains_key(&query.layer) {
        return Err(EngineError::MissingLayerOffset {
            layer: query.layer.clone(),
        });
    }
    match network.by_layer(&query.layer) {
        Some(rail) => Ok(Some(rail)),
        None => {
            warn!(
                "railway layer '{}' missing from the drawing, query at {:.3} skipped",
                query.layer, query.mileage_m
            );
            Ok(None)
        }
    }
}

/// Place a perpendicular tick mark for each query.
///
/// Ticks are two-vertex polylines of the configured length running
/// across the railway at the query's mileage and lateral offset,
/// centered on the located point or starting from it. A query whose
/// mileage falls outside its railway is logged and skipped; the batch
/// carries on.
pub fn place_annotations(
    network: &RailNetwork,
    queries: &[MileageQuery],
    config: &DrawingConfig,
) -> Result<Vec<PlacedPolyline>> {
    let mut placed = Vec::new();
    for query in queries {
        let Some(rail) = resolve_rail(network, config, query)? else {
            continue;
        };
        let (near, far) = if config.annotation_centered {
            let half = config.annotation_len / 2.0;
            (query.lateral_m - half, query.lateral_m + half)
        } else {
            (query.lateral_m, query.lateral_m + config.annotation_len)
        };
        let ends = rail
            .locate(query.mileage_m, near)
            .and_then(|(a, _)| rail.locate(query.mileage_m, far).map(|(b, _)| (a, b)));
        match ends {
            Ok((a, b)) => placed.push(PlacedPolyline {
                layer: config.annotation_layer.clone(),
                remark: query.remark.clone(),
                vertices: vec![[a.x, a.y, 0.0], [b.x, b.y, 0.0]],
            }),
            Err(e) => warn!("annotation query skipped: {e}"),
        }
    }
    Ok(placed)
}

/// Place a connector polyline from each query to the configured target.
///
/// Connectors run from the located point to the one fixed far endpoint
/// every connector shares. Out-of-range queries are logged and skipped.
pub fn place_connectors(
    network: &RailNetwork,
    queries: &[MileageQuery],
    config: &DrawingConfig,
) -> Result<Vec<PlacedPolyline>> {
    let mut placed = Vec::new();
    for query in queries {
        let Some(rail) = resolve_rail(network, config, query)? else {
            continue;
        };
        match rail.locate(query.mileage_m, query.lateral_m) {
            Ok((point, _)) => placed.push(PlacedPolyline {
                layer: config.connector_layer.clone(),
                remark: query.remark.clone(),
                vertices: vec![[point.x, point.y, 0.0], config.connector_target],
            }),
            Err(e) => warn!("connector query skipped: {e}"),
        }
    }
    Ok(placed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use railmile_records::SourcePolyline;

    fn setup() -> (DrawingConfig, RailNetwork) {
        let mut config = DrawingConfig::default();
        config.rail_layers.clear();
        config.rail_layers.insert("dl1".to_string(), 56700.0);
        config.rail_layers.insert("dl2".to_string(), 74900.0);
        let drawing = vec![SourcePolyline {
            layer: "dl1".to_string(),
            label: None,
            closed: false,
            vertices: vec![[0.0, 0.0, 0.0], [100.0, 0.0, 0.0]],
        }];
        let network = RailNetwork::from_polylines(&config, &drawing).expect("network");
        (config, network)
    }

    #[test]
    fn test_centered_tick() {
        let (mut config, network) = setup();
        config.annotation_len = 2.0;
        config.annotation_centered = true;
        let queries = vec![MileageQuery::on_centerline("dl1", 56730.0)];
        let placed = place_annotations(&network, &queries, &config).expect("placed");
        assert_eq!(placed.len(), 1);
        assert_eq!(placed[0].layer, "mileage_marks");
        // eastbound railway: the tick spans one metre to each side
        let v = &placed[0].vertices;
        assert!((v[0][0] - 30.0).abs() < 1e-9);
        assert!((v[0][1] - 1.0).abs() < 1e-9);
        assert!((v[1][0] - 30.0).abs() < 1e-9);
        assert!((v[1][1] + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_uncentered_tick_with_lateral() {
        let (mut config, network) = setup();
        config.annotation_len = 3.0;
        config.annotation_centered = false;
        let queries = vec![MileageQuery {
            layer: "dl1".to_string(),
            mileage_m: 56750.0,
            lateral_m: 2.0,
            remark: Some("DK56+750".to_string()),
        }];
        let placed = place_annotations(&network, &queries, &config).expect("placed");
        let v = &placed[0].vertices;
        // positive lateral is the right side, south of an eastbound line
        assert!((v[0][1] + 2.0).abs() < 1e-9);
        assert!((v[1][1] + 5.0).abs() < 1e-9);
        assert_eq!(placed[0].remark.as_deref(), Some("DK56+750"));
    }

    #[test]
    fn test_out_of_range_query_skipped() {
        let (config, network) = setup();
        let queries = vec![
            MileageQuery::on_centerline("dl1", 56850.0),
            MileageQuery::on_centerline("dl1", 56720.0),
        ];
        let placed = place_annotations(&network, &queries, &config).expect("placed");
        assert_eq!(placed.len(), 1);
        assert!((placed[0].vertices[0][0] - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_layer_is_fatal() {
        let (config, network) = setup();
        let queries = vec![MileageQuery::on_centerline("dl7", 100.0)];
        match place_annotations(&network, &queries, &config) {
            Err(EngineError::MissingLayerOffset { layer }) => assert_eq!(layer, "dl7"),
            other => panic!("expected MissingLayerOffset, got {other:?}"),
        }
    }

    #[test]
    fn test_configured_but_undrawn_layer_skipped() {
        let (config, network) = setup();
        // dl2 is configured but the drawing has no polyline for it
        let queries = vec![
            MileageQuery::on_centerline("dl2", 74950.0),
            MileageQuery::on_centerline("dl1", 56750.0),
        ];
        let placed = place_annotations(&network, &queries, &config).expect("placed");
        assert_eq!(placed.len(), 1);
    }

    #[test]
    fn test_connectors_share_target() {
        let (mut config, network) = setup();
        config.connector_target = [500.0, 400.0, 12.0];
        let queries = vec![
            MileageQuery::on_centerline("dl1", 56710.0),
            MileageQuery::on_centerline("dl1", 56790.0),
        ];
        let placed = place_connectors(&network, &queries, &config).expect("placed");
        assert_eq!(placed.len(), 2);
        for p in &placed {
            assert_eq!(p.layer, "connectors");
            assert_eq!(p.vertices[1], [500.0, 400.0, 12.0]);
        }
        assert!((placed[0].vertices[0][0] - 10.0).abs() < 1e-9);
        assert!((placed[1].vertices[0][0] - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_connector_with_lateral_offset() {
        let (config, network) = setup();
        let queries = vec![MileageQuery {
            layer: "dl1".to_string(),
            mileage_m: 56740.0,
            lateral_m: -3.0,
            remark: None,
        }];
        let placed = place_connectors(&network, &queries, &config).expect("placed");
        let v = &placed[0].vertices;
        assert!((v[0][0] - 40.0).abs() < 1e-9);
        // negative lateral is the left side, north of an eastbound line
        assert!((v[0][1] - 3.0).abs() < 1e-9);
    }
}
