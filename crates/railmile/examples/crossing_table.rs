//! Survey extraction on a small two-track drawing.

use railmile::records::{rows_to_json, MileageQuery, SourcePolyline, SourceText};
use railmile::{
    extract_crossings, extract_text_distances, place_annotations, DrawingConfig, RailNetwork,
};

fn main() {
    let mut config = DrawingConfig::default();
    config.rail_layers.clear();
    config.rail_layers.insert("dl1".to_string(), 56700.0);
    config.rail_layers.insert("dl2".to_string(), 74900.0);
    config.feature_layer_prefix = Some("pipe".to_string());

    // Two parallel tracks and a culvert crossing both
    let drawing = vec![
        SourcePolyline {
            layer: "dl1".to_string(),
            label: None,
            closed: false,
            vertices: vec![[0.0, 0.0, 0.0], [200.0, 0.0, 0.0]],
        },
        SourcePolyline {
            layer: "dl2".to_string(),
            label: None,
            closed: false,
            vertices: vec![[0.0, -5.0, 0.0], [200.0, -5.0, 0.0]],
        },
        SourcePolyline {
            layer: "pipe_culvert".to_string(),
            label: Some("DN800".to_string()),
            closed: false,
            vertices: vec![[80.0, 10.0, 0.0], [85.0, -15.0, 0.0]],
        },
    ];
    let texts = vec![SourceText {
        layer: "标注".to_string(),
        text: "signal mast 7".to_string(),
        anchor: [120.0, 4.0, 0.0],
    }];

    let network = RailNetwork::from_polylines(&config, &drawing).unwrap();

    // Where does the culvert cross, and at what skew?
    let crossings = extract_crossings(&network, &drawing, &config).unwrap();
    for row in &crossings {
        println!("{:>10.3}  {:>8}  {}", row.mileage_m, row.angle, row.remark);
    }
    println!("{}", rows_to_json(&crossings).unwrap());

    // How far is each annotation from the nearest track?
    let distances = extract_text_distances(&network, &texts, &config).unwrap();
    for row in &distances {
        println!(
            "{:>10.3}  {:>7.3} m  {}  {}",
            row.mileage_m, row.distance_m, row.side, row.text
        );
    }

    // Mark round mileages back onto the drawing
    let queries = vec![
        MileageQuery::on_centerline("dl1", 56750.0),
        MileageQuery::on_centerline("dl2", 74950.0),
    ];
    let ticks = place_annotations(&network, &queries, &config).unwrap();
    println!("placed {} tick marks", ticks.len());
}
