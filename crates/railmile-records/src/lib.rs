//! Boundary records for the railmile mileage engine.
//!
//! The engine neither reads drawings nor writes tables. Collaborators
//! that do (drawing readers and writers, spreadsheet exporters) exchange
//! the plain serde types in this crate with it: polylines and text
//! entities going in, table rows and placed geometry coming out. All
//! coordinates are drawing metres; angles are preformatted degree-minute
//! strings.

use std::fmt;

use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Which side of the railway a point lies on.
///
/// Serializable mirror of [`railmile_geom::Side`] so table rows stay free
/// of kernel types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    /// Left of the direction of travel.
    Left,
    /// Right of the direction of travel.
    Right,
}

impl Side {
    /// Sign convention for lateral offsets: right is positive.
    pub fn lateral_sign(&self) -> f64 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }
}

impl From<railmile_geom::Side> for Side {
    fn from(side: railmile_geom::Side) -> Self {
        match side {
            railmile_geom::Side::Left => Side::Left,
            railmile_geom::Side::Right => Side::Right,
        }
    }
}

impl From<Side> for railmile_geom::Side {
    fn from(side: Side) -> Self {
        match side {
            Side::Left => railmile_geom::Side::Left,
            Side::Right => railmile_geom::Side::Right,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => write!(f, "Left"),
            Side::Right => write!(f, "Right"),
        }
    }
}

/// A polyline read from a drawing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourcePolyline {
    /// Drawing layer the polyline was found on.
    pub layer: String,
    /// Label attached to the polyline, if the drawing carries one.
    pub label: Option<String>,
    /// Whether the drawing marked the polyline as closed.
    pub closed: bool,
    /// Vertices as `[x, y, z]` drawing coordinates in metres.
    pub vertices: Vec<[f64; 3]>,
}

/// A text entity read from a drawing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceText {
    /// Drawing layer the text was found on.
    pub layer: String,
    /// The text content.
    pub text: String,
    /// Insertion point as `[x, y, z]` drawing coordinates in metres.
    pub anchor: [f64; 3],
}

/// One row of the crossing table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossingRow {
    /// Mileage of the crossing in metres, offset included.
    pub mileage_m: f64,
    /// Crossing angle rendered in degrees and minutes, e.g. `63°27′`.
    pub angle: String,
    /// What crosses: the feature's label, or its layer name.
    pub remark: String,
}

/// One row of the text distance table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceRow {
    /// Mileage of the foot point in metres, offset included.
    pub mileage_m: f64,
    /// Unsigned distance from the text anchor to the railway, metres.
    pub distance_m: f64,
    /// Side of the railway the text sits on.
    pub side: Side,
    /// The text content.
    pub text: String,
}

/// One row of the enclosed text table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnclosedTextRow {
    /// Mileage of the text anchor, or `None` when no railway is abeam
    /// of it. Rows without a mileage sort after all others.
    pub mileage_m: Option<f64>,
    /// The enclosed text content.
    pub text: String,
    /// Outline vertices, semicolon separated `x y` pairs at millimetre
    /// precision.
    pub outline: String,
}

impl EnclosedTextRow {
    /// Render outline vertices in the table format, e.g.
    /// `0.000 0.000;10.000 0.000`.
    pub fn outline_string(vertices: &[[f64; 3]]) -> String {
        vertices
            .iter()
            .map(|v| format!("{:.3} {:.3}", v[0], v[1]))
            .collect::<Vec<_>>()
            .join(";")
    }
}

/// A request to place geometry at a mileage, read back from a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MileageQuery {
    /// Railway layer the mileage refers to.
    pub layer: String,
    /// Mileage in metres, offset included.
    pub mileage_m: f64,
    /// Sideways displacement from the centerline in metres; positive is
    /// the right side of the direction of travel.
    pub lateral_m: f64,
    /// Text carried along to the placed geometry, if any.
    pub remark: Option<String>,
}

impl MileageQuery {
    /// Query for a point on the centerline itself.
    pub fn on_centerline(layer: impl Into<String>, mileage_m: f64) -> Self {
        Self {
            layer: layer.into(),
            mileage_m,
            lateral_m: 0.0,
            remark: None,
        }
    }

    /// Query reconstructing the position a distance row was measured at.
    pub fn from_distance_row(layer: impl Into<String>, row: &DistanceRow) -> Self {
        Self {
            layer: layer.into(),
            mileage_m: row.mileage_m,
            lateral_m: row.side.lateral_sign() * row.distance_m,
            remark: Some(row.text.clone()),
        }
    }

    /// Query for a crossing row; crossings sit on the centerline.
    pub fn from_crossing_row(layer: impl Into<String>, row: &CrossingRow) -> Self {
        Self {
            layer: layer.into(),
            mileage_m: row.mileage_m,
            lateral_m: 0.0,
            remark: Some(row.remark.clone()),
        }
    }
}

/// A polyline to be written into a drawing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedPolyline {
    /// Drawing layer to place the polyline on.
    pub layer: String,
    /// Text to annotate the polyline with, if any.
    pub remark: Option<String>,
    /// Vertices as `[x, y, z]` drawing coordinates in metres.
    pub vertices: Vec<[f64; 3]>,
}

/// Serialize a slice of records to pretty JSON.
pub fn rows_to_json<T: Serialize>(rows: &[T]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(rows)
}

/// Deserialize records from JSON.
pub fn rows_from_json<T: DeserializeOwned>(json: &str) -> Result<Vec<T>, serde_json::Error> {
    serde_json::from_str(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_rows() {
        let rows = vec![
            DistanceRow {
                mileage_m: 56750.123,
                distance_m: 7.5,
                side: Side::Left,
                text: "DK56+750".to_string(),
            },
            DistanceRow {
                mileage_m: 56761.0,
                distance_m: 0.25,
                side: Side::Right,
                text: "电缆".to_string(),
            },
        ];
        let json = rows_to_json(&rows).expect("serialize");
        let restored: Vec<DistanceRow> = rows_from_json(&json).expect("deserialize");
        assert_eq!(rows, restored);
    }

    #[test]
    fn roundtrip_source_polyline() {
        let line = SourcePolyline {
            layer: "dl1".to_string(),
            label: None,
            closed: false,
            vertices: vec![[0.0, 0.0, 0.0], [100.0, 0.0, 0.0]],
        };
        let json = rows_to_json(std::slice::from_ref(&line)).expect("serialize");
        let restored: Vec<SourcePolyline> = rows_from_json(&json).expect("deserialize");
        assert_eq!(restored.len(), 1);
        assert_eq!(restored[0], line);
    }

    #[test]
    fn enclosed_row_none_mileage() {
        let row = EnclosedTextRow {
            mileage_m: None,
            text: "站台".to_string(),
            outline: EnclosedTextRow::outline_string(&[
                [0.0, 0.0, 0.0],
                [10.0, 0.0, 0.0],
                [10.0, 5.0, 0.0],
            ]),
        };
        assert_eq!(row.outline, "0.000 0.000;10.000 0.000;10.000 5.000");
        let json = rows_to_json(std::slice::from_ref(&row)).expect("serialize");
        let restored: Vec<EnclosedTextRow> = rows_from_json(&json).expect("deserialize");
        assert_eq!(restored[0].mileage_m, None);
    }

    #[test]
    fn side_conversion_and_sign() {
        assert_eq!(Side::from(railmile_geom::Side::Left), Side::Left);
        assert_eq!(railmile_geom::Side::from(Side::Right), railmile_geom::Side::Right);
        assert_eq!(Side::Left.lateral_sign(), -1.0);
        assert_eq!(Side::Right.lateral_sign(), 1.0);
        assert_eq!(Side::Left.to_string(), "Left");
    }

    #[test]
    fn query_from_rows() {
        let row = DistanceRow {
            mileage_m: 74910.0,
            distance_m: 4.2,
            side: Side::Left,
            text: "标注".to_string(),
        };
        let q = MileageQuery::from_distance_row("dl2", &row);
        assert_eq!(q.layer, "dl2");
        assert_eq!(q.mileage_m, 74910.0);
        assert_eq!(q.lateral_m, -4.2);
        assert_eq!(q.remark.as_deref(), Some("标注"));

        let c = CrossingRow {
            mileage_m: 100250.5,
            angle: "90°0′".to_string(),
            remark: "电力线".to_string(),
        };
        let q = MileageQuery::from_crossing_row("dl3", &c);
        assert_eq!(q.lateral_m, 0.0);
        assert_eq!(q.remark.as_deref(), Some("电力线"));

        let q = MileageQuery::on_centerline("dl1", 56700.0);
        assert_eq!(q.lateral_m, 0.0);
        assert!(q.remark.is_none());
    }
}
