#![warn(missing_docs)]

//! Mileage geometry engine for railway drawing annotation.
//!
//! Railway plan drawings carry centerline polylines on per-line layers,
//! each with a known mileage offset. This crate turns such drawings into
//! tables and back: forward projection extracts the mileage, distance,
//! side and crossing angle of features near the rails, and inverse
//! projection places tick marks and connector lines at given mileages.
//!
//! Reading drawing files and writing tables stay outside the engine;
//! collaborators exchange the serde records from [`records`] with it.
//!
//! # Example
//!
//! ```
//! use railmile::records::SourcePolyline;
//! use railmile::{extract_crossings, DrawingConfig, RailNetwork};
//!
//! let mut config = DrawingConfig::default();
//! config.rail_layers.clear();
//! config.rail_layers.insert("dl1".to_string(), 56700.0);
//!
//! let drawing = vec![
//!     SourcePolyline {
//!         layer: "dl1".to_string(),
//!         label: None,
//!         closed: false,
//!         vertices: vec![[0.0, 0.0, 0.0], [100.0, 0.0, 0.0]],
//!     },
//!     SourcePolyline {
//!         layer: "power".to_string(),
//!         label: Some("overhead line".to_string()),
//!         closed: false,
//!         vertices: vec![[50.0, -10.0, 0.0], [50.0, 10.0, 0.0]],
//!     },
//! ];
//!
//! let network = RailNetwork::from_polylines(&config, &drawing)?;
//! let rows = extract_crossings(&network, &drawing, &config)?;
//! assert_eq!(rows[0].mileage_m, 56750.0);
//! assert_eq!(rows[0].angle, "90°0′");
//! # Ok::<(), railmile::EngineError>(())
//! ```

use thiserror::Error;

pub mod config;
pub mod extract;
pub mod network;
pub mod place;

pub use config::DrawingConfig;
pub use extract::{extract_crossings, extract_enclosed_text, extract_text_distances};
pub use network::RailNetwork;
pub use place::{place_annotations, place_connectors};

pub use railmile_geom::{
    Alignment, AlignmentError, Crossing, DegMin, Point2, Projection, Segment, Side, Tolerance,
    Vec2,
};
pub use railmile_records as records;

/// Errors that abort an engine run.
///
/// Everything here is a setup mistake: bad configuration or malformed
/// input geometry. Per-record conditions (a mileage outside its railway,
/// a degenerate polyline among many) are logged and skipped instead,
/// so one bad row never stops a batch.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A query names a railway layer with no configured mileage offset.
    #[error("no mileage offset configured for layer '{layer}'")]
    MissingLayerOffset {
        /// The unconfigured layer name.
        layer: String,
    },

    /// An input coordinate is NaN or infinite.
    #[error("malformed coordinate on layer '{layer}' at vertex {index}")]
    MalformedCoordinate {
        /// Layer of the offending entity.
        layer: String,
        /// Vertex index within the entity.
        index: usize,
    },

    /// None of the configured railway layers produced a usable alignment.
    #[error("no usable railway alignments in the drawing")]
    NoAlignments,

    /// Configuration file failed to parse.
    #[error("config parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
