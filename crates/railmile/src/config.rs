//! Engine configuration.

use std::collections::BTreeMap;

use railmile_geom::Tolerance;
use serde::{Deserialize, Serialize};

use crate::{EngineError, Result};

/// Drawing conventions the engine works against.
///
/// This is the one value object passed into every entry point; nothing
/// in the engine reads process globals. Field defaults mirror the survey
/// drawings this tooling grew up with, so tests and small runs work out
/// of the box, but real callers are expected to load their own, usually
/// with [`DrawingConfig::from_toml_str`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawingConfig {
    /// Railway layer name to mileage offset in metres. Iterated in key
    /// order, which keeps every cross-railway decision deterministic.
    pub rail_layers: BTreeMap<String, f64>,
    /// Only polylines on layers starting with this prefix count as
    /// crossing features; `None` accepts every non-railway polyline.
    pub feature_layer_prefix: Option<String>,
    /// Only text on this layer participates in extraction; `None`
    /// accepts every text entity.
    pub text_layer: Option<String>,
    /// Insert vertices so no railway segment exceeds this length in
    /// metres; `None` keeps segments as drawn.
    pub max_segment_len: Option<f64>,
    /// Linear geometric tolerance in metres.
    pub tolerance: f64,
    /// Layer that receives mileage tick marks.
    pub annotation_layer: String,
    /// Length of a tick mark in metres.
    pub annotation_len: f64,
    /// Center ticks on the located point instead of starting there.
    pub annotation_centered: bool,
    /// Layer that receives connector polylines.
    pub connector_layer: String,
    /// Far endpoint shared by every connector polyline.
    pub connector_target: [f64; 3],
}

impl Default for DrawingConfig {
    fn default() -> Self {
        let rail_layers = [
            ("dl1", 56700.0),
            ("dl2", 74900.0),
            ("dl3", 100000.0),
            ("dl4", 125000.0),
            ("dl5", 156000.0),
            ("dl6", 163300.0),
        ]
        .into_iter()
        .map(|(layer, offset)| (layer.to_string(), offset))
        .collect();
        Self {
            rail_layers,
            feature_layer_prefix: None,
            text_layer: Some("标注".to_string()),
            max_segment_len: Some(5.0),
            tolerance: 1e-6,
            annotation_layer: "mileage_marks".to_string(),
            annotation_len: 2.0,
            annotation_centered: true,
            connector_layer: "connectors".to_string(),
            connector_target: [0.0, 0.0, 0.0],
        }
    }
}

impl DrawingConfig {
    /// Parse and validate a TOML configuration.
    ///
    /// Missing fields fall back to their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration for setup mistakes.
    ///
    /// Called by [`crate::RailNetwork::from_polylines`]; an invalid
    /// configuration aborts the run before any geometry is touched.
    pub fn validate(&self) -> Result<()> {
        if self.rail_layers.is_empty() {
            return Err(EngineError::InvalidConfig(
                "rail_layers must not be empty".into(),
            ));
        }
        for (layer, &offset) in &self.rail_layers {
            if !offset.is_finite() || offset < 0.0 {
                return Err(EngineError::InvalidConfig(format!(
                    "mileage offset for layer '{layer}' must be a non-negative number"
                )));
            }
        }
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(EngineError::InvalidConfig(
                "tolerance must be positive".into(),
            ));
        }
        if let Some(len) = self.max_segment_len {
            if !len.is_finite() || len <= 0.0 {
                return Err(EngineError::InvalidConfig(
                    "max_segment_len must be positive".into(),
                ));
            }
        }
        if !self.annotation_len.is_finite() || self.annotation_len <= 0.0 {
            return Err(EngineError::InvalidConfig(
                "annotation_len must be positive".into(),
            ));
        }
        if self.connector_target.iter().any(|c| !c.is_finite()) {
            return Err(EngineError::InvalidConfig(
                "connector_target must be finite".into(),
            ));
        }
        Ok(())
    }

    /// Geometric tolerances derived from this configuration.
    pub fn tolerances(&self) -> Tolerance {
        Tolerance {
            linear: self.tolerance,
            ..Tolerance::DEFAULT
        }
    }
}
