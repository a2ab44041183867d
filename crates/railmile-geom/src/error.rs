//! Error types for the geometry kernel.

use thiserror::Error;

/// Errors that can occur in alignment geometry.
#[derive(Error, Debug)]
pub enum AlignmentError {
    /// Polyline has too few distinct vertices to define a direction.
    #[error("degenerate polyline '{name}': {distinct} distinct vertices, need at least 2")]
    Degenerate {
        /// Name of the offending polyline.
        name: String,
        /// Number of distinct vertices after dedup.
        distinct: usize,
    },

    /// Requested mileage lies outside the alignment.
    #[error("mileage {mileage} outside alignment range [{start}, {end}]")]
    OutOfRange {
        /// The requested mileage in metres.
        mileage: f64,
        /// First mileage covered by the alignment.
        start: f64,
        /// Last mileage covered by the alignment.
        end: f64,
    },
}

/// Result type for geometry operations.
pub type Result<T> = std::result::Result<T, AlignmentError>;
