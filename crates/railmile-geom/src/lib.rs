#![warn(missing_docs)]

//! Alignment geometry kernel for the railmile mileage engine.
//!
//! This crate provides the deterministic plan-view geometry underneath
//! railway drawing annotation: arc-length parameterized alignments,
//! forward projection (point to mileage, distance and side), inverse
//! projection (mileage to coordinates), feature crossings with their
//! skew angles, and closed-outline containment.
//!
//! Everything here is pure and synchronous; reading drawings and writing
//! tables live with the callers.
//!
//! # Example
//!
//! ```
//! use railmile_geom::{crossings, skew_angle, Alignment, DegMin, Point2};
//!
//! let rail = Alignment::new(
//!     "dl1",
//!     vec![Point2::new(0.0, 0.0), Point2::new(100.0, 0.0)],
//!     56700.0,
//! )?;
//! let feature = [Point2::new(50.0, -10.0), Point2::new(50.0, 10.0)];
//!
//! for hit in crossings(&rail, &feature) {
//!     let pr = rail.project(&hit.point);
//!     let angle = DegMin::from_radians(skew_angle(&hit.rail_tangent, &hit.feature_tangent));
//!     println!("{:.3} m, {}", pr.mileage, angle);
//! }
//! # Ok::<(), railmile_geom::AlignmentError>(())
//! ```

pub mod alignment;
pub mod angle;
pub mod error;
pub mod intersect;
pub mod polygon;
pub mod project;

pub use alignment::{Alignment, Segment};
pub use angle::{skew_angle, DegMin};
pub use error::{AlignmentError, Result};
pub use intersect::{crossings, segment_intersection, Crossing};
pub use polygon::Polygon;
pub use project::{Projection, Side};

pub use railmile_math::{Point2, Tolerance, Vec2};
