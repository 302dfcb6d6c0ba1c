//! Boundary primitives for flat sewing-pattern panels.
//!
//! This crate provides the 2D building blocks every panel is made of:
//!
//! - [`Edge`] - a directed straight segment with a stable [`EdgeId`]
//! - [`EdgeSequence`] - an open chain of segments (dart wedges, collar and
//!   armhole cut shapes)
//! - [`EdgeLoop`] - the closed boundary of one panel
//! - [`dart_shape`], [`cut_into_edge`], [`project_corner`] - the cut
//!   operators used to shape panels
//! - [`Aabb`] - world-space bounds used when placing panels
//!
//! # Units
//!
//! Coordinates are centimetres in panel-local space. Angles handed to
//! downstream crates are in degrees.
//!
//! # Coordinate System
//!
//! - X: across the body; panels are authored on the negative-X side of the
//!   centre line and mirrored to get the other half
//! - Y: up
//!
//! Loops are traversed **clockwise**, so the panel interior lies to the
//! right of every edge. [`Side::Right`] therefore cuts into the panel.
//!
//! # Example
//!
//! ```
//! use pattern_types::{EdgeLoop, Side, cut_into_edge, dart_shape};
//!
//! let mut panel = EdgeLoop::from_verts([[0.0, 0.0], [-20.0, 0.0], [-20.0, 30.0], [0.0, 30.0]])?;
//! let bottom = panel.edge(0).expect("loop has edges");
//! let cut = cut_into_edge(&dart_shape(4.0, 10.0)?, &bottom, 8.0, Side::Right)?;
//! panel.substitute(0, &cut.replacement)?;
//!
//! assert_eq!(panel.len(), 7);
//! assert!(panel.closure_gap() < 1e-12);
//! # Ok::<(), pattern_types::GeometryError>(())
//! ```

#![warn(missing_docs)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod bounds;
mod edge;
mod edge_loop;
mod error;
mod ops;
mod sequence;

pub use bounds::Aabb;
pub use edge::{Edge, EdgeId, Side};
pub use edge_loop::{EdgeLoop, POINT_TOLERANCE};
pub use error::{GeometryError, GeometryResult};
pub use ops::{EdgeCut, cut_into_edge, dart_shape, project_corner};
pub use sequence::EdgeSequence;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Point3, Vector2};
