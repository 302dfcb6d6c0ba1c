//! Panels, seams and hierarchical components for sewing patterns.
//!
//! This crate turns boundary loops from [`pattern_types`] into a stitchable
//! pattern tree:
//!
//! - [`Panel`] - one boundary loop with named interfaces, a 3D placement and
//!   the seams that close its darts
//! - [`Interface`] - an ordered reference to boundary edges, resolved through
//!   [`EdgeLookup`]
//! - [`StitchingRule`] - a seam between two interfaces of matching length
//! - [`Component`] - panels and sub-components with the seams between them
//!   and the interfaces exported to a parent
//! - [`Pattern`] - the flattened artifact: panel vertices, placements and
//!   seams by edge index
//!
//! # Interfaces and edits
//!
//! Interfaces reference edges by stable id. Corner cuts keep the ids of the
//! shortened edges, so interfaces over them stay valid. Cutting a shape into
//! an edge retires that edge's id: an interface still naming it resolves to
//! [`PatternError::StaleInterface`] and has to be rebuilt from the ids the cut
//! returns.
//!
//! Seams are checked when they are recorded. A mismatch is reported as
//! [`PatternError::MismatchedStitch`] and the seam is not added.
//!
//! # Example
//!
//! ```
//! use pattern_assembly::{Component, Panel};
//! use pattern_types::Side;
//! use nalgebra::Vector3;
//!
//! let mut front = Panel::from_verts("front", [[0.0, 0.0], [-20.0, 0.0], [-20.0, 40.0], [0.0, 40.0]])?;
//! let bottom = front.edge_id(0)?;
//! let dart = front.insert_dart(bottom, 3.0, 12.0, 9.0, Side::Right)?;
//! front.set_interface("bottom", front.interface_of(dart.outer));
//! front.translate_by(Vector3::new(0.0, 100.0, 20.0));
//!
//! let mut bodice = Component::new("bodice");
//! bodice.add_panel(front)?;
//! let pattern = bodice.assemble()?;
//!
//! assert_eq!(pattern.panels.len(), 1);
//! assert_eq!(pattern.stitches.len(), 1); // the dart
//! # Ok::<(), pattern_assembly::PatternError>(())
//! ```

#![warn(missing_docs)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod component;
mod error;
mod export;
mod interface;
mod panel;
mod stitch;
mod validation;

pub use component::{Component, Node};
pub use error::{PatternError, PatternResult};
pub use export::{Pattern, PatternPanel, Stitch, StitchEdge};
pub use interface::{EdgeLookup, EdgeRef, Interface};
pub use panel::{DartCut, EdgeCutIds, Panel};
pub use stitch::{DEFAULT_TOLERANCE, StitchingRule};
pub use validation::PatternValidation;

// Re-export commonly used types for convenience
pub use nalgebra::{Isometry3, UnitQuaternion, Vector3};
