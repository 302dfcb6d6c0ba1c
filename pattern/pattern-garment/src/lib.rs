//! Parametric garment programs.
//!
//! This crate turns a [`Body`] and a [`Design`] into a stitchable
//! [`Pattern`]:
//!
//! - **Bodice halves** ([`BodiceFront`], [`BodiceBack`]) drafted with side and
//!   waist darts
//! - **Sleeves and necklines** grafted onto the shoulder and collar corners
//!   ([`attach_sleeve`], [`attach_collar`])
//! - **Fitted shirt** assembled from a half and its mirror image
//!   ([`fitted_shirt`])
//! - **Tiered skirts** where every tier gathers onto the hem of the one above
//!   ([`skirt_levels`])
//!
//! # Quick Start
//!
//! ```
//! use pattern_garment::{Body, Design, Garment};
//!
//! let body = Body::from_json(r#"{
//!     "bust": 92, "waist": 70, "back_width": 36,
//!     "bust_line": 24, "waist_line": 40, "waist_over_bust_line": 44,
//!     "shoulder_incl": 18, "neck_w": 18, "height": 170, "head_l": 22,
//!     "hips_line": 22, "bust_points": 18
//! }"#)?;
//! let design = Design::default();
//!
//! let shirt = Garment::FittedShirt.build(&body, &design)?;
//! assert_eq!(shirt.panels.len(), 8);
//!
//! let skirt = Garment::SkirtLevels.build(&body, &design)?;
//! assert_eq!(skirt.panels.len(), 6);
//! # Ok::<(), pattern_garment::GarmentError>(())
//! ```
//!
//! # Errors
//!
//! Builds fail as a whole: a dart or cut that does not fit, an unknown
//! variant name or a seam whose sides differ in length yields a
//! [`GarmentError`] and no pattern.

#![warn(missing_docs)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod attach;
mod bodice;
mod body;
mod collar;
mod design;
mod error;
mod levels;
mod shirt;
mod skirt;
mod sleeve;

use std::fmt;
use std::str::FromStr;

use tracing::info;

pub use attach::{SleeveAttachment, attach_collar, attach_corner, attach_sleeve};
pub use bodice::{
    BACK_DART_DEPTH_FRAC, BOTTOM_DART_WIDTH_FRAC, BackDraft, BodiceBack, BodiceFront, DartSpec, FrontDraft,
    SIDE_DART_DEPTH_FRAC,
};
pub use body::Body;
pub use collar::{CollarShape, NECK_CURVE_SEGMENTS};
pub use design::{BodiceDesign, Design, FlareSkirtDesign, LevelsSkirtDesign, SkirtDesign, SleeveDesign};
pub use error::{GarmentError, GarmentResult};
pub use levels::{TIER_GAP, TierLengths, skirt_levels, tier_names};
pub use shirt::{fitted_shirt, fitted_shirt_half};
pub use skirt::{ARC_SEGMENTS, SkirtPiece, SkirtShape};
pub use sleeve::{ARMHOLE_DEPTH_FRAC, SleeveOpening};

// Re-export commonly used types for convenience
pub use pattern_assembly::{Component, Pattern};

/// Top-level garment programs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Garment {
    /// Fitted shirt with sleeves and necklines.
    FittedShirt,
    /// Base skirt with gathered tiers.
    SkirtLevels,
}

impl Garment {
    /// Every registered garment.
    pub const ALL: [Self; 2] = [Self::FittedShirt, Self::SkirtLevels];

    /// Registry name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::FittedShirt => "FittedShirt",
            Self::SkirtLevels => "SkirtLevels",
        }
    }

    /// Build the component tree without flattening it.
    ///
    /// Inputs are validated first.
    pub fn component(self, body: &Body, design: &Design) -> GarmentResult<Component> {
        body.validate()?;
        design.validate()?;
        match self {
            Self::FittedShirt => fitted_shirt(body, design),
            Self::SkirtLevels => skirt_levels(body, design),
        }
    }

    /// Build and flatten the garment into a pattern.
    pub fn build(self, body: &Body, design: &Design) -> GarmentResult<Pattern> {
        let pattern = self.component(body, design)?.assemble()?;
        info!(
            garment = self.name(),
            panels = pattern.panels.len(),
            stitches = pattern.stitches.len(),
            "Built garment pattern"
        );
        Ok(pattern)
    }

    /// Build the garment and write the pattern as pretty-printed JSON.
    pub fn build_json(self, body: &Body, design: &Design) -> GarmentResult<String> {
        let pattern = self.build(body, design)?;
        Ok(serde_json::to_string_pretty(&pattern)?)
    }
}

impl fmt::Display for Garment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Garment {
    type Err = GarmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|g| g.name() == s)
            .ok_or_else(|| {
                GarmentError::unknown_variant("garment", s, &Self::ALL.map(Self::name))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_garment() {
        assert_eq!("SkirtLevels".parse::<Garment>().unwrap(), Garment::SkirtLevels);
        assert!(matches!(
            "Trousers".parse::<Garment>(),
            Err(GarmentError::UnknownVariant { kind: "garment", .. })
        ));
    }

    #[test]
    fn test_invalid_design_is_rejected_before_building() {
        let mut design = Design::default();
        design.levels_skirt.level_ruffle = 0.0;
        let err = Garment::SkirtLevels
            .build(&body::tests::sample_body(), &design)
            .unwrap_err();
        assert!(matches!(err, GarmentError::InvalidDesign { .. }));
    }

    #[test]
    fn test_json_export() {
        let json = Garment::SkirtLevels
            .build_json(&body::tests::sample_body(), &Design::default())
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["name"], "SkirtLevels");
        assert_eq!(value["panels"].as_array().unwrap().len(), 6);
    }
}
