//! Typed design parameters.
//!
//! Every option is a named field with its unit in the doc comment. Each leaf
//! accepts a bare value (`"ease": 2`) or a record carrying the value under
//! `v` (`"ease": {"v": 2, "range": [0, 10]}`); extra keys inside such a
//! record are ignored, unknown option names are rejected.

use serde::{Deserialize, Deserializer, Serialize};

use crate::collar::CollarShape;
use crate::error::{GarmentError, GarmentResult};
use crate::skirt::SkirtShape;

// ============================================================================
// Leaf parsing
// ============================================================================

#[derive(Deserialize)]
#[serde(untagged)]
enum Leaf<T> {
    Bare(T),
    Record { v: T },
}

fn leaf<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(match Leaf::deserialize(deserializer)? {
        Leaf::Bare(v) | Leaf::Record { v } => v,
    })
}

fn variant_leaf<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<String, Error = GarmentError>,
{
    let name: String = leaf(deserializer)?;
    T::try_from(name).map_err(serde::de::Error::custom)
}

// ============================================================================
// Sections
// ============================================================================

/// Bodice options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BodiceDesign {
    /// Ease added to bust and waist (cm).
    #[serde(deserialize_with = "leaf")]
    pub ease: f64,
    /// Whether armholes are cut at the shoulder corners.
    ///
    /// Front and back shoulders only match once the armholes take out the
    /// width difference, so turning this off is rejected by
    /// [`Design::validate`]. Use `sleeveless` for a cut without a sleeve.
    #[serde(deserialize_with = "leaf")]
    pub sleeve_shape: bool,
    /// Keep the armhole cut but attach no sleeve.
    #[serde(deserialize_with = "leaf")]
    pub sleeveless: bool,
    /// Front neckline shape.
    #[serde(deserialize_with = "variant_leaf")]
    pub f_collar: CollarShape,
    /// Back neckline shape.
    #[serde(deserialize_with = "variant_leaf")]
    pub b_collar: CollarShape,
    /// Front neckline depth (cm).
    #[serde(deserialize_with = "leaf")]
    pub fc_depth: f64,
    /// Back neckline depth (cm).
    #[serde(deserialize_with = "leaf")]
    pub bc_depth: f64,
}

impl Default for BodiceDesign {
    fn default() -> Self {
        Self {
            ease: 2.0,
            sleeve_shape: true,
            sleeveless: false,
            f_collar: CollarShape::VNeckHalf,
            b_collar: CollarShape::VNeckHalf,
            fc_depth: 12.0,
            bc_depth: 4.0,
        }
    }
}

/// Sleeve options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SleeveDesign {
    /// Horizontal armhole step at the shoulder line of the back panel (cm).
    #[serde(deserialize_with = "leaf", alias = "inclanation")]
    pub inclination: f64,
    /// Sleeve length along the arm (cm).
    #[serde(deserialize_with = "leaf")]
    pub length: f64,
}

impl Default for SleeveDesign {
    fn default() -> Self {
        Self {
            inclination: 3.0,
            length: 20.0,
        }
    }
}

/// Options of the straight two-panel skirt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SkirtDesign {
    /// Hem widening on each side of a panel (cm).
    #[serde(deserialize_with = "leaf")]
    pub flare: f64,
}

impl Default for SkirtDesign {
    fn default() -> Self {
        Self { flare: 5.0 }
    }
}

/// Options of the circle skirts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FlareSkirtDesign {
    /// Fraction of a full circle covered by the skirt.
    #[serde(deserialize_with = "leaf")]
    pub suns: f64,
    /// Side-to-side hem tilt of the asymmetric skirt (degrees).
    #[serde(deserialize_with = "leaf")]
    pub low_angle: f64,
}

impl Default for FlareSkirtDesign {
    fn default() -> Self {
        Self {
            suns: 0.5,
            low_angle: 10.0,
        }
    }
}

/// Options of the tiered skirt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LevelsSkirtDesign {
    /// Shape of the top tier.
    #[serde(deserialize_with = "variant_leaf")]
    pub base: SkirtShape,
    /// Shape of every following tier.
    #[serde(deserialize_with = "variant_leaf")]
    pub level: SkirtShape,
    /// Number of tiers below the base.
    #[serde(deserialize_with = "leaf")]
    pub num_levels: usize,
    /// Gathering factor between consecutive tiers.
    #[serde(deserialize_with = "leaf")]
    pub level_ruffle: f64,
    /// Total length as a fraction of the leg length.
    #[serde(deserialize_with = "leaf")]
    pub length: f64,
    /// Share of the total length given to the base tier.
    #[serde(deserialize_with = "leaf")]
    pub base_length_frac: f64,
}

impl Default for LevelsSkirtDesign {
    fn default() -> Self {
        Self {
            base: SkirtShape::Skirt2,
            level: SkirtShape::Skirt2,
            num_levels: 2,
            level_ruffle: 1.5,
            length: 0.5,
            base_length_frac: 0.5,
        }
    }
}

// ============================================================================
// Design
// ============================================================================

/// Complete design parameter tree.
///
/// # Example
///
/// ```
/// use pattern_garment::{CollarShape, Design};
///
/// let design = Design::from_json(r#"{
///     "bodice": { "f_collar": { "v": "SquareNeckHalf" }, "fc_depth": 10 },
///     "levels-skirt": { "num_levels": { "v": 3, "range": [1, 5] } }
/// }"#).unwrap();
///
/// assert_eq!(design.bodice.f_collar, CollarShape::SquareNeckHalf);
/// assert_eq!(design.levels_skirt.num_levels, 3);
/// assert_eq!(design.bodice.ease, 2.0);
///
/// assert!(Design::from_json(r#"{ "bodice": { "eas": 2 } }"#).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Design {
    /// Bodice options.
    pub bodice: BodiceDesign,
    /// Sleeve options.
    pub sleeve: SleeveDesign,
    /// Straight skirt options.
    pub skirt: SkirtDesign,
    /// Circle skirt options.
    #[serde(rename = "flare-skirt")]
    pub flare_skirt: FlareSkirtDesign,
    /// Tiered skirt options.
    #[serde(rename = "levels-skirt")]
    pub levels_skirt: LevelsSkirtDesign,
}

impl Design {
    /// Parse a design from JSON and validate it.
    pub fn from_json(json: &str) -> GarmentResult<Self> {
        let design: Self = serde_json::from_str(json)?;
        design.validate()?;
        Ok(design)
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// [`GarmentError::InvalidDesign`] naming the first offending option.
    pub fn validate(&self) -> GarmentResult<()> {
        let bodice = &self.bodice;
        check(bodice.ease.is_finite(), "bodice.ease", "must be finite")?;
        bodice.require_armholes()?;
        check(positive(bodice.fc_depth), "bodice.fc_depth", "must be positive")?;
        check(positive(bodice.bc_depth), "bodice.bc_depth", "must be positive")?;

        check(positive(self.sleeve.inclination), "sleeve.inclination", "must be positive")?;
        check(positive(self.sleeve.length), "sleeve.length", "must be positive")?;

        let flare = self.skirt.flare;
        check(flare.is_finite() && flare >= 0.0, "skirt.flare", "must be non-negative")?;

        let circle = &self.flare_skirt;
        check(
            circle.suns > 0.0 && circle.suns <= 1.0,
            "flare-skirt.suns",
            "must lie in (0, 1]",
        )?;
        check(
            circle.low_angle.abs() < 90.0,
            "flare-skirt.low_angle",
            "must lie strictly between -90 and 90 degrees",
        )?;

        let levels = &self.levels_skirt;
        check(
            levels.level_ruffle.is_finite() && levels.level_ruffle >= 1.0,
            "levels-skirt.level_ruffle",
            "must be at least 1",
        )?;
        check(positive(levels.length), "levels-skirt.length", "must be positive")?;
        let frac = levels.base_length_frac;
        let frac_ok = if levels.num_levels == 0 {
            frac > 0.0 && frac <= 1.0
        } else {
            frac > 0.0 && frac < 1.0
        };
        check(
            frac_ok,
            "levels-skirt.base_length_frac",
            "must leave a positive length for the base and every level",
        )?;
        Ok(())
    }
}

impl BodiceDesign {
    pub(crate) fn require_armholes(&self) -> GarmentResult<()> {
        check(
            self.sleeve_shape,
            "bodice.sleeve_shape",
            "shoulders only match once armholes are cut; set sleeveless to drop the sleeve",
        )
    }
}

fn positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn check(ok: bool, field: &'static str, reason: &str) -> GarmentResult<()> {
    if ok {
        Ok(())
    } else {
        Err(GarmentError::invalid_design(field, reason))
    }
}
