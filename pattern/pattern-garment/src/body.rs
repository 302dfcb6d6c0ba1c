//! Body measurements.

use serde::{Deserialize, Serialize};

use crate::error::{GarmentError, GarmentResult};

/// Body measurements consumed by garment programs.
///
/// Lengths are in centimetres, angles in degrees. Vertical measurements
/// (`bust_line`, `waist_line`, `waist_over_bust_line`) are taken down from
/// the neck base.
///
/// Builders treat a `Body` as read-only. Programs that propagate derived
/// values to a sub-component clone it and override fields by value with
/// [`Body::with_waist`] and [`Body::with_waist_back_width`].
///
/// # Example
///
/// ```
/// use pattern_garment::Body;
///
/// let body = Body::from_json(r#"{
///     "bust": 92, "waist": 70, "back_width": 36,
///     "bust_line": 24, "waist_line": 40, "waist_over_bust_line": 44,
///     "shoulder_incl": 18, "neck_w": 18, "height": 170, "head_l": 22,
///     "hips_line": 22, "bust_points": 18
/// }"#).unwrap();
///
/// assert!((body.waist_back_width() - 70.0 * 36.0 / 92.0).abs() < 1e-12);
/// let wider = body.clone().with_waist(90.0);
/// assert_eq!(wider.waist, 90.0);
/// assert_eq!(body.waist, 70.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Full bust girth.
    pub bust: f64,
    /// Full waist girth.
    pub waist: f64,
    /// Back width at the bust level, side seam to side seam.
    pub back_width: f64,
    /// Vertical distance from the neck base to the bust line.
    pub bust_line: f64,
    /// Vertical distance from the neck base to the waist line at the back.
    pub waist_line: f64,
    /// Vertical distance over the bust to the waist line at the front.
    pub waist_over_bust_line: f64,
    /// Shoulder slope below horizontal.
    pub shoulder_incl: f64,
    /// Neck width.
    pub neck_w: f64,
    /// Total height.
    pub height: f64,
    /// Head length.
    pub head_l: f64,
    /// Vertical distance from the waist to the hip line.
    pub hips_line: f64,
    /// Horizontal distance between the bust points.
    pub bust_points: f64,
    /// Back share of the waist girth.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waist_back_width: Option<f64>,
    /// Leg length used to size skirts.
    #[serde(
        default,
        rename = "_leg_length",
        alias = "leg_length",
        skip_serializing_if = "Option::is_none"
    )]
    pub leg_length: Option<f64>,
}

impl Body {
    /// Parse measurements from JSON and validate them.
    pub fn from_json(json: &str) -> GarmentResult<Self> {
        let body: Self = serde_json::from_str(json)?;
        body.validate()?;
        Ok(body)
    }

    /// Back share of the waist, defaulting to the back share of the bust.
    #[must_use]
    pub fn waist_back_width(&self) -> f64 {
        self.waist_back_width
            .unwrap_or(self.waist * self.back_width / self.bust)
    }

    /// Leg length, defaulting to the distance from the hip line to the floor.
    #[must_use]
    pub fn leg_length(&self) -> f64 {
        self.leg_length
            .unwrap_or(self.height - self.head_l - self.waist_line - self.hips_line)
    }

    /// Shoulder incline in radians.
    #[must_use]
    pub fn shoulder_incl_rad(&self) -> f64 {
        self.shoulder_incl.to_radians()
    }

    /// Copy with the waist girth overridden.
    #[must_use]
    pub fn with_waist(mut self, waist: f64) -> Self {
        self.waist = waist;
        self
    }

    /// Copy with the back share of the waist overridden.
    #[must_use]
    pub fn with_waist_back_width(mut self, width: f64) -> Self {
        self.waist_back_width = Some(width);
        self
    }

    /// Check that every measurement is physically meaningful.
    ///
    /// # Errors
    ///
    /// [`GarmentError::InvalidMeasurement`] naming the first offending value.
    pub fn validate(&self) -> GarmentResult<()> {
        let required = [
            ("bust", self.bust),
            ("waist", self.waist),
            ("back_width", self.back_width),
            ("bust_line", self.bust_line),
            ("waist_line", self.waist_line),
            ("waist_over_bust_line", self.waist_over_bust_line),
            ("neck_w", self.neck_w),
            ("height", self.height),
            ("head_l", self.head_l),
            ("hips_line", self.hips_line),
            ("bust_points", self.bust_points),
        ];
        for (name, value) in required {
            positive(name, value)?;
        }
        if let Some(value) = self.waist_back_width {
            positive("waist_back_width", value)?;
        }
        positive("_leg_length", self.leg_length())?;

        if !(self.shoulder_incl > 0.0 && self.shoulder_incl < 90.0) {
            return Err(GarmentError::InvalidMeasurement {
                name: "shoulder_incl",
                value: self.shoulder_incl,
                reason: "must lie strictly between 0 and 90 degrees",
            });
        }
        if self.back_width >= self.bust {
            return Err(GarmentError::InvalidMeasurement {
                name: "back_width",
                value: self.back_width,
                reason: "must be smaller than the bust girth",
            });
        }
        if self.bust_line >= self.waist_line {
            return Err(GarmentError::InvalidMeasurement {
                name: "bust_line",
                value: self.bust_line,
                reason: "must lie above the waist line",
            });
        }
        Ok(())
    }
}

fn positive(name: &'static str, value: f64) -> GarmentResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(GarmentError::InvalidMeasurement {
            name,
            value,
            reason: "must be finite and positive",
        })
    }
}
