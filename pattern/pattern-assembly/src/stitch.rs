//! Stitching rules: declared seams between two interfaces.

use crate::error::{PatternError, PatternResult};
use crate::interface::{EdgeLookup, Interface};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Largest allowed length difference of a seam, in pattern units.
pub const DEFAULT_TOLERANCE: f64 = 1e-3;

/// A seam joining two interfaces.
///
/// Plain seams require both sides to have equal length. A gathered seam
/// declares a ratio `gather >= 1`: the first side is gathered onto the
/// second, so `gather * length(a)` must equal `length(b)`.
///
/// # Example
///
/// ```
/// use pattern_assembly::{Interface, StitchingRule};
/// use pattern_types::EdgeId;
///
/// let side = StitchingRule::new(
///     Interface::new("front", [EdgeId(1)]),
///     Interface::new("back", [EdgeId(2)]),
/// );
/// assert!(!side.is_gathered());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StitchingRule {
    a: Interface,
    b: Interface,
    gather: f64,
}

impl StitchingRule {
    /// A plain seam.
    #[must_use]
    pub fn new(a: Interface, b: Interface) -> Self {
        Self { a, b, gather: 1.0 }
    }

    /// A seam where `a`, scaled by `gather`, is sewn onto `b`.
    #[must_use]
    pub fn gathered(a: Interface, b: Interface, gather: f64) -> Self {
        Self { a, b, gather }
    }

    /// First side.
    #[must_use]
    pub fn a(&self) -> &Interface {
        &self.a
    }

    /// Second side.
    #[must_use]
    pub fn b(&self) -> &Interface {
        &self.b
    }

    /// Gathering ratio (1 for plain seams).
    #[must_use]
    pub fn gather(&self) -> f64 {
        self.gather
    }

    /// Whether this seam gathers one side.
    #[must_use]
    pub fn is_gathered(&self) -> bool {
        (self.gather - 1.0).abs() > f64::EPSILON
    }

    /// Whether either side touches `panel`.
    #[must_use]
    pub fn involves_panel(&self, panel: &str) -> bool {
        self.a.touches(panel) || self.b.touches(panel)
    }

    /// Lengths of both sides.
    pub fn lengths<L: EdgeLookup + ?Sized>(&self, lookup: &L) -> PatternResult<(f64, f64)> {
        Ok((self.a.length(lookup)?, self.b.length(lookup)?))
    }

    /// Check that both sides resolve and have matching lengths.
    ///
    /// # Errors
    ///
    /// [`PatternError::MismatchedStitch`] when the gathered lengths differ by
    /// more than `tolerance`, or any resolution error.
    pub fn check<L: EdgeLookup + ?Sized>(&self, lookup: &L, tolerance: f64) -> PatternResult<()> {
        let (left, right) = self.lengths(lookup)?;
        let difference = (self.gather * left - right).abs();
        if difference > tolerance {
            return Err(PatternError::MismatchedStitch {
                left,
                right,
                gather: self.gather,
                difference,
                tolerance,
            });
        }
        Ok(())
    }

    /// Copy with both sides reversed, as needed after mirroring.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            a: self.a.reversed(),
            b: self.b.reversed(),
            gather: self.gather,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::Panel;
    use pattern_types::EdgeLoop;

    fn rect() -> Panel {
        let lp = EdgeLoop::from_verts([[0.0, 0.0], [-2.0, 0.0], [-2.0, 3.0], [0.0, 3.0]]).unwrap();
        Panel::new("p", lp)
    }

    #[test]
    fn test_plain_seam() {
        let panel = rect();
        let ids = panel.edges().ids().to_vec();
        let ok = StitchingRule::new(panel.interface_of([ids[1]]), panel.interface_of([ids[3]]));
        ok.check(&panel, DEFAULT_TOLERANCE).unwrap();

        let bad = StitchingRule::new(panel.interface_of([ids[0]]), panel.interface_of([ids[1]]));
        let err = bad.check(&panel, DEFAULT_TOLERANCE).unwrap_err();
        assert!(err.is_mismatched_stitch());
    }

    #[test]
    fn test_gathered_seam() {
        let panel = rect();
        let ids = panel.edges().ids().to_vec();
        let rule = StitchingRule::gathered(panel.interface_of([ids[0]]), panel.interface_of([ids[1]]), 1.5);
        assert!(rule.is_gathered());
        rule.check(&panel, DEFAULT_TOLERANCE).unwrap();
        assert!(rule.involves_panel("p"));
    }
}
