//! Tiered skirt length accounting and gathering.
//!
//! Run with: cargo test -p pattern-garment -- proptest

#![allow(clippy::unwrap_used, clippy::expect_used)]

use approx::assert_relative_eq;
use pattern_assembly::{Component, DEFAULT_TOLERANCE};
use pattern_garment::{Body, Design, SkirtShape, TierLengths, skirt_levels};
use proptest::prelude::*;

fn body() -> Body {
    Body::from_json(
        r#"{
            "bust": 92, "waist": 70, "back_width": 36,
            "bust_line": 24, "waist_line": 40, "waist_over_bust_line": 44,
            "shoulder_incl": 18, "neck_w": 18, "height": 170, "head_l": 22,
            "hips_line": 22, "bust_points": 18
        }"#,
    )
    .unwrap()
}

/// Vertical extent of a panel in its own plane.
fn panel_height(skirt: &Component, name: &str) -> f64 {
    let panel = skirt.panel(name).unwrap();
    let ys = panel.edges().vertices().iter().map(|p| p.y);
    let (lo, hi) = ys.fold((f64::MAX, f64::MIN), |(lo, hi), y| (lo.min(y), hi.max(y)));
    hi - lo
}

#[test]
fn design_file_with_legacy_leaves() {
    let design = Design::from_json(
        r#"{
            "levels-skirt": {
                "base": { "v": "CircleSkirt" },
                "level": { "v": "Skirt2" },
                "num_levels": { "v": 3 },
                "level_ruffle": { "v": 1.3 },
                "length": { "v": 0.7 },
                "base_length_frac": { "v": 0.25 }
            }
        }"#,
    )
    .unwrap();
    let skirt = skirt_levels(&body(), &design).unwrap();
    let lengths = TierLengths::compute(&body(), &design.levels_skirt).unwrap();

    for i in 0..3 {
        assert_relative_eq!(
            panel_height(&skirt, &format!("skirt_{i}_front")),
            lengths.level,
            epsilon = 1e-9
        );
    }
    assert!(skirt.validate().is_valid());
}

#[test]
fn unknown_tier_shape_is_rejected() {
    let err = Design::from_json(r#"{ "levels-skirt": { "level": "PencilSkirt" } }"#).unwrap_err();
    assert!(err.to_string().contains("PencilSkirt"));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn proptest_tier_lengths_add_up(
        num_levels in 1usize..5,
        frac in 0.1..0.9f64,
        length in 0.2..0.9f64,
        ruffle in 1.0..2.0f64,
    ) {
        let body = body();
        let mut design = Design::default();
        design.levels_skirt.num_levels = num_levels;
        design.levels_skirt.base_length_frac = frac;
        design.levels_skirt.length = length;
        design.levels_skirt.level_ruffle = ruffle;
        design.levels_skirt.base = SkirtShape::Skirt2;
        design.levels_skirt.level = SkirtShape::Skirt2;
        prop_assert!(design.validate().is_ok());

        let lengths = TierLengths::compute(&body, &design.levels_skirt).unwrap();
        let total = length * body.leg_length();
        prop_assert!((lengths.base - (body.hips_line + frac * total)).abs() < 1e-9);
        #[allow(clippy::cast_precision_loss)]
        let expected_level = (1.0 - frac) * total / num_levels as f64;
        prop_assert!((lengths.level - expected_level).abs() < 1e-9);
        prop_assert!(lengths.base > 0.0 && lengths.level > 0.0);

        let skirt = skirt_levels(&body, &design).unwrap();
        prop_assert!((panel_height(&skirt, "skirt_front") - lengths.base).abs() < 1e-9);
        for i in 0..num_levels {
            let height = panel_height(&skirt, &format!("skirt_{i}_back"));
            prop_assert!((height - lengths.level).abs() < 1e-9);
        }

        prop_assert_eq!(skirt.rules().len(), num_levels);
        for rule in skirt.all_rules() {
            prop_assert!(rule.check(&skirt, DEFAULT_TOLERANCE).is_ok());
        }
    }
}
