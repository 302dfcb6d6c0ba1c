//! Property-based tests for boundary loops and cut operators.
//!
//! Run with: cargo test -p pattern-types -- proptest

#![allow(clippy::unwrap_used, clippy::expect_used)]

use pattern_types::{EdgeLoop, EdgeSequence, Side, cut_into_edge, dart_shape};
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

/// A clockwise rectangle authored on the negative-X side.
fn arb_rect() -> impl Strategy<Value = EdgeLoop> {
    (5.0..60.0f64, 5.0..80.0f64).prop_map(|(w, h)| {
        EdgeLoop::from_verts([[0.0, 0.0], [-w, 0.0], [-w, h], [0.0, h]]).unwrap()
    })
}

/// Dart parameters expressed as fractions of the target edge length.
fn arb_dart_fractions() -> impl Strategy<Value = (f64, f64, f64)> {
    (0.05..0.4f64, 0.1..0.9f64, 0.05..0.6f64)
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn proptest_dart_keeps_loop_closed(
        lp in arb_rect(),
        edge_index in 0usize..4,
        (width_frac, pos_frac, depth_frac) in arb_dart_fractions(),
    ) {
        let mut lp = lp;
        let edge = lp.edge(edge_index).unwrap();
        let len = edge.length();
        let width = width_frac * len;
        // Keep the dart strictly inside the edge.
        let slack = len - width;
        let offset = width / 2.0 + slack * (0.01 + 0.98 * pos_frac);
        let dart = dart_shape(width, depth_frac * len).unwrap();
        let cut = cut_into_edge(&dart, &edge, offset, Side::Right).unwrap();

        let before = lp.len();
        lp.substitute(edge_index, &cut.replacement).unwrap();

        prop_assert_eq!(lp.len(), before + 3);
        prop_assert!(lp.closure_gap() < 1e-9);
        // The outer parts of the cut edge still add up to the original length.
        prop_assert!((cut.outer_length() - (len - width)).abs() < 1e-9);
    }

    #[test]
    fn proptest_dart_flanks_match_after_placement(
        lp in arb_rect(),
        (width_frac, pos_frac, depth_frac) in arb_dart_fractions(),
    ) {
        let edge = lp.edge(1).unwrap();
        let len = edge.length();
        let width = width_frac * len;
        let offset = width / 2.0 + (len - width) * (0.01 + 0.98 * pos_frac);
        let cut = cut_into_edge(&dart_shape(width, depth_frac * len).unwrap(), &edge, offset, Side::Right)
            .unwrap();
        let a = cut.replacement.segment(1).unwrap().length();
        let b = cut.replacement.segment(2).unwrap().length();
        prop_assert!((a - b).abs() < 1e-9);
    }

    #[test]
    fn proptest_mirror_twice_is_identity(lp in arb_rect()) {
        let back = lp.mirrored_x().mirrored_x();
        for (a, b) in lp.edges().zip(back.edges()) {
            prop_assert_eq!(a.id, b.id);
            prop_assert!((a.start - b.start).norm() < 1e-12);
        }
    }

    #[test]
    fn proptest_substitute_preserves_other_ids(lp in arb_rect(), k in 0usize..4) {
        let mut lp = lp;
        let edge = lp.edge(k).unwrap();
        let mid = edge.midpoint();
        let seq = EdgeSequence::new(vec![edge.start, mid, edge.end]).unwrap();
        let old = lp.ids().to_vec();
        lp.substitute(k, &seq).unwrap();
        for (i, id) in old.iter().enumerate() {
            prop_assert_eq!(lp.index_of(*id).is_some(), i != k);
        }
    }
}
