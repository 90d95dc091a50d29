//! Property-based tests for the law gate.
//!
//! Lawful worlds accept every sample; the unlawful ones are caught whenever
//! the sample can tell them apart.

use kanex_core::{OptionK, VecK};
use kanex_gate::{LawGate, Verdict, compute_witness_id, run_case};
use proptest::prelude::*;
use serde_json::json;

fn law_refs(result: &kanex_gate::LawResult) -> Vec<&str> {
    result.failures.iter().map(|f| f.law_ref.as_str()).collect()
}

// =============================================================================
// Lawful worlds
// =============================================================================

proptest! {
    #[test]
    fn prop_option_accepts_every_check(
        xs in prop::collection::vec(prop::option::of(any::<i64>()), 0..6),
        points in prop::collection::vec(any::<i64>(), 0..4),
    ) {
        for kind in ["functor", "applicative", "ran", "lan", "lan_applicative"] {
            let case = json!({
                "world": "option",
                "check": {"kind": kind, "samples": xs, "points": points},
            });
            let result = run_case(&case, "toy").unwrap();
            prop_assert!(result.is_accepted(), "{kind}: {:?}", law_refs(&result));
        }
    }

    #[test]
    fn prop_identity_accepts_adjunction_checks(xs in prop::collection::vec(any::<i64>(), 0..6)) {
        for kind in ["adjunction", "adjoint_round_trip"] {
            let case = json!({"world": "identity", "check": {"kind": kind, "samples": xs}});
            let result = run_case(&case, "toy").unwrap();
            prop_assert_eq!(result.result, Verdict::Accepted);
        }
    }

    #[test]
    fn prop_vec_accepts_kan_checks(
        xs in prop::collection::vec(prop::collection::vec(any::<i64>(), 0..5), 0..4),
    ) {
        let mut gate = LawGate::new("toy");
        gate.check_functor::<VecK>("vec", &xs);
        gate.check_ran_functor::<VecK>("vec", &xs);
        gate.check_ran_universal::<VecK>("vec", &xs);
        gate.check_lan_functor::<VecK>("vec", &xs);
        gate.check_lan_universal::<VecK>("vec", &xs);
        prop_assert!(gate.failures().is_empty());
    }

    #[test]
    fn prop_result_accepts_lan_applicative(
        oks in prop::collection::vec(any::<i64>(), 0..4),
        points in prop::collection::vec(any::<i64>(), 0..3),
    ) {
        let mut samples: Vec<_> = oks.iter().map(|n| json!({ "Ok": n })).collect();
        samples.push(json!({ "Err": "boom" }));
        let case = json!({
            "world": "result",
            "check": {"kind": "lan_applicative", "samples": samples, "points": points},
        });
        prop_assert!(run_case(&case, "toy").unwrap().is_accepted());
    }

    #[test]
    fn prop_option_applicative_accepts_some_and_none(n in any::<i64>()) {
        let mut gate = LawGate::new("toy");
        gate.check_applicative::<OptionK>("option", &[Some(n), None], &[n]);
        prop_assert!(gate.failures().is_empty());
    }
}

// =============================================================================
// Unlawful worlds
// =============================================================================

proptest! {
    #[test]
    fn prop_reverse_vec_is_caught_off_palindromes(
        xs in prop::collection::vec(any::<i64>(), 2..8),
    ) {
        let reversed: Vec<i64> = xs.iter().rev().copied().collect();
        prop_assume!(reversed != xs);

        let case = json!({"world": "reverse_vec", "check": {"kind": "ran", "samples": [xs]}});
        let result = run_case(&case, "toy").unwrap();
        prop_assert_eq!(law_refs(&result), vec!["RAN-3"]);
    }

    #[test]
    fn prop_none_point_breaks_identity(n in any::<i64>()) {
        let case = json!({
            "world": "none_point",
            "check": {"kind": "applicative", "samples": [n], "points": []},
        });
        let result = run_case(&case, "toy").unwrap();
        prop_assert!(law_refs(&result).contains(&"APPLICATIVE-1"));
    }
}

// =============================================================================
// Witness IDs
// =============================================================================

proptest! {
    #[test]
    fn prop_witness_id_is_deterministic(instance in "[a-z_]{0,12}", sample in any::<u32>()) {
        let ctx = json!({ "sample": sample });
        let id = || {
            let instance = Some(instance.as_str());
            compute_witness_id("functor_law_failure", "FUNCTOR-1", instance, Some(&ctx))
        };
        let (a, b) = (id(), id());
        prop_assert_eq!(&a, &b);
        prop_assert!(a.starts_with("w1_"));
        prop_assert_eq!(a.len(), 3 + 52);
        prop_assert!(a[3..].chars().all(|c| matches!(c, '0'..='9' | 'a'..='v')));
    }

    #[test]
    fn prop_witness_id_separates_contexts(i in any::<u32>(), j in any::<u32>()) {
        prop_assume!(i != j);
        let id = |n: u32| {
            compute_witness_id("round_trip_failure", "RAN-4", None, Some(&json!({ "sample": n })))
        };
        let (a, b) = (id(i), id(j));
        prop_assert_ne!(a, b);
    }
}
