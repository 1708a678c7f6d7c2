//! Property-based tests for access decisions
//!
//! Uses proptest to check the evaluator against a naive model of the policy table

use catalog_acl::{AccessEvaluator, Identity, LookupMode, PolicyEntry, PolicyStore};
use proptest::prelude::*;

fn name() -> impl Strategy<Value = String> {
    // small alphabet with mixed case so collisions and near-misses are common
    "[aAbB]{0,3}"
}

fn entries() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec((name(), name()), 0..20)
}

fn build(rows: &[(String, String)], mode: LookupMode) -> AccessEvaluator {
    let store: PolicyStore = rows
        .iter()
        .map(|(u, c)| PolicyEntry::new(u.as_str(), c.as_str()))
        .collect();
    AccessEvaluator::with_lookup(store, mode)
}

proptest! {
    #[test]
    fn prop_can_access_iff_entry_present(rows in entries(), user in name(), catalog in name()) {
        let expected = rows.iter().any(|(u, c)| *u == user && *c == catalog);
        let identity = Identity::new(user.as_str());

        for mode in [LookupMode::Scan, LookupMode::Indexed] {
            let eval = build(&rows, mode);
            prop_assert_eq!(eval.can_access(&identity, &catalog), expected);
            prop_assert_eq!(eval.check_access(&identity, &catalog).is_ok(), expected);
        }
    }

    #[test]
    fn prop_filter_resources_is_exact_subset(
        rows in entries(),
        user in name(),
        requested in prop::collection::hash_set(name(), 0..10)
    ) {
        let eval = build(&rows, LookupMode::Scan);
        let identity = Identity::new(user.as_str());

        let visible = eval.filter_resources(&identity, requested.clone());

        prop_assert!(visible.is_subset(&requested));
        for catalog in &requested {
            prop_assert_eq!(visible.contains(catalog), eval.can_access(&identity, catalog));
        }
    }

    #[test]
    fn prop_children_all_or_nothing(
        rows in entries(),
        user in name(),
        catalog in name(),
        children in prop::collection::hash_set(any::<u16>(), 0..10)
    ) {
        let eval = build(&rows, LookupMode::Indexed);
        let identity = Identity::new(user.as_str());

        let result = eval.filter_child_resources(&identity, &catalog, children.clone());

        if eval.can_access(&identity, &catalog) {
            prop_assert_eq!(result, children);
        } else {
            prop_assert!(result.is_empty());
        }
    }

    #[test]
    fn prop_decisions_are_repeatable(rows in entries(), user in name(), catalog in name()) {
        let eval = build(&rows, LookupMode::Scan);
        let identity = Identity::new(user.as_str());

        let first = eval.can_access(&identity, &catalog);
        for _ in 0..3 {
            prop_assert_eq!(eval.can_access(&identity, &catalog), first);
        }
    }
}
