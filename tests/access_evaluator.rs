//! Catalog access decisions end to end
//!
//! Runs every scenario against both lookup modes.

use catalog_acl::{
    AccessEvaluator, AclError, CatalogAccessControl, Identity, LookupMode, MemorySource,
    PolicyStore, SchemaTableName, SystemAccessControl,
};
use std::collections::HashSet;

const MODES: [LookupMode; 2] = [LookupMode::Scan, LookupMode::Indexed];

fn alice_policy(mode: LookupMode) -> AccessEvaluator {
    let source = MemorySource::new([("alice", "sales"), ("alice", "hr")]);
    let store = PolicyStore::from_source(&source).unwrap();
    AccessEvaluator::with_lookup(store, mode)
}

fn strings(items: &[&str]) -> HashSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_can_access_example() {
    for mode in MODES {
        let eval = alice_policy(mode);

        assert!(eval.can_access(&Identity::new("alice"), "sales"));
        assert!(!eval.can_access(&Identity::new("bob"), "sales"));
    }
}

#[test]
fn test_filter_resources_example() {
    for mode in MODES {
        let eval = alice_policy(mode);

        let visible = eval.filter_resources(
            &Identity::new("alice"),
            strings(&["sales", "hr", "finance"]),
        );
        assert_eq!(visible, strings(&["sales", "hr"]));
    }
}

#[test]
fn test_filter_child_resources_example() {
    for mode in MODES {
        let eval = alice_policy(mode);
        let alice = Identity::new("alice");

        assert!(eval
            .filter_child_resources(&alice, "finance", strings(&["t1", "t2"]))
            .is_empty());
        assert_eq!(
            eval.filter_child_resources(&alice, "sales", strings(&["t1", "t2"])),
            strings(&["t1", "t2"])
        );
    }
}

#[test]
fn test_check_access_denial_carries_catalog() {
    for mode in MODES {
        let eval = alice_policy(mode);

        let err = eval
            .check_access(&Identity::new("bob"), "sales")
            .unwrap_err();
        assert!(matches!(&err, AclError::Denied { resource } if resource == "sales"));
        assert_eq!(err.to_string(), "Access Denied: Cannot access catalog sales");
    }
}

#[test]
fn test_matching_is_case_sensitive() {
    for mode in MODES {
        let eval = alice_policy(mode);

        assert!(!eval.can_access(&Identity::new("Alice"), "sales"));
        assert!(!eval.can_access(&Identity::new("alice"), "SALES"));
        assert!(eval
            .filter_resources(&Identity::new("alice"), strings(&["Sales", "HR"]))
            .is_empty());
    }
}

#[test]
fn test_control_listing_under_accessible_catalog_is_unfiltered() {
    let control = CatalogAccessControl::new(alice_policy(LookupMode::Scan));
    let alice = Identity::new("alice");

    let tables: HashSet<SchemaTableName> = [
        SchemaTableName::new("q1", "orders"),
        SchemaTableName::new("q2", "refunds"),
        SchemaTableName::new("private", "salaries"),
    ]
    .into();

    assert_eq!(control.filter_tables(&alice, "sales", tables.clone()), tables);
    assert!(control.filter_tables(&alice, "finance", tables).is_empty());

    assert_eq!(
        control.filter_catalogs(&alice, strings(&["sales", "finance"])),
        strings(&["sales"])
    );
}

#[test]
fn test_evaluator_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AccessEvaluator>();
    assert_send_sync::<CatalogAccessControl>();
}
