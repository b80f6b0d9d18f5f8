use locale_audit::{find_empty_leaves, flatten, intersect_matching, LocaleValue};
use proptest::prelude::*;
use std::collections::BTreeMap;

fn leaf() -> impl Strategy<Value = LocaleValue> {
    prop_oneof![
        Just(LocaleValue::null()),
        Just(LocaleValue::text("")),
        "[a-zA-Z ]{1,12}".prop_map(|s: String| LocaleValue::text(s)),
    ]
}

/// Locale trees up to four levels deep. Keys never contain a dot, so every
/// leaf has a distinct dotted path.
fn document() -> impl Strategy<Value = LocaleValue> {
    let node = leaf().prop_recursive(4, 64, 6, |inner| {
        prop::collection::btree_map("[a-z_]{1,8}", inner, 0..6).prop_map(LocaleValue::Subtree)
    });
    prop::collection::btree_map("[a-z_]{1,8}", node, 0..8).prop_map(LocaleValue::Subtree)
}

/// Two-level trees whose keys may themselves contain dots, so a literal
/// `a.b` can land on the same path as a nested `a: { b }`
fn dotted_document() -> impl Strategy<Value = LocaleValue> {
    let key = "[ab](\\.[ab])?";
    let node = prop_oneof![
        leaf(),
        prop::collection::btree_map(key, leaf(), 0..3).prop_map(LocaleValue::Subtree),
    ];
    prop::collection::btree_map(key, node, 0..5).prop_map(LocaleValue::Subtree)
}

proptest! {
    #[test]
    fn test_flatten_yields_one_entry_per_leaf(doc in document()) {
        let flat = flatten(&doc);
        prop_assert_eq!(flat.len(), doc.leaf_count());
        prop_assert!(flat.values().all(|value| !value.is_subtree()));
    }

    #[test]
    fn test_flatten_is_idempotent(doc in document()) {
        let flat = flatten(&doc);
        let again = flatten(&LocaleValue::Subtree(flat.clone()));
        prop_assert_eq!(again, flat);
    }

    #[test]
    fn test_intersect_with_self_drops_only_nulls(doc in document()) {
        let flat = flatten(&doc);
        let expected: BTreeMap<_, _> = flat
            .iter()
            .filter(|(_, value)| **value != LocaleValue::null())
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        prop_assert_eq!(intersect_matching(&flat, &flat), expected);
    }

    #[test]
    fn test_flatten_with_dotted_keys(doc in dotted_document()) {
        let flat = flatten(&doc);
        match doc.colliding_path() {
            None => prop_assert_eq!(flat.len(), doc.leaf_count()),
            Some(path) => {
                prop_assert!(flat.contains_key(&path));
                prop_assert!(flat.len() < doc.leaf_count());
            }
        }
    }

    #[test]
    fn test_intersect_is_subset_of_both(a in document(), b in document()) {
        let (a, b) = (flatten(&a), flatten(&b));
        let common = intersect_matching(&a, &b);
        for (key, value) in &common {
            prop_assert_eq!(a.get(key), Some(value));
            prop_assert_eq!(b.get(key), Some(value));
        }
    }

    #[test]
    fn test_empty_leaves_are_blank_subset(doc in document()) {
        let flat = flatten(&doc);
        let empty = find_empty_leaves(&flat);
        prop_assert!(empty.values().all(LocaleValue::is_blank));
        let blank_count = flat.values().filter(|value| value.is_blank()).count();
        prop_assert_eq!(empty.len(), blank_count);
    }
}

#[test]
fn test_flatten_deep_nesting() {
    let mut doc = LocaleValue::text("bottom");
    for depth in (0..50).rev() {
        let mut map = BTreeMap::new();
        map.insert(format!("k{}", depth), doc);
        doc = LocaleValue::Subtree(map);
    }

    let flat = flatten(&doc);
    let expected_key = (0..50).map(|d| format!("k{}", d)).collect::<Vec<_>>().join(".");
    assert_eq!(flat.len(), 1);
    assert_eq!(flat.get(&expected_key), Some(&LocaleValue::text("bottom")));
}
