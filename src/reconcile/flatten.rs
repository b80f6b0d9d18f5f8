use crate::parse::LocaleValue;
use std::collections::BTreeMap;

/// Dotted key path to leaf value, e.g. `"account.login" -> "Log in"`
pub type FlatMap = BTreeMap<String, LocaleValue>;

/// Flatten a locale document into dotted key paths.
///
/// Every leaf ends up in the result under the `.`-joined keys of its
/// ancestors. Empty subtrees contribute nothing and a bare leaf at the root
/// is not a document, so it flattens to an empty map.
///
/// When a literal dotted key and a nested path spell the same path (`"a.b"`
/// next to `a: { b }`), the entry reached first in key order is kept. The
/// parsers reject such documents, so this only applies to trees built in code.
pub fn flatten(document: &LocaleValue) -> FlatMap {
    let mut flat = FlatMap::new();
    if let LocaleValue::Subtree(map) = document {
        flatten_into(map, "", &mut flat);
    }
    flat
}

fn flatten_into(map: &BTreeMap<String, LocaleValue>, prefix: &str, flat: &mut FlatMap) {
    for (key, value) in map {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };

        match value {
            LocaleValue::Subtree(children) => flatten_into(children, &path, flat),
            leaf => {
                flat.entry(path).or_insert_with(|| leaf.clone());
            }
        }
    }
}

/// Entries whose value is null or the empty string
pub fn find_empty_leaves(flat: &FlatMap) -> FlatMap {
    flat.iter()
        .filter(|(_, value)| value.is_blank())
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Entries of `primary` that `secondary` holds with an equal value.
///
/// Values are compared structurally, so nested values that are equal all
/// the way down also match. The values returned are the primary's.
///
/// A null in `secondary` is an untranslated placeholder, not a copy of the
/// primary, so it never matches.
pub fn intersect_matching(primary: &FlatMap, secondary: &FlatMap) -> FlatMap {
    primary
        .iter()
        .filter(|(key, value)| match secondary.get(*key) {
            Some(LocaleValue::Leaf(None)) | None => false,
            Some(found) => found == *value,
        })
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// [`intersect_matching`] over unvalidated values.
///
/// Anything other than two mappings yields an empty result rather than an
/// error.
pub fn intersect_values(primary: &LocaleValue, secondary: &LocaleValue) -> FlatMap {
    match (primary, secondary) {
        (LocaleValue::Subtree(primary), LocaleValue::Subtree(secondary)) => {
            intersect_matching(primary, secondary)
        }
        _ => FlatMap::new(),
    }
}
