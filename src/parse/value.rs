use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A node of a parsed locale document.
///
/// Locale files are trees of string keys. Every node is either a leaf holding
/// the translated text (or null) or a subtree of further keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocaleValue {
    Leaf(Option<String>),
    Subtree(BTreeMap<String, LocaleValue>),
}

impl LocaleValue {
    /// Leaf holding the given text
    pub fn text(value: impl Into<String>) -> Self {
        LocaleValue::Leaf(Some(value.into()))
    }

    /// Null leaf
    pub fn null() -> Self {
        LocaleValue::Leaf(None)
    }

    /// Empty subtree, the root of an empty document
    pub fn empty() -> Self {
        LocaleValue::Subtree(BTreeMap::new())
    }

    pub fn is_subtree(&self) -> bool {
        matches!(self, LocaleValue::Subtree(_))
    }

    /// True for null leaves and leaves holding the empty string
    pub fn is_blank(&self) -> bool {
        match self {
            LocaleValue::Leaf(None) => true,
            LocaleValue::Leaf(Some(text)) => text.is_empty(),
            LocaleValue::Subtree(_) => false,
        }
    }

    /// Text of a leaf, `None` for null leaves and subtrees
    pub fn as_text(&self) -> Option<&str> {
        match self {
            LocaleValue::Leaf(Some(text)) => Some(text),
            _ => None,
        }
    }

    /// Child entries of a subtree
    pub fn as_subtree(&self) -> Option<&BTreeMap<String, LocaleValue>> {
        match self {
            LocaleValue::Subtree(map) => Some(map),
            LocaleValue::Leaf(_) => None,
        }
    }

    /// Count of leaves reachable from this node
    pub fn leaf_count(&self) -> usize {
        match self {
            LocaleValue::Leaf(_) => 1,
            LocaleValue::Subtree(map) => map.values().map(LocaleValue::leaf_count).sum(),
        }
    }

    /// First dotted leaf path that two different leaves would share.
    ///
    /// A literal dotted key such as `"a.b"` and the nested path `a: { b }`
    /// flatten to the same entry, so only one of them could survive.
    pub fn colliding_path(&self) -> Option<String> {
        let mut seen = BTreeSet::new();
        match self {
            LocaleValue::Subtree(map) => find_collision(map, "", &mut seen),
            LocaleValue::Leaf(_) => None,
        }
    }

    /// Merge `other` into `self`, with `other` winning on conflicting keys.
    /// Subtrees present on both sides are merged recursively.
    pub fn merge(&mut self, other: LocaleValue) {
        match (self, other) {
            (LocaleValue::Subtree(ours), LocaleValue::Subtree(theirs)) => {
                for (key, value) in theirs {
                    let nested = value.is_subtree()
                        && ours.get(&key).is_some_and(LocaleValue::is_subtree);
                    if nested {
                        if let Some(existing) = ours.get_mut(&key) {
                            existing.merge(value);
                        }
                    } else {
                        ours.insert(key, value);
                    }
                }
            }
            (this, other) => *this = other,
        }
    }
}

fn find_collision(
    map: &BTreeMap<String, LocaleValue>,
    prefix: &str,
    seen: &mut BTreeSet<String>,
) -> Option<String> {
    for (key, value) in map {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };

        let collision = match value {
            LocaleValue::Subtree(children) => find_collision(children, &path, seen),
            LocaleValue::Leaf(_) if !seen.insert(path.clone()) => Some(path),
            LocaleValue::Leaf(_) => None,
        };
        if collision.is_some() {
            return collision;
        }
    }
    None
}

impl From<&str> for LocaleValue {
    fn from(value: &str) -> Self {
        LocaleValue::text(value)
    }
}

impl From<BTreeMap<String, LocaleValue>> for LocaleValue {
    fn from(map: BTreeMap<String, LocaleValue>) -> Self {
        LocaleValue::Subtree(map)
    }
}
