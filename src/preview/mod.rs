use crate::error::Result;
use crate::parse::LocaleValue;
use crate::reconcile::{flatten, FlatMap, LocaleLoader};
use std::path::PathBuf;

/// Base-locale text for dotted keys, used to show what a reported key says.
///
/// Documents of later sprinkles override earlier ones, the same way the
/// application resolves a key at runtime.
#[derive(Debug, Clone, Default)]
pub struct TranslationPreview {
    messages: FlatMap,
    max_length: usize,
}

impl TranslationPreview {
    pub fn new(messages: FlatMap, max_length: usize) -> Self {
        Self {
            messages,
            max_length,
        }
    }

    /// Merge the base-locale documents of every sprinkle, in load order
    pub fn load(
        loader: &dyn LocaleLoader,
        files: &[(String, Vec<PathBuf>)],
        base: &str,
        max_length: usize,
    ) -> Result<Self> {
        let mut merged = LocaleValue::empty();
        for (sprinkle, relatives) in files {
            for relative in relatives {
                merged.merge(loader.load(sprinkle, base, relative)?);
            }
        }
        Ok(Self::new(flatten(&merged), max_length))
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Display text for `key`: the base-locale text cut to `max_length`
    /// characters, or the key itself when the base locale lacks it
    pub fn preview(&self, key: &str) -> String {
        match self.messages.get(key) {
            Some(LocaleValue::Leaf(Some(text))) => truncate_chars(text, self.max_length),
            Some(LocaleValue::Leaf(None)) => String::new(),
            Some(LocaleValue::Subtree(_)) | None => truncate_chars(key, self.max_length),
        }
    }
}

/// First `max_length` characters of `s`
pub fn truncate_chars(s: &str, max_length: usize) -> String {
    match s.char_indices().nth(max_length) {
        Some((end, _)) => s[..end].to_string(),
        None => s.to_string(),
    }
}
