use crate::error::{AuditError, Result};
use std::fs;
use std::path::Path;
use yaml_rust::{Yaml, YamlLoader};

use super::check_unique_paths;
use super::value::LocaleValue;

/// Parser for YAML locale files
pub struct YamlParser;

impl YamlParser {
    pub fn parse_file(path: &Path) -> Result<LocaleValue> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AuditError::file_not_found(path)
            } else {
                AuditError::parse_error(path, format!("Failed to read file: {}", e))
            }
        })?;

        Self::parse_str(&content, path)
    }

    /// Parse YAML text. Multiple documents in one stream are merged, later
    /// documents overriding earlier ones.
    pub fn parse_str(content: &str, path: &Path) -> Result<LocaleValue> {
        let docs = YamlLoader::load_from_str(content)
            .map_err(|e| AuditError::parse_error(path, e.to_string()))?;

        let mut root = LocaleValue::empty();
        for doc in docs {
            match doc {
                Yaml::Hash(_) => root.merge(Self::to_locale_value(doc)),
                Yaml::Null => {}
                _ => {
                    return Err(AuditError::parse_error(
                        path,
                        "Top-level value must be a mapping of translation keys",
                    ))
                }
            }
        }

        check_unique_paths(root, path)
    }

    /// Render a mapping key as text. Keys that are not scalars are skipped.
    fn key_to_string(key: &Yaml) -> Option<String> {
        match key {
            Yaml::String(s) | Yaml::Real(s) => Some(s.clone()),
            Yaml::Integer(i) => Some(i.to_string()),
            Yaml::Boolean(b) => Some(b.to_string()),
            _ => None,
        }
    }

    fn to_locale_value(yaml: Yaml) -> LocaleValue {
        match yaml {
            Yaml::Hash(hash) => LocaleValue::Subtree(
                hash.into_iter()
                    .filter_map(|(key, value)| {
                        Self::key_to_string(&key).map(|k| (k, Self::to_locale_value(value)))
                    })
                    .collect(),
            ),
            Yaml::Array(items) => LocaleValue::Subtree(
                items
                    .into_iter()
                    .enumerate()
                    .map(|(index, value)| (index.to_string(), Self::to_locale_value(value)))
                    .collect(),
            ),
            Yaml::String(s) | Yaml::Real(s) => LocaleValue::Leaf(Some(s)),
            Yaml::Integer(i) => LocaleValue::Leaf(Some(i.to_string())),
            Yaml::Boolean(b) => LocaleValue::Leaf(Some(b.to_string())),
            Yaml::Null | Yaml::Alias(_) | Yaml::BadValue => LocaleValue::Leaf(None),
        }
    }
}
