pub mod json_parser;
pub mod value;
pub mod yaml_parser;

pub use json_parser::JsonParser;
pub use value::LocaleValue;
pub use yaml_parser::YamlParser;

use crate::error::{AuditError, Result};
use std::path::Path;

/// File extensions recognised as locale files
pub const SUPPORTED_EXTENSIONS: &[&str] = &["json", "yml", "yaml"];

/// Whether `path` has a locale file extension we can parse
pub fn is_locale_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

/// Reject documents where a dotted key and a nested path name the same leaf
pub(crate) fn check_unique_paths(document: LocaleValue, path: &Path) -> Result<LocaleValue> {
    match document.colliding_path() {
        Some(key) => Err(AuditError::parse_error(
            path,
            format!(
                "Key '{}' is defined both as a dotted key and as a nested path",
                key
            ),
        )),
        None => Ok(document),
    }
}

/// Parse a locale file, choosing the parser from its extension
pub fn parse_file(path: &Path) -> Result<LocaleValue> {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match ext.as_deref() {
        Some("json") => JsonParser::parse_file(path),
        Some("yml") | Some("yaml") => YamlParser::parse_file(path),
        _ => Err(AuditError::unsupported_format(path)),
    }
}
