use crate::error::{AuditError, Result};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use super::check_unique_paths;
use super::value::LocaleValue;

/// Parser for JSON locale files
pub struct JsonParser;

impl JsonParser {
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

    /// Parse JSON text. `path` is only used for error messages.
    pub fn parse_str(content: &str, path: &Path) -> Result<LocaleValue> {
        // Strip comments to support JSONC (JSON with Comments) format
        let cleaned_content = Self::strip_json_comments(content);
        if cleaned_content.trim().is_empty() {
            return Ok(LocaleValue::empty());
        }

        let root: Value = serde_json::from_str(&cleaned_content).map_err(|e| {
            AuditError::parse_error(path, format!("Invalid JSON syntax: {}", e))
        })?;

        match root {
            Value::Object(_) => check_unique_paths(Self::to_locale_value(root), path),
            _ => Err(AuditError::parse_error(
                path,
                "Top-level value must be an object of translation keys",
            )),
        }
    }

    /// Strip single-line (//) and multi-line (/* */) comments from JSON
    fn strip_json_comments(content: &str) -> String {
        let mut result = String::with_capacity(content.len());
        let mut chars = content.chars().peekable();
        let mut in_string = false;
        let mut escape_next = false;

        while let Some(ch) = chars.next() {
            if escape_next {
                result.push(ch);
                escape_next = false;
                continue;
            }

            if ch == '\\' && in_string {
                result.push(ch);
                escape_next = true;
                continue;
            }

            if ch == '"' {
                in_string = !in_string;
                result.push(ch);
                continue;
            }

            if !in_string && ch == '/' {
                match chars.peek() {
                    Some('/') => {
                        for c in chars.by_ref() {
                            if c == '\n' {
                                result.push('\n');
                                break;
                            }
                        }
                        continue;
                    }
                    Some('*') => {
                        chars.next();
                        let mut prev = ' ';
                        for c in chars.by_ref() {
                            if prev == '*' && c == '/' {
                                break;
                            }
                            if c == '\n' {
                                result.push('\n');
                            }
                            prev = c;
                        }
                        continue;
                    }
                    _ => {}
                }
            }

            result.push(ch);
        }

        result
    }

    fn to_locale_value(value: Value) -> LocaleValue {
        match value {
            Value::Object(map) => LocaleValue::Subtree(
                map.into_iter()
                    .map(|(key, val)| (key, Self::to_locale_value(val)))
                    .collect(),
            ),
            // Lists are keyed by position, like `list.0`, `list.1`
            Value::Array(items) => LocaleValue::Subtree(
                items
                    .into_iter()
                    .enumerate()
                    .map(|(index, val)| (index.to_string(), Self::to_locale_value(val)))
                    .collect::<BTreeMap<_, _>>(),
            ),
            Value::String(s) => LocaleValue::Leaf(Some(s)),
            Value::Number(n) => LocaleValue::Leaf(Some(n.to_string())),
            Value::Bool(b) => LocaleValue::Leaf(Some(b.to_string())),
            Value::Null => LocaleValue::Leaf(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn leaf(doc: &LocaleValue, path: &[&str]) -> Option<LocaleValue> {
        let mut node = doc;
        for key in path {
            node = node.as_subtree()?.get(*key)?;
        }
        Some(node.clone())
    }

    #[test]
    fn test_parse_simple_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"key": "value"}}"#).unwrap();

        let doc = JsonParser::parse_file(file.path()).unwrap();
        assert_eq!(leaf(&doc, &["key"]), Some(LocaleValue::text("value")));
    }

    #[test]
    fn test_parse_nested_json_with_null() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"parent": {{"child": "value", "missing": null}}}}"#).unwrap();

        let doc = JsonParser::parse_file(file.path()).unwrap();
        assert_eq!(leaf(&doc, &["parent", "child"]), Some(LocaleValue::text("value")));
        assert_eq!(leaf(&doc, &["parent", "missing"]), Some(LocaleValue::null()));
    }

    #[test]
    fn test_parse_json_array_and_scalars() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"list": ["item1", "item2"], "count": 3, "on": true}}"#).unwrap();

        let doc = JsonParser::parse_file(file.path()).unwrap();
        assert_eq!(leaf(&doc, &["list", "0"]), Some(LocaleValue::text("item1")));
        assert_eq!(leaf(&doc, &["list", "1"]), Some(LocaleValue::text("item2")));
        assert_eq!(leaf(&doc, &["count"]), Some(LocaleValue::text("3")));
        assert_eq!(leaf(&doc, &["on"]), Some(LocaleValue::text("true")));
    }

    #[test]
    fn test_parse_jsonc_comments() {
        let content = r#"{
  // account strings
  "login": "Log In", /* inline */
  "url": "http://example.com/a//b"
}"#;
        let doc = JsonParser::parse_str(content, Path::new("en.json")).unwrap();
        assert_eq!(leaf(&doc, &["login"]), Some(LocaleValue::text("Log In")));
        assert_eq!(
            leaf(&doc, &["url"]),
            Some(LocaleValue::text("http://example.com/a//b"))
        );
    }

    #[test]
    fn test_empty_file_is_empty_document() {
        let file = NamedTempFile::new().unwrap();
        let doc = JsonParser::parse_file(file.path()).unwrap();
        assert_eq!(doc, LocaleValue::empty());

        let blank = JsonParser::parse_str("  \n\t\n", Path::new("en.json")).unwrap();
        assert_eq!(blank, LocaleValue::empty());
        let comments = JsonParser::parse_str("// nothing yet\n", Path::new("en.json")).unwrap();
        assert_eq!(comments, LocaleValue::empty());
    }

    #[test]
    fn test_dotted_key_colliding_with_nested_path_is_error() {
        let content = r#"{"a.b": "literal", "a": {"b": "nested"}}"#;
        let err = JsonParser::parse_str(content, Path::new("en.json")).unwrap_err();
        assert!(matches!(err, AuditError::ParseError { .. }));
        assert!(err.to_string().contains("dotted key"));

        // Distinct paths are fine
        let content = r#"{"a.c": "literal", "a": {"b": "nested"}}"#;
        assert!(JsonParser::parse_str(content, Path::new("en.json")).is_ok());
    }

    #[test]
    fn test_non_object_root_is_error() {
        let err = JsonParser::parse_str(r#"["a", "b"]"#, Path::new("en.json")).unwrap_err();
        assert!(matches!(err, AuditError::ParseError { .. }));
    }

    #[test]
    fn test_invalid_json_is_error() {
        let err = JsonParser::parse_str(r#"{"a": "#, Path::new("en.json")).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("en.json"));
        assert!(msg.contains("Invalid JSON syntax"));
    }

    #[test]
    fn test_missing_file_is_file_not_found() {
        let err = JsonParser::parse_file(Path::new("/nonexistent/locale/en_US/x.json")).unwrap_err();
        assert!(matches!(err, AuditError::FileNotFound { .. }));
    }
}
