use crate::error::Result;
use crate::parse::LocaleValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::flatten::{find_empty_leaves, flatten, intersect_matching, FlatMap};

/// Relative locale file paths to compare, per sprinkle
pub type FilesBySprinkle = BTreeMap<String, Vec<PathBuf>>;

/// Resolves `(sprinkle, locale, relative file)` to a parsed locale document.
///
/// Implementations must fail with [`AuditError::FileNotFound`] when the
/// file does not exist rather than returning an empty document.
///
/// [`AuditError::FileNotFound`]: crate::error::AuditError::FileNotFound
pub trait LocaleLoader {
    fn load(&self, sprinkle: &str, locale: &str, relative: &Path) -> Result<LocaleValue>;
}

/// Which checks to skip
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuditOptions {
    pub skip_empty_check: bool,
    pub skip_duplicate_check: bool,
}

/// Findings of one audit, keyed by synthesized file path then key path
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditResult {
    /// Base-locale keys whose value is empty or null
    pub empty_values: BTreeMap<String, FlatMap>,
    /// Keys whose value in a checked locale equals the base-locale value
    pub duplicate_values: BTreeMap<String, FlatMap>,
}

impl AuditResult {
    pub fn is_clean(&self) -> bool {
        self.empty_values.is_empty() && self.duplicate_values.is_empty()
    }

    /// Look up a reported empty value by file path and key
    pub fn empty_value(&self, file: &str, key: &str) -> Option<&LocaleValue> {
        self.empty_values.get(file)?.get(key)
    }

    /// Look up a reported duplicate value by file path and key
    pub fn duplicate_value(&self, file: &str, key: &str) -> Option<&LocaleValue> {
        self.duplicate_values.get(file)?.get(key)
    }

    /// Number of reported keys across both checks
    pub fn finding_count(&self) -> usize {
        self.empty_values.values().map(BTreeMap::len).sum::<usize>()
            + self.duplicate_values.values().map(BTreeMap::len).sum::<usize>()
    }
}

/// Path a finding is reported under: `sprinkle/locale/<locale>/<relative>`
pub fn report_path(sprinkle: &str, locale: &str, relative: &Path) -> String {
    let relative = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    format!("{}/locale/{}/{}", sprinkle, locale, relative)
}

/// Locales to compare against `base`.
///
/// An explicit comma-separated list is used as given. Otherwise every
/// available locale except the base one is checked.
pub fn resolve_target_locales(
    explicit: Option<&str>,
    available: &[String],
    base: &str,
) -> Vec<String> {
    match explicit {
        Some(list) => list
            .split(',')
            .map(str::trim)
            .filter(|locale| !locale.is_empty())
            .map(str::to_string)
            .collect(),
        None => available
            .iter()
            .filter(|locale| locale.as_str() != base)
            .cloned()
            .collect(),
    }
}

/// Audit every file of every sprinkle for empty base-locale values and for
/// values the target locales left identical to the base locale.
///
/// Only non-empty findings are recorded. Loader failures abort the audit.
pub fn audit_locales(
    base: &str,
    targets: &[String],
    files_by_sprinkle: &FilesBySprinkle,
    options: AuditOptions,
    loader: &dyn LocaleLoader,
) -> Result<AuditResult> {
    let mut result = AuditResult::default();

    if options.skip_empty_check && options.skip_duplicate_check {
        return Ok(result);
    }

    for (sprinkle, files) in files_by_sprinkle {
        for relative in files {
            let base_flat = flatten(&loader.load(sprinkle, base, relative)?);

            if !options.skip_empty_check {
                let empty = find_empty_leaves(&base_flat);
                if !empty.is_empty() {
                    result
                        .empty_values
                        .insert(report_path(sprinkle, base, relative), empty);
                }
            }

            if !options.skip_duplicate_check {
                for target in targets {
                    let target_flat = flatten(&loader.load(sprinkle, target, relative)?);
                    let duplicates = intersect_matching(&base_flat, &target_flat);
                    if !duplicates.is_empty() {
                        result
                            .duplicate_values
                            .insert(report_path(sprinkle, target, relative), duplicates);
                    }
                }
            }
        }
    }

    Ok(result)
}
