pub mod config;
pub mod error;
pub mod locator;
pub mod output;
pub mod parse;
pub mod preview;
pub mod reconcile;

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::debug;

// Re-export commonly used types
pub use config::SiteConfig;
pub use error::{AuditError, Result};
pub use locator::{CachedLoader, SprinkleLocator};
pub use output::{SimpleFormatter, TableFormatter};
pub use parse::LocaleValue;
pub use preview::TranslationPreview;
pub use reconcile::{
    audit_locales, find_empty_leaves, flatten, intersect_matching, intersect_values,
    resolve_target_locales, AuditOptions, AuditResult, FilesBySprinkle, FlatMap, LocaleLoader,
};

/// Parameters of one audit run
#[derive(Debug, Clone, Default)]
pub struct AuditQuery {
    pub base_locale: Option<String>,
    /// Comma-separated locales to check instead of every available one
    pub check: Option<String>,
    pub root: Option<PathBuf>,
    pub config_path: Option<PathBuf>,
    pub max_length: Option<usize>,
    pub options: AuditOptions,
}

impl AuditQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_locale(mut self, base_locale: impl Into<String>) -> Self {
        self.base_locale = Some(base_locale.into());
        self
    }

    pub fn with_check(mut self, check: impl Into<String>) -> Self {
        self.check = Some(check.into());
        self
    }

    pub fn with_root(mut self, root: PathBuf) -> Self {
        self.root = Some(root);
        self
    }

    pub fn with_config(mut self, config_path: PathBuf) -> Self {
        self.config_path = Some(config_path);
        self
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    pub fn skip_empty_check(mut self, skip: bool) -> Self {
        self.options.skip_empty_check = skip;
        self
    }

    pub fn skip_duplicate_check(mut self, skip: bool) -> Self {
        self.options.skip_duplicate_check = skip;
        self
    }
}

/// Result of an audit run, ready to render
#[derive(Debug, Clone, Serialize)]
pub struct AuditReport {
    pub base_locale: String,
    pub target_locales: Vec<String>,
    #[serde(skip)]
    pub options: AuditOptions,
    #[serde(flatten)]
    pub result: AuditResult,
    /// Base-locale preview text for every reported key
    pub previews: BTreeMap<String, String>,
}

impl AuditReport {
    /// Preview text for a reported key, or the key itself
    pub fn preview<'a>(&'a self, key: &'a str) -> &'a str {
        self.previews.get(key).map(String::as_str).unwrap_or(key)
    }

    /// Pretty-printed JSON of the report
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Main orchestrator for a locale audit
///
/// This function:
/// 1. Loads the site config (explicit path, or the default under the root)
/// 2. Resolves the sprinkles, the base locale and the locales to check
/// 3. Compares the base-locale files of every sprinkle with each checked locale
/// 4. Builds a translation preview for every reported key
#[must_use = "this function returns a Result that should be handled"]
pub fn run_audit(query: AuditQuery) -> Result<AuditReport> {
    let root = query
        .root
        .clone()
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

    let site = match &query.config_path {
        Some(path) => SiteConfig::load(path)?,
        None => SiteConfig::discover(&root)?,
    };

    let base = query
        .base_locale
        .clone()
        .or_else(|| site.default_locale.clone())
        .unwrap_or_else(|| config::DEFAULT_BASE_LOCALE.to_string());
    let max_length = query
        .max_length
        .or(site.preview_max_length)
        .unwrap_or(config::DEFAULT_PREVIEW_LENGTH);

    let locator = SprinkleLocator::new(root.clone());

    // Config order wins so later sprinkles override earlier ones in previews
    let sprinkles: Vec<String> = if site.sprinkles.is_empty() {
        locator.sprinkles()?
    } else {
        site.sprinkles
            .iter()
            .filter(|sprinkle| {
                let present = root.join(sprinkle).join(crate::locator::LOCALE_DIR_NAME).is_dir();
                if !present {
                    debug!(sprinkle = %sprinkle, "configured sprinkle has no locale directory");
                }
                present
            })
            .cloned()
            .collect()
    };
    if sprinkles.is_empty() {
        return Err(AuditError::no_sprinkles(root));
    }

    let available = if site.available_locales.is_empty() {
        locator.available_locales(&sprinkles)?
    } else {
        site.available_locales.clone()
    };
    let targets = resolve_target_locales(query.check.as_deref(), &available, &base);
    debug!(base = %base, targets = ?targets, "resolved locales");

    let files = locator.files_by_sprinkle(&sprinkles, &base)?;
    let loader = CachedLoader::new(&locator);
    let result = audit_locales(&base, &targets, &files, query.options, &loader)?;

    let ordered: Vec<(String, Vec<PathBuf>)> = sprinkles
        .iter()
        .filter_map(|sprinkle| {
            files
                .get(sprinkle)
                .map(|relatives| (sprinkle.clone(), relatives.clone()))
        })
        .collect();
    let translator = TranslationPreview::load(&loader, &ordered, &base, max_length)?;

    let previews = result
        .empty_values
        .values()
        .chain(result.duplicate_values.values())
        .flat_map(|flat| flat.keys())
        .map(|key| (key.clone(), translator.preview(key)))
        .collect();

    debug!(findings = result.finding_count(), "audit finished");

    Ok(AuditReport {
        base_locale: base,
        target_locales: targets,
        options: query.options,
        result,
        previews,
    })
}
