use crate::error::{AuditError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use yaml_rust::{Yaml, YamlLoader};

/// Config files looked up under the sprinkles root when none is given
pub const DEFAULT_CONFIG_PATHS: &[&str] = &["config/default.yaml", "config/default.yml"];

/// Base locale used when neither the command line nor the config names one
pub const DEFAULT_BASE_LOCALE: &str = "en_US";

/// Preview length used when neither the command line nor the config sets one
pub const DEFAULT_PREVIEW_LENGTH: usize = 255;

/// Site settings relevant to a locale audit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteConfig {
    /// Enabled locales, in config order
    pub available_locales: Vec<String>,
    /// `site.locales.default`
    pub default_locale: Option<String>,
    /// Sprinkle load order. Empty means every sprinkle found on disk.
    pub sprinkles: Vec<String>,
    /// `preview.max_length`
    pub preview_max_length: Option<usize>,
}

impl SiteConfig {
    /// Load the config at `path`
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| AuditError::config_error(path, format!("Failed to read file: {}", e)))?;
        let config = Self::parse_str(&content, path)?;
        debug!(path = %path.display(), locales = config.available_locales.len(), "loaded site config");
        Ok(config)
    }

    /// Load the first default config file found under `root`, or the empty
    /// config when there is none
    pub fn discover(root: &Path) -> Result<Self> {
        match Self::default_path(root) {
            Some(path) => Self::load(&path),
            None => {
                debug!(root = %root.display(), "no site config found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// First existing default config path under `root`
    pub fn default_path(root: &Path) -> Option<PathBuf> {
        DEFAULT_CONFIG_PATHS
            .iter()
            .map(|relative| root.join(relative))
            .find(|path| path.is_file())
    }

    /// Parse config text. `path` is only used for error messages.
    pub fn parse_str(content: &str, path: &Path) -> Result<Self> {
        let docs = YamlLoader::load_from_str(content)
            .map_err(|e| AuditError::config_error(path, e.to_string()))?;

        let Some(doc) = docs.into_iter().next() else {
            return Ok(Self::default());
        };
        match doc {
            Yaml::Hash(_) => {}
            Yaml::Null => return Ok(Self::default()),
            _ => return Err(AuditError::config_error(path, "Top-level value must be a mapping")),
        }

        let locales = &doc["site"]["locales"];

        let available_locales = match &locales["available"] {
            Yaml::Hash(hash) => hash
                .iter()
                .filter(|(_, name)| Self::is_enabled(name))
                .filter_map(|(id, _)| id.as_str().map(str::to_string))
                .collect(),
            Yaml::Array(items) => items
                .iter()
                .filter_map(|id| id.as_str().map(str::to_string))
                .collect(),
            Yaml::BadValue | Yaml::Null => Vec::new(),
            _ => {
                return Err(AuditError::config_error(
                    path,
                    "site.locales.available must be a mapping of locale ids to names",
                ))
            }
        };

        let default_locale = locales["default"].as_str().map(str::to_string);

        let sprinkles = match &doc["sprinkles"] {
            Yaml::Array(items) => items
                .iter()
                .filter_map(|s| s.as_str().map(str::to_string))
                .collect(),
            Yaml::BadValue | Yaml::Null => Vec::new(),
            _ => return Err(AuditError::config_error(path, "sprinkles must be a list of names")),
        };

        let preview_max_length = match &doc["preview"]["max_length"] {
            Yaml::Integer(n) if *n > 0 => Some(*n as usize),
            Yaml::BadValue | Yaml::Null => None,
            _ => {
                return Err(AuditError::config_error(
                    path,
                    "preview.max_length must be a positive integer",
                ))
            }
        };

        Ok(Self {
            available_locales,
            default_locale,
            sprinkles,
            preview_max_length,
        })
    }

    /// A locale is disabled by mapping it to null, false or an empty name
    fn is_enabled(name: &Yaml) -> bool {
        match name {
            Yaml::Null | Yaml::Boolean(false) => false,
            Yaml::String(s) => !s.is_empty(),
            _ => true,
        }
    }
}
