use std::path::PathBuf;
use thiserror::Error;

/// Custom error type for locale audit operations
#[derive(Debug, Error)]
pub enum AuditError {
    /// A requested locale file does not exist
    #[error("Locale file not found: {path}\n\nTip: Every file of the base locale must exist in each checked locale")]
    FileNotFound { path: PathBuf },

    /// Failed to parse a locale file
    #[error("Failed to parse locale file {file}:\n{reason}\n\nTip: Verify the file syntax is correct")]
    ParseError { file: PathBuf, reason: String },

    /// Locale file has an extension we cannot read
    #[error("Unsupported locale file format: {file}\n\nTip: Locale files must be .json, .yml or .yaml")]
    UnsupportedFormat { file: PathBuf },

    /// Failed to read the site configuration
    #[error("Invalid configuration file {file}:\n{reason}")]
    ConfigError { file: PathBuf, reason: String },

    /// No sprinkle with a locale directory was found
    #[error("No sprinkles with a 'locale' directory found under {root}\n\nTip: Point --root at the directory containing your sprinkles")]
    NoSprinkles { root: PathBuf },

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AuditError {
    /// Create a FileNotFound error
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a ParseError from a file path and reason
    pub fn parse_error(file: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::ParseError {
            file: file.into(),
            reason: reason.into(),
        }
    }

    /// Create an UnsupportedFormat error
    pub fn unsupported_format(file: impl Into<PathBuf>) -> Self {
        Self::UnsupportedFormat { file: file.into() }
    }

    /// Create a ConfigError from a file path and reason
    pub fn config_error(file: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::ConfigError {
            file: file.into(),
            reason: reason.into(),
        }
    }

    /// Create a NoSprinkles error
    pub fn no_sprinkles(root: impl Into<PathBuf>) -> Self {
        Self::NoSprinkles { root: root.into() }
    }
}

/// Result type alias for AuditError
pub type Result<T> = std::result::Result<T, AuditError>;
