pub mod site;

pub use site::{SiteConfig, DEFAULT_BASE_LOCALE, DEFAULT_CONFIG_PATHS, DEFAULT_PREVIEW_LENGTH};
