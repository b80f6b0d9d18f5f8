use crate::error::{AuditError, Result};
use crate::parse::{self, LocaleValue};
use crate::reconcile::{report_path, FilesBySprinkle, LocaleLoader};
use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Directory inside each sprinkle that holds one subdirectory per locale
pub const LOCALE_DIR_NAME: &str = "locale";

/// Finds locale files laid out as `<root>/<sprinkle>/locale/<locale>/<file>`.
#[derive(Debug, Clone)]
pub struct SprinkleLocator {
    root: PathBuf,
}

impl SprinkleLocator {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding the files of `locale` in `sprinkle`
    pub fn locale_dir(&self, sprinkle: &str, locale: &str) -> PathBuf {
        self.root.join(sprinkle).join(LOCALE_DIR_NAME).join(locale)
    }

    /// Absolute path of one locale file
    pub fn file_path(&self, sprinkle: &str, locale: &str, relative: &Path) -> PathBuf {
        self.locale_dir(sprinkle, locale).join(relative)
    }

    /// Names of the sprinkles under the root that have a locale directory, sorted
    pub fn sprinkles(&self) -> Result<Vec<String>> {
        let mut sprinkles = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if entry.path().join(LOCALE_DIR_NAME).is_dir() {
                if let Some(name) = entry.file_name().to_str() {
                    sprinkles.push(name.to_string());
                }
            }
        }
        sprinkles.sort();
        debug!(root = %self.root.display(), count = sprinkles.len(), "discovered sprinkles");
        Ok(sprinkles)
    }

    /// Locale identifiers present on disk in any of `sprinkles`, sorted
    pub fn available_locales(&self, sprinkles: &[String]) -> Result<Vec<String>> {
        let mut locales = BTreeSet::new();
        for sprinkle in sprinkles {
            let dir = self.root.join(sprinkle).join(LOCALE_DIR_NAME);
            if !dir.is_dir() {
                continue;
            }
            for entry in fs::read_dir(&dir)? {
                let entry = entry?;
                if entry.file_type()?.is_dir() {
                    if let Some(name) = entry.file_name().to_str() {
                        locales.insert(name.to_string());
                    }
                }
            }
        }
        Ok(locales.into_iter().collect())
    }

    /// Locale files of `locale` in `sprinkle`, relative to its locale
    /// directory, sorted. A sprinkle without that locale has no files.
    pub fn files_for(&self, sprinkle: &str, locale: &str) -> Result<Vec<PathBuf>> {
        let dir = self.locale_dir(sprinkle, locale);
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(&dir).follow_links(true) {
            let entry = entry.map_err(|e| {
                AuditError::Io(
                    e.into_io_error()
                        .unwrap_or_else(|| std::io::Error::other("filesystem loop detected")),
                )
            })?;
            if !entry.file_type().is_file() || !parse::is_locale_file(entry.path()) {
                continue;
            }
            if let Ok(relative) = entry.path().strip_prefix(&dir) {
                files.push(relative.to_path_buf());
            }
        }
        files.sort();
        Ok(files)
    }

    /// Base-locale files of each sprinkle, the set every other locale is
    /// compared against
    pub fn files_by_sprinkle(&self, sprinkles: &[String], base: &str) -> Result<FilesBySprinkle> {
        let mut map = FilesBySprinkle::new();
        for sprinkle in sprinkles {
            let files = self.files_for(sprinkle, base)?;
            debug!(sprinkle = %sprinkle, locale = base, count = files.len(), "collected locale files");
            if !files.is_empty() {
                map.insert(sprinkle.clone(), files);
            }
        }
        Ok(map)
    }
}

impl LocaleLoader for SprinkleLocator {
    fn load(&self, sprinkle: &str, locale: &str, relative: &Path) -> Result<LocaleValue> {
        let path = self.file_path(sprinkle, locale, relative);
        if !path.is_file() {
            return Err(AuditError::file_not_found(path));
        }
        debug!(path = %path.display(), "loading locale file");
        parse::parse_file(&path)
    }
}

/// Wraps another loader and parses each file at most once.
///
/// The audit reads every base-locale file and the preview reads them again,
/// so one run shares a single cache between both passes.
pub struct CachedLoader<'a> {
    inner: &'a dyn LocaleLoader,
    documents: RefCell<HashMap<String, LocaleValue>>,
}

impl<'a> CachedLoader<'a> {
    pub fn new(inner: &'a dyn LocaleLoader) -> Self {
        Self {
            inner,
            documents: RefCell::new(HashMap::new()),
        }
    }

    /// Number of distinct files loaded so far
    pub fn len(&self) -> usize {
        self.documents.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.borrow().is_empty()
    }
}

impl LocaleLoader for CachedLoader<'_> {
    fn load(&self, sprinkle: &str, locale: &str, relative: &Path) -> Result<LocaleValue> {
        let key = report_path(sprinkle, locale, relative);
        if let Some(document) = self.documents.borrow().get(&key) {
            return Ok(document.clone());
        }

        let document = self.inner.load(sprinkle, locale, relative)?;
        self.documents.borrow_mut().insert(key, document.clone());
        Ok(document)
    }
}
