use std::fs;
use std::path::Path;

use crate::error::AppResult;

/// Item-name lookup used only for display
///
/// Scoring and selection never depend on a catalog. When names are missing
/// the report falls back to the raw item index.
#[cfg_attr(test, mockall::automock)]
pub trait ItemCatalog {
    /// Display name of an item, if known
    fn name(&self, item: usize) -> Option<String>;

    /// Catalog name for logging and debugging
    fn source(&self) -> &'static str;
}

/// Show names loaded from a `shows.txt` style file, one per line
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShowCatalog {
    names: Vec<String>,
}

impl ShowCatalog {
    pub fn from_names(names: Vec<String>) -> Self {
        Self { names }
    }

    /// Reads the catalog file; line `i` names item `i`
    pub fn load(path: &Path) -> AppResult<Self> {
        let contents = fs::read_to_string(path)?;
        let catalog = Self::parse(&contents);

        tracing::info!(
            path = %path.display(),
            items = catalog.len(),
            "Show catalog loaded"
        );

        Ok(catalog)
    }

    /// Parses one name per line, dropping surrounding double quotes
    pub fn parse(contents: &str) -> Self {
        let names = contents
            .lines()
            .map(|line| {
                let line = line.trim();
                line.strip_prefix('"')
                    .and_then(|l| l.strip_suffix('"'))
                    .unwrap_or(line)
                    .to_string()
            })
            .collect();

        Self { names }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl ItemCatalog for ShowCatalog {
    fn name(&self, item: usize) -> Option<String> {
        self.names.get(item).cloned()
    }

    fn source(&self) -> &'static str {
        "shows_file"
    }
}

/// Catalog that knows no names
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyCatalog;

impl ItemCatalog for EmptyCatalog {
    fn name(&self, _item: usize) -> Option<String> {
        None
    }

    fn source(&self) -> &'static str {
        "empty"
    }
}

/// Loads the catalog at `path`, degrading to [`EmptyCatalog`] on failure
///
/// A missing or unreadable catalog is not an error: the report still
/// renders, with item indices in place of names.
pub fn load_catalog(path: Option<&Path>) -> Box<dyn ItemCatalog> {
    let Some(path) = path else {
        tracing::info!("No show catalog configured, names will show as indices");
        return Box::new(EmptyCatalog);
    };

    match ShowCatalog::load(path) {
        Ok(catalog) => Box::new(catalog),
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Show catalog unavailable, names will show as indices"
            );
            Box::new(EmptyCatalog)
        }
    }
}
