//! Upgrade catalog: lazy per-category load with a success-only cache, plus
//! the eagerly built [CategoryCatalog] with its flattened name index.
//!
//! A failed load (missing file, malformed JSON) is a distinct observable
//! error, never collapsed into an empty list; an empty list always means the
//! category decoded successfully with zero cards.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use thiserror::Error;

use crate::data::upgrade::{UpgradeCategory, UpgradeRecord, ALL_CATEGORIES};

/// Subdirectory under the card-data root holding category fragments.
const UPGRADES_DIR: &str = "upgrades";

/// Why one category fragment could not be loaded.
#[derive(Debug, Error)]
pub enum CategoryLoadCause {
    #[error("unable to read '{path}': {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("unable to parse '{path}': {source}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// A category whose fragment is unavailable. Distinct from a category that
/// legitimately has no cards.
#[derive(Debug, Error)]
#[error("upgrade category '{category}' unavailable: {cause}")]
pub struct CategoryLoadError {
    pub category: UpgradeCategory,
    #[source]
    pub cause: CategoryLoadCause,
}

/// Name-only lookup outcome in the flattened index.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameLookupError {
    #[error("no upgrade named '{name}' in any category")]
    NotFound { name: String },
    /// The same card name exists in more than one category. Callers needing
    /// a scoped answer use [UpgradeCatalog::load_category] + xws filter.
    #[error("upgrade name '{name}' is ambiguous across categories: {categories:?}")]
    Ambiguous {
        name: String,
        categories: Vec<UpgradeCategory>,
    },
}

/// Loads category fragments from `<root>/upgrades/` and caches each list
/// after its first successful decode. Failed loads are not cached, so a
/// repaired fragment is picked up on the next call.
#[derive(Debug)]
pub struct UpgradeCatalog {
    root: PathBuf,
    cache: Mutex<HashMap<UpgradeCategory, Arc<Vec<UpgradeRecord>>>>,
}

impl UpgradeCatalog {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        UpgradeCatalog {
            root: root.into(),
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Path of one category's fragment file.
    pub fn category_path(&self, category: UpgradeCategory) -> PathBuf {
        self.root
            .join(UPGRADES_DIR)
            .join(format!("{}.json", category.file_stem()))
    }

    /// Load one category, returning the cached list when present. The
    /// returned `Arc` is shared with the cache; records are read-only.
    pub fn load_category(
        &self,
        category: UpgradeCategory,
    ) -> Result<Arc<Vec<UpgradeRecord>>, CategoryLoadError> {
        if let Some(cached) = self.cache.lock().expect("catalog cache poisoned").get(&category) {
            return Ok(Arc::clone(cached));
        }

        let path = self.category_path(category);
        let raw = fs::read_to_string(&path).map_err(|source| CategoryLoadError {
            category,
            cause: CategoryLoadCause::Unreadable { path: path.clone(), source },
        })?;
        let records: Vec<UpgradeRecord> =
            serde_json::from_str(&raw).map_err(|source| CategoryLoadError {
                category,
                cause: CategoryLoadCause::Invalid { path, source },
            })?;

        let records = Arc::new(records);
        self.cache
            .lock()
            .expect("catalog cache poisoned")
            .insert(category, Arc::clone(&records));
        Ok(records)
    }

    /// Attempt all 21 categories eagerly and build the [CategoryCatalog].
    /// Unavailable categories are recorded per-category, not fatal.
    pub fn build_all(&self) -> CategoryCatalog {
        let mut by_category = BTreeMap::new();
        let mut unavailable = BTreeMap::new();
        for category in ALL_CATEGORIES {
            match self.load_category(category) {
                Ok(records) => {
                    by_category.insert(category, records);
                }
                Err(err) => {
                    unavailable.insert(category, err.to_string());
                }
            }
        }
        CategoryCatalog::from_parts(by_category, unavailable)
    }
}

/// All loadable categories plus the derived flattened name index. Immutable
/// after construction; share freely across threads.
#[derive(Debug)]
pub struct CategoryCatalog {
    by_category: BTreeMap<UpgradeCategory, Arc<Vec<UpgradeRecord>>>,
    /// Load-error text per category that failed, keyed in display order.
    unavailable: BTreeMap<UpgradeCategory, String>,
    /// Card name -> every (category, position) carrying that name.
    name_index: HashMap<String, Vec<(UpgradeCategory, usize)>>,
}

impl CategoryCatalog {
    fn from_parts(
        by_category: BTreeMap<UpgradeCategory, Arc<Vec<UpgradeRecord>>>,
        unavailable: BTreeMap<UpgradeCategory, String>,
    ) -> Self {
        let mut name_index: HashMap<String, Vec<(UpgradeCategory, usize)>> = HashMap::new();
        for (category, records) in &by_category {
            for (position, record) in records.iter().enumerate() {
                name_index
                    .entry(record.name.clone())
                    .or_default()
                    .push((*category, position));
            }
        }
        CategoryCatalog {
            by_category,
            unavailable,
            name_index,
        }
    }

    /// Records for one category; None when the category failed to load.
    pub fn category(&self, category: UpgradeCategory) -> Option<&[UpgradeRecord]> {
        self.by_category.get(&category).map(|r| r.as_slice())
    }

    /// Categories whose fragments failed to load, with the failure text.
    pub fn unavailable(&self) -> &BTreeMap<UpgradeCategory, String> {
        &self.unavailable
    }

    /// Name-only lookup across all categories. A name present in more than
    /// one category is an explicit ambiguity, never a silent first match.
    pub fn find_by_name(
        &self,
        name: &str,
    ) -> Result<(UpgradeCategory, &UpgradeRecord), NameLookupError> {
        let hits = self
            .name_index
            .get(name)
            .ok_or_else(|| NameLookupError::NotFound {
                name: name.to_string(),
            })?;
        match hits.as_slice() {
            [(category, position)] => Ok((*category, &self.by_category[category][*position])),
            many => Err(NameLookupError::Ambiguous {
                name: name.to_string(),
                categories: many.iter().map(|(c, _)| *c).collect(),
            }),
        }
    }

    /// Total card count across loaded categories.
    pub fn card_count(&self) -> usize {
        self.by_category.values().map(|r| r.len()).sum()
    }
}
