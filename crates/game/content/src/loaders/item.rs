//! Item catalog loader.

use std::path::Path;

use combat_core::{Backpack, Item};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, ensure_unique_ids, read_file};

/// Item catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemCatalog {
    pub items: Vec<Item>,
}

/// Loader for item catalog from RON files.
pub struct ItemLoader;

impl ItemLoader {
    /// Load item catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<Vec<Item>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<Item>> {
        let catalog: ItemCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse item catalog RON: {}", e))?;

        ensure_unique_ids("item", catalog.items.iter().map(|item| item.id.as_str()))?;
        Ok(catalog.items)
    }

    /// Loads the catalog straight into a [`Backpack`], one of each item.
    pub fn load_backpack(path: &Path) -> LoadResult<Backpack> {
        Ok(Backpack::with_items(Self::load(path)?))
    }
}
