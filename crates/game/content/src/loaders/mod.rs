//! Content loaders for reading combat data from files.
//!
//! Every loader parses one file into `combat-core` types through serde and
//! rejects catalogs that would break combat invariants (duplicate ids,
//! zero-health enemies, empty patterns).

pub mod config;
pub mod enemy;
pub mod factory;
pub mod item;
pub mod skill;

pub use config::ConfigLoader;
pub use enemy::EnemyLoader;
pub use factory::ContentFactory;
pub use item::ItemLoader;
pub use skill::SkillLoader;

use std::collections::HashSet;
use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

/// Fails on the first id that appears twice in a catalog.
pub(crate) fn ensure_unique_ids<'a>(
    kind: &str,
    ids: impl IntoIterator<Item = &'a str>,
) -> LoadResult<()> {
    let mut seen = HashSet::new();
    for id in ids {
        anyhow::ensure!(!id.is_empty(), "{kind} catalog contains an empty id");
        anyhow::ensure!(seen.insert(id), "Duplicate {kind} id '{id}'");
    }
    Ok(())
}
