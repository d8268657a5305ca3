//! Enemy catalog loader.

use std::path::Path;

use combat_core::{Bestiary, EnemyBehavior, EnemyTemplate};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, ensure_unique_ids, read_file};

/// Enemy catalog structure for RON files.
///
/// ```ron
/// (enemies: [
///     (
///         id: "sentry",
///         name: "Sentry",
///         health: 20,
///         attack: 8,
///         defense: 3,
///         rewards: (gold: 10, credits: 25),
///         behavior: Pattern([attack, defend]),
///     ),
/// ])
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyRoster {
    pub enemies: Vec<EnemyTemplate>,
}

/// Loader for enemy templates from RON files.
pub struct EnemyLoader;

impl EnemyLoader {
    /// Load the enemy catalog into a [`Bestiary`].
    pub fn load(path: &Path) -> LoadResult<Bestiary> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid enemy catalog {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<Bestiary> {
        let roster: EnemyRoster = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse enemy catalog RON: {}", e))?;

        ensure_unique_ids(
            "enemy",
            roster.enemies.iter().map(|template| template.id.as_str()),
        )?;
        for template in &roster.enemies {
            validate(template)?;
        }
        Ok(roster.enemies.into_iter().collect())
    }
}

fn validate(template: &EnemyTemplate) -> LoadResult<()> {
    anyhow::ensure!(
        template.health > 0,
        "Enemy '{}' must have positive health",
        template.id
    );
    if let EnemyBehavior::Pattern(pattern) = &template.behavior {
        anyhow::ensure!(
            !pattern.is_empty(),
            "Enemy '{}' has an empty action pattern",
            template.id
        );
    }
    Ok(())
}
