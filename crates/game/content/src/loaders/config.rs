//! Combat configuration loader.

use std::path::Path;

use combat_core::CombatConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for combat configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys keep their [`CombatConfig::default`] values, so the file
    /// only needs to list the knobs it tunes.
    pub fn load(path: &Path) -> LoadResult<CombatConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parses TOML text directly.
    pub fn parse(content: &str) -> LoadResult<CombatConfig> {
        let config: CombatConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        anyhow::ensure!(
            config.crit_chance <= 100,
            "crit_chance must be a percentage, got {}",
            config.crit_chance
        );
        anyhow::ensure!(
            config.crit_multiplier >= 1,
            "crit_multiplier must be at least 1"
        );
        Ok(config)
    }
}
