//! Skill catalog loader.

use std::path::Path;

use combat_core::{Skill, SkillEffect};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, ensure_unique_ids, read_file};

/// Skill catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillBook {
    pub skills: Vec<Skill>,
}

/// Loader for player skills from RON files.
pub struct SkillLoader;

impl SkillLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<Skill>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parses RON text. A skill without effects would be a free no-op card
    /// and is rejected.
    pub fn parse(content: &str) -> LoadResult<Vec<Skill>> {
        let book: SkillBook = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse skill catalog RON: {}", e))?;

        ensure_unique_ids("skill", book.skills.iter().map(|skill| skill.id.as_str()))?;
        for skill in &book.skills {
            anyhow::ensure!(
                !skill.effects.is_empty(),
                "Skill '{}' has no effects",
                skill.id
            );
        }
        Ok(book.skills)
    }

    /// Picks the skills named in `ids`, in that order.
    pub fn select(skills: &[Skill], ids: &[&str]) -> LoadResult<Vec<Skill>> {
        ids.iter()
            .map(|id| {
                skills
                    .iter()
                    .find(|skill| skill.id == *id)
                    .cloned()
                    .ok_or_else(|| anyhow::anyhow!("Unknown skill id '{}'", id))
            })
            .collect()
    }
}

/// Total strike damage of a skill, ignoring the player's modifiers.
pub fn base_damage(skill: &Skill) -> u32 {
    skill
        .effects
        .iter()
        .map(|effect| match effect {
            SkillEffect::Strike { damage } => *damage,
            _ => 0,
        })
        .sum()
}
