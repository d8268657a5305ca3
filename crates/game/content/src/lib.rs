//! Data-driven combat content and its loaders.
//!
//! This crate reads the static catalogs a combat needs from RON/TOML files:
//! - Enemy templates, including patterns, decision trees and specials (RON)
//! - Player skills (RON)
//! - Consumable items (RON)
//! - Combat balance configuration (TOML)
//!
//! Content is handed to `combat-core` as plain values and never appears in
//! save records; enemies are re-resolved from the catalog by id.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, ContentFactory, EnemyLoader, ItemLoader, LoadResult, SkillLoader,
};
