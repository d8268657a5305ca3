//! Enemy template lookup.

use std::collections::{BTreeMap, HashMap};

use super::EnemyTemplate;

/// Read-only source of enemy templates keyed by id.
///
/// Used when a session starts and when a live enemy is restored from a
/// record.
pub trait EnemyCatalog {
    fn template(&self, id: &str) -> Option<&EnemyTemplate>;
}

impl EnemyCatalog for HashMap<String, EnemyTemplate> {
    fn template(&self, id: &str) -> Option<&EnemyTemplate> {
        self.get(id)
    }
}

impl EnemyCatalog for BTreeMap<String, EnemyTemplate> {
    fn template(&self, id: &str) -> Option<&EnemyTemplate> {
        self.get(id)
    }
}

/// Ordered in-memory catalog built from a list of templates.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Bestiary {
    templates: BTreeMap<String, EnemyTemplate>,
}

impl Bestiary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a template, replacing any previous one with the same id.
    pub fn insert(&mut self, template: EnemyTemplate) -> Option<EnemyTemplate> {
        self.templates.insert(template.id.clone(), template)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Template ids in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }
}

impl FromIterator<EnemyTemplate> for Bestiary {
    fn from_iter<I: IntoIterator<Item = EnemyTemplate>>(iter: I) -> Self {
        let mut bestiary = Self::new();
        for template in iter {
            bestiary.insert(template);
        }
        bestiary
    }
}

impl EnemyCatalog for Bestiary {
    fn template(&self, id: &str) -> Option<&EnemyTemplate> {
        self.templates.get(id)
    }
}
