//! Consumable items and the inventory collaborator.

use crate::status::EffectKind;

/// What using an item does.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemEffect {
    Heal { amount: u32 },
    Fortify { defense: u32 },
    /// Damages the enemy through its defense.
    Bomb { damage: u32 },
    Energize { energy: u32 },
    Inflict { effect: EffectKind, duration: u32 },
    /// Removes every debuff from the player.
    Cleanse,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub id: String,
    pub name: String,
    pub effect: ItemEffect,
}

impl Item {
    pub fn new(id: impl Into<String>, name: impl Into<String>, effect: ItemEffect) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            effect,
        }
    }
}

/// The player's item storage, as seen by a combat session.
pub trait Inventory: Send {
    /// Index of the first item with this id.
    fn find_item(&self, id: &str) -> Option<usize>;

    fn item_at(&self, index: usize) -> Option<&Item>;

    /// Removes and returns the item at `index`.
    fn remove_at(&mut self, index: usize) -> Option<Item>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory inventory backed by a `Vec`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Backpack {
    items: Vec<Item>,
}

impl Backpack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: Vec<Item>) -> Self {
        Self { items }
    }

    pub fn push(&mut self, item: Item) {
        self.items.push(item);
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }
}

impl Inventory for Backpack {
    fn find_item(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    fn item_at(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    fn remove_at(&mut self, index: usize) -> Option<Item> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    fn len(&self) -> usize {
        self.items.len()
    }
}
