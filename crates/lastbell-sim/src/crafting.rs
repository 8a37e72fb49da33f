//! Inventory multiset and the crafting recipe book.

use lastbell_core::enums::ItemKind;

/// Items in acquisition order. Duplicates allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    items: Vec<ItemKind>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: ItemKind) {
        self.items.push(item);
    }

    /// Remove the first occurrence of `item`.
    pub fn remove_first(&mut self, item: ItemKind) -> bool {
        match self.items.iter().position(|i| *i == item) {
            Some(idx) => {
                self.items.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, item: ItemKind) -> bool {
        self.items.contains(&item)
    }

    pub fn count(&self, item: ItemKind) -> usize {
        self.items.iter().filter(|i| **i == item).count()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn as_slice(&self) -> &[ItemKind] {
        &self.items
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl FromIterator<ItemKind> for Inventory {
    fn from_iter<I: IntoIterator<Item = ItemKind>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

/// Immutable recipe entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recipe {
    pub id: &'static str,
    pub result: ItemKind,
    pub name: &'static str,
    pub ingredients: &'static [ItemKind],
    pub description: &'static str,
}

pub static RECIPES: [Recipe; 6] = [
    Recipe {
        id: "MOLOTOV",
        result: ItemKind::Molotov,
        name: "Molotov",
        ingredients: &[ItemKind::Alcohol, ItemKind::Cloth],
        description: "Stuns a ghost for 5 seconds",
    },
    Recipe {
        id: "HERBAL_MEDKIT",
        result: ItemKind::HerbalMedkit,
        name: "Herbal Medkit",
        ingredients: &[ItemKind::Herb, ItemKind::Water],
        description: "Restores 50 health",
    },
    Recipe {
        id: "ADRENALINE",
        result: ItemKind::Adrenaline,
        name: "Adrenaline",
        ingredients: &[ItemKind::Pills, ItemKind::Battery],
        description: "Restores stamina and sanity",
    },
    Recipe {
        id: "EMP",
        result: ItemKind::Emp,
        name: "EMP Device",
        ingredients: &[ItemKind::Battery, ItemKind::Wire, ItemKind::Metal],
        description: "Paralyzes ghosts in a wide radius (10s)",
    },
    Recipe {
        id: "STIM",
        result: ItemKind::Stim,
        name: "Stimulant",
        ingredients: &[ItemKind::Pills, ItemKind::Water, ItemKind::Herb],
        description: "Unlimited stamina for 30 seconds",
    },
    Recipe {
        id: "ARMOR",
        result: ItemKind::Armor,
        name: "Scrap Armor",
        ingredients: &[ItemKind::Cloth, ItemKind::Tape, ItemKind::Metal],
        description: "Grants 50 extra health",
    },
];

pub fn recipe_for(result: ItemKind) -> Option<&'static Recipe> {
    RECIPES.iter().find(|r| r.result == result)
}

/// Consume one first occurrence per ingredient and append the result.
/// Leaves `inventory` untouched when anything is missing.
pub fn try_craft(inventory: &mut Inventory, recipe: &Recipe) -> bool {
    let mut working = inventory.clone();
    for ingredient in recipe.ingredients {
        if !working.remove_first(*ingredient) {
            return false;
        }
    }
    working.push(recipe.result);
    *inventory = working;
    true
}
