//! The player character: gold, kit and collected treasures.
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::constants::TREASURE_SLOTS;
use crate::numbers::apply_gold_delta;
use crate::state::{Item, Treasure};

/// Tools carried into the test-mode session.
pub const PREFILLED_KIT: [Item; 7] = [
    Item::Water,
    Item::Rope,
    Item::Machete,
    Item::Horse,
    Item::Boat,
    Item::Boots,
    Item::Shovel,
];

/// Fixed-capacity tool slots. Empty slots stay in place so items keep their
/// position when something in front of them is sold or lost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kit {
    slots: SmallVec<[Option<Item>; 8]>,
}

impl Kit {
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: SmallVec::from_elem(None, capacity),
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn contains(&self, item: Item) -> bool {
        self.position(item).is_some()
    }

    #[must_use]
    pub fn position(&self, item: Item) -> Option<usize> {
        self.slots.iter().position(|slot| *slot == Some(item))
    }

    #[must_use]
    pub fn first_empty(&self) -> Option<usize> {
        self.slots.iter().position(Option::is_none)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    pub fn items(&self) -> impl Iterator<Item = Item> + '_ {
        self.slots.iter().filter_map(|slot| *slot)
    }

    /// Place `item` in the first free slot. Duplicates and full kits are refused.
    fn insert(&mut self, item: Item) -> bool {
        if self.contains(item) {
            return false;
        }
        match self.first_empty() {
            Some(idx) => {
                self.slots[idx] = Some(item);
                true
            }
            None => false,
        }
    }

    fn remove(&mut self, item: Item) -> bool {
        match self.position(item) {
            Some(idx) => {
                self.slots[idx] = None;
                true
            }
            None => false,
        }
    }
}

/// Why a purchase did not go through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PurchaseRejection {
    /// Only the sword may be handed over for nothing.
    NoPrice,
    CannotAfford,
    AlreadyOwned,
    KitFull,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Purchase {
    Paid { cost: u32 },
    /// The shopkeeper saw the sword and waived the price.
    Waived,
    Rejected(PurchaseRejection),
}

impl Purchase {
    #[must_use]
    pub const fn is_bought(self) -> bool {
        !matches!(self, Self::Rejected(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SaleRejection {
    Worthless,
    NotOwned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sale {
    Sold { price: u32 },
    Rejected(SaleRejection),
}

impl Sale {
    #[must_use]
    pub const fn is_sold(self) -> bool {
        matches!(self, Self::Sold { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hunter {
    name: String,
    gold: u32,
    kit: Kit,
    treasures: [Option<Treasure>; TREASURE_SLOTS],
}

impl Hunter {
    #[must_use]
    pub fn new(name: impl Into<String>, starting_gold: u32, kit_capacity: usize) -> Self {
        Self {
            name: name.into(),
            gold: starting_gold,
            kit: Kit::with_capacity(kit_capacity),
            treasures: [None; TREASURE_SLOTS],
        }
    }

    /// A hunter who already owns every terrain tool and a shovel.
    #[must_use]
    pub fn prefilled(name: impl Into<String>, starting_gold: u32, kit_capacity: usize) -> Self {
        let mut hunter = Self::new(name, starting_gold, kit_capacity.max(PREFILLED_KIT.len()));
        for item in PREFILLED_KIT {
            hunter.kit.insert(item);
        }
        hunter
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn gold(&self) -> u32 {
        self.gold
    }

    #[must_use]
    pub const fn kit(&self) -> &Kit {
        &self.kit
    }

    #[must_use]
    pub const fn treasures(&self) -> &[Option<Treasure>; TREASURE_SLOTS] {
        &self.treasures
    }

    /// Add `delta` to gold, never dropping below zero.
    pub fn change_gold(&mut self, delta: i64) {
        self.gold = apply_gold_delta(self.gold, delta);
    }

    /// Buy `item` for `cost` gold. A sword in the kit makes every purchase free.
    pub fn buy_item(&mut self, item: Item, cost: u32) -> Purchase {
        let armed = self.has_item_in_kit(Item::Sword);
        if cost == 0 && item != Item::Sword {
            return Purchase::Rejected(PurchaseRejection::NoPrice);
        }
        if self.gold < cost && !armed {
            return Purchase::Rejected(PurchaseRejection::CannotAfford);
        }
        if self.has_item_in_kit(item) {
            return Purchase::Rejected(PurchaseRejection::AlreadyOwned);
        }
        if !self.kit.insert(item) {
            return Purchase::Rejected(PurchaseRejection::KitFull);
        }
        if armed {
            Purchase::Waived
        } else {
            self.gold -= cost;
            Purchase::Paid { cost }
        }
    }

    /// Sell `item` back for `buy_back_price`. The sword may go for nothing.
    pub fn sell_item(&mut self, item: Item, buy_back_price: u32) -> Sale {
        if buy_back_price == 0 && item != Item::Sword {
            return Sale::Rejected(SaleRejection::Worthless);
        }
        if !self.kit.remove(item) {
            return Sale::Rejected(SaleRejection::NotOwned);
        }
        self.change_gold(i64::from(buy_back_price));
        Sale::Sold {
            price: buy_back_price,
        }
    }

    pub fn remove_item_from_kit(&mut self, item: Item) -> bool {
        self.kit.remove(item)
    }

    /// Store `treasure` in `slot`. Refuses dust, duplicates, taken or missing slots.
    pub fn add_treasure(&mut self, slot: usize, treasure: Treasure) -> bool {
        if !treasure.is_collectible() || self.has_item_in_treasures(treasure) {
            return false;
        }
        match self.treasures.get_mut(slot) {
            Some(entry) if entry.is_none() => {
                *entry = Some(treasure);
                true
            }
            _ => false,
        }
    }

    #[must_use]
    pub fn has_item_in_kit(&self, item: Item) -> bool {
        self.kit.contains(item)
    }

    #[must_use]
    pub fn has_item_in_treasures(&self, treasure: Treasure) -> bool {
        self.treasures.contains(&Some(treasure))
    }

    #[must_use]
    pub fn empty_position_in_kit(&self) -> Option<usize> {
        self.kit.first_empty()
    }

    #[must_use]
    pub fn empty_position_in_treasures(&self) -> Option<usize> {
        self.treasures.iter().position(Option::is_none)
    }

    #[must_use]
    pub fn treasure_count(&self) -> usize {
        self.treasures.iter().flatten().count()
    }

    #[must_use]
    pub fn has_all_treasures(&self) -> bool {
        self.empty_position_in_treasures().is_none()
    }

    /// Kit contents in slot order, space separated.
    #[must_use]
    pub fn inventory(&self) -> String {
        self.kit
            .items()
            .map(Item::label)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// "a Crown", "a Crown and a Gem", "a Crown, a Gem, and a Trophy".
    #[must_use]
    pub fn treasures_inventory(&self) -> String {
        let found: Vec<String> = self
            .treasures
            .iter()
            .flatten()
            .map(|treasure| format!("a {treasure}"))
            .collect();
        match found.as_slice() {
            [] => String::new(),
            [only] => only.clone(),
            [first, second] => format!("{first} and {second}"),
            [init @ .., last] => format!("{}, and {last}", init.join(", ")),
        }
    }

    #[must_use]
    pub fn info_string(&self) -> String {
        let mut info = format!("{} has {} gold", self.name, self.gold);
        if !self.kit.is_empty() {
            info.push_str(" and ");
            info.push_str(&self.inventory());
        }
        info.push_str("\nTreasures found: ");
        if self.treasure_count() == 0 {
            info.push_str("none");
        } else {
            info.push_str(&self.treasures_inventory());
        }
        info
    }
}
