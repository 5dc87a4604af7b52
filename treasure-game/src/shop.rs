//! Town shop: catalog prices and the buy/sell counter.
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::CatalogEntry;
use crate::hunter::{Hunter, Purchase, PurchaseRejection, Sale, SaleRejection};
use crate::numbers::buy_back_price;
use crate::rng::roll_index;
use crate::state::{Difficulty, Item};

/// Things the shopkeeper might say when a sword changes the deal.
const FREEBIE_LINES: [&str; 3] = [
    "The shopkeeper saw your sword and got scared... you got the {item} for free.",
    "You gained the shopkeeper's respect after he saw that sharp thing... you got the {item} for free.",
    "The shopkeeper was happy after seeing your hand... you got the {item} for free.",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShopMode {
    Buy,
    Sell,
}

/// Result of one trip to the counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShopOutcome {
    Bought {
        item: Item,
        cost: u32,
    },
    /// Handed over for free; `line` picks the shopkeeper's remark.
    Waived {
        item: Item,
        line: usize,
    },
    Sold {
        item: Item,
        price: u32,
    },
    BuyRejected {
        item: Item,
        price: u32,
        reason: PurchaseRejection,
    },
    SellRejected {
        item: Item,
        reason: SaleRejection,
    },
    NotStocked {
        item: Item,
    },
    Unrecognized {
        input: String,
    },
}

impl ShopOutcome {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(
            self,
            Self::Bought { .. } | Self::Waived { .. } | Self::Sold { .. }
        )
    }
}

impl fmt::Display for ShopOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bought { item, cost } => {
                write!(f, "Ye' got yerself a {item}. Come again soon. ({cost} gold)")
            }
            Self::Waived { item, line } => {
                let template = FREEBIE_LINES[line % FREEBIE_LINES.len()];
                f.write_str(&template.replace("{item}", item.label()))
            }
            Self::Sold { item, price } => {
                write!(f, "Pleasure doin' business with you. You sold your {item} for {price} gold.")
            }
            Self::BuyRejected {
                item,
                price,
                reason,
            } => match reason {
                PurchaseRejection::AlreadyOwned => {
                    write!(f, "You already have a {item}. One is plenty.")
                }
                PurchaseRejection::CannotAfford => write!(
                    f,
                    "Hmm, either you don't have enough gold or you've already got one of those! A {item} costs {price} gold."
                ),
                PurchaseRejection::KitFull => {
                    write!(f, "Your kit is full. Sell something before buying a {item}.")
                }
                PurchaseRejection::NoPrice => {
                    write!(f, "The {item} isn't for sale today.")
                }
            },
            Self::SellRejected { item, reason } => match reason {
                SaleRejection::NotOwned => write!(f, "Stop stringin' me along! You don't have a {item}."),
                SaleRejection::Worthless => write!(f, "Nobody's paying for a {item} around here."),
            },
            Self::NotStocked { item } => write!(f, "We don't deal in {item}s here."),
            Self::Unrecognized { input } => {
                write!(f, "Never heard of a \"{input}\". Check the list and try again.")
            }
        }
    }
}

/// Price list plus the markdown applied to buy-backs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shop {
    markdown: f64,
    catalog: Vec<CatalogEntry>,
}

impl Shop {
    /// Build a shop stocked for `difficulty`. Samurai-only shelves are dropped
    /// in every other mode.
    #[must_use]
    pub fn new(markdown: f64, catalog: &[CatalogEntry], difficulty: Difficulty) -> Self {
        let catalog = catalog
            .iter()
            .filter(|entry| !entry.samurai_only || difficulty.stocks_sword())
            .copied()
            .collect();
        Self { markdown, catalog }
    }

    #[must_use]
    pub fn price_of(&self, item: Item) -> Option<u32> {
        self.catalog
            .iter()
            .find(|entry| entry.item == item)
            .map(|entry| entry.price)
    }

    #[must_use]
    pub fn buy_back_price(&self, item: Item) -> Option<u32> {
        self.price_of(item)
            .map(|price| buy_back_price(price, self.markdown))
    }

    /// Price list for the given counter, one item per line.
    #[must_use]
    pub fn inventory(&self, mode: ShopMode) -> String {
        self.catalog
            .iter()
            .map(|entry| {
                let price = match mode {
                    ShopMode::Buy => entry.price,
                    ShopMode::Sell => buy_back_price(entry.price, self.markdown),
                };
                format!("{}: {price} gold", entry.item)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Handle one request typed at the counter.
    pub fn enter<R: RngCore + ?Sized>(
        &self,
        hunter: &mut Hunter,
        mode: ShopMode,
        request: &str,
        rng: &mut R,
    ) -> ShopOutcome {
        let item = match request.parse::<Item>() {
            Ok(item) => item,
            Err(err) => {
                log::debug!("shop rejected request: {err}");
                return ShopOutcome::Unrecognized { input: err.0 };
            }
        };
        match mode {
            ShopMode::Buy => self.buy(hunter, item, rng),
            ShopMode::Sell => self.sell(hunter, item),
        }
    }

    fn buy<R: RngCore + ?Sized>(&self, hunter: &mut Hunter, item: Item, rng: &mut R) -> ShopOutcome {
        let Some(price) = self.price_of(item) else {
            return ShopOutcome::NotStocked { item };
        };
        match hunter.buy_item(item, price) {
            Purchase::Paid { cost } => ShopOutcome::Bought { item, cost },
            Purchase::Waived => ShopOutcome::Waived {
                item,
                line: roll_index(rng, FREEBIE_LINES.len()),
            },
            Purchase::Rejected(reason) => ShopOutcome::BuyRejected {
                item,
                price,
                reason,
            },
        }
    }

    fn sell(&self, hunter: &mut Hunter, item: Item) -> ShopOutcome {
        let Some(price) = self.buy_back_price(item) else {
            return ShopOutcome::NotStocked { item };
        };
        match hunter.sell_item(item, price) {
            Sale::Sold { price } => ShopOutcome::Sold { item, price },
            Sale::Rejected(reason) => ShopOutcome::SellRejected { item, reason },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::rng::testing::ScriptedRng;

    fn shop(markdown: f64, difficulty: Difficulty) -> Shop {
        Shop::new(markdown, &GameConfig::default().catalog, difficulty)
    }

    #[test]
    fn buy_charges_catalog_price() {
        let shop = shop(0.5, Difficulty::Normal);
        let mut hunter = Hunter::new("rex", 20, 7);
        let mut rng = ScriptedRng::new(&[0.0]);
        let outcome = shop.enter(&mut hunter, ShopMode::Buy, "Horse", &mut rng);
        assert_eq!(
            outcome,
            ShopOutcome::Bought {
                item: Item::Horse,
                cost: 12
            }
        );
        assert_eq!(hunter.gold(), 8);
        assert_eq!(rng.calls(), 0);
    }

    #[test]
    fn sell_pays_floored_markdown() {
        let shop = shop(0.25, Difficulty::Hard);
        let mut hunter = Hunter::new("rex", 20, 7);
        let mut rng = ScriptedRng::new(&[0.0]);
        assert!(shop.enter(&mut hunter, ShopMode::Buy, "machete", &mut rng).is_success());
        assert_eq!(hunter.gold(), 14);
        let outcome = shop.enter(&mut hunter, ShopMode::Sell, "machete", &mut rng);
        assert_eq!(
            outcome,
            ShopOutcome::Sold {
                item: Item::Machete,
                price: 1
            }
        );
        assert_eq!(hunter.gold(), 15);
    }

    #[test]
    fn worthless_sale_is_refused() {
        let shop = shop(0.25, Difficulty::Hard);
        let mut hunter = Hunter::new("rex", 20, 7);
        let mut rng = ScriptedRng::new(&[0.0]);
        assert!(shop.enter(&mut hunter, ShopMode::Buy, "water", &mut rng).is_success());
        let outcome = shop.enter(&mut hunter, ShopMode::Sell, "water", &mut rng);
        assert_eq!(
            outcome,
            ShopOutcome::SellRejected {
                item: Item::Water,
                reason: SaleRejection::Worthless
            }
        );
        assert!(hunter.has_item_in_kit(Item::Water));
    }

    #[test]
    fn selling_missing_item_keeps_gold() {
        let shop = shop(0.5, Difficulty::Normal);
        let mut hunter = Hunter::new("rex", 20, 7);
        let mut rng = ScriptedRng::new(&[0.0]);
        let outcome = shop.enter(&mut hunter, ShopMode::Sell, "boat", &mut rng);
        assert!(!outcome.is_success());
        assert_eq!(hunter.gold(), 20);
    }

    #[test]
    fn unknown_item_is_explained_not_fatal() {
        let shop = shop(0.5, Difficulty::Normal);
        let mut hunter = Hunter::new("rex", 20, 7);
        let mut rng = ScriptedRng::new(&[0.0]);
        let outcome = shop.enter(&mut hunter, ShopMode::Buy, "jetpack", &mut rng);
        assert_eq!(
            outcome,
            ShopOutcome::Unrecognized {
                input: "jetpack".to_string()
            }
        );
        assert!(outcome.to_string().contains("jetpack"));
    }

    #[test]
    fn sword_only_stocked_in_samurai_mode() {
        let normal = shop(0.5, Difficulty::Normal);
        assert_eq!(normal.price_of(Item::Sword), None);
        let mut hunter = Hunter::new("rex", 20, 7);
        let mut rng = ScriptedRng::new(&[0.0]);
        assert_eq!(
            normal.enter(&mut hunter, ShopMode::Buy, "sword", &mut rng),
            ShopOutcome::NotStocked { item: Item::Sword }
        );

        let samurai = shop(0.5, Difficulty::Samurai);
        assert_eq!(samurai.price_of(Item::Sword), Some(0));
    }

    #[test]
    fn sword_holder_gets_free_goods_with_flavor() {
        let shop = shop(0.5, Difficulty::Samurai);
        let mut hunter = Hunter::new("rex", 0, 8);
        let mut rng = ScriptedRng::new(&[0.7]);
        assert!(shop.enter(&mut hunter, ShopMode::Buy, "sword", &mut rng).is_success());
        let outcome = shop.enter(&mut hunter, ShopMode::Buy, "boat", &mut rng);
        assert_eq!(
            outcome,
            ShopOutcome::Waived {
                item: Item::Boat,
                line: 2
            }
        );
        assert_eq!(
            outcome.to_string(),
            "The shopkeeper was happy after seeing your hand... you got the boat for free."
        );
        assert_eq!(hunter.gold(), 0);
    }

    #[test]
    fn inventory_lists_both_counters() {
        let shop = shop(0.5, Difficulty::Normal);
        let buy = shop.inventory(ShopMode::Buy);
        let sell = shop.inventory(ShopMode::Sell);
        assert!(buy.contains("boat: 20 gold"));
        assert!(sell.contains("boat: 10 gold"));
        assert!(!buy.contains("sword"));
    }
}
