//! A town and everything the hunter can do while passing through it.
//!
//! Shopping, exploring and brawling can be repeated freely. Digging and
//! treasure hunting are one-shot per town: a successful dig sets `searched`
//! and any hunt sets `hunted`, after which both report "already done".
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::{DifficultyProfile, PayoutConfig};
use crate::hunter::Hunter;
use crate::rng::{roll_chance, roll_die, roll_index, sample_ratio};
use crate::shop::{Shop, ShopMode, ShopOutcome};
use crate::state::{Item, Treasure};
use crate::terrain::{Terrain, TerrainKind};

/// Odds and payouts a town is built with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TownRules {
    pub toughness: f64,
    pub trouble_chance_tough: f64,
    pub trouble_chance_mild: f64,
    pub item_break_chance: f64,
    pub brawl_max_stake: u32,
    pub dig_success_chance: f64,
    pub dig_max_gold: u32,
}

impl TownRules {
    #[must_use]
    pub const fn from_profile(profile: &DifficultyProfile, payouts: &PayoutConfig) -> Self {
        Self {
            toughness: profile.toughness,
            trouble_chance_tough: profile.trouble_chance_tough,
            trouble_chance_mild: profile.trouble_chance_mild,
            item_break_chance: profile.item_break_chance,
            brawl_max_stake: payouts.brawl_max_stake,
            dig_success_chance: payouts.dig_success_chance,
            dig_max_gold: payouts.dig_max_gold,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeaveOutcome {
    Crossed {
        terrain: TerrainKind,
        item: Item,
        item_broke: bool,
    },
    Blocked {
        needed: Item,
    },
}

impl LeaveOutcome {
    #[must_use]
    pub const fn departed(self) -> bool {
        matches!(self, Self::Crossed { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TroubleOutcome {
    NoTrouble,
    Won { stake: u32 },
    /// `paid` is less than `stake` when the purse ran short.
    Lost { stake: u32, paid: u32 },
    /// Lost with an empty purse. Ends the game.
    Bankrupt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DigOutcome {
    Struck { gold: u32 },
    Dirt,
    AlreadyDug,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HuntOutcome {
    Found {
        treasure: Treasure,
        /// This find filled the last treasure slot.
        completes_set: bool,
    },
    Dust,
    AlreadyOwned(Treasure),
    AlreadyHunted,
}

impl fmt::Display for TroubleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const BRAWL: &str = "You want trouble, stranger!  You got it!\nOof! Umph! Ow!\n";
        match self {
            Self::NoTrouble => f.write_str("You couldn't find any trouble"),
            Self::Won { stake } => write!(
                f,
                "{BRAWL}Okay, stranger! You proved yer mettle. Here, take my gold.\nYou won the brawl and receive {stake} gold."
            ),
            Self::Lost { paid, .. } => write!(
                f,
                "{BRAWL}That'll teach you to go lookin' fer trouble in MY town! Now pay up!\nYou lost the brawl and pay {paid} gold."
            ),
            Self::Bankrupt => write!(
                f,
                "{BRAWL}That'll teach you to go lookin' fer trouble in MY town! Now pay up!\nYou lost and couldn't afford to pay up..."
            ),
        }
    }
}

impl fmt::Display for DigOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Struck { gold } => write!(f, "You dug up {gold} gold!"),
            Self::Dirt => f.write_str("You dug but only found dirt."),
            Self::AlreadyDug => f.write_str("Sorry, you already dug here."),
        }
    }
}

impl fmt::Display for HuntOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Found {
                treasure,
                completes_set: false,
            } => write!(f, "You got a {treasure}!"),
            Self::Found {
                treasure,
                completes_set: true,
            } => write!(
                f,
                "You got a {treasure}!\nCongratulations, you have found the last of the three treasures, you win!"
            ),
            Self::Dust => f.write_str("You dug up dust..."),
            Self::AlreadyOwned(treasure) => write!(
                f,
                "You found a {treasure}! However, you already own one of these.."
            ),
            Self::AlreadyHunted => f.write_str("You have already searched this town!"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Town {
    shop: Shop,
    terrain: Terrain,
    rules: TownRules,
    tough: bool,
    treasure: Option<Treasure>,
    searched: bool,
    hunted: bool,
    latest_news: String,
}

impl Town {
    /// Roll a fresh town: terrain first, then whether the locals are tough.
    pub fn new<R: RngCore + ?Sized>(shop: Shop, rules: TownRules, rng: &mut R) -> Self {
        let terrain = Terrain::roll(rng);
        let tough = roll_chance(rng, rules.toughness);
        Self::with_terrain(shop, terrain, rules, tough)
    }

    /// Build a town with a known terrain and temperament.
    #[must_use]
    pub fn with_terrain(shop: Shop, terrain: Terrain, rules: TownRules, tough: bool) -> Self {
        Self {
            shop,
            terrain,
            rules,
            tough,
            treasure: None,
            searched: false,
            hunted: false,
            latest_news: String::new(),
        }
    }

    #[must_use]
    pub const fn terrain(&self) -> &Terrain {
        &self.terrain
    }

    #[must_use]
    pub const fn shop(&self) -> &Shop {
        &self.shop
    }

    #[must_use]
    pub const fn is_tough(&self) -> bool {
        self.tough
    }

    #[must_use]
    pub const fn treasure(&self) -> Option<Treasure> {
        self.treasure
    }

    #[must_use]
    pub const fn searched(&self) -> bool {
        self.searched
    }

    #[must_use]
    pub const fn hunted(&self) -> bool {
        self.hunted
    }

    #[must_use]
    pub fn latest_news(&self) -> &str {
        &self.latest_news
    }

    #[must_use]
    pub const fn trouble_chance(&self) -> f64 {
        if self.tough {
            self.rules.trouble_chance_tough
        } else {
            self.rules.trouble_chance_mild
        }
    }

    /// Greet the hunter and bury this town's treasure.
    pub fn hunter_arrives<R: RngCore + ?Sized>(&mut self, hunter: &Hunter, rng: &mut R) -> Treasure {
        let treasure = Treasure::ROLL_TABLE[roll_index(rng, Treasure::ROLL_TABLE.len())];
        self.treasure = Some(treasure);
        let mood = if self.tough {
            "It's pretty rough around here, so watch yourself."
        } else {
            "We're just a sleepy little town with mild mannered folk."
        };
        self.latest_news = format!("Welcome to town, {}.\n{mood}", hunter.name());
        log::debug!(
            "town arrival: terrain={} tough={} treasure={treasure}",
            self.terrain.kind(),
            self.tough
        );
        treasure
    }

    pub fn enter_shop<R: RngCore + ?Sized>(
        &mut self,
        hunter: &mut Hunter,
        mode: ShopMode,
        request: &str,
        rng: &mut R,
    ) -> ShopOutcome {
        let outcome = self.shop.enter(hunter, mode, request, rng);
        self.latest_news = outcome.to_string();
        outcome
    }

    /// Try to cross the terrain. The tool used may break on the way.
    pub fn leave_town<R: RngCore + ?Sized>(&mut self, hunter: &mut Hunter, rng: &mut R) -> LeaveOutcome {
        let item = self.terrain.needed_item();
        if !self.terrain.can_cross_terrain(hunter) {
            self.latest_news = format!(
                "You can't leave town, {}. You don't have a {item}.",
                hunter.name()
            );
            return LeaveOutcome::Blocked { needed: item };
        }

        let item_broke = roll_chance(rng, self.rules.item_break_chance);
        self.latest_news = format!("You used your {item} to cross the {}.", self.terrain.kind());
        if item_broke {
            hunter.remove_item_from_kit(item);
            self.latest_news
                .push_str(&format!("\nUnfortunately, you lost your {item}"));
        }
        LeaveOutcome::Crossed {
            terrain: self.terrain.kind(),
            item,
            item_broke,
        }
    }

    /// Pick a fight for gold. Tough towns find trouble more often and win it
    /// less often. A sword settles every fight in the hunter's favor.
    pub fn look_for_trouble<R: RngCore + ?Sized>(
        &mut self,
        hunter: &mut Hunter,
        rng: &mut R,
    ) -> TroubleOutcome {
        let trouble_chance = self.trouble_chance();
        let outcome = if sample_ratio(rng) > trouble_chance {
            TroubleOutcome::NoTrouble
        } else {
            let stake = roll_die(rng, self.rules.brawl_max_stake);
            let win_roll = sample_ratio(rng);
            resolve_brawl(hunter, trouble_chance, win_roll, stake)
        };
        self.latest_news = outcome.to_string();
        outcome
    }

    /// One dig per town once it pays off; shovel checks happen upstream.
    pub fn dig<R: RngCore + ?Sized>(&mut self, hunter: &mut Hunter, rng: &mut R) -> DigOutcome {
        let outcome = if self.searched {
            DigOutcome::AlreadyDug
        } else if roll_chance(rng, self.rules.dig_success_chance) {
            let gold = roll_die(rng, self.rules.dig_max_gold);
            hunter.change_gold(i64::from(gold));
            self.searched = true;
            DigOutcome::Struck { gold }
        } else {
            DigOutcome::Dirt
        };
        self.latest_news = outcome.to_string();
        outcome
    }

    /// Search the town for its treasure. Only one search per town.
    pub fn hunt(&mut self, hunter: &mut Hunter) -> HuntOutcome {
        let outcome = if self.hunted {
            HuntOutcome::AlreadyHunted
        } else {
            self.hunted = true;
            match self.treasure {
                None | Some(Treasure::Dust) => HuntOutcome::Dust,
                Some(treasure) if hunter.has_item_in_treasures(treasure) => {
                    HuntOutcome::AlreadyOwned(treasure)
                }
                Some(treasure) => {
                    let stored = hunter
                        .empty_position_in_treasures()
                        .is_some_and(|slot| hunter.add_treasure(slot, treasure));
                    if stored {
                        HuntOutcome::Found {
                            treasure,
                            completes_set: hunter.has_all_treasures(),
                        }
                    } else {
                        HuntOutcome::AlreadyOwned(treasure)
                    }
                }
            }
        };
        self.latest_news = outcome.to_string();
        outcome
    }

    #[must_use]
    pub fn info_string(&self) -> String {
        format!(
            "This nice little town is surrounded by {}.",
            self.terrain.kind()
        )
    }
}

/// Settle a brawl once trouble has been found. The hunter wins when
/// `win_roll` beats `trouble_chance` or when carrying a sword.
pub fn resolve_brawl(
    hunter: &mut Hunter,
    trouble_chance: f64,
    win_roll: f64,
    stake: u32,
) -> TroubleOutcome {
    if hunter.has_item_in_kit(Item::Sword) || win_roll > trouble_chance {
        hunter.change_gold(i64::from(stake));
        return TroubleOutcome::Won { stake };
    }
    if hunter.gold() == 0 {
        return TroubleOutcome::Bankrupt;
    }
    let paid = stake.min(hunter.gold());
    hunter.change_gold(-i64::from(paid));
    TroubleOutcome::Lost { stake, paid }
}
