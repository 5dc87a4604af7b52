//! Tunable game configuration with per-difficulty profiles.
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use crate::constants::{
    BOAT_COST, BOOTS_COST, BRAWL_MAX_STAKE, DIG_MAX_GOLD, DIG_SUCCESS_CHANCE, EASY_MARKDOWN,
    EASY_STARTING_GOLD, EASY_TOUGHNESS, EASY_TROUBLE_CHANCE, HARD_MARKDOWN, HARD_TOUGHNESS,
    HARD_TROUBLE_CHANCE, HORSE_COST, ITEM_BREAK_CHANCE, KIT_CAPACITY, MACHETE_COST,
    MAX_KIT_CAPACITY, NORMAL_MARKDOWN, NORMAL_TOUGHNESS, NORMAL_TROUBLE_CHANCE, ROPE_COST,
    SAMURAI_KIT_CAPACITY, SHOVEL_COST, STARTING_GOLD, SWORD_COST, TEST_STARTING_GOLD, WATER_COST,
};
use crate::state::{Difficulty, Item};

/// Errors raised when configuration invariants are violated.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} must be between {min:.2} and {max:.2} (got {value:.2})")]
    RangeViolation {
        field: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },
    #[error("kit capacity for {difficulty} must be between 1 and {max} (got {value})")]
    KitCapacity {
        difficulty: Difficulty,
        max: usize,
        value: usize,
    },
    #[error("catalog lists {0} more than once")]
    DuplicateCatalogItem(Item),
    #[error("catalog entry for {0} has no price")]
    FreeCatalogItem(Item),
    #[error("{field} must be at least 1")]
    ZeroRange { field: &'static str },
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Numbers that differ between difficulties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    pub starting_gold: u32,
    /// Fraction of the base price paid back when selling.
    pub markdown: f64,
    /// Probability that a freshly created town is tough.
    pub toughness: f64,
    pub kit_capacity: usize,
    /// Probability the terrain item breaks on a crossing.
    pub item_break_chance: f64,
    pub trouble_chance_tough: f64,
    pub trouble_chance_mild: f64,
    /// Start with one of every terrain tool plus a shovel.
    #[serde(default)]
    pub prefilled_kit: bool,
}

impl DifficultyProfile {
    const fn with_odds(
        starting_gold: u32,
        markdown: f64,
        toughness: f64,
        item_break_chance: f64,
        trouble: (f64, f64),
    ) -> Self {
        Self {
            starting_gold,
            markdown,
            toughness,
            kit_capacity: KIT_CAPACITY,
            item_break_chance,
            trouble_chance_tough: trouble.0,
            trouble_chance_mild: trouble.1,
            prefilled_kit: false,
        }
    }

    fn validate(&self, difficulty: Difficulty) -> Result<(), ConfigError> {
        if self.markdown <= 0.0 || self.markdown > 1.0 {
            return Err(ConfigError::RangeViolation {
                field: "markdown",
                min: 0.0,
                max: 1.0,
                value: self.markdown,
            });
        }
        probability("toughness", self.toughness)?;
        probability("item_break_chance", self.item_break_chance)?;
        probability("trouble_chance_tough", self.trouble_chance_tough)?;
        probability("trouble_chance_mild", self.trouble_chance_mild)?;
        if self.kit_capacity == 0 || self.kit_capacity > MAX_KIT_CAPACITY {
            return Err(ConfigError::KitCapacity {
                difficulty,
                max: MAX_KIT_CAPACITY,
                value: self.kit_capacity,
            });
        }
        Ok(())
    }
}

fn probability(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::RangeViolation {
            field,
            min: 0.0,
            max: 1.0,
            value,
        });
    }
    Ok(())
}

/// One shelf in the shop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub item: Item,
    pub price: u32,
    /// Only stocked when playing in samurai mode.
    #[serde(default)]
    pub samurai_only: bool,
}

impl CatalogEntry {
    const fn new(item: Item, price: u32) -> Self {
        Self {
            item,
            price,
            samurai_only: false,
        }
    }
}

/// Partial profile read from JSON. Missing fields keep the difficulty's default.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ProfileOverrides {
    starting_gold: Option<u32>,
    markdown: Option<f64>,
    toughness: Option<f64>,
    kit_capacity: Option<usize>,
    item_break_chance: Option<f64>,
    trouble_chance_tough: Option<f64>,
    trouble_chance_mild: Option<f64>,
    prefilled_kit: Option<bool>,
}

impl ProfileOverrides {
    fn apply(self, base: DifficultyProfile) -> DifficultyProfile {
        DifficultyProfile {
            starting_gold: self.starting_gold.unwrap_or(base.starting_gold),
            markdown: self.markdown.unwrap_or(base.markdown),
            toughness: self.toughness.unwrap_or(base.toughness),
            kit_capacity: self.kit_capacity.unwrap_or(base.kit_capacity),
            item_break_chance: self.item_break_chance.unwrap_or(base.item_break_chance),
            trouble_chance_tough: self.trouble_chance_tough.unwrap_or(base.trouble_chance_tough),
            trouble_chance_mild: self.trouble_chance_mild.unwrap_or(base.trouble_chance_mild),
            prefilled_kit: self.prefilled_kit.unwrap_or(base.prefilled_kit),
        }
    }
}

fn overlay<'de, D: Deserializer<'de>>(
    deserializer: D,
    base: DifficultyProfile,
) -> Result<DifficultyProfile, D::Error> {
    ProfileOverrides::deserialize(deserializer).map(|overrides| overrides.apply(base))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSet {
    #[serde(default = "ProfileSet::default_easy", deserialize_with = "ProfileSet::easy_from")]
    pub easy: DifficultyProfile,
    #[serde(default = "ProfileSet::default_normal", deserialize_with = "ProfileSet::normal_from")]
    pub normal: DifficultyProfile,
    #[serde(default = "ProfileSet::default_hard", deserialize_with = "ProfileSet::hard_from")]
    pub hard: DifficultyProfile,
    #[serde(default = "ProfileSet::default_samurai", deserialize_with = "ProfileSet::samurai_from")]
    pub samurai: DifficultyProfile,
    #[serde(default = "ProfileSet::default_test", deserialize_with = "ProfileSet::test_from")]
    pub test: DifficultyProfile,
}

impl ProfileSet {
    const fn default_easy() -> DifficultyProfile {
        DifficultyProfile::with_odds(
            EASY_STARTING_GOLD,
            EASY_MARKDOWN,
            EASY_TOUGHNESS,
            0.0,
            EASY_TROUBLE_CHANCE,
        )
    }

    const fn default_normal() -> DifficultyProfile {
        DifficultyProfile::with_odds(
            STARTING_GOLD,
            NORMAL_MARKDOWN,
            NORMAL_TOUGHNESS,
            ITEM_BREAK_CHANCE,
            NORMAL_TROUBLE_CHANCE,
        )
    }

    const fn default_hard() -> DifficultyProfile {
        DifficultyProfile::with_odds(
            STARTING_GOLD,
            HARD_MARKDOWN,
            HARD_TOUGHNESS,
            ITEM_BREAK_CHANCE,
            HARD_TROUBLE_CHANCE,
        )
    }

    const fn default_samurai() -> DifficultyProfile {
        DifficultyProfile {
            kit_capacity: SAMURAI_KIT_CAPACITY,
            ..Self::default_normal()
        }
    }

    const fn default_test() -> DifficultyProfile {
        DifficultyProfile {
            starting_gold: TEST_STARTING_GOLD,
            prefilled_kit: true,
            ..Self::default_normal()
        }
    }

    fn easy_from<'de, D: Deserializer<'de>>(d: D) -> Result<DifficultyProfile, D::Error> {
        overlay(d, Self::default_easy())
    }

    fn normal_from<'de, D: Deserializer<'de>>(d: D) -> Result<DifficultyProfile, D::Error> {
        overlay(d, Self::default_normal())
    }

    fn hard_from<'de, D: Deserializer<'de>>(d: D) -> Result<DifficultyProfile, D::Error> {
        overlay(d, Self::default_hard())
    }

    fn samurai_from<'de, D: Deserializer<'de>>(d: D) -> Result<DifficultyProfile, D::Error> {
        overlay(d, Self::default_samurai())
    }

    fn test_from<'de, D: Deserializer<'de>>(d: D) -> Result<DifficultyProfile, D::Error> {
        overlay(d, Self::default_test())
    }
}

impl Default for ProfileSet {
    fn default() -> Self {
        Self {
            easy: Self::default_easy(),
            normal: Self::default_normal(),
            hard: Self::default_hard(),
            samurai: Self::default_samurai(),
            test: Self::default_test(),
        }
    }
}

/// Brawl and dig payouts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoutConfig {
    #[serde(default = "PayoutConfig::default_brawl_max_stake")]
    pub brawl_max_stake: u32,
    #[serde(default = "PayoutConfig::default_dig_success_chance")]
    pub dig_success_chance: f64,
    #[serde(default = "PayoutConfig::default_dig_max_gold")]
    pub dig_max_gold: u32,
}

impl PayoutConfig {
    const fn default_brawl_max_stake() -> u32 {
        BRAWL_MAX_STAKE
    }

    const fn default_dig_success_chance() -> f64 {
        DIG_SUCCESS_CHANCE
    }

    const fn default_dig_max_gold() -> u32 {
        DIG_MAX_GOLD
    }
}

impl Default for PayoutConfig {
    fn default() -> Self {
        Self {
            brawl_max_stake: Self::default_brawl_max_stake(),
            dig_success_chance: Self::default_dig_success_chance(),
            dig_max_gold: Self::default_dig_max_gold(),
        }
    }
}

/// Complete set of tunables for a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default)]
    pub profiles: ProfileSet,
    #[serde(default = "GameConfig::default_catalog")]
    pub catalog: Vec<CatalogEntry>,
    #[serde(default)]
    pub payouts: PayoutConfig,
}

impl GameConfig {
    fn default_catalog() -> Vec<CatalogEntry> {
        vec![
            CatalogEntry::new(Item::Water, WATER_COST),
            CatalogEntry::new(Item::Rope, ROPE_COST),
            CatalogEntry::new(Item::Machete, MACHETE_COST),
            CatalogEntry::new(Item::Boots, BOOTS_COST),
            CatalogEntry::new(Item::Shovel, SHOVEL_COST),
            CatalogEntry::new(Item::Horse, HORSE_COST),
            CatalogEntry::new(Item::Boat, BOAT_COST),
            CatalogEntry {
                item: Item::Sword,
                price: SWORD_COST,
                samurai_only: true,
            },
        ]
    }

    /// Parse and validate a JSON config. Missing sections and missing profile
    /// fields fall back to the defaults for that difficulty.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a value is out of range.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    #[must_use]
    pub const fn profile(&self, difficulty: Difficulty) -> &DifficultyProfile {
        match difficulty {
            Difficulty::Easy => &self.profiles.easy,
            Difficulty::Normal => &self.profiles.normal,
            Difficulty::Hard => &self.profiles.hard,
            Difficulty::Samurai => &self.profiles.samurai,
            Difficulty::Test => &self.profiles.test,
        }
    }

    /// Check every invariant the rules rely on.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for difficulty in Difficulty::ALL {
            self.profile(difficulty).validate(difficulty)?;
        }
        self.validate_catalog()?;
        self.validate_payouts()
    }

    fn validate_catalog(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for entry in &self.catalog {
            if !seen.insert(entry.item) {
                return Err(ConfigError::DuplicateCatalogItem(entry.item));
            }
            if entry.price == 0 && entry.item != Item::Sword {
                return Err(ConfigError::FreeCatalogItem(entry.item));
            }
        }
        Ok(())
    }

    fn validate_payouts(&self) -> Result<(), ConfigError> {
        if self.payouts.brawl_max_stake == 0 {
            return Err(ConfigError::ZeroRange {
                field: "brawl_max_stake",
            });
        }
        if self.payouts.dig_max_gold == 0 {
            return Err(ConfigError::ZeroRange {
                field: "dig_max_gold",
            });
        }
        probability("dig_success_chance", self.payouts.dig_success_chance)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            profiles: ProfileSet::default(),
            catalog: Self::default_catalog(),
            payouts: PayoutConfig::default(),
        }
    }
}
