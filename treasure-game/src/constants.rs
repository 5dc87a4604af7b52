//! Balance and tuning defaults for Treasure Hunter.
//!
//! `GameConfig::default()` is built from these values. A JSON config can
//! override any of them at startup.

// Hunter ---------------------------------------------------------------------
pub const TREASURE_SLOTS: usize = 3;
pub const KIT_CAPACITY: usize = 7;
pub const SAMURAI_KIT_CAPACITY: usize = 8;
pub const MAX_KIT_CAPACITY: usize = 16;

pub const EASY_STARTING_GOLD: u32 = 40;
pub const STARTING_GOLD: u32 = 20;
pub const TEST_STARTING_GOLD: u32 = 0;

// Shop -----------------------------------------------------------------------
pub const WATER_COST: u32 = 2;
pub const ROPE_COST: u32 = 4;
pub const MACHETE_COST: u32 = 6;
pub const BOOTS_COST: u32 = 8;
pub const SHOVEL_COST: u32 = 8;
pub const HORSE_COST: u32 = 12;
pub const BOAT_COST: u32 = 20;
pub const SWORD_COST: u32 = 0;

pub const EASY_MARKDOWN: f64 = 1.0;
pub const NORMAL_MARKDOWN: f64 = 0.5;
pub const HARD_MARKDOWN: f64 = 0.25;

// Town -----------------------------------------------------------------------
pub const EASY_TOUGHNESS: f64 = 0.25;
pub const NORMAL_TOUGHNESS: f64 = 0.4;
pub const HARD_TOUGHNESS: f64 = 0.75;

pub const ITEM_BREAK_CHANCE: f64 = 0.5;

// Trouble odds: (tough town, mild town)
pub const EASY_TROUBLE_CHANCE: (f64, f64) = (0.6, 0.4);
pub const NORMAL_TROUBLE_CHANCE: (f64, f64) = (0.66, 0.33);
pub const HARD_TROUBLE_CHANCE: (f64, f64) = (0.75, 0.25);

pub const BRAWL_MAX_STAKE: u32 = 10;
pub const DIG_SUCCESS_CHANCE: f64 = 0.5;
pub const DIG_MAX_GOLD: u32 = 20;

// RNG stream domain tags -----------------------------------------------------
pub(crate) const STREAM_TOWN: &[u8] = b"town";
pub(crate) const STREAM_SHOP: &[u8] = b"shop";
pub(crate) const STREAM_BRAWL: &[u8] = b"brawl";
pub(crate) const STREAM_DIG: &[u8] = b"dig";
pub(crate) const STREAM_WEAR: &[u8] = b"wear";
