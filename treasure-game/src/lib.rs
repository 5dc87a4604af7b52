//! Treasure Hunter Game Engine
//!
//! Platform-agnostic rules for the Treasure Hunter console game: a hunter
//! wanders from town to town, trading at shops, brawling with the locals,
//! digging for gold and hunting for three treasures.
//! This crate holds every rule and no terminal I/O.

pub mod config;
pub mod constants;
pub mod hunter;
pub mod numbers;
pub mod rng;
pub mod session;
pub mod shop;
pub mod state;
pub mod terrain;
pub mod town;

// Re-export commonly used types
pub use config::{CatalogEntry, ConfigError, DifficultyProfile, GameConfig, PayoutConfig};
pub use hunter::{Hunter, Kit, Purchase, PurchaseRejection, Sale, SaleRejection};
pub use rng::{CountingRng, RngBundle};
pub use session::{Command, GameSession, SessionSummary, Turn, TurnOutcome};
pub use shop::{Shop, ShopMode, ShopOutcome};
pub use state::{Difficulty, GameStatus, Item, Treasure, UnknownItem};
pub use terrain::{Terrain, TerrainKind};
pub use town::{DigOutcome, HuntOutcome, LeaveOutcome, Town, TownRules, TroubleOutcome};
