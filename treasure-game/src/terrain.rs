//! Terrain surrounding a town and the tool needed to cross it.
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::hunter::Hunter;
use crate::rng::roll_index;
use crate::state::Item;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerrainKind {
    Mountains,
    Ocean,
    Plains,
    Desert,
    Jungle,
    Marsh,
}

impl TerrainKind {
    pub const ALL: [Self; 6] = [
        Self::Mountains,
        Self::Ocean,
        Self::Plains,
        Self::Desert,
        Self::Jungle,
        Self::Marsh,
    ];

    #[must_use]
    pub const fn needed_item(self) -> Item {
        match self {
            Self::Mountains => Item::Rope,
            Self::Ocean => Item::Boat,
            Self::Plains => Item::Horse,
            Self::Desert => Item::Water,
            Self::Jungle => Item::Machete,
            Self::Marsh => Item::Boots,
        }
    }
}

impl fmt::Display for TerrainKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Mountains => "Mountains",
            Self::Ocean => "Ocean",
            Self::Plains => "Plains",
            Self::Desert => "Desert",
            Self::Jungle => "Jungle",
            Self::Marsh => "Marsh",
        };
        f.write_str(name)
    }
}

/// Immutable crossing obstacle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Terrain {
    kind: TerrainKind,
    needed_item: Item,
}

impl Terrain {
    #[must_use]
    pub const fn new(kind: TerrainKind) -> Self {
        Self {
            kind,
            needed_item: kind.needed_item(),
        }
    }

    /// Pick one of the six terrains uniformly.
    pub fn roll<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        let idx = roll_index(rng, TerrainKind::ALL.len());
        Self::new(TerrainKind::ALL[idx])
    }

    #[must_use]
    pub const fn kind(&self) -> TerrainKind {
        self.kind
    }

    #[must_use]
    pub const fn needed_item(&self) -> Item {
        self.needed_item
    }

    #[must_use]
    pub fn can_cross_terrain(&self, hunter: &Hunter) -> bool {
        hunter.has_item_in_kit(self.needed_item)
    }

    #[must_use]
    pub fn info_string(&self) -> String {
        format!(
            "The {} lie ahead. You'll need a {} to get across.",
            self.kind, self.needed_item
        )
    }
}
