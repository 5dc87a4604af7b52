//! Shared enums describing items, treasures, difficulty and game status.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Tools a hunter can carry in the kit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Item {
    Water,
    Rope,
    Machete,
    Boots,
    Shovel,
    Horse,
    Boat,
    Sword,
}

impl Item {
    pub const ALL: [Self; 8] = [
        Self::Water,
        Self::Rope,
        Self::Machete,
        Self::Boots,
        Self::Shovel,
        Self::Horse,
        Self::Boat,
        Self::Sword,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Water => "water",
            Self::Rope => "rope",
            Self::Machete => "machete",
            Self::Boots => "boots",
            Self::Shovel => "shovel",
            Self::Horse => "horse",
            Self::Boat => "boat",
            Self::Sword => "sword",
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Returned when player input does not name a known item.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown item `{0}`")]
pub struct UnknownItem(pub String);

impl FromStr for Item {
    type Err = UnknownItem;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|item| item.label().eq_ignore_ascii_case(needle))
            .ok_or_else(|| UnknownItem(needle.to_string()))
    }
}

/// What a town hides. `Dust` is the booby prize and is never collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Treasure {
    Crown,
    Trophy,
    Gem,
    Dust,
}

impl Treasure {
    /// Roll order; each outcome covers a quarter of the unit interval.
    pub const ROLL_TABLE: [Self; 4] = [Self::Crown, Self::Trophy, Self::Gem, Self::Dust];

    #[must_use]
    pub const fn is_collectible(self) -> bool {
        !matches!(self, Self::Dust)
    }
}

impl fmt::Display for Treasure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Crown => "Crown",
            Self::Trophy => "Trophy",
            Self::Gem => "Gem",
            Self::Dust => "Dust",
        };
        f.write_str(name)
    }
}

/// Session-wide difficulty. Chosen once and never changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
    /// Normal odds, a bigger kit and a sword on the shelf.
    Samurai,
    /// Normal odds with a pre-filled kit and no gold.
    Test,
}

impl Difficulty {
    pub const ALL: [Self; 5] = [
        Self::Easy,
        Self::Normal,
        Self::Hard,
        Self::Samurai,
        Self::Test,
    ];

    /// Parse the short key typed at the mode prompt (`e`, `n`, `h`, `s`, `test`).
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "e" | "easy" => Some(Self::Easy),
            "n" | "normal" => Some(Self::Normal),
            "h" | "hard" => Some(Self::Hard),
            "s" | "samurai" => Some(Self::Samurai),
            "test" => Some(Self::Test),
            _ => None,
        }
    }

    #[must_use]
    pub const fn stocks_sword(self) -> bool {
        matches!(self, Self::Samurai)
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Easy => "easy",
            Self::Normal => "normal",
            Self::Hard => "hard",
            Self::Samurai => "samurai",
            Self::Test => "test",
        };
        f.write_str(name)
    }
}

/// Where a session stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    #[default]
    Playing,
    /// All three treasure slots filled.
    Won,
    /// Lost a brawl with no gold left to pay.
    Lost,
    /// The player gave up.
    Quit,
}

impl GameStatus {
    #[must_use]
    pub const fn is_over(self) -> bool {
        !matches!(self, Self::Playing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn items_parse_case_insensitively() {
        assert_eq!("Rope".parse::<Item>(), Ok(Item::Rope));
        assert_eq!("  SHOVEL ".parse::<Item>(), Ok(Item::Shovel));
        assert_eq!(
            "lasso".parse::<Item>(),
            Err(UnknownItem("lasso".to_string()))
        );
    }

    #[test]
    fn difficulty_keys_match_prompt() {
        assert_eq!(Difficulty::from_key("e"), Some(Difficulty::Easy));
        assert_eq!(Difficulty::from_key("H"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::from_key("test"), Some(Difficulty::Test));
        assert_eq!(Difficulty::from_key("x"), None);
    }

    #[test]
    fn dust_is_not_collectible() {
        assert!(!Treasure::Dust.is_collectible());
        assert!(Treasure::ROLL_TABLE[..3].iter().all(|t| t.is_collectible()));
    }

    #[test]
    fn status_over_flags_terminal_states() {
        assert!(!GameStatus::Playing.is_over());
        assert!(GameStatus::Won.is_over());
        assert!(GameStatus::Lost.is_over());
        assert!(GameStatus::Quit.is_over());
    }
}
