//! Game controller: one hunter travelling through a chain of towns.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::GameConfig;
use crate::hunter::Hunter;
use crate::rng::RngBundle;
use crate::shop::{Shop, ShopMode, ShopOutcome};
use crate::state::{Difficulty, GameStatus, Item, Treasure};
use crate::town::{DigOutcome, HuntOutcome, LeaveOutcome, Town, TownRules, TroubleOutcome};

/// Everything the player can ask for from the town menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    Buy(String),
    Sell(String),
    Explore,
    Move,
    LookForTrouble,
    Hunt,
    Dig,
    Exit,
}

/// What a command did, before it is turned into text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnOutcome {
    Shop(ShopOutcome),
    Explored,
    Leave(LeaveOutcome),
    Trouble(TroubleOutcome),
    Dig(DigOutcome),
    /// Digging was refused before the town was consulted.
    NeedShovel,
    Hunt(HuntOutcome),
    Farewell,
    /// The session already ended; nothing happened.
    GameOver(GameStatus),
}

/// One processed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub outcome: TurnOutcome,
    pub message: String,
    pub status: GameStatus,
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// End-of-session numbers for reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub seed: u64,
    pub difficulty: Difficulty,
    pub status: GameStatus,
    pub gold: u32,
    pub treasures: Vec<Treasure>,
    pub towns_visited: u32,
    pub turns: u32,
}

#[derive(Debug, Clone)]
pub struct GameSession {
    config: GameConfig,
    difficulty: Difficulty,
    rng: RngBundle,
    hunter: Hunter,
    town: Town,
    status: GameStatus,
    towns_visited: u32,
    turns: u32,
}

impl GameSession {
    /// Create the hunter and drop them into the first town.
    #[must_use]
    pub fn new(name: &str, difficulty: Difficulty, config: GameConfig, seed: u64) -> Self {
        let profile = config.profile(difficulty);
        let hunter = if profile.prefilled_kit {
            Hunter::prefilled(name, profile.starting_gold, profile.kit_capacity)
        } else {
            Hunter::new(name, profile.starting_gold, profile.kit_capacity)
        };
        let mut rng = RngBundle::from_user_seed(seed);
        let town = Self::build_town(&config, difficulty, &hunter, &mut rng);
        log::info!("new session: seed={seed} difficulty={difficulty} hunter={name}");
        Self {
            config,
            difficulty,
            rng,
            hunter,
            town,
            status: GameStatus::Playing,
            towns_visited: 1,
            turns: 0,
        }
    }

    fn build_town(
        config: &GameConfig,
        difficulty: Difficulty,
        hunter: &Hunter,
        rng: &mut RngBundle,
    ) -> Town {
        let profile = config.profile(difficulty);
        let shop = Shop::new(profile.markdown, &config.catalog, difficulty);
        let rules = TownRules::from_profile(profile, &config.payouts);
        let mut town = Town::new(shop, rules, rng.town());
        town.hunter_arrives(hunter, rng.town());
        town
    }

    #[must_use]
    pub const fn hunter(&self) -> &Hunter {
        &self.hunter
    }

    #[must_use]
    pub const fn town(&self) -> &Town {
        &self.town
    }

    #[must_use]
    pub const fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.rng.seed()
    }

    #[must_use]
    pub const fn towns_visited(&self) -> u32 {
        self.towns_visited
    }

    #[must_use]
    pub const fn turns(&self) -> u32 {
        self.turns
    }

    #[must_use]
    pub const fn rng(&self) -> &RngBundle {
        &self.rng
    }

    /// Process one menu command.
    pub fn apply(&mut self, command: Command) -> Turn {
        if self.status.is_over() {
            return self.turn(
                TurnOutcome::GameOver(self.status),
                "The hunt is over.".to_string(),
            );
        }
        self.turns = self.turns.saturating_add(1);
        log::debug!("turn {}: {command:?}", self.turns);

        match command {
            Command::Buy(request) => self.shop(ShopMode::Buy, &request),
            Command::Sell(request) => self.shop(ShopMode::Sell, &request),
            Command::Explore => {
                let message = self.town.terrain().info_string();
                self.turn(TurnOutcome::Explored, message)
            }
            Command::Move => self.move_on(),
            Command::LookForTrouble => self.look_for_trouble(),
            Command::Hunt => self.hunt(),
            Command::Dig => self.dig(),
            Command::Exit => {
                self.finish(GameStatus::Quit);
                let message = format!("Fare thee well, {}!", self.hunter.name());
                self.turn(TurnOutcome::Farewell, message)
            }
        }
    }

    fn shop(&mut self, mode: ShopMode, request: &str) -> Turn {
        let outcome = self
            .town
            .enter_shop(&mut self.hunter, mode, request, self.rng.shop());
        let message = outcome.to_string();
        self.turn(TurnOutcome::Shop(outcome), message)
    }

    fn move_on(&mut self) -> Turn {
        let leave = self.town.leave_town(&mut self.hunter, self.rng.wear());
        let mut message = self.town.latest_news().to_string();
        if leave.departed() {
            self.town = Self::build_town(
                &self.config,
                self.difficulty,
                &self.hunter,
                &mut self.rng,
            );
            self.towns_visited = self.towns_visited.saturating_add(1);
            message.push_str("\n\n");
            message.push_str(self.town.latest_news());
        }
        self.turn(TurnOutcome::Leave(leave), message)
    }

    fn look_for_trouble(&mut self) -> Turn {
        let outcome = self
            .town
            .look_for_trouble(&mut self.hunter, self.rng.brawl());
        if outcome == TroubleOutcome::Bankrupt {
            self.finish(GameStatus::Lost);
        }
        let message = outcome.to_string();
        self.turn(TurnOutcome::Trouble(outcome), message)
    }

    fn dig(&mut self) -> Turn {
        if !self.hunter.has_item_in_kit(Item::Shovel) {
            return self.turn(
                TurnOutcome::NeedShovel,
                "You can't dig for gold without a shovel".to_string(),
            );
        }
        let outcome = self.town.dig(&mut self.hunter, self.rng.dig());
        let message = outcome.to_string();
        self.turn(TurnOutcome::Dig(outcome), message)
    }

    fn hunt(&mut self) -> Turn {
        let outcome = self.town.hunt(&mut self.hunter);
        if matches!(
            outcome,
            HuntOutcome::Found {
                completes_set: true,
                ..
            }
        ) {
            self.finish(GameStatus::Won);
        }
        let message = outcome.to_string();
        self.turn(TurnOutcome::Hunt(outcome), message)
    }

    fn finish(&mut self, status: GameStatus) {
        if !self.status.is_over() {
            log::info!(
                "session ended: status={status:?} gold={} turns={}",
                self.hunter.gold(),
                self.turns
            );
            self.status = status;
        }
    }

    fn turn(&self, outcome: TurnOutcome, message: String) -> Turn {
        Turn {
            outcome,
            message,
            status: self.status,
        }
    }

    /// Snapshot of the session for reports.
    #[must_use]
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            seed: self.seed(),
            difficulty: self.difficulty,
            status: self.status,
            gold: self.hunter.gold(),
            treasures: self.hunter.treasures().iter().flatten().copied().collect(),
            towns_visited: self.towns_visited,
            turns: self.turns,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(difficulty: Difficulty, seed: u64) -> GameSession {
        GameSession::new("ivy", difficulty, GameConfig::default(), seed)
    }

    #[test]
    fn new_session_uses_difficulty_profile() {
        let easy = session(Difficulty::Easy, 1);
        assert_eq!(easy.hunter().gold(), 40);
        assert_eq!(easy.hunter().kit().capacity(), 7);
        assert!(easy.town().treasure().is_some());
        assert!(easy.town().latest_news().contains("Welcome to town, ivy."));

        let samurai = session(Difficulty::Samurai, 1);
        assert_eq!(samurai.hunter().kit().capacity(), 8);

        let test = session(Difficulty::Test, 1);
        assert_eq!(test.hunter().gold(), 0);
        assert!(test.hunter().has_item_in_kit(Item::Shovel));
    }

    #[test]
    fn dig_requires_shovel() {
        let mut game = session(Difficulty::Normal, 3);
        let turn = game.apply(Command::Dig);
        assert_eq!(turn.outcome, TurnOutcome::NeedShovel);
        assert!(!game.town().searched());
        // terrain, toughness and treasure only
        assert_eq!(game.rng().total_draws(), 3);
    }

    #[test]
    fn test_mode_can_always_leave() {
        let mut game = session(Difficulty::Test, 11);
        let turn = game.apply(Command::Move);
        assert!(matches!(turn.outcome, TurnOutcome::Leave(outcome) if outcome.departed()));
        assert_eq!(game.towns_visited(), 2);
        assert!(turn.message.contains("Welcome to town"));
    }

    #[test]
    fn second_hunt_is_refused_until_next_town() {
        let mut game = session(Difficulty::Test, 5);
        let _ = game.apply(Command::Hunt);
        let again = game.apply(Command::Hunt);
        assert_eq!(again.outcome, TurnOutcome::Hunt(HuntOutcome::AlreadyHunted));
        assert_eq!(again.message, "You have already searched this town!");
    }

    #[test]
    fn exit_ends_session_and_blocks_further_commands() {
        let mut game = session(Difficulty::Normal, 9);
        let farewell = game.apply(Command::Exit);
        assert_eq!(farewell.outcome, TurnOutcome::Farewell);
        assert_eq!(farewell.message, "Fare thee well, ivy!");
        assert_eq!(game.status(), GameStatus::Quit);

        let gold = game.hunter().gold();
        let after = game.apply(Command::LookForTrouble);
        assert_eq!(after.outcome, TurnOutcome::GameOver(GameStatus::Quit));
        assert_eq!(game.hunter().gold(), gold);
        assert_eq!(game.turns(), 1);
    }

    #[test]
    fn buy_and_sell_flow_through_shop() {
        let mut game = session(Difficulty::Normal, 21);
        let bought = game.apply(Command::Buy("rope".into()));
        assert!(matches!(bought.outcome, TurnOutcome::Shop(ref s) if s.is_success()));
        assert_eq!(game.hunter().gold(), 16);
        let sold = game.apply(Command::Sell("rope".into()));
        assert!(matches!(sold.outcome, TurnOutcome::Shop(ref s) if s.is_success()));
        assert_eq!(game.hunter().gold(), 18);
    }

    #[test]
    fn explore_describes_terrain_without_drawing() {
        let mut game = session(Difficulty::Normal, 2);
        let before = game.rng().total_draws();
        let turn = game.apply(Command::Explore);
        assert_eq!(turn.outcome, TurnOutcome::Explored);
        assert!(turn.message.contains(&game.town().terrain().kind().to_string()));
        assert_eq!(game.rng().total_draws(), before);
    }

    #[test]
    fn summary_reflects_state() {
        let mut game = session(Difficulty::Easy, 77);
        let _ = game.apply(Command::Explore);
        let summary = game.summary();
        assert_eq!(summary.seed, 77);
        assert_eq!(summary.difficulty, Difficulty::Easy);
        assert_eq!(summary.status, GameStatus::Playing);
        assert_eq!(summary.turns, 1);
        assert_eq!(summary.towns_visited, 1);
    }
}
