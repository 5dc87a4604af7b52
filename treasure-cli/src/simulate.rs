//! Seeded, non-interactive runs driven by a [`PlayerPolicy`].
use anyhow::{Result, bail};
use serde::Serialize;

use treasure_game::{Difficulty, GameConfig, GameSession, GameStatus, SessionSummary};

use crate::policy::{PlayerPolicy, Strategy};

/// One simulated session and how it ended.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationRecord {
    pub strategy: &'static str,
    #[serde(flatten)]
    pub summary: SessionSummary,
    /// The turn cap ended the run, not the game.
    pub truncated: bool,
}

impl SimulationRecord {
    #[must_use]
    pub fn won(&self) -> bool {
        self.summary.status == GameStatus::Won
    }
}

pub struct Simulator {
    config: GameConfig,
    difficulty: Difficulty,
    strategy: Strategy,
    max_turns: u32,
}

impl Simulator {
    #[must_use]
    pub const fn new(
        config: GameConfig,
        difficulty: Difficulty,
        strategy: Strategy,
        max_turns: u32,
    ) -> Self {
        Self {
            config,
            difficulty,
            strategy,
            max_turns,
        }
    }

    pub fn run_seed(&self, seed: u64) -> SimulationRecord {
        let mut policy = self.strategy.create_policy();
        let mut session = GameSession::new("bot", self.difficulty, self.config.clone(), seed);
        while !session.status().is_over() && session.turns() < self.max_turns {
            let command = policy.next_command(&session);
            let turn = session.apply(command);
            log::debug!("seed {seed} turn {}: {}", session.turns(), turn.message);
        }
        let truncated = !session.status().is_over();
        log::info!(
            "seed {seed} finished as {:?} after {} turns ({})",
            session.status(),
            session.turns(),
            policy.name()
        );
        SimulationRecord {
            strategy: policy.name(),
            summary: session.summary(),
            truncated,
        }
    }

    pub fn run_all(&self, seeds: &[u64]) -> Vec<SimulationRecord> {
        seeds.iter().map(|&seed| self.run_seed(seed)).collect()
    }
}

pub fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

/// Parse comma-separated seeds, dropping repeats but keeping order.
pub fn parse_seeds(arg: &str) -> Result<Vec<u64>> {
    let mut seeds = Vec::new();
    for token in split_csv(arg) {
        let Ok(seed) = token.parse::<u64>() else {
            bail!("Unrecognized seed token: {token}");
        };
        if !seeds.contains(&seed) {
            seeds.push(seed);
        }
    }
    if seeds.is_empty() {
        bail!("no seeds given");
    }
    Ok(seeds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_csv_trims_and_filters() {
        assert_eq!(split_csv(" 1, ,2,  3 "), vec!["1", "2", "3"]);
    }

    #[test]
    fn parse_seeds_dedupes_and_rejects_garbage() {
        assert_eq!(parse_seeds("7,3,7").unwrap(), vec![7, 3]);
        assert!(parse_seeds("7,abc").is_err());
        assert!(parse_seeds(" , ").is_err());
    }

    #[test]
    fn runs_respect_turn_cap() {
        let sim = Simulator::new(GameConfig::default(), Difficulty::Normal, Strategy::Cautious, 5);
        for record in sim.run_all(&[1, 2, 3]) {
            assert!(record.summary.turns <= 5);
            assert_eq!(record.truncated, record.summary.status == GameStatus::Playing);
        }
    }

    #[test]
    fn same_seed_same_record() {
        let sim = Simulator::new(GameConfig::default(), Difficulty::Easy, Strategy::Brawler, 300);
        let a = sim.run_seed(42);
        let b = sim.run_seed(42);
        assert_eq!(a.summary, b.summary);
        assert_eq!(a.strategy, "brawler");
    }
}
