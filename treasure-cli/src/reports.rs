use anyhow::Result;
use colored::Colorize;
use std::io::Write;

use treasure_game::GameStatus;

use crate::simulate::SimulationRecord;

pub fn generate_console_report(out: &mut dyn Write, records: &[SimulationRecord]) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "Simulation Summary".bright_cyan().bold())?;
    writeln!(out, "{}", "==================".cyan())?;

    let wins = records.iter().filter(|r| r.won()).count();
    let losses = records
        .iter()
        .filter(|r| r.summary.status == GameStatus::Lost)
        .count();
    writeln!(out, "Sessions: {}", records.len())?;
    writeln!(out, "Won: {}", wins.to_string().green())?;
    writeln!(out, "Lost: {}", losses.to_string().red())?;
    if !records.is_empty() {
        #[allow(clippy::cast_precision_loss)]
        let win_rate = (wins as f64 / records.len() as f64) * 100.0;
        writeln!(out, "Win rate: {win_rate:.1}%")?;
    }
    writeln!(out)?;

    for record in records {
        let summary = &record.summary;
        let status = match summary.status {
            GameStatus::Won => "WON ".green(),
            GameStatus::Lost => "LOST".red(),
            GameStatus::Quit => "QUIT".yellow(),
            GameStatus::Playing => "CAP ".dimmed(),
        };
        let treasures: Vec<String> = summary.treasures.iter().map(ToString::to_string).collect();
        writeln!(
            out,
            "{status} seed {} ({}, {}): {} gold, {} towns, {} turns, treasures [{}]",
            summary.seed.to_string().bold(),
            summary.difficulty,
            record.strategy,
            summary.gold,
            summary.towns_visited,
            summary.turns,
            treasures.join(", ")
        )?;
    }
    Ok(())
}

pub fn generate_json_report(out: &mut dyn Write, records: &[SimulationRecord]) -> Result<()> {
    let json_output = serde_json::to_string_pretty(records)?;
    writeln!(out, "{json_output}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::Strategy;
    use crate::simulate::Simulator;
    use treasure_game::{Difficulty, GameConfig};

    fn records() -> Vec<SimulationRecord> {
        Simulator::new(GameConfig::default(), Difficulty::Normal, Strategy::Cautious, 20)
            .run_all(&[1, 2])
    }

    #[test]
    fn console_report_lists_each_seed() {
        let mut buf = Vec::new();
        generate_console_report(&mut buf, &records()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("Sessions: 2"));
        assert!(text.contains("cautious"));
    }

    #[test]
    fn json_report_is_an_array_of_summaries() {
        let mut buf = Vec::new();
        generate_json_report(&mut buf, &records()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        let rows = value.as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["seed"], 1);
        assert_eq!(rows[0]["strategy"], "cautious");
        assert!(rows[1].get("truncated").is_some());
    }
}
