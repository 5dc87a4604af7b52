//! Interactive prompt loop.
use anyhow::Result;
use colored::Colorize;
use std::io::{BufRead, Write};

use treasure_game::{Command, Difficulty, GameConfig, GameSession, GameStatus, ShopMode};

use crate::menu::{MenuChoice, print_menu, prompt};

/// Play one session over `input`/`out`. Closing the input counts as giving up.
pub fn run(
    input: &mut impl BufRead,
    out: &mut impl Write,
    config: GameConfig,
    seed: u64,
) -> Result<GameStatus> {
    writeln!(out, "Welcome to {}!", "TREASURE HUNTER".bright_cyan().bold())?;
    writeln!(out, "Going hunting for the big treasure, eh?")?;
    let Some(name) = prompt(input, out, "What's your name, Hunter? ")? else {
        return Ok(GameStatus::Quit);
    };
    let name = name.to_lowercase();

    let Some(difficulty) = ask_difficulty(input, out)? else {
        return Ok(GameStatus::Quit);
    };
    log::info!("starting {difficulty} game for {name} with seed {seed}");

    let mut session = GameSession::new(&name, difficulty, config, seed);
    writeln!(out)?;
    writeln!(out, "{}", session.town().latest_news())?;

    while !session.status().is_over() {
        show_status(out, &session)?;
        let Some(line) = prompt(input, out, "What's your next move? ")? else {
            let turn = session.apply(Command::Exit);
            writeln!(out, "{turn}")?;
            break;
        };
        let Some(choice) = MenuChoice::parse(&line) else {
            writeln!(out, "{}", "Yikes! That's an invalid option! Try again.".red())?;
            continue;
        };
        let Some(command) = to_command(choice, input, out, &session)? else {
            let turn = session.apply(Command::Exit);
            writeln!(out, "{turn}")?;
            break;
        };
        let turn = session.apply(command);
        writeln!(out)?;
        writeln!(out, "{turn}")?;
    }

    announce_ending(out, &session)?;
    Ok(session.status())
}

fn ask_difficulty(input: &mut impl BufRead, out: &mut impl Write) -> Result<Option<Difficulty>> {
    loop {
        let Some(mode) = prompt(input, out, "Which mode? (\"e\", \"n\", \"h\" or \"s\".): ")? else {
            return Ok(None);
        };
        if let Some(difficulty) = Difficulty::from_key(&mode) {
            return Ok(Some(difficulty));
        }
        writeln!(out, "Sorry, that is not an option")?;
    }
}

fn show_status(out: &mut impl Write, session: &GameSession) -> Result<()> {
    writeln!(out, "***")?;
    writeln!(out, "{}", session.hunter().info_string())?;
    writeln!(out, "{}", session.town().info_string())?;
    print_menu(out)
}

/// Map a menu key to a session command, asking for an item at the shop.
/// `None` means the input closed mid-question.
fn to_command(
    choice: MenuChoice,
    input: &mut impl BufRead,
    out: &mut impl Write,
    session: &GameSession,
) -> Result<Option<Command>> {
    let command = match choice {
        MenuChoice::Buy | MenuChoice::Sell => {
            let (mode, question) = if choice == MenuChoice::Buy {
                (ShopMode::Buy, "What're you lookin' to buy? ")
            } else {
                (ShopMode::Sell, "What're you lookin' to sell? ")
            };
            writeln!(out, "{}", session.town().shop().inventory(mode))?;
            let Some(item) = prompt(input, out, question)? else {
                return Ok(None);
            };
            if mode == ShopMode::Buy {
                Command::Buy(item)
            } else {
                Command::Sell(item)
            }
        }
        MenuChoice::Explore => Command::Explore,
        MenuChoice::Move => Command::Move,
        MenuChoice::LookForTrouble => Command::LookForTrouble,
        MenuChoice::Hunt => Command::Hunt,
        MenuChoice::Dig => Command::Dig,
        MenuChoice::Exit => Command::Exit,
    };
    Ok(Some(command))
}

fn announce_ending(out: &mut impl Write, session: &GameSession) -> Result<()> {
    match session.status() {
        GameStatus::Won => {
            writeln!(out)?;
            writeln!(out, "{}", session.hunter().info_string())?;
            writeln!(out, "{}", "You found all three treasures!".bright_green().bold())?;
        }
        GameStatus::Lost => {
            writeln!(out)?;
            writeln!(out, "{}", "Game Over!".bright_red().bold())?;
        }
        GameStatus::Quit | GameStatus::Playing => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn play(script: &str, seed: u64) -> (GameStatus, String) {
        let mut input = Cursor::new(script.to_string());
        let mut out = Vec::new();
        let status = run(&mut input, &mut out, GameConfig::default(), seed).unwrap();
        (status, String::from_utf8(out).unwrap())
    }

    #[test]
    fn exit_says_goodbye() {
        let (status, text) = play("Robin\nn\nx\n", 1);
        assert_eq!(status, GameStatus::Quit);
        assert!(text.contains("Welcome to town, robin."));
        assert!(text.contains("Fare thee well, robin!"));
    }

    #[test]
    fn invalid_mode_and_choice_reprompt() {
        let (status, text) = play("robin\nq\ne\nz\nx\n", 1);
        assert_eq!(status, GameStatus::Quit);
        assert!(text.contains("Sorry, that is not an option"));
        assert!(text.contains("invalid option"));
        assert!(text.contains("robin has 40 gold"));
    }

    #[test]
    fn buying_shows_catalog_and_charges() {
        let (_, text) = play("robin\nn\nb\nrope\nx\n", 3);
        assert!(text.contains("rope: 4 gold"));
        assert!(text.contains("robin has 16 gold and rope"));
    }

    #[test]
    fn closed_input_quits_cleanly() {
        let (status, _) = play("robin\nn\n", 4);
        assert_eq!(status, GameStatus::Quit);
        let (status, _) = play("", 4);
        assert_eq!(status, GameStatus::Quit);
    }

    #[test]
    fn digging_without_shovel_is_refused() {
        let (_, text) = play("robin\nh\nd\nx\n", 6);
        assert!(text.contains("You can't dig for gold without a shovel"));
    }
}
