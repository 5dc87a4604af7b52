use colored::Colorize;
use std::io::{BufRead, Write};

use anyhow::Result;

/// Single-key choices offered in town.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Buy,
    Sell,
    Explore,
    Move,
    LookForTrouble,
    Hunt,
    Dig,
    Exit,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "b" => Some(Self::Buy),
            "s" => Some(Self::Sell),
            "e" => Some(Self::Explore),
            "m" => Some(Self::Move),
            "l" => Some(Self::LookForTrouble),
            "h" => Some(Self::Hunt),
            "d" => Some(Self::Dig),
            "x" => Some(Self::Exit),
            _ => None,
        }
    }
}

pub fn print_menu(out: &mut impl Write) -> Result<()> {
    let entries = [
        ("(B)", "uy something at the shop."),
        ("(S)", "ell something at the shop."),
        ("(E)", "xplore surrounding terrain."),
        ("(M)", "ove on to a different town."),
        ("(L)", "ook for trouble!"),
        ("(H)", "unt for treasure."),
        ("(D)", "ig for gold."),
    ];
    for (key, rest) in entries {
        writeln!(out, "{}{rest}", key.green())?;
    }
    writeln!(out, "Give up the hunt and e{}it.", "(X)".green())?;
    writeln!(out)?;
    Ok(())
}

/// Print `label` and read one trimmed line. `None` means the input closed.
pub fn prompt(input: &mut impl BufRead, out: &mut impl Write, label: &str) -> Result<Option<String>> {
    write!(out, "{label}")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
