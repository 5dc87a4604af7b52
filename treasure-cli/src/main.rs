mod menu;
mod play;
mod policy;
mod reports;
mod simulate;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdin, stdout};
use std::path::{Path, PathBuf};

use treasure_game::{Difficulty, GameConfig};

use policy::Strategy;
use simulate::{Simulator, parse_seeds};

#[derive(Debug, Parser)]
#[command(name = "treasure-hunter", version)]
#[command(about = "Wander from town to town hunting for three treasures")]
struct Args {
    #[command(subcommand)]
    command: Option<Mode>,

    /// Seed for the session RNG (random when omitted)
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// JSON file overriding the built-in game tunables
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Debug, Subcommand)]
enum Mode {
    /// Play interactively on stdin/stdout (default)
    Play,
    /// Play seeded sessions with a scripted policy and report the results
    Simulate(SimulateArgs),
}

#[derive(Debug, clap::Args)]
struct SimulateArgs {
    /// Seeds to run (comma-separated)
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Difficulty key: e, n, h, s or test
    #[arg(long, default_value = "normal")]
    difficulty: String,

    /// Turn cap per session
    #[arg(long, default_value_t = 200)]
    max_turns: u32,

    /// Policy driving the hunter
    #[arg(long, value_enum, default_value_t = Strategy::Cautious)]
    strategy: Strategy,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "console"])]
    report: String,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    let config = load_config(args.config.as_deref())?;

    match args.command {
        Some(Mode::Simulate(sim)) => run_simulation(&sim, config),
        Some(Mode::Play) | None => {
            let seed = args.seed.unwrap_or_else(rand::random);
            log::debug!("interactive seed {seed}");
            let mut input = stdin().lock();
            let mut out = stdout().lock();
            play::run(&mut input, &mut out, config, seed)?;
            Ok(())
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

fn load_config(path: Option<&Path>) -> Result<GameConfig> {
    let Some(path) = path else {
        return Ok(GameConfig::default());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config = GameConfig::from_json(&raw)
        .with_context(|| format!("invalid config {}", path.display()))?;
    log::info!("loaded config from {}", path.display());
    Ok(config)
}

fn run_simulation(args: &SimulateArgs, config: GameConfig) -> Result<()> {
    let Some(difficulty) = Difficulty::from_key(&args.difficulty) else {
        bail!("unknown difficulty: {}", args.difficulty);
    };
    let seeds = parse_seeds(&args.seeds)?;
    let simulator = Simulator::new(config, difficulty, args.strategy, args.max_turns);

    if args.report == "console" && args.output.is_none() {
        announce_banner();
    }
    let records = simulator.run_all(&seeds);

    let mut output_target = OutputTarget::new(args.output.clone())?;
    match args.report.as_str() {
        "json" => reports::generate_json_report(&mut output_target, &records)?,
        _ => reports::generate_console_report(&mut output_target, &records)?,
    }
    output_target.flush_inner()?;
    Ok(())
}

fn announce_banner() {
    println!("{}", "Treasure Hunter Simulator".bright_cyan().bold());
    println!("{}", "=========================".cyan());
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}
