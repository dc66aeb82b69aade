//! Renju command-line front end
//!
//! Engine self-play, or a line-based game against the engine on stdin.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use renju::{Engine, EngineConfig, GameSession, Phase, Restricted, Stone};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Five-in-a-row with renju forbidden moves
#[derive(Parser, Debug)]
#[command(name = "renju")]
#[command(about = "Renju engine with a threat-driven AI", long_about = None)]
#[command(version)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Board edge length
    #[arg(long, global = true)]
    size: Option<usize>,

    /// Player bound by the forbidden-move rule (black, white or none)
    #[arg(long, global = true)]
    restricted: Option<Restricted>,

    /// Seed for the engine's random fallback
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Ply depth of the threat search
    #[arg(long, global = true)]
    vct_depth: Option<i32>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Let the engine play both sides
    Selfplay {
        /// Stop after this many moves
        #[arg(long, default_value = "225")]
        max_moves: usize,
    },

    /// Play against the engine; enter moves as "row col"
    Play {
        /// Colour you play
        #[arg(long, default_value = "black")]
        human: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = build_config(&cli)?;

    match cli.command {
        Command::Selfplay { max_moves } => run_selfplay(config, max_moves),
        Command::Play { ref human } => {
            let human = parse_colour(human)?;
            run_play(config, human)
        }
    }
}

/// Config file (or defaults) with command-line overrides applied
fn build_config(cli: &Cli) -> Result<EngineConfig> {
    let mut config = match &cli.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => EngineConfig::default(),
    };

    if let Some(size) = cli.size {
        config.board_size = size;
    }
    if let Some(restricted) = cli.restricted {
        config.restricted = restricted;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    if let Some(depth) = cli.vct_depth {
        config.vct_depth = depth;
    }

    config.validate().context("invalid configuration")?;
    Ok(config)
}

fn parse_colour(name: &str) -> Result<Stone> {
    match name.to_ascii_lowercase().as_str() {
        "black" | "b" | "x" => Ok(Stone::Black),
        "white" | "w" | "o" => Ok(Stone::White),
        other => bail!("unknown colour '{}', expected black or white", other),
    }
}

fn run_selfplay(config: EngineConfig, max_moves: usize) -> Result<()> {
    info!(size = config.board_size, restricted = %config.restricted, "Starting self-play");

    let mut engine = Engine::with_config(config.clone());
    let mut game = GameSession::new(&config)?;
    game.start();

    while !game.phase().is_over() && game.history().len() < max_moves {
        let phase = game.play_ai(&mut engine)?;
        if let Some(&(pos, colour)) = game.history().last() {
            println!("{:>3}. {} {}", game.history().len(), colour, pos);
        }
        if phase.is_over() {
            break;
        }
    }

    println!("{}", game.board());
    println!("{}", game.phase());
    Ok(())
}

fn run_play(config: EngineConfig, human: Stone) -> Result<()> {
    info!(%human, "Starting game against the engine");

    let mut engine = Engine::with_config(config.clone());
    let mut game = GameSession::new(&config)?;
    game.start();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    while let Phase::AwaitingMove(to_move) = game.phase() {
        if to_move != human {
            game.play_ai(&mut engine)?;
            if let Some(&(pos, _)) = game.history().last() {
                println!("Engine plays {}", pos);
            }
            continue;
        }

        println!("{}", game.board());
        print!("{} to move (row col, 'undo' or 'quit'): ", human);
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let input = line.trim();

        match input {
            "quit" | "q" => break,
            "undo" => {
                // Take back the engine's reply and our own move
                game.undo();
                if game.current_player() != Some(human) {
                    game.undo();
                }
                continue;
            }
            _ => {}
        }

        let Some((row, col)) = parse_coords(input) else {
            warn!(input, "expected two numbers");
            continue;
        };
        if let Err(e) = game.play(row, col) {
            println!("{}", e);
        }
    }

    println!("{}", game.board());
    println!("{}", game.phase());
    Ok(())
}

fn parse_coords(input: &str) -> Option<(i32, i32)> {
    let mut parts = input.split(|c: char| c.is_whitespace() || c == ',').filter(|s| !s.is_empty());
    let row = parts.next()?.parse().ok()?;
    let col = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((row, col))
}
