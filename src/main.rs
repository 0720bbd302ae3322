//! Gomoku engine CLI
//!
//! Reads move histories as JSON (`[{"row": 7, "col": 7, "player": "black"}, ...]`)
//! from a file or stdin and prints results as JSON.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use gomoku::{
    detect_opening, generate_puzzle_with_rng, try_reconstruct_board, AIEngine, Difficulty,
    EngineConfig, MatchAnalyzer, Move, Stone,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Gomoku move selection, game review and puzzles")]
struct Args {
    /// TOML file with weights and thresholds
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Pick the next move for a position
    Move {
        /// Move history JSON file, or `-` for stdin
        history: PathBuf,
        #[arg(short, long, default_value = "hard", value_parser = parse_difficulty)]
        difficulty: Difficulty,
        /// Side to move; inferred from the history when omitted
        #[arg(short, long, value_parser = parse_player)]
        player: Option<Stone>,
        #[arg(long)]
        seed: Option<u64>,
        /// Also print the board after the move
        #[arg(long)]
        show: bool,
    },
    /// Review a game move by move
    Analyze {
        /// Move history JSON file, or `-` for stdin
        history: PathBuf,
    },
    /// Generate a tactical puzzle
    Puzzle {
        #[arg(short, long, default_value = "medium", value_parser = parse_difficulty)]
        difficulty: Difficulty,
        #[arg(long)]
        seed: Option<u64>,
        /// Also print the board
        #[arg(long)]
        show: bool,
    },
    /// Name the opening of a game
    Opening {
        /// Move history JSON file, or `-` for stdin
        history: PathBuf,
    },
}

fn parse_difficulty(s: &str) -> Result<Difficulty, String> {
    s.parse()
}

fn parse_player(s: &str) -> Result<Stone, String> {
    match s.to_ascii_lowercase().as_str() {
        "black" | "b" | "x" => Ok(Stone::Black),
        "white" | "w" | "o" => Ok(Stone::White),
        other => Err(format!("unknown player '{other}' (expected black or white)")),
    }
}

/// Configure the logger with the given level
fn setup_logger(level: &str) {
    env_logger::Builder::new()
        .filter_level(level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();
}

fn read_history(path: &Path) -> Result<Vec<Move>> {
    let text = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read move history from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read move history '{}'", path.display()))?
    };
    serde_json::from_str(&text).context("move history is not a JSON list of moves")
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    println!("{json}");
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    setup_logger(&args.log_level);

    let config = match &args.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("failed to load config '{}'", path.display()))?,
        None => EngineConfig::default(),
    };

    match args.command {
        Command::Move {
            history,
            difficulty,
            player,
            seed,
            show,
        } => {
            let moves = read_history(&history)?;
            let mut board = try_reconstruct_board(&moves).context("illegal move history")?;
            let player = player.unwrap_or_else(|| match moves.last() {
                Some(last) => last.player.opponent(),
                None => Stone::Black,
            });

            let engine = AIEngine::with_config(difficulty, config);
            let result = engine
                .get_move_with_stats(&board, player, &mut make_rng(seed))
                .context("the board is full")?;
            info!("{player} plays {} ({:?})", result.pos, result.reason);
            print_json(&result)?;

            if show {
                board.play(Move::new(result.pos, player));
                println!("{board}");
            }
        }
        Command::Analyze { history } => {
            let moves = read_history(&history)?;
            try_reconstruct_board(&moves).context("illegal move history")?;
            let result = MatchAnalyzer::new(config).analyze(&moves);
            info!("{}", result.summary);
            print_json(&result)?;
        }
        Command::Puzzle {
            difficulty,
            seed,
            show,
        } => {
            let puzzle = generate_puzzle_with_rng(difficulty, &mut make_rng(seed));
            info!("{}: {}", puzzle.title, puzzle.description);
            print_json(&puzzle)?;
            if show {
                println!("{}\n{}", puzzle.title, puzzle.description);
                println!("{}", puzzle.board);
            }
        }
        Command::Opening { history } => {
            let moves = read_history(&history)?;
            match detect_opening(&moves) {
                Some(name) => println!("{name}"),
                None => println!("no classical opening"),
            }
        }
    }
    Ok(())
}
