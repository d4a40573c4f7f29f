//! Command-line position analysis.
//!
//! Searches a FEN to a requested depth with the built-in material
//! network and prints the best move, score and principal variation.

use std::time::{Duration, Instant};

use clap::Parser;
use cozy_chess::Board;

use goshawk::eval::{LeafEvaluator, MaterialNet};
use goshawk::search::{iterative_search, SearchControl, SearchLimits};
use goshawk::transposition::TranspositionTable;
use goshawk::zobrist::ZOBRIST;

#[derive(Parser, Debug)]
#[command(about = "Analyze a chess position with the goshawk search core")]
struct Args {
    /// Position to analyze (FEN). Defaults to the starting position.
    #[arg(long, default_value = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1")]
    fen: String,

    /// Maximum search depth in plies.
    #[arg(long, default_value_t = 6)]
    depth: i32,

    /// Optional movetime budget in milliseconds.
    #[arg(long)]
    movetime: Option<u64>,

    /// Optional node cap.
    #[arg(long)]
    nodes: Option<u64>,

    /// Transposition table size in megabytes.
    #[arg(long, default_value_t = 16)]
    hash_mb: usize,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let board = match args.fen.parse::<Board>() {
        Ok(board) => board,
        Err(err) => {
            eprintln!("invalid FEN '{}': {err}", args.fen);
            std::process::exit(1);
        }
    };

    let limits = SearchLimits {
        depth: args.depth,
        max_nodes: args.nodes,
        movetime: args.movetime.map(Duration::from_millis),
    };
    let control = SearchControl::from_limits(&limits);
    let mut tt = TranspositionTable::with_capacity_mb(args.hash_mb);
    let mut eval = LeafEvaluator::new(MaterialNet);

    let start = Instant::now();
    let outcome = iterative_search(&board, &ZOBRIST, &mut tt, &mut eval, &control, &limits);
    let elapsed = start.elapsed();

    match outcome.best_move() {
        Some(best) => println!("bestmove {best}"),
        None => println!("bestmove (none)"),
    }
    println!("score cp {}", outcome.score);
    println!("depth {}", outcome.depth);
    println!(
        "pv {}",
        outcome
            .pv
            .iter()
            .map(|mv| mv.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    );
    println!(
        "nodes {} time {} ms",
        outcome.nodes,
        elapsed.as_millis()
    );
}
