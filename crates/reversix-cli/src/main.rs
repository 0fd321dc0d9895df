//! Command line front end: load a board, compute one best move.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use log::info;

use reversix_core::io::{encode_move, parse_board};
use reversix_core::search::{
    BombPhaseCutoff, DepthCutoff, HardDeltaWindow, ParanoidScore, SimpleGenerator,
    SortedGenerator, StoneCountEvaluator,
};
use reversix_core::time::{PredictiveTimeStrategy, SimpleTimeStrategy};
use reversix_core::{Engine, SearchAlgorithm, SearchConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Algorithm {
    Minimax,
    AlphaBeta,
    AspirationWindows,
    FirstLegalMove,
}

impl From<Algorithm> for SearchAlgorithm {
    fn from(algorithm: Algorithm) -> SearchAlgorithm {
        match algorithm {
            Algorithm::Minimax => SearchAlgorithm::Minimax,
            Algorithm::AlphaBeta => SearchAlgorithm::AlphaBeta,
            Algorithm::AspirationWindows => SearchAlgorithm::AspirationWindows,
            Algorithm::FirstLegalMove => SearchAlgorithm::FirstLegalMove,
        }
    }
}

/// Computes the best move for the turn player of a board position.
#[derive(Debug, Parser)]
#[command(name = "reversix", version, about)]
struct Args {
    /// Board file in the text format.
    board: PathBuf,

    /// Time limit in milliseconds, 0 for none.
    #[arg(short, long, default_value_t = 1000)]
    time: u64,

    /// Depth limit, 0 for none.
    #[arg(short, long, default_value_t = 0)]
    depth: u32,

    /// Search algorithm.
    #[arg(short, long, value_enum, default_value_t = Algorithm::AspirationWindows)]
    algorithm: Algorithm,

    /// Fraction of the time limit actually spent searching.
    #[arg(long, default_value_t = 0.9)]
    threshold: f64,

    /// Order successors with a proxy evaluation instead of taking them
    /// as generated.
    #[arg(long)]
    sorted: bool,

    /// Stop deepening based on a duration forecast instead of a plain
    /// budget check.
    #[arg(long)]
    predictive: bool,

    /// Search into the bombing phase instead of cutting it off.
    #[arg(long)]
    explore_bombing: bool,

    /// Print the resulting position as well.
    #[arg(long)]
    show_board: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();

    let text = fs::read_to_string(&args.board)
        .with_context(|| format!("cannot read board file {}", args.board.display()))?;
    let state = parse_board(&text)
        .with_context(|| format!("cannot parse board file {}", args.board.display()))?
        .into_state();

    info!(
        "loaded a {}x{} board for {} players, {} to move in the {} phase",
        state.board().width(),
        state.board().height(),
        state.board().players(),
        state.turn(),
        state.phase()
    );

    let config = SearchConfig::<ParanoidScore> {
        algorithm: args.algorithm.into(),
        cutoff: if args.explore_bombing {
            Box::new(DepthCutoff::new(1))
        } else {
            Box::new(BombPhaseCutoff::new(1))
        },
        evaluator: Box::new(StoneCountEvaluator::new()),
        generator: if args.sorted {
            Box::new(SortedGenerator::new(StoneCountEvaluator::new(), usize::MAX))
        } else {
            Box::new(SimpleGenerator::new())
        },
        window: Some(Box::new(HardDeltaWindow::new(0.1, 0.1, 2))),
        time_strategy: if args.predictive {
            Box::new(PredictiveTimeStrategy::new(1))
        } else {
            Box::new(SimpleTimeStrategy::new(1))
        },
    };

    let mut engine = Engine::new(state, config);

    let best = engine
        .compute_best_move(Duration::from_millis(args.time), args.depth, args.threshold)
        .context("the game is already over, there is no move to make")?;

    println!("{best}");
    println!("wire encoding: {:02x?}", encode_move(&best));

    if args.show_board {
        engine.apply_move(&best);
        println!("{}", engine.state());
    }

    Ok(())
}
