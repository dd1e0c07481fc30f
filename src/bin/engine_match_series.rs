//! Standalone engine-vs-engine series runner.
//!
//! Run with:
//! `cargo run --release --bin engine_match_series`
//! `cargo run --release --bin engine_match_series -- --verbose`

use dame::engines::engine_minimax::{MinimaxEngine, MinimaxScorerKind};
use dame::engines::engine_trait::Engine;
use dame::utils::engine_match_harness::{
    play_engine_match_series, MatchConfig, MatchSeriesConfig,
};

fn main() -> Result<(), String> {
    let verbose = std::env::args().any(|a| a == "--verbose" || a == "-v");

    // Swap these to compare evaluators or depths.
    let player1 = || Box::new(MinimaxEngine::new(3)) as Box<dyn Engine>;
    let player2 = || {
        Box::new(MinimaxEngine::new_with_scorer(3, MinimaxScorerKind::Material)) as Box<dyn Engine>
    };

    let stats = play_engine_match_series(
        player1,
        player2,
        MatchSeriesConfig {
            games: 10,
            base_seed: 1234,
            per_game: MatchConfig {
                max_turns: 150,
                opening_min_turns: 2,
                opening_max_turns: 6,
                ..MatchConfig::default()
            },
            verbose,
        },
    )?;

    println!("{}", stats.report());
    println!("outcomes: {:?}", stats.outcomes);
    Ok(())
}
