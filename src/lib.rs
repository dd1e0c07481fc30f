//! Crate root module declarations for the Dame checkers engine.
//!
//! Exposes the rules engine (game state and move generation), the evaluator
//! and minimax search, pluggable engines, the console front-end and utility
//! helpers so binaries, tests and benches can import stable module paths.

pub mod dame_errors;

pub mod game_state {
    pub mod dame_game;
    pub mod dame_rules;
    pub mod dame_types;
    pub mod game_state;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod perft;
}

pub mod search {
    pub mod board_scoring;
    pub mod minimax;
    pub mod threading;
}

pub mod engines {
    pub mod engine_minimax;
    pub mod engine_random;
    pub mod engine_trait;
}

pub mod console {
    pub mod console_top;
}

pub mod utils {
    pub mod algebraic;
    pub mod diagram;
    pub mod engine_match_harness;
    pub mod render_game_state;
}
