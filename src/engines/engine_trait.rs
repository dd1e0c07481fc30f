//! Engine abstraction layer used by the console and the match harness.
//!
//! Defines common request parameters and output payloads so different engine
//! strategies can be selected at runtime behind a single trait interface, plus
//! the driver that lets an engine play a whole turn on a live game.

use crate::dame_errors::DameError;
use crate::game_state::dame_game::{DameGame, MoveOutcome};

#[derive(Debug, Clone, Default)]
pub struct GoParams {
    pub depth: Option<u8>,
    pub threads: Option<usize>,
}

#[derive(Debug, Clone, Default)]
pub struct EngineOutput {
    pub best_move: Option<crate::game_state::dame_types::Move>,
    pub score: Option<i32>,
    pub info_lines: Vec<String>,
}

pub trait Engine: Send {
    fn name(&self) -> &str;

    fn new_game(&mut self) {}

    fn set_option(&mut self, _name: &str, _value: &str) -> Result<(), String> {
        Ok(())
    }

    /// Pick one hop among `game.legal_moves()`. Mid-chain that list only
    /// holds the capturing piece's continuations.
    fn choose_move(&mut self, game: &DameGame, params: &GoParams) -> Result<EngineOutput, String>;
}

/// Hops played by an engine during one turn, with its diagnostics.
#[derive(Debug, Clone, Default)]
pub struct EngineTurn {
    pub hops: Vec<MoveOutcome>,
    pub info_lines: Vec<String>,
}

/// Let `engine` play a complete turn for the side to move.
///
/// The engine is re-asked after every capture that leaves the capturing piece
/// with another jump, so each continuation is chosen by a fresh search.
pub fn play_engine_turn(
    game: &mut DameGame,
    engine: &mut dyn Engine,
    params: &GoParams,
) -> Result<EngineTurn, DameError> {
    let mut turn = EngineTurn::default();

    loop {
        let output = engine
            .choose_move(game, params)
            .map_err(DameError::EngineFailure)?;
        turn.info_lines.extend(output.info_lines);

        let Some(mv) = output.best_move else {
            return Err(DameError::NoLegalMoves);
        };

        let outcome = game.play_move(mv)?;
        turn.hops.push(outcome);
        if !outcome.continues() {
            return Ok(turn);
        }
    }
}
