//! Legal move enumeration.
//!
//! Probes the four diagonal steps and four diagonal jumps around every piece
//! of the moving side, keeps the candidates that pass `is_legal`, and applies
//! the forced-capture filter. Turn completion (following capture chains to
//! their end) is built on top for search and perft.

use crate::game_state::dame_types::*;
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_checks::is_legal;

pub const STEP_DELTAS: [(i8, i8); 4] = [(-1, -1), (1, -1), (-1, 1), (1, 1)];
pub const JUMP_DELTAS: [(i8, i8); 4] = [(-2, -2), (2, -2), (-2, 2), (2, 2)];

/// Every step or jump the piece at `from` could make, ignoring the
/// forced-capture rule.
pub fn piece_moves(game_state: &GameState, from: Coord, side: Side) -> Vec<Move> {
    STEP_DELTAS
        .iter()
        .chain(JUMP_DELTAS.iter())
        .map(|&(dc, dr)| Move::new(from, from.offset(dc, dr)))
        .filter(|&mv| is_legal(game_state, mv, side, false))
        .collect()
}

/// The legal jumps of the single piece at `from`.
pub fn list_continuation_moves(game_state: &GameState, from: Coord, side: Side) -> Vec<Move> {
    JUMP_DELTAS
        .iter()
        .map(|&(dc, dr)| Move::new(from, from.offset(dc, dr)))
        .filter(|&mv| is_legal(game_state, mv, side, true))
        .collect()
}

/// True iff any piece of `side` has a legal jump.
pub fn can_capture(game_state: &GameState, side: Side) -> bool {
    game_state
        .pieces(side)
        .iter()
        .any(|&from| !list_continuation_moves(game_state, from, side).is_empty())
}

/// All legal moves of `side`, restricted to jumps when a capture exists.
pub fn list_legal_moves(game_state: &GameState, side: Side) -> Vec<Move> {
    let mut moves = Vec::with_capacity(16);
    for &from in game_state.pieces(side) {
        moves.extend(piece_moves(game_state, from, side));
    }

    if moves.iter().any(|mv| mv.is_jump()) {
        moves.retain(|mv| mv.is_jump());
    }
    moves
}

/// A complete turn: the hops played and the resulting position.
#[derive(Debug, Clone)]
pub struct TurnCompletion {
    pub hops: Vec<Move>,
    pub game_after_turn: GameState,
}

/// Every way `side` can finish a turn that starts with `first`.
///
/// A capture is followed by each further jump of the same piece until none
/// remain, so one opening hop may fan out into several completions. The side
/// to move of the returned states is left untouched.
pub fn turn_completions_from(game_state: &GameState, first: Move, side: Side) -> Vec<TurnCompletion> {
    let mut out = Vec::new();
    extend_completion(game_state, first, side, Vec::new(), &mut out);
    out
}

/// Every complete turn available to `side` from `game_state`.
pub fn generate_turn_completions(game_state: &GameState, side: Side) -> Vec<TurnCompletion> {
    let mut out = Vec::new();
    for mv in list_legal_moves(game_state, side) {
        extend_completion(game_state, mv, side, Vec::new(), &mut out);
    }
    out
}

fn extend_completion(
    game_state: &GameState,
    hop: Move,
    side: Side,
    mut hops: Vec<Move>,
    out: &mut Vec<TurnCompletion>,
) {
    let (next, applied) = apply_move(game_state, hop, side);
    hops.push(hop);

    let continuations = if applied.captured {
        list_continuation_moves(&next, hop.to, side)
    } else {
        Vec::new()
    };

    if continuations.is_empty() {
        out.push(TurnCompletion {
            hops,
            game_after_turn: next,
        });
        return;
    }

    for cont in continuations {
        extend_completion(&next, cont, side, hops.clone(), out);
    }
}
