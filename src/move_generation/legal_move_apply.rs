//! Move execution.
//!
//! These functions assume the move was already validated by
//! `legal_move_checks`; they perform no legality checking of their own.

use crate::game_state::dame_types::*;

/// What executing a single hop did to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedMove {
    pub captured: bool,
    pub promoted: bool,
}

/// Execute `mv` for `side` on `game_state` in place.
///
/// Relocates the piece, promotes a man reaching the opponent's back rank and
/// removes the jumped piece for a jump. The side to move is left unchanged;
/// turn hand-over belongs to the game controller.
pub fn apply_move_in_place(game_state: &mut GameState, mv: Move, side: Side) -> AppliedMove {
    let moving = game_state.cell(mv.from);
    debug_assert!(
        moving.belongs_to(side),
        "apply_move_in_place called without a {side} piece at {}",
        mv.from
    );
    if !moving.belongs_to(side) {
        return AppliedMove {
            captured: false,
            promoted: false,
        };
    }

    game_state.relocate(mv.from, mv.to);

    let promoted = !moving.is_king() && mv.to.row == side.promotion_row();
    if promoted {
        game_state.replace_piece(mv.to, moving.promoted());
    }

    let captured = match mv.midpoint() {
        Some(mid) => game_state.remove(mid).belongs_to(side.opposite()),
        None => false,
    };

    debug_assert!(game_state.validate().is_ok());

    AppliedMove { captured, promoted }
}

/// Execute `mv` on a copy of `game_state`, returning the successor.
pub fn apply_move(game_state: &GameState, mv: Move, side: Side) -> (GameState, AppliedMove) {
    let mut next = game_state.clone();
    let applied = apply_move_in_place(&mut next, mv, side);
    (next, applied)
}
