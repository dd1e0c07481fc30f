//! Move legality.
//!
//! `check_move` applies the legality rules in a fixed order and reports the
//! first one violated; `is_legal` is the boolean view used by move generation.

use crate::dame_errors::IllegalMoveReason;
use crate::game_state::dame_types::*;

/// Validate `mv` for `side` without mutating anything.
///
/// Checks, in order: both coordinates on the board, the forced-capture
/// requirement, ownership of the source, emptiness of the destination, the
/// piece's permitted directions, and (for jumps) an enemy on the midpoint.
pub fn check_move(
    game_state: &GameState,
    mv: Move,
    side: Side,
    must_capture: bool,
) -> Result<(), IllegalMoveReason> {
    for coord in [mv.from, mv.to] {
        if !coord.in_bounds() {
            return Err(IllegalMoveReason::OutOfBounds(coord));
        }
    }

    if must_capture && !mv.is_jump() {
        return Err(IllegalMoveReason::ForcedCaptureViolation);
    }

    let moving = game_state.cell(mv.from);
    if !moving.belongs_to(side) {
        return Err(IllegalMoveReason::NoOwnedPieceAtSource(mv.from));
    }

    if !game_state.cell(mv.to).is_empty() {
        return Err(IllegalMoveReason::DestinationOccupied(mv.to));
    }

    if !direction_allowed(moving, mv, side) {
        return Err(IllegalMoveReason::IllegalDirection);
    }

    if let Some(mid) = mv.midpoint() {
        if !game_state.cell(mid).belongs_to(side.opposite()) {
            return Err(IllegalMoveReason::NoCapturableEnemy(mid));
        }
    }

    Ok(())
}

#[inline]
pub fn is_legal(game_state: &GameState, mv: Move, side: Side, must_capture: bool) -> bool {
    check_move(game_state, mv, side, must_capture).is_ok()
}

/// Men only move toward the opponent's back rank; kings go either way.
/// Anything that is not a diagonal step or jump is never allowed.
#[inline]
fn direction_allowed(moving: Cell, mv: Move, side: Side) -> bool {
    if !(mv.is_step() || mv.is_jump()) {
        return false;
    }
    match moving.kind() {
        Some(PieceKind::King) => true,
        Some(PieceKind::Man) => mv.d_row().signum() == side.forward(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mv(fc: i8, fr: i8, tc: i8, tr: i8) -> Move {
        Move::new(Coord::new(fc, fr), Coord::new(tc, tr))
    }

    #[test]
    fn opening_step_from_start_is_legal() {
        let game = GameState::new_game();
        assert_eq!(check_move(&game, mv(1, 5, 0, 4), Side::White, false), Ok(()));
    }

    #[test]
    fn reasons_follow_the_rule_order() {
        let game = GameState::new_game();
        assert_eq!(
            check_move(&game, mv(1, 5, -1, 4), Side::White, false),
            Err(IllegalMoveReason::OutOfBounds(Coord::new(-1, 4)))
        );
        // Forced capture is checked before ownership.
        assert_eq!(
            check_move(&game, mv(0, 4, 1, 3), Side::White, true),
            Err(IllegalMoveReason::ForcedCaptureViolation)
        );
        assert_eq!(
            check_move(&game, mv(0, 4, 1, 3), Side::White, false),
            Err(IllegalMoveReason::NoOwnedPieceAtSource(Coord::new(0, 4)))
        );
        assert_eq!(
            check_move(&game, mv(0, 2, 1, 5), Side::White, false),
            Err(IllegalMoveReason::NoOwnedPieceAtSource(Coord::new(0, 2)))
        );
        assert_eq!(
            check_move(&game, mv(0, 6, 1, 5), Side::White, false),
            Err(IllegalMoveReason::DestinationOccupied(Coord::new(1, 5)))
        );
    }

    #[test]
    fn men_cannot_move_backward_but_kings_can() {
        let state = GameState::from_pieces(
            Side::White,
            &[
                (Coord::new(3, 3), Cell::WhiteMan),
                (Coord::new(5, 3), Cell::WhiteKing),
            ],
        )
        .expect("position should build");

        assert_eq!(
            check_move(&state, mv(3, 3, 2, 4), Side::White, false),
            Err(IllegalMoveReason::IllegalDirection)
        );
        assert!(is_legal(&state, mv(3, 3, 2, 2), Side::White, false));
        assert!(is_legal(&state, mv(5, 3, 6, 4), Side::White, false));
        assert!(is_legal(&state, mv(5, 3, 4, 2), Side::White, false));
    }

    #[test]
    fn non_diagonal_displacements_are_rejected() {
        let state = GameState::from_pieces(Side::White, &[(Coord::new(3, 3), Cell::WhiteKing)])
            .expect("position should build");
        for target in [mv(3, 3, 3, 2), mv(3, 3, 5, 3), mv(3, 3, 6, 0), mv(3, 3, 4, 1)] {
            assert_eq!(
                check_move(&state, target, Side::White, false),
                Err(IllegalMoveReason::IllegalDirection)
            );
        }
    }

    #[test]
    fn jumps_need_an_enemy_on_the_midpoint() {
        let state = GameState::from_pieces(
            Side::Black,
            &[
                (Coord::new(2, 2), Cell::BlackMan),
                (Coord::new(3, 3), Cell::WhiteMan),
                (Coord::new(1, 3), Cell::BlackMan),
            ],
        )
        .expect("position should build");

        assert!(is_legal(&state, mv(2, 2, 4, 4), Side::Black, true));
        assert_eq!(
            check_move(&state, mv(2, 2, 0, 4), Side::Black, true),
            Err(IllegalMoveReason::NoCapturableEnemy(Coord::new(1, 3)))
        );
        assert_eq!(
            check_move(&state, mv(1, 3, 3, 1), Side::Black, false),
            Err(IllegalMoveReason::IllegalDirection)
        );
    }
}
