//! Pluggable board evaluation interfaces and baseline implementations.
//!
//! Search stays independent of any particular heuristic by delegating static
//! position scoring to `BoardScorer`. Scores are side-relative: they rate the
//! position from the viewpoint of the side passed in, and scoring the same
//! board for the other side is not simply the negation.

use crate::game_state::dame_types::*;
use crate::move_generation::legal_move_generator::list_legal_moves;

pub const PIECE_VALUE: i32 = 2;
pub const KING_BONUS: i32 = 2;
pub const HANGING_PIECE_PENALTY: i32 = 30;
pub const CAPTURE_CHANCE_BONUS: i32 = 10;

pub trait BoardScorer: Send + Sync {
    /// Score from the perspective of `side`. Must not mutate anything.
    fn score(&self, game_state: &GameState, side: Side) -> i32;
}

/// Material only: own pieces and kings minus the opponent's.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

impl MaterialScorer {
    #[inline]
    fn material(game_state: &GameState, side: Side) -> i32 {
        PIECE_VALUE * game_state.piece_count(side) as i32
            + KING_BONUS * game_state.king_count(side) as i32
    }
}

impl BoardScorer for MaterialScorer {
    fn score(&self, game_state: &GameState, side: Side) -> i32 {
        Self::material(game_state, side) - Self::material(game_state, side.opposite())
    }
}

/// Material, mobility, and one-move tactical exposure.
///
/// * +2 per own piece, +2 more per own king
/// * +1 per own legal move
/// * -30 for every enemy piece that could jump one of ours next turn
/// * +10 for every enemy piece one of ours could jump
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicScorer;

impl HeuristicScorer {
    fn mobility(game_state: &GameState, side: Side) -> i32 {
        list_legal_moves(game_state, side).len() as i32
    }

    /// Number of (piece, attacker) pairs where a piece of `victim` stands
    /// between an `attacker` piece and an empty landing square, counted along
    /// directions the attacker may use. Off-board probes count as nothing.
    fn jump_threats(game_state: &GameState, victim: Side) -> i32 {
        let attacker = victim.opposite();
        let forward = attacker.forward();
        let mut threats = 0;

        for &target in game_state.pieces(victim) {
            for d_col in [-1, 1] {
                // Any attacking piece moving forward over `target`.
                if jump_available(game_state, target, d_col, forward, attacker, false) {
                    threats += 1;
                }
                // Only kings can come back the other way.
                if jump_available(game_state, target, d_col, -forward, attacker, true) {
                    threats += 1;
                }
            }
        }

        threats
    }
}

/// Whether an `attacker` piece sits one step behind `target` along
/// (`d_col`, `d_row`) with the square one step beyond `target` empty.
#[inline]
fn jump_available(
    game_state: &GameState,
    target: Coord,
    d_col: i8,
    d_row: i8,
    attacker: Side,
    kings_only: bool,
) -> bool {
    let origin = target.offset(-d_col, -d_row);
    let landing = target.offset(d_col, d_row);
    let (Some(from), Some(to)) = (game_state.get(origin), game_state.get(landing)) else {
        return false;
    };
    from.belongs_to(attacker) && (!kings_only || from.is_king()) && to.is_empty()
}

impl BoardScorer for HeuristicScorer {
    fn score(&self, game_state: &GameState, side: Side) -> i32 {
        MaterialScorer::material(game_state, side) + Self::mobility(game_state, side)
            - HANGING_PIECE_PENALTY * Self::jump_threats(game_state, side)
            + CAPTURE_CHANCE_BONUS * Self::jump_threats(game_state, side.opposite())
    }
}

/// Heuristic score of `game_state` for `side`.
#[inline]
pub fn score(game_state: &GameState, side: Side) -> i32 {
    HeuristicScorer.score(game_state, side)
}
