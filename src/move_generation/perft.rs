use std::thread;

use crate::dame_errors::DameError;
use crate::game_state::dame_types::*;
use crate::move_generation::legal_move_generator::{generate_turn_completions, TurnCompletion};

/// Leaf statistics for a perft run. A node is one complete turn, so a
/// multi-jump counts once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub multi_captures: usize,
    pub promotions: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.multi_captures += rhs.multi_captures;
        self.promotions += rhs.promotions;
    }
}

pub fn perft(game_state: &GameState, depth: u8) -> PerftCounts {
    if depth == 0 {
        return PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        };
    }

    let side = game_state.side_to_move;
    let mut total = PerftCounts::default();
    for completion in generate_turn_completions(game_state, side) {
        perft_recurse(game_state, &completion, side, depth, 1, &mut total);
    }
    total
}

/// Same counts as [`perft`], one worker per root turn.
pub fn perft_multi_threaded(game_state: &GameState, depth: u8) -> Result<PerftCounts, DameError> {
    if depth == 0 {
        return Ok(perft(game_state, 0));
    }

    let side = game_state.side_to_move;
    let root_turns = generate_turn_completions(game_state, side);

    thread::scope(|scope| {
        let handles: Vec<_> = root_turns
            .iter()
            .map(|completion| {
                scope.spawn(move || {
                    let mut local = PerftCounts::default();
                    perft_recurse(game_state, completion, side, depth, 1, &mut local);
                    local
                })
            })
            .collect();

        let mut total = PerftCounts::default();
        for handle in handles {
            let local = handle
                .join()
                .map_err(|_| DameError::CorruptState("perft worker thread panicked".to_owned()))?;
            total.merge(local);
        }
        Ok(total)
    })
}

fn perft_recurse(
    before: &GameState,
    completion: &TurnCompletion,
    side: Side,
    search_depth: u8,
    current_depth: u8,
    counts: &mut PerftCounts,
) {
    if current_depth == search_depth {
        counts.nodes += 1;

        let after = &completion.game_after_turn;
        if completion.hops[0].is_jump() {
            counts.captures += 1;
        }
        if completion.hops.len() > 1 {
            counts.multi_captures += 1;
        }
        if after.king_count(side) > before.king_count(side) {
            counts.promotions += 1;
        }
        return;
    }

    let mut next = completion.game_after_turn.clone();
    next.side_to_move = side.opposite();
    let reply_side = next.side_to_move;

    for child in generate_turn_completions(&next, reply_side) {
        perft_recurse(&next, &child, reply_side, search_depth, current_depth + 1, counts);
    }
}
