//! Depth-limited minimax without pruning.
//!
//! One unit of depth is a full cycle: the searching side's move followed by
//! every opponent reply. At depth 0 each candidate is scored greedily after a
//! single hop. Above that, the candidate's value is the worst (minimum) over
//! the opponent's complete replies of the best score the searching side can
//! reach from there with one less unit of depth. The candidate with the
//! highest value wins; ties go to the earliest candidate.
//!
//! Every hypothetical position is an owned clone, so no branch can observe
//! another branch's moves.

use std::thread;
use std::time::Instant;

use crate::game_state::dame_types::*;
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_generator::{
    generate_turn_completions, list_legal_moves, turn_completions_from,
};
use crate::search::board_scoring::{BoardScorer, HeuristicScorer};
use crate::search::threading::ThreadingConfig;

/// Value of a position where the opponent has no reply. Larger than any
/// heuristic score.
pub const WIN_SCORE: i32 = 1_000_000;
/// Value of a position where the searching side has no move.
pub const LOSS_SCORE: i32 = -WIN_SCORE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchConfig {
    pub depth: u8,
    pub threading: ThreadingConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    pub best_score: i32,
    pub nodes: u64,
    pub elapsed_ms: u128,
}

/// Best move for `side` and its backed-up score, using the default heuristic.
/// `None` when `side` has no legal move.
pub fn choose_move(game_state: &GameState, side: Side, depth: u8) -> Option<(Move, i32)> {
    let candidates = list_legal_moves(game_state, side);
    let mut nodes = 0u64;
    best_of(game_state, side, depth, &candidates, &HeuristicScorer, &mut nodes)
}

/// Full search entry point over an explicit `candidates` list (mid-chain
/// this is the capturing piece's continuations), with node accounting,
/// timing and optional root-split threading. The selected move is identical
/// to the sequential search regardless of thread count.
pub fn search<S: BoardScorer + ?Sized>(
    game_state: &GameState,
    side: Side,
    candidates: &[Move],
    scorer: &S,
    config: SearchConfig,
) -> SearchResult {
    let started = Instant::now();
    let workers = config.threading.workers_for(candidates.len());

    let (best, nodes) = if workers <= 1 {
        let mut nodes = 0u64;
        let best = best_of(game_state, side, config.depth, candidates, scorer, &mut nodes);
        (best, nodes)
    } else {
        root_split(game_state, side, config.depth, candidates, scorer, workers)
    };

    SearchResult {
        best_move: best.map(|(mv, _)| mv),
        best_score: best.map_or(LOSS_SCORE, |(_, score)| score),
        nodes,
        elapsed_ms: started.elapsed().as_millis(),
    }
}

fn root_split<S: BoardScorer + ?Sized>(
    game_state: &GameState,
    side: Side,
    depth: u8,
    candidates: &[Move],
    scorer: &S,
    workers: usize,
) -> (Option<(Move, i32)>, u64) {
    let chunk_len = candidates.len().div_ceil(workers);

    let per_worker: Vec<(Vec<i32>, u64)> = thread::scope(|scope| {
        let handles: Vec<_> = candidates
            .chunks(chunk_len)
            .map(|chunk| {
                scope.spawn(move || {
                    let mut nodes = 0u64;
                    let scores = chunk
                        .iter()
                        .map(|&mv| candidate_score(game_state, mv, side, depth, scorer, &mut nodes))
                        .collect::<Vec<_>>();
                    (scores, nodes)
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join().unwrap_or_else(|e| std::panic::resume_unwind(e)))
            .collect()
    });

    let nodes = per_worker.iter().map(|(_, n)| n).sum();
    let scores = per_worker.into_iter().flat_map(|(scores, _)| scores);

    let mut best: Option<(Move, i32)> = None;
    for (&mv, score) in candidates.iter().zip(scores) {
        if improves(best, score) {
            best = Some((mv, score));
        }
    }
    (best, nodes)
}

/// First-seen maximum over `candidates`. Stops early on a forced win since
/// nothing can beat it.
fn best_of<S: BoardScorer + ?Sized>(
    game_state: &GameState,
    side: Side,
    depth: u8,
    candidates: &[Move],
    scorer: &S,
    nodes: &mut u64,
) -> Option<(Move, i32)> {
    let mut best: Option<(Move, i32)> = None;
    for &mv in candidates {
        let score = candidate_score(game_state, mv, side, depth, scorer, nodes);
        if improves(best, score) {
            best = Some((mv, score));
        }
        if score >= WIN_SCORE {
            break;
        }
    }
    best
}

#[inline]
fn improves(best: Option<(Move, i32)>, score: i32) -> bool {
    best.map_or(true, |(_, best_score)| score > best_score)
}

fn candidate_score<S: BoardScorer + ?Sized>(
    game_state: &GameState,
    mv: Move,
    side: Side,
    depth: u8,
    scorer: &S,
    nodes: &mut u64,
) -> i32 {
    if depth == 0 {
        *nodes += 1;
        let (hypothetical, _) = apply_move(game_state, mv, side);
        return scorer.score(&hypothetical, side);
    }

    // A capture that opens a chain is finished before the opponent replies;
    // the searching side picks whichever completion serves it best.
    let mut best = i32::MIN;
    for completion in turn_completions_from(game_state, mv, side) {
        *nodes += 1;
        let value = reply_value(&completion.game_after_turn, side, depth, scorer, nodes);
        best = best.max(value);
        if best >= WIN_SCORE {
            break;
        }
    }
    best
}

/// Minimum over the opponent's complete replies of `side`'s best follow-up.
fn reply_value<S: BoardScorer + ?Sized>(
    after_move: &GameState,
    side: Side,
    depth: u8,
    scorer: &S,
    nodes: &mut u64,
) -> i32 {
    let replies = generate_turn_completions(after_move, side.opposite());
    if replies.is_empty() {
        return WIN_SCORE;
    }

    let mut worst = i32::MAX;
    for reply in replies {
        *nodes += 1;
        let position = &reply.game_after_turn;
        let follow_ups = list_legal_moves(position, side);
        let value = best_of(position, side, depth - 1, &follow_ups, scorer, nodes)
            .map_or(LOSS_SCORE, |(_, score)| score);
        worst = worst.min(value);
    }
    worst
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::board_scoring::{score, MaterialScorer};

    fn mv(fc: i8, fr: i8, tc: i8, tr: i8) -> Move {
        Move::new(Coord::new(fc, fr), Coord::new(tc, tr))
    }

    fn greedy_reference(game_state: &GameState, side: Side) -> Option<(Move, i32)> {
        let mut best: Option<(Move, i32)> = None;
        for candidate in list_legal_moves(game_state, side) {
            let (next, _) = apply_move(game_state, candidate, side);
            let value = score(&next, side);
            if improves(best, value) {
                best = Some((candidate, value));
            }
        }
        best
    }

    #[test]
    fn depth_zero_matches_brute_force_greedy_choice() {
        let positions = [
            GameState::new_game(),
            GameState::from_diagram(
                "Black
                 ________
                 _b______
                 __b_____
                 ___w____
                 ______w_
                 ________
                 ________
                 ________",
            )
            .expect("diagram should parse"),
            GameState::from_diagram(
                "White
                 ________
                 __b_b___
                 ________
                 ___W____
                 ________
                 _b___w__
                 ________
                 ________",
            )
            .expect("diagram should parse"),
        ];

        for position in &positions {
            for side in [Side::White, Side::Black] {
                assert_eq!(
                    choose_move(position, side, 0),
                    greedy_reference(position, side),
                    "greedy mismatch for {side}"
                );
            }
        }
    }

    #[test]
    fn no_legal_moves_yields_none() {
        let state = GameState::from_diagram(
            "White
             ________
             ________
             ________
             ________
             ________
             ________
             ________
             b_______",
        )
        .expect("diagram should parse");
        assert_eq!(choose_move(&state, Side::White, 2), None);
    }

    #[test]
    fn immediate_win_is_returned_with_the_sentinel_score() {
        // Capturing Black's last piece leaves Black without a reply.
        let state = GameState::from_diagram(
            "White
             ________
             ________
             __b_____
             ___w____
             ________
             ________
             w_______
             ________",
        )
        .expect("diagram should parse");
        assert_eq!(
            choose_move(&state, Side::White, 1),
            Some((mv(3, 3, 1, 1), WIN_SCORE))
        );
    }

    #[test]
    fn depth_one_avoids_a_step_that_hangs_a_piece() {
        // White's man at (5,5) must not step to (4,4) or (6,4): Black's men at
        // (3,3)/(7,3) would capture it. Moving the back man is safe.
        let state = GameState::from_diagram(
            "White
             ________
             ________
             ________
             ___b___b
             ________
             _____w__
             ________
             _w______",
        )
        .expect("diagram should parse");

        let (best, _) = choose_move(&state, Side::White, 1).expect("white has moves");
        assert_eq!(best.from, Coord::new(1, 7));
    }

    #[test]
    fn restricted_candidates_are_respected() {
        let game = GameState::new_game();
        let only = [mv(7, 5, 6, 4)];
        let result = search(
            &game,
            Side::White,
            &only,
            &MaterialScorer,
            SearchConfig {
                depth: 1,
                threading: ThreadingConfig::default(),
            },
        );
        assert_eq!(result.best_move, Some(only[0]));
    }

    #[test]
    fn root_split_agrees_with_sequential_search() {
        let game = GameState::new_game();
        let candidates = list_legal_moves(&game, Side::White);

        let sequential = search(
            &game,
            Side::White,
            &candidates,
            &HeuristicScorer,
            SearchConfig {
                depth: 1,
                threading: ThreadingConfig::default(),
            },
        );
        let parallel = search(
            &game,
            Side::White,
            &candidates,
            &HeuristicScorer,
            SearchConfig {
                depth: 1,
                threading: ThreadingConfig::with_threads(3),
            },
        );

        assert_eq!(sequential.best_move, parallel.best_move);
        assert_eq!(sequential.best_score, parallel.best_score);
        assert!(sequential.nodes > candidates.len() as u64);
    }

    /// Plain recursive minimax with no early exits, written against the turn
    /// generator directly.
    fn reference_value(game_state: &GameState, mv: Move, side: Side, depth: u8) -> i32 {
        if depth == 0 {
            return score(&apply_move(game_state, mv, side).0, side);
        }
        turn_completions_from(game_state, mv, side)
            .iter()
            .map(|own| {
                let replies = generate_turn_completions(&own.game_after_turn, side.opposite());
                if replies.is_empty() {
                    return WIN_SCORE;
                }
                replies
                    .iter()
                    .map(|reply| {
                        reference_best(&reply.game_after_turn, side, depth - 1)
                            .map_or(LOSS_SCORE, |(_, value)| value)
                    })
                    .min()
                    .unwrap_or(WIN_SCORE)
            })
            .max()
            .unwrap_or(LOSS_SCORE)
    }

    fn reference_best(game_state: &GameState, side: Side, depth: u8) -> Option<(Move, i32)> {
        let mut best: Option<(Move, i32)> = None;
        for candidate in list_legal_moves(game_state, side) {
            let value = reference_value(game_state, candidate, side, depth);
            if best.map_or(true, |(_, b)| value > b) {
                best = Some((candidate, value));
            }
        }
        best
    }

    #[test]
    fn nested_search_matches_reference_minimax_on_random_playouts() {
        use crate::game_state::dame_game::{DameGame, GameStatus, TurnPhase};
        use rand::prelude::IndexedRandom;
        use rand::{rngs::StdRng, SeedableRng};

        let mut checked = 0;
        for seed in [3u64, 17, 29] {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut game = DameGame::new();

            for ply in 0..36 {
                if game.status() != GameStatus::InProgress {
                    break;
                }
                if ply % 4 == 0 && !matches!(game.phase(), TurnPhase::MidChain { .. }) {
                    let side = game.side_to_move();
                    for depth in [1u8, 2] {
                        assert_eq!(
                            choose_move(game.state(), side, depth),
                            reference_best(game.state(), side, depth),
                            "seed {seed} ply {ply} depth {depth}"
                        );
                    }
                    checked += 1;
                }

                let legal = game.legal_moves();
                let pick = *legal.choose(&mut rng).expect("in-progress game has moves");
                game.play_move(pick).expect("listed moves are legal");
            }
        }
        assert!(checked >= 3);
    }

    #[test]
    fn forced_loss_backs_up_the_loss_score() {
        // White's only man must step to (2,2) or (4,2); either way Black is
        // forced to jump it and White is left without a move.
        let state = GameState::from_diagram(
            "White
             ________
             _b___b__
             ________
             ___w____
             ________
             ________
             ________
             ________",
        )
        .expect("diagram should parse");

        assert_eq!(
            choose_move(&state, Side::White, 1),
            Some((mv(3, 3, 2, 2), LOSS_SCORE))
        );
        assert_eq!(
            choose_move(&state, Side::White, 2),
            Some((mv(3, 3, 2, 2), LOSS_SCORE))
        );

        let result = search(
            &state,
            Side::White,
            &list_legal_moves(&state, Side::White),
            &HeuristicScorer,
            SearchConfig {
                depth: 2,
                threading: ThreadingConfig::with_threads(2),
            },
        );
        assert_eq!(result.best_move, Some(mv(3, 3, 2, 2)));
        assert_eq!(result.best_score, LOSS_SCORE);
    }
}
