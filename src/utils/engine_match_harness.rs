//! Head-to-head engine match harness for local testing.
//!
//! Runs two `Engine` implementations against each other on a `DameGame`,
//! with an optional seeded random opening prefix, and aggregates series
//! statistics.

use chrono::{DateTime, Utc};
use rand::prelude::IndexedRandom;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::time::Instant;

use crate::dame_errors::DameError;
use crate::engines::engine_trait::{play_engine_turn, Engine, GoParams};
use crate::game_state::dame_game::{DameGame, GameStatus, MoveOutcome};
use crate::game_state::dame_types::*;
use crate::utils::algebraic::{coord_to_algebraic, move_to_algebraic};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    WhiteWin,
    BlackWin,
    DrawMaxTurns,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerId {
    Player1,
    Player2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesOutcome {
    PlayerWin { player: PlayerId, side: Side },
    DrawMaxTurns,
}

#[derive(Debug, Clone)]
pub struct MatchConfig {
    pub max_turns: u16,
    pub opening_min_turns: u8,
    pub opening_max_turns: u8,
    pub go_params: GoParams,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_turns: 200,
            opening_min_turns: 2,
            opening_max_turns: 6,
            go_params: GoParams::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MatchResult {
    pub outcome: MatchOutcome,
    pub final_state: GameState,
    pub opening_turns: Vec<String>,
    pub played_turns: Vec<String>,
    pub white_turn_count: u32,
    pub black_turn_count: u32,
    pub white_total_time_ns: u128,
    pub black_total_time_ns: u128,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct MatchSeriesConfig {
    pub games: u16,
    pub base_seed: u64,
    pub per_game: MatchConfig,
    pub verbose: bool,
}

impl Default for MatchSeriesConfig {
    fn default() -> Self {
        Self {
            games: 9,
            base_seed: 0,
            per_game: MatchConfig::default(),
            verbose: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MatchSeriesStats {
    pub games: u16,
    pub player1_wins: u16,
    pub player2_wins: u16,
    pub draws: u16,
    pub outcomes: Vec<SeriesOutcome>,
    pub player1_turns: u32,
    pub player2_turns: u32,
    pub player1_total_time_ns: u128,
    pub player2_total_time_ns: u128,
    pub player1_avg_turn_time_ms: f64,
    pub player2_avg_turn_time_ms: f64,
    pub overall_avg_turn_time_ms: f64,
}

impl MatchSeriesStats {
    pub fn report(&self) -> String {
        format!(
            "games={} player1_wins={} player2_wins={} draws={} p1_avg_ms={:.3} p2_avg_ms={:.3} overall_avg_ms={:.3}",
            self.games,
            self.player1_wins,
            self.player2_wins,
            self.draws,
            self.player1_avg_turn_time_ms,
            self.player2_avg_turn_time_ms,
            self.overall_avg_turn_time_ms
        )
    }
}

/// Play a single seeded engine-vs-engine match from the starting position.
///
/// `engine_white` is White, `engine_black` is Black.
pub fn play_engine_match(
    mut engine_white: Box<dyn Engine>,
    mut engine_black: Box<dyn Engine>,
    seed: u64,
    config: MatchConfig,
) -> Result<MatchResult, String> {
    play_match_internal(
        DameGame::new(),
        engine_white.as_mut(),
        engine_black.as_mut(),
        seed,
        config,
        true,
    )
}

/// Play a match from a caller-provided game, skipping the random opening.
pub fn play_engine_match_from_game(
    mut engine_white: Box<dyn Engine>,
    mut engine_black: Box<dyn Engine>,
    game: DameGame,
    config: MatchConfig,
) -> Result<MatchResult, String> {
    play_match_internal(
        game,
        engine_white.as_mut(),
        engine_black.as_mut(),
        0,
        config,
        false,
    )
}

fn play_match_internal(
    mut game: DameGame,
    engine_white: &mut dyn Engine,
    engine_black: &mut dyn Engine,
    seed: u64,
    config: MatchConfig,
    apply_random_opening: bool,
) -> Result<MatchResult, String> {
    let started_at = Utc::now();
    engine_white.new_game();
    engine_black.new_game();

    let opening_turns = if apply_random_opening {
        apply_seeded_random_opening(
            &mut game,
            seed,
            config.opening_min_turns,
            config.opening_max_turns,
        )?
    } else {
        Vec::new()
    };

    let mut played_turns = Vec::<String>::new();
    let mut white_turn_count = 0u32;
    let mut black_turn_count = 0u32;
    let mut white_total_time_ns = 0u128;
    let mut black_total_time_ns = 0u128;

    for _ in 0..config.max_turns {
        if game.status() != GameStatus::InProgress {
            break;
        }

        let mover = game.side_to_move();
        let started = Instant::now();
        let turn = match mover {
            Side::White => play_engine_turn(&mut game, engine_white, &config.go_params),
            Side::Black => play_engine_turn(&mut game, engine_black, &config.go_params),
        }
        .map_err(|e| format!("{mover} engine failed: {e}"))?;
        let elapsed_ns = started.elapsed().as_nanos();

        match mover {
            Side::White => {
                white_turn_count = white_turn_count.saturating_add(1);
                white_total_time_ns = white_total_time_ns.saturating_add(elapsed_ns);
            }
            Side::Black => {
                black_turn_count = black_turn_count.saturating_add(1);
                black_total_time_ns = black_total_time_ns.saturating_add(elapsed_ns);
            }
        }

        played_turns.push(format_turn(&turn.hops).map_err(|e| e.to_string())?);
    }

    let outcome = match game.status() {
        GameStatus::Won(Side::White) => MatchOutcome::WhiteWin,
        GameStatus::Won(Side::Black) => MatchOutcome::BlackWin,
        GameStatus::InProgress => MatchOutcome::DrawMaxTurns,
    };

    Ok(MatchResult {
        outcome,
        final_state: game.state().clone(),
        opening_turns,
        played_turns,
        white_turn_count,
        black_turn_count,
        white_total_time_ns,
        black_total_time_ns,
        started_at,
        finished_at: Utc::now(),
    })
}

/// Play a series of matches and aggregate win/loss/draw statistics.
///
/// Player sides are randomized each game (deterministic from `base_seed`).
pub fn play_engine_match_series<F1, F2>(
    player1_factory: F1,
    player2_factory: F2,
    config: MatchSeriesConfig,
) -> Result<MatchSeriesStats, String>
where
    F1: Fn() -> Box<dyn Engine>,
    F2: Fn() -> Box<dyn Engine>,
{
    let mut stats = MatchSeriesStats {
        games: config.games,
        ..MatchSeriesStats::default()
    };
    let mut side_rng = StdRng::seed_from_u64(config.base_seed ^ 0xA5A5_5A5A_0123_4567);

    for i in 0..config.games {
        let player1_is_white = side_rng.random_bool(0.5);
        let seed = config.base_seed.wrapping_add(u64::from(i));
        if config.verbose {
            let (white, black) = if player1_is_white {
                ("Player1", "Player2")
            } else {
                ("Player2", "Player1")
            };
            println!(
                "[series] game {}/{} seed={} white={} black={}",
                i + 1,
                config.games,
                seed,
                white,
                black
            );
        }

        let result = if player1_is_white {
            play_engine_match(player1_factory(), player2_factory(), seed, config.per_game.clone())?
        } else {
            play_engine_match(player2_factory(), player1_factory(), seed, config.per_game.clone())?
        };

        let (p1_turns, p2_turns, p1_ns, p2_ns) = if player1_is_white {
            (
                result.white_turn_count,
                result.black_turn_count,
                result.white_total_time_ns,
                result.black_total_time_ns,
            )
        } else {
            (
                result.black_turn_count,
                result.white_turn_count,
                result.black_total_time_ns,
                result.white_total_time_ns,
            )
        };
        stats.player1_turns = stats.player1_turns.saturating_add(p1_turns);
        stats.player2_turns = stats.player2_turns.saturating_add(p2_turns);
        stats.player1_total_time_ns = stats.player1_total_time_ns.saturating_add(p1_ns);
        stats.player2_total_time_ns = stats.player2_total_time_ns.saturating_add(p2_ns);

        let winning_side = match result.outcome {
            MatchOutcome::WhiteWin => Some(Side::White),
            MatchOutcome::BlackWin => Some(Side::Black),
            MatchOutcome::DrawMaxTurns => None,
        };
        let mapped = match winning_side {
            Some(side) => {
                let player1_won = (side == Side::White) == player1_is_white;
                let player = if player1_won {
                    stats.player1_wins += 1;
                    PlayerId::Player1
                } else {
                    stats.player2_wins += 1;
                    PlayerId::Player2
                };
                SeriesOutcome::PlayerWin { player, side }
            }
            None => {
                stats.draws += 1;
                SeriesOutcome::DrawMaxTurns
            }
        };
        stats.outcomes.push(mapped);

        if config.verbose {
            println!(
                "[series] game {}/{} result={:?} turns={} p1_wins={} p2_wins={} draws={} elapsed_ms={}\n",
                i + 1,
                config.games,
                mapped,
                result.played_turns.len(),
                stats.player1_wins,
                stats.player2_wins,
                stats.draws,
                (result.finished_at - result.started_at).num_milliseconds()
            );
        }
    }

    stats.player1_avg_turn_time_ms =
        avg_ns_per_turn_ms(stats.player1_total_time_ns, stats.player1_turns);
    stats.player2_avg_turn_time_ms =
        avg_ns_per_turn_ms(stats.player2_total_time_ns, stats.player2_turns);

    let total_ns = stats
        .player1_total_time_ns
        .saturating_add(stats.player2_total_time_ns);
    let total_turns = stats.player1_turns.saturating_add(stats.player2_turns);
    stats.overall_avg_turn_time_ms = avg_ns_per_turn_ms(total_ns, total_turns);

    Ok(stats)
}

/// Render a turn as `b3-a4` or, for a capture chain, `c3xe5xg7`.
pub fn format_turn(hops: &[MoveOutcome]) -> Result<String, DameError> {
    let Some(first) = hops.first() else {
        return Ok(String::new());
    };
    if !first.captured {
        return move_to_algebraic(first.mv);
    }

    let mut out = coord_to_algebraic(first.mv.from)?;
    for hop in hops {
        out.push('x');
        out.push_str(&coord_to_algebraic(hop.mv.to)?);
    }
    Ok(out)
}

#[inline]
fn avg_ns_per_turn_ms(total_ns: u128, turns: u32) -> f64 {
    if turns == 0 {
        0.0
    } else {
        (total_ns as f64) / (turns as f64) / 1_000_000.0
    }
}

fn apply_seeded_random_opening(
    game: &mut DameGame,
    seed: u64,
    min_turns: u8,
    max_turns: u8,
) -> Result<Vec<String>, String> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut opening_turns = Vec::<String>::new();

    let low = min_turns.min(max_turns);
    let high = max_turns.max(min_turns);
    let target_turns = if low == high {
        low
    } else {
        rng.random_range(low..=high)
    };

    for _ in 0..target_turns {
        if game.status() != GameStatus::InProgress {
            break;
        }

        let mut hops = Vec::new();
        loop {
            let legal_moves = game.legal_moves();
            let Some(&chosen) = legal_moves.choose(&mut rng) else {
                return Err("no legal move available mid-turn".to_owned());
            };
            let outcome = game.play_move(chosen).map_err(|e| e.to_string())?;
            hops.push(outcome);
            if !outcome.continues() {
                break;
            }
        }
        opening_turns.push(format_turn(&hops).map_err(|e| e.to_string())?);
    }

    Ok(opening_turns)
}
