//! Fixed-depth minimax engine.
//!
//! Wraps `search::minimax` with a configurable default depth, evaluator and
//! root-split thread count, and reports the search statistics as `info` lines.

use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};
use crate::game_state::dame_game::DameGame;
use crate::search::board_scoring::{BoardScorer, HeuristicScorer, MaterialScorer};
use crate::search::minimax::{search, SearchConfig};
use crate::search::threading::ThreadingConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MinimaxScorerKind {
    Heuristic,
    Material,
}

pub struct MinimaxEngine {
    default_depth: u8,
    scorer_kind: MinimaxScorerKind,
    heuristic_scorer: HeuristicScorer,
    material_scorer: MaterialScorer,
    threads: usize,
}

impl MinimaxEngine {
    pub fn new(default_depth: u8) -> Self {
        Self::new_with_scorer(default_depth, MinimaxScorerKind::Heuristic)
    }

    pub fn new_with_scorer(default_depth: u8, scorer_kind: MinimaxScorerKind) -> Self {
        Self {
            default_depth,
            scorer_kind,
            heuristic_scorer: HeuristicScorer,
            material_scorer: MaterialScorer,
            threads: 1,
        }
    }

    #[inline]
    pub fn default_depth(&self) -> u8 {
        self.default_depth
    }

    fn scorer(&self) -> &dyn BoardScorer {
        match self.scorer_kind {
            MinimaxScorerKind::Heuristic => &self.heuristic_scorer,
            MinimaxScorerKind::Material => &self.material_scorer,
        }
    }
}

impl Engine for MinimaxEngine {
    fn name(&self) -> &str {
        "Dame Minimax"
    }

    fn set_option(&mut self, name: &str, value: &str) -> Result<(), String> {
        if name.eq_ignore_ascii_case("Depth") {
            self.default_depth = value
                .trim()
                .parse::<u8>()
                .map_err(|_| format!("invalid Depth value '{value}'"))?;
            return Ok(());
        }
        if name.eq_ignore_ascii_case("Threads") {
            let parsed = value
                .trim()
                .parse::<usize>()
                .map_err(|_| format!("invalid Threads value '{value}'"))?;
            self.threads = parsed.max(1);
            return Ok(());
        }
        if name.eq_ignore_ascii_case("Scorer") {
            self.scorer_kind = match value.trim().to_ascii_lowercase().as_str() {
                "heuristic" => MinimaxScorerKind::Heuristic,
                "material" => MinimaxScorerKind::Material,
                _ => return Err(format!("unknown Scorer '{value}'")),
            };
            return Ok(());
        }
        Ok(())
    }

    fn choose_move(&mut self, game: &DameGame, params: &GoParams) -> Result<EngineOutput, String> {
        let candidates = game.legal_moves();
        let depth = params.depth.unwrap_or(self.default_depth);
        let threads = params.threads.unwrap_or(self.threads);

        let result = search(
            game.state(),
            game.side_to_move(),
            &candidates,
            self.scorer(),
            SearchConfig {
                depth,
                threading: ThreadingConfig::with_threads(threads),
            },
        );

        let mut out = EngineOutput {
            best_move: result.best_move,
            score: result.best_move.map(|_| result.best_score),
            info_lines: Vec::new(),
        };
        out.info_lines.push(format!(
            "info depth {} score {} nodes {} time {}",
            depth, result.best_score, result.nodes, result.elapsed_ms
        ));
        out.info_lines.push(format!(
            "info string minimax_engine candidates {}",
            candidates.len()
        ));
        out.info_lines.push(format!(
            "info string minimax_engine scorer {:?}",
            self.scorer_kind
        ));
        if threads > 1 {
            out.info_lines
                .push(format!("info string minimax_engine threads {}", threads));
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::engine_trait::play_engine_turn;
    use crate::game_state::dame_types::*;

    #[test]
    fn minimax_engine_honors_depth_override() {
        let game = DameGame::new();
        let mut engine = MinimaxEngine::new(3);
        let params = GoParams {
            depth: Some(0),
            ..GoParams::default()
        };

        let out = engine
            .choose_move(&game, &params)
            .expect("engine should choose a move");
        let joined = out.info_lines.join("\n");

        assert!(joined.contains("info depth 0"), "expected depth-0 search info");
        let best = out.best_move.expect("start position has moves");
        assert!(game.legal_moves().contains(&best));
    }

    #[test]
    fn options_are_parsed_and_validated() {
        let mut engine = MinimaxEngine::new(1);
        engine.set_option("depth", "3").expect("depth should parse");
        assert_eq!(engine.default_depth(), 3);
        assert!(engine.set_option("Depth", "deep").is_err());
        assert!(engine.set_option("Scorer", "material").is_ok());
        assert!(engine.set_option("Scorer", "vibes").is_err());
        assert!(engine.set_option("Threads", "4").is_ok());
    }

    #[test]
    fn engine_turn_finishes_a_capture_chain() {
        let state = GameState::from_diagram(
            "White
             b_______
             ________
             ________
             __b_____
             ________
             __b_____
             _w______
             ________",
        )
        .expect("diagram should parse");
        let mut game = DameGame::from_state(state);
        let mut engine = MinimaxEngine::new(1);

        let turn = play_engine_turn(&mut game, &mut engine, &GoParams::default())
            .expect("engine should play");

        assert_eq!(turn.hops.len(), 2);
        assert!(turn.hops.iter().all(|hop| hop.captured));
        assert_eq!(game.side_to_move(), Side::Black);
        assert_eq!(game.state().piece_count(Side::Black), 1);
        assert!(!turn.info_lines.is_empty());
    }
}
