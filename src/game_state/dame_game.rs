//! Live game controller.
//!
//! `DameGame` owns the one mutable `GameState` of a game in progress and runs
//! the turn state machine: a move is validated, executed, and then either the
//! capturing piece continues its chain or the turn passes to the other side.

use crate::dame_errors::DameError;
use crate::game_state::dame_rules::ChainRule;
use crate::game_state::dame_types::*;
use crate::move_generation::legal_move_apply::apply_move_in_place;
use crate::move_generation::legal_move_checks::check_move;
use crate::move_generation::legal_move_generator::{
    can_capture, list_continuation_moves, list_legal_moves,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    AwaitingMove,
    /// The piece at `piece` just captured and must keep jumping.
    MidChain { piece: Coord },
    TurnOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won(Side),
}

/// Result of one accepted hop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub mv: Move,
    pub side: Side,
    pub captured: bool,
    pub promoted: bool,
    /// `MidChain` if the same side must move again, otherwise `TurnOver`.
    pub phase_after: TurnPhase,
}

impl MoveOutcome {
    #[inline]
    pub fn continues(&self) -> bool {
        matches!(self.phase_after, TurnPhase::MidChain { .. })
    }
}

#[derive(Debug, Clone)]
pub struct DameGame {
    state: GameState,
    phase: TurnPhase,
    chain_rule: ChainRule,
    turns_played: u32,
}

impl Default for DameGame {
    fn default() -> Self {
        Self::new()
    }
}

impl DameGame {
    pub fn new() -> Self {
        Self::from_state(GameState::new_game())
    }

    pub fn from_state(state: GameState) -> Self {
        Self {
            state,
            phase: TurnPhase::AwaitingMove,
            chain_rule: ChainRule::default(),
            turns_played: 0,
        }
    }

    pub fn with_chain_rule(mut self, chain_rule: ChainRule) -> Self {
        self.chain_rule = chain_rule;
        self
    }

    #[inline]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[inline]
    pub fn side_to_move(&self) -> Side {
        self.state.side_to_move
    }

    #[inline]
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    #[inline]
    pub fn chain_rule(&self) -> ChainRule {
        self.chain_rule
    }

    /// Completed turns (not hops) since this controller was created.
    #[inline]
    pub fn turns_played(&self) -> u32 {
        self.turns_played
    }

    /// Moves the side to move may play right now.
    pub fn legal_moves(&self) -> Vec<Move> {
        let side = self.side_to_move();
        match (self.phase, self.chain_rule) {
            (TurnPhase::MidChain { piece }, ChainRule::CapturingPieceOnly) => {
                list_continuation_moves(&self.state, piece, side)
            }
            _ => list_legal_moves(&self.state, side),
        }
    }

    pub fn must_capture(&self) -> bool {
        match self.phase {
            TurnPhase::MidChain { .. } => true,
            _ => can_capture(&self.state, self.side_to_move()),
        }
    }

    /// A side with no legal move on its turn has lost.
    pub fn status(&self) -> GameStatus {
        if self.legal_moves().is_empty() {
            GameStatus::Won(self.side_to_move().opposite())
        } else {
            GameStatus::InProgress
        }
    }

    /// Validate `mv` for the side to move without playing it.
    pub fn check(&self, mv: Move) -> Result<(), DameError> {
        if let GameStatus::Won(winner) = self.status() {
            return Err(DameError::GameOver(winner));
        }
        if let (TurnPhase::MidChain { piece }, ChainRule::CapturingPieceOnly) =
            (self.phase, self.chain_rule)
        {
            if mv.from != piece {
                return Err(DameError::ChainContinuationRequired(piece));
            }
        }
        check_move(&self.state, mv, self.side_to_move(), self.must_capture())?;
        Ok(())
    }

    /// Validate and play one hop for the side to move.
    pub fn play_move(&mut self, mv: Move) -> Result<MoveOutcome, DameError> {
        self.check(mv)?;

        let side = self.side_to_move();
        let applied = apply_move_in_place(&mut self.state, mv, side);

        let continues =
            applied.captured && !list_continuation_moves(&self.state, mv.to, side).is_empty();

        let phase_after = if continues {
            TurnPhase::MidChain { piece: mv.to }
        } else {
            TurnPhase::TurnOver
        };

        if continues {
            self.phase = phase_after;
        } else {
            self.end_turn();
        }

        Ok(MoveOutcome {
            mv,
            side,
            captured: applied.captured,
            promoted: applied.promoted,
            phase_after,
        })
    }

    fn end_turn(&mut self) {
        self.state.side_to_move = self.state.side_to_move.opposite();
        self.phase = TurnPhase::AwaitingMove;
        self.turns_played += 1;
    }
}
