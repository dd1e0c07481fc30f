//! Board state representation.
//!
//! `GameState` is the central model of the engine: an 8x8 grid of cells, one
//! coordinate registry per side, and the side to move. It is a plain value:
//! search code clones it for every hypothetical position, and the live game
//! mutates its own copy only through the rules engine.

use std::collections::BTreeSet;

use crate::dame_errors::DameError;
use crate::game_state::dame_rules::STARTING_POSITION_DIAGRAM;
use crate::game_state::dame_types::*;
use crate::utils::diagram::{generate_diagram, parse_diagram};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    // [col][row]
    board: [[Cell; BOARD_SIZE as usize]; BOARD_SIZE as usize],
    // [side]
    pieces: [BTreeSet<Coord>; 2],
    pub side_to_move: Side,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            board: [[Cell::Empty; BOARD_SIZE as usize]; BOARD_SIZE as usize],
            pieces: [BTreeSet::new(), BTreeSet::new()],
            side_to_move: Side::White,
        }
    }
}

impl GameState {
    /// An empty board with `side_to_move` to play.
    #[inline]
    pub fn new_empty(side_to_move: Side) -> Self {
        Self {
            side_to_move,
            ..Self::default()
        }
    }

    #[inline]
    pub fn new_game() -> Self {
        parse_diagram(STARTING_POSITION_DIAGRAM).expect("starting diagram should always parse")
    }

    #[inline]
    pub fn from_diagram(diagram: &str) -> Result<Self, DameError> {
        parse_diagram(diagram)
    }

    #[inline]
    pub fn to_diagram(&self) -> String {
        generate_diagram(self)
    }

    /// Builds a position from explicit piece placements.
    pub fn from_pieces(side_to_move: Side, placements: &[(Coord, Cell)]) -> Result<Self, DameError> {
        let mut state = Self::new_empty(side_to_move);
        for &(coord, cell) in placements {
            state.place(coord, cell)?;
        }
        Ok(state)
    }

    /// Content of `coord`; off-board squares read as empty.
    #[inline]
    pub fn cell(&self, coord: Coord) -> Cell {
        self.get(coord).unwrap_or(Cell::Empty)
    }

    #[inline]
    pub fn get(&self, coord: Coord) -> Option<Cell> {
        if coord.in_bounds() {
            Some(self.board[coord.col as usize][coord.row as usize])
        } else {
            None
        }
    }

    /// Coordinates of every piece of `side`, in registry order.
    #[inline]
    pub fn pieces(&self, side: Side) -> &BTreeSet<Coord> {
        &self.pieces[side.index()]
    }

    #[inline]
    pub fn piece_count(&self, side: Side) -> usize {
        self.pieces[side.index()].len()
    }

    #[inline]
    pub fn total_pieces(&self) -> usize {
        self.piece_count(Side::White) + self.piece_count(Side::Black)
    }

    pub fn king_count(&self, side: Side) -> usize {
        self.pieces(side)
            .iter()
            .filter(|&&c| self.cell(c).is_king())
            .count()
    }

    /// Puts a piece on an empty, on-board square and registers it.
    pub fn place(&mut self, coord: Coord, cell: Cell) -> Result<(), DameError> {
        let Some(side) = cell.side() else {
            return Err(DameError::InvalidDiagram(format!(
                "cannot place an empty cell at {coord}"
            )));
        };
        match self.get(coord) {
            None => Err(DameError::InvalidDiagram(format!("{coord} is off the board"))),
            Some(Cell::Empty) => {
                self.set_cell(coord, cell);
                self.pieces[side.index()].insert(coord);
                Ok(())
            }
            Some(_) => Err(DameError::InvalidDiagram(format!("{coord} is already occupied"))),
        }
    }

    /// Moves whatever occupies `from` to `to`, keeping the registry in step.
    /// Returns the cell that was moved.
    pub(crate) fn relocate(&mut self, from: Coord, to: Coord) -> Cell {
        let moving = self.cell(from);
        if let Some(side) = moving.side() {
            self.set_cell(from, Cell::Empty);
            self.set_cell(to, moving);
            let registry = &mut self.pieces[side.index()];
            registry.remove(&from);
            registry.insert(to);
        }
        moving
    }

    /// Removes the piece at `coord` from board and registry.
    pub(crate) fn remove(&mut self, coord: Coord) -> Cell {
        let removed = self.cell(coord);
        if let Some(side) = removed.side() {
            self.set_cell(coord, Cell::Empty);
            self.pieces[side.index()].remove(&coord);
        }
        removed
    }

    /// Overwrites an occupied cell's piece type without touching the registry.
    pub(crate) fn replace_piece(&mut self, coord: Coord, cell: Cell) {
        debug_assert_eq!(self.cell(coord).side(), cell.side());
        self.set_cell(coord, cell);
    }

    #[inline]
    fn set_cell(&mut self, coord: Coord, cell: Cell) {
        self.board[coord.col as usize][coord.row as usize] = cell;
    }

    /// Checks that both registries are in exact correspondence with the board.
    pub fn validate(&self) -> Result<(), DameError> {
        for side in [Side::White, Side::Black] {
            for &coord in self.pieces(side) {
                if !self.cell(coord).belongs_to(side) {
                    return Err(DameError::CorruptState(format!(
                        "{side} registry lists {coord} but the board holds {:?}",
                        self.cell(coord)
                    )));
                }
            }
        }

        for col in 0..BOARD_SIZE {
            for row in 0..BOARD_SIZE {
                let coord = Coord::new(col, row);
                if let Some(side) = self.cell(coord).side() {
                    if !self.pieces(side).contains(&coord) {
                        return Err(DameError::CorruptState(format!(
                            "{side} piece at {coord} is missing from its registry"
                        )));
                    }
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::dame_rules::STARTING_PIECES_PER_SIDE;

    #[test]
    fn starting_position_has_twelve_men_per_side_on_dark_squares() {
        let game = GameState::new_game();
        assert_eq!(game.side_to_move, Side::White);
        for side in [Side::White, Side::Black] {
            assert_eq!(game.piece_count(side), STARTING_PIECES_PER_SIDE);
            assert_eq!(game.king_count(side), 0);
            assert!(game.pieces(side).iter().all(|c| c.is_dark()));
        }
        assert!(game.pieces(Side::White).iter().all(|c| c.row >= 5));
        assert!(game.pieces(Side::Black).iter().all(|c| c.row <= 2));
        assert_eq!(game.cell(Coord::new(1, 5)), Cell::WhiteMan);
        assert_eq!(game.cell(Coord::new(0, 0)), Cell::BlackMan);
        game.validate().expect("starting position should be consistent");
    }

    #[test]
    fn place_rejects_occupied_and_off_board_squares() {
        let mut state = GameState::new_empty(Side::Black);
        state
            .place(Coord::new(2, 2), Cell::BlackMan)
            .expect("empty square should accept a piece");
        assert!(state.place(Coord::new(2, 2), Cell::WhiteMan).is_err());
        assert!(state.place(Coord::new(8, 2), Cell::WhiteMan).is_err());
        assert!(state.place(Coord::new(3, 3), Cell::Empty).is_err());
        assert_eq!(state.total_pieces(), 1);
    }

    #[test]
    fn relocate_and_remove_keep_registry_in_sync() {
        let mut state = GameState::from_pieces(
            Side::White,
            &[
                (Coord::new(3, 3), Cell::WhiteMan),
                (Coord::new(2, 2), Cell::BlackKing),
            ],
        )
        .expect("position should build");

        state.relocate(Coord::new(3, 3), Coord::new(4, 2));
        state.remove(Coord::new(2, 2));

        assert!(state.pieces(Side::White).contains(&Coord::new(4, 2)));
        assert!(!state.pieces(Side::White).contains(&Coord::new(3, 3)));
        assert!(state.pieces(Side::Black).is_empty());
        state.validate().expect("registries should match the board");
    }

    #[test]
    fn validate_reports_cells_missing_from_registry() {
        let mut state = GameState::new_empty(Side::White);
        state.set_cell(Coord::new(0, 0), Cell::BlackMan);
        assert!(matches!(state.validate(), Err(DameError::CorruptState(_))));
    }

    #[test]
    fn clones_are_independent() {
        let original = GameState::new_game();
        let mut copy = original.clone();
        copy.remove(Coord::new(1, 5));
        assert_eq!(original.piece_count(Side::White), 12);
        assert_eq!(copy.piece_count(Side::White), 11);
    }
}
