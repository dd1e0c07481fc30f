//! Core value types shared by the board, rules engine, and search.
//!
//! Everything here is `Copy` so that game states can be cloned wholesale for
//! hypothetical positions without any shared references between branches.

use std::fmt;

pub use crate::game_state::game_state::GameState;

/// Board edge length.
pub const BOARD_SIZE: i8 = 8;

/// Side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Side {
    White,
    Black,
}

impl Side {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Side::White => 0,
            Side::Black => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// Row delta of a man's forward move.
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Side::White => -1,
            Side::Black => 1,
        }
    }

    /// Row on which a man of this side is promoted.
    #[inline]
    pub const fn promotion_row(self) -> i8 {
        match self {
            Side::White => 0,
            Side::Black => BOARD_SIZE - 1,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Side::White => "White",
            Side::Black => "Black",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Piece kind (side is carried separately by `Cell`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Man,
    King,
}

/// Content of a single board square.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Empty,
    WhiteMan,
    WhiteKing,
    BlackMan,
    BlackKing,
}

impl Cell {
    #[inline]
    pub const fn side(self) -> Option<Side> {
        match self {
            Cell::Empty => None,
            Cell::WhiteMan | Cell::WhiteKing => Some(Side::White),
            Cell::BlackMan | Cell::BlackKing => Some(Side::Black),
        }
    }

    #[inline]
    pub const fn kind(self) -> Option<PieceKind> {
        match self {
            Cell::Empty => None,
            Cell::WhiteMan | Cell::BlackMan => Some(PieceKind::Man),
            Cell::WhiteKing | Cell::BlackKing => Some(PieceKind::King),
        }
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    #[inline]
    pub const fn is_king(self) -> bool {
        matches!(self, Cell::WhiteKing | Cell::BlackKing)
    }

    #[inline]
    pub fn belongs_to(self, side: Side) -> bool {
        self.side() == Some(side)
    }

    /// The same piece after promotion. Kings and empty cells are unchanged.
    #[inline]
    pub const fn promoted(self) -> Self {
        match self {
            Cell::WhiteMan => Cell::WhiteKing,
            Cell::BlackMan => Cell::BlackKing,
            other => other,
        }
    }
}

/// Grid coordinate. Signed so that off-board probes are representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub col: i8,
    pub row: i8,
}

impl Coord {
    #[inline]
    pub const fn new(col: i8, row: i8) -> Self {
        Self { col, row }
    }

    #[inline]
    pub const fn in_bounds(self) -> bool {
        self.col >= 0 && self.col < BOARD_SIZE && self.row >= 0 && self.row < BOARD_SIZE
    }

    #[inline]
    pub const fn offset(self, d_col: i8, d_row: i8) -> Self {
        Self {
            col: self.col + d_col,
            row: self.row + d_row,
        }
    }

    /// Dark squares are the playable ones.
    #[inline]
    pub const fn is_dark(self) -> bool {
        (self.col + self.row) % 2 == 0
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.col, self.row)
    }
}

/// An ordered (from, to) pair: a step or a jump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Coord,
    pub to: Coord,
}

impl Move {
    #[inline]
    pub const fn new(from: Coord, to: Coord) -> Self {
        Self { from, to }
    }

    #[inline]
    pub const fn d_col(self) -> i8 {
        self.to.col - self.from.col
    }

    #[inline]
    pub const fn d_row(self) -> i8 {
        self.to.row - self.from.row
    }

    #[inline]
    pub const fn is_step(self) -> bool {
        self.d_col().abs() == 1 && self.d_row().abs() == 1
    }

    #[inline]
    pub const fn is_jump(self) -> bool {
        self.d_col().abs() == 2 && self.d_row().abs() == 2
    }

    /// Square jumped over, if this is a jump.
    #[inline]
    pub const fn midpoint(self) -> Option<Coord> {
        if self.is_jump() {
            Some(Coord::new(
                (self.from.col + self.to.col) / 2,
                (self.from.row + self.to.row) / 2,
            ))
        } else {
            None
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jump_midpoint_is_average_of_endpoints() {
        let mv = Move::new(Coord::new(2, 2), Coord::new(4, 4));
        assert!(mv.is_jump());
        assert_eq!(mv.midpoint(), Some(Coord::new(3, 3)));

        let step = Move::new(Coord::new(1, 5), Coord::new(0, 4));
        assert!(step.is_step());
        assert_eq!(step.midpoint(), None);
    }

    #[test]
    fn cell_promotion_only_affects_men() {
        assert_eq!(Cell::WhiteMan.promoted(), Cell::WhiteKing);
        assert_eq!(Cell::BlackMan.promoted(), Cell::BlackKing);
        assert_eq!(Cell::WhiteKing.promoted(), Cell::WhiteKing);
        assert_eq!(Cell::Empty.promoted(), Cell::Empty);
    }

    #[test]
    fn off_board_coordinates_are_detected() {
        assert!(Coord::new(0, 0).in_bounds());
        assert!(Coord::new(7, 7).in_bounds());
        assert!(!Coord::new(-1, 3).in_bounds());
        assert!(!Coord::new(3, 8).in_bounds());
    }
}
