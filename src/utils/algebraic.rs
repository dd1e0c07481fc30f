//! Board coordinate notation.
//!
//! Converts between the labels printed around the board (files `a`..`h`
//! left to right, ranks `8`..`1` top to bottom) and grid coordinates, so
//! `"a8"` is column 0, row 0 and `"h1"` is column 7, row 7.

use crate::dame_errors::DameError;
use crate::game_state::dame_types::{Coord, Move, BOARD_SIZE};

/// Convert a square label (for example `"a4"`) to a coordinate.
pub fn algebraic_to_coord(square: &str) -> Result<Coord, DameError> {
    let bytes = square.trim().as_bytes();
    if bytes.len() != 2 {
        return Err(DameError::InvalidNotation(format!("invalid square: {square}")));
    }

    let file = bytes[0].to_ascii_lowercase();
    let rank = bytes[1];

    if !(b'a'..=b'h').contains(&file) {
        return Err(DameError::InvalidNotation(format!(
            "invalid file: {}",
            file as char
        )));
    }
    if !(b'1'..=b'8').contains(&rank) {
        return Err(DameError::InvalidNotation(format!(
            "invalid rank: {}",
            rank as char
        )));
    }

    let col = (file - b'a') as i8;
    let row = BOARD_SIZE - (rank - b'0') as i8;
    Ok(Coord::new(col, row))
}

/// Convert an on-board coordinate to its square label.
pub fn coord_to_algebraic(coord: Coord) -> Result<String, DameError> {
    if !coord.in_bounds() {
        return Err(DameError::InvalidNotation(format!(
            "coordinate out of bounds: {coord}"
        )));
    }
    let file_char = char::from(b'a' + coord.col as u8);
    let rank_char = char::from(b'0' + (BOARD_SIZE - coord.row) as u8);
    Ok(format!("{file_char}{rank_char}"))
}

/// Parse a move written as two squares, `"a4 b5"` or `"a4-b5"`.
pub fn parse_move(text: &str) -> Result<Move, DameError> {
    let parts: Vec<&str> = text
        .split(|c: char| c.is_whitespace() || c == '-')
        .filter(|part| !part.is_empty())
        .collect();

    match parts.as_slice() {
        [from, to] => Ok(Move::new(algebraic_to_coord(from)?, algebraic_to_coord(to)?)),
        _ => Err(DameError::InvalidNotation(format!(
            "expected two squares like \"a4 b5\", got \"{}\"",
            text.trim()
        ))),
    }
}

/// Format a move as `"a4-b5"`.
pub fn move_to_algebraic(mv: Move) -> Result<String, DameError> {
    Ok(format!(
        "{}-{}",
        coord_to_algebraic(mv.from)?,
        coord_to_algebraic(mv.to)?
    ))
}
