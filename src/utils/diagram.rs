//! Plain-text board diagrams.
//!
//! A diagram is eight lines of eight characters, row 0 first, optionally
//! preceded by a line naming the side to move (`White` or `Black`, default
//! White). Cells are `_` or `.` for empty squares, `w`/`b` for men and `W`/`B`
//! for kings. Blank lines and surrounding whitespace are ignored.

use crate::dame_errors::DameError;
use crate::game_state::dame_types::*;

/// Parse a board diagram into a consistent `GameState`.
pub fn parse_diagram(diagram: &str) -> Result<GameState, DameError> {
    let mut lines = diagram
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .peekable();

    let side_to_move = match lines.peek().map(|line| line.to_ascii_lowercase()) {
        Some(first) if first == "white" => {
            lines.next();
            Side::White
        }
        Some(first) if first == "black" => {
            lines.next();
            Side::Black
        }
        _ => Side::White,
    };

    let rows: Vec<&str> = lines.collect();
    if rows.len() != BOARD_SIZE as usize {
        return Err(DameError::InvalidDiagram(format!(
            "expected {BOARD_SIZE} rows, got {}",
            rows.len()
        )));
    }

    let mut state = GameState::new_empty(side_to_move);
    for (row, line) in rows.iter().enumerate() {
        let chars: Vec<char> = line.chars().collect();
        if chars.len() != BOARD_SIZE as usize {
            return Err(DameError::InvalidDiagram(format!(
                "row {row} has {} cells, expected {BOARD_SIZE}",
                chars.len()
            )));
        }
        for (col, ch) in chars.into_iter().enumerate() {
            let cell = cell_from_char(ch).ok_or_else(|| {
                DameError::InvalidDiagram(format!("unexpected character '{ch}' in row {row}"))
            })?;
            if !cell.is_empty() {
                state.place(Coord::new(col as i8, row as i8), cell)?;
            }
        }
    }

    Ok(state)
}

/// Render `state` back into diagram form, side to move first.
pub fn generate_diagram(state: &GameState) -> String {
    let mut out = String::with_capacity(80);
    out.push_str(state.side_to_move.name());
    for row in 0..BOARD_SIZE {
        out.push('\n');
        for col in 0..BOARD_SIZE {
            out.push(cell_to_char(state.cell(Coord::new(col, row))));
        }
    }
    out
}

#[inline]
pub fn cell_to_char(cell: Cell) -> char {
    match cell {
        Cell::Empty => '_',
        Cell::WhiteMan => 'w',
        Cell::WhiteKing => 'W',
        Cell::BlackMan => 'b',
        Cell::BlackKing => 'B',
    }
}

#[inline]
fn cell_from_char(ch: char) -> Option<Cell> {
    match ch {
        '_' | '.' => Some(Cell::Empty),
        'w' => Some(Cell::WhiteMan),
        'W' => Some(Cell::WhiteKing),
        'b' => Some(Cell::BlackMan),
        'B' => Some(Cell::BlackKing),
        _ => None,
    }
}
