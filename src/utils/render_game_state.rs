//! Terminal board renderer.
//!
//! Rank labels run 8..1 down the left edge and files a..h along the bottom,
//! matching the notation accepted by `utils::algebraic`.

use crate::game_state::dame_types::*;
use crate::utils::diagram::cell_to_char;

/// Render the board as text, one rank per line.
///
/// ```text
///  8  b|_|b|_|b|_|b|_
///  ...
///      a b c d e f g h
/// ```
pub fn render_game_state(game_state: &GameState) -> String {
    let mut out = String::new();

    for row in 0..BOARD_SIZE {
        out.push(' ');
        out.push(char::from(b'0' + (BOARD_SIZE - row) as u8));
        out.push_str("  ");

        for col in 0..BOARD_SIZE {
            out.push(cell_to_char(game_state.cell(Coord::new(col, row))));
            if col < BOARD_SIZE - 1 {
                out.push('|');
            }
        }
        out.push('\n');
    }

    out.push('\n');
    out.push_str("    a b c d e f g h");

    out
}
