//! Canonical rule constants.
//!
//! The starting position is stored as a board diagram (row 0 first) so that
//! it is readable next to the renderer output and can be checked by eye.

/// Standard starting position: twelve men per side on the dark squares of the
/// three back-most ranks. White moves first.
pub const STARTING_POSITION_DIAGRAM: &str = "\
White
b_b_b_b_
_b_b_b_b
b_b_b_b_
________
________
_w_w_w_w
w_w_w_w_
_w_w_w_w";

/// Pieces per side in the starting position.
pub const STARTING_PIECES_PER_SIDE: usize = 12;

/// How a turn continues after a capture.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChainRule {
    /// Only further jumps of the piece that just captured are offered.
    #[default]
    CapturingPieceOnly,
    /// The turn continues iff the capturing piece can jump again, but then any
    /// of the side's jumps may be played. Kept for replaying older games.
    AnyCapture,
}
