//! Text console front-end and game loop.
//!
//! Presents the main menu, collects moves in board notation from the human
//! player(s), lets the minimax engine play the computer's turns, and prints
//! the board after every hop.

use std::io::{self, BufRead, Write};

use crate::engines::engine_minimax::MinimaxEngine;
use crate::engines::engine_trait::{play_engine_turn, GoParams};
use crate::game_state::dame_game::{DameGame, GameStatus, TurnPhase};
use crate::game_state::dame_types::*;
use crate::utils::algebraic::{coord_to_algebraic, parse_move};
use crate::utils::engine_match_harness::format_turn;
use crate::utils::render_game_state::render_game_state;

pub const MIN_IQ: u8 = 0;
pub const MAX_IQ: u8 = 4;
pub const DEFAULT_IQ: u8 = 2;

const QUIT_TOKEN: &str = "-1";

pub fn run_stdio_loop() -> io::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = ConsoleSession::new(stdin.lock(), stdout.lock());
    session.run()
}

/// Parse the requested search depth, clamped to `MIN_IQ..=MAX_IQ`.
/// Blank or unreadable input selects `DEFAULT_IQ`.
pub fn parse_iq(text: &str) -> u8 {
    match text.trim().parse::<i64>() {
        Ok(value) => value.clamp(i64::from(MIN_IQ), i64::from(MAX_IQ)) as u8,
        Err(_) => DEFAULT_IQ,
    }
}

fn parse_team(text: &str) -> Option<Side> {
    match text.trim().to_ascii_lowercase().as_str() {
        "0" | "w" | "white" => Some(Side::White),
        "1" | "b" | "black" => Some(Side::Black),
        _ => None,
    }
}

/// Which side, if any, the computer plays and how deep it searches.
#[derive(Debug, Clone, Copy)]
struct Opponent {
    side: Side,
    depth: u8,
}

pub struct ConsoleSession<R: BufRead, W: Write> {
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> ConsoleSession<R, W> {
    pub fn new(input: R, out: W) -> Self {
        Self { input, out }
    }

    /// Run the menu until the user quits or input ends.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            writeln!(self.out)?;
            writeln!(self.out, "0: Play VS player")?;
            writeln!(self.out, "1: Play VS AI")?;
            writeln!(self.out, "2: Quit")?;
            let Some(choice) = self.prompt("> ")? else {
                return Ok(());
            };

            let keep_going = match choice.trim() {
                "0" => self.play_game(None)?,
                "1" => match self.configure_opponent()? {
                    Some(opponent) => self.play_game(Some(opponent))?,
                    None => false,
                },
                "2" => false,
                other => {
                    writeln!(self.out, "Unknown option '{other}'")?;
                    true
                }
            };
            if !keep_going {
                return Ok(());
            }
        }
    }

    fn configure_opponent(&mut self) -> io::Result<Option<Opponent>> {
        let human = loop {
            let Some(line) = self.prompt("Choose your team (0: White, 1: Black): ")? else {
                return Ok(None);
            };
            match parse_team(&line) {
                Some(side) => break side,
                None => writeln!(self.out, "Please answer 0 or 1")?,
            }
        };

        let prompt = format!("AI IQ ({MIN_IQ}-{MAX_IQ}, default {DEFAULT_IQ}): ");
        let Some(line) = self.prompt(&prompt)? else {
            return Ok(None);
        };
        let depth = parse_iq(&line);
        writeln!(self.out, "AI plays {} with IQ {depth}", human.opposite())?;

        Ok(Some(Opponent {
            side: human.opposite(),
            depth,
        }))
    }

    /// Play one game. Returns `false` when input ran out.
    fn play_game(&mut self, opponent: Option<Opponent>) -> io::Result<bool> {
        let mut game = DameGame::new();
        let mut engine = opponent.map(|o| MinimaxEngine::new(o.depth));

        loop {
            writeln!(self.out)?;
            writeln!(self.out, "{}", render_game_state(game.state()))?;

            if let GameStatus::Won(winner) = game.status() {
                writeln!(
                    self.out,
                    "{} has no moves left. {winner} wins!",
                    winner.opposite()
                )?;
                return Ok(true);
            }

            let side = game.side_to_move();
            if let (Some(opponent), Some(engine)) = (opponent, engine.as_mut()) {
                if opponent.side == side {
                    match play_engine_turn(&mut game, engine, &GoParams::default()) {
                        Ok(turn) => {
                            for line in &turn.info_lines {
                                writeln!(self.out, "{line}")?;
                            }
                            let played = format_turn(&turn.hops)
                                .unwrap_or_else(|e| format!("<{e}>"));
                            writeln!(self.out, "AI ({side}) plays {played}")?;
                        }
                        Err(err) => {
                            writeln!(self.out, "AI error: {err}")?;
                            return Ok(true);
                        }
                    }
                    continue;
                }
            }

            let prompt = match game.phase() {
                TurnPhase::MidChain { piece } => format!(
                    "Continue capturing with {} for {side}: ",
                    coord_to_algebraic(piece).unwrap_or_else(|_| piece.to_string())
                ),
                _ => format!("Move for {side}: "),
            };
            let Some(line) = self.prompt(&prompt)? else {
                return Ok(false);
            };
            if line.trim() == QUIT_TOKEN {
                return Ok(true);
            }

            let result = parse_move(&line).and_then(|mv| game.play_move(mv));
            match result {
                Ok(outcome) => {
                    if outcome.promoted {
                        writeln!(self.out, "{side} man promoted to king")?;
                    }
                }
                Err(err) => writeln!(self.out, "Illegal input: {err}")?,
            }
        }
    }

    /// Write `text`, then read one line. `None` at end of input.
    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.out, "{text}")?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run_script(script: &str) -> String {
        let mut out = Vec::new();
        {
            let mut session = ConsoleSession::new(Cursor::new(script.as_bytes()), &mut out);
            session.run().expect("session should not fail on in-memory io");
        }
        String::from_utf8(out).expect("console output should be utf-8")
    }

    #[test]
    fn iq_is_clamped_and_defaults() {
        assert_eq!(parse_iq("3"), 3);
        assert_eq!(parse_iq("99"), MAX_IQ);
        assert_eq!(parse_iq("-5"), MIN_IQ);
        assert_eq!(parse_iq(""), DEFAULT_IQ);
        assert_eq!(parse_iq("clever"), DEFAULT_IQ);
    }

    #[test]
    fn quit_from_menu() {
        let out = run_script("2\n");
        assert!(out.contains("0: Play VS player"));
        assert!(out.contains("2: Quit"));
        assert!(!out.contains("Move for"));
    }

    #[test]
    fn two_player_turns_alternate() {
        let out = run_script("0\nb3 a4\n-1\n2\n");
        assert!(out.contains("Move for White: "));
        assert!(out.contains("Move for Black: "));
        assert!(out.contains(" 4  w|_|_|_|_|_|_|_"));
    }

    #[test]
    fn illegal_input_is_reported_and_reprompted() {
        let out = run_script("0\nb3 b4\nzz\n-1\n2\n");
        assert_eq!(out.matches("Illegal input").count(), 2);
        assert!(!out.contains("Move for Black"));
    }

    #[test]
    fn ai_moves_first_when_human_takes_black() {
        let out = run_script("1\n1\n0\n-1\n2\n");
        assert!(out.contains("AI plays White with IQ 0"));
        assert!(out.contains("info depth 0"));
        assert!(out.contains("AI (White) plays"));
        assert!(out.contains("Move for Black: "));
    }
}
