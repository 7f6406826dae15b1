//! Line protocol spoken over stdin/stdout.
//!
//! ```text
//! position <placement>        load a board (rank 8 first, FEN fields after the first ignored)
//! opponent <move>             the opponent's last move, e.g. e7e5
//! go <white|black> <seconds>  search with that much clock left; replies `bestmove <move>`
//! board                       print the board
//! newgame                     start position and fresh tables
//! quit
//! ```

use std::io::{self, BufRead, Write};
use std::time::Duration;

use chess_core::{ChessError, Color, Engine, Move};
use thiserror::Error;
use tracing::warn;

use crate::agent::Agent;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Position(String),
    Opponent(Move),
    Go { side: Color, clock: Duration },
    Board,
    NewGame,
    Quit,
}

/// A line that could not be understood. Reported back, never fatal.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ProtocolError {
    #[error("unknown command '{0}'")]
    UnknownCommand(String),
    #[error("'{command}' needs {what}")]
    MissingArgument {
        command: &'static str,
        what: &'static str,
    },
    #[error(transparent)]
    Chess(#[from] ChessError),
    #[error("invalid clock '{0}'")]
    InvalidClock(String),
}

/// Failures that end the session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("cannot load position: {0}")]
    Position(#[source] ChessError),
    #[error("cannot apply move: {0}")]
    Board(#[source] ChessError),
}

impl Command {
    /// Parses one line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Result<Option<Command>, ProtocolError> {
        let mut parts = line.split_whitespace();
        let Some(keyword) = parts.next() else {
            return Ok(None);
        };

        let command = match keyword {
            "position" => {
                let placement = parts.collect::<Vec<_>>().join(" ");
                if placement.is_empty() {
                    return Err(ProtocolError::MissingArgument {
                        command: "position",
                        what: "a placement",
                    });
                }
                Command::Position(placement)
            }
            "opponent" => {
                let text = parts.next().ok_or(ProtocolError::MissingArgument {
                    command: "opponent",
                    what: "a move",
                })?;
                Command::Opponent(text.parse()?)
            }
            "go" => {
                let missing = ProtocolError::MissingArgument {
                    command: "go",
                    what: "a side and the seconds left",
                };
                let side: Color = parts.next().ok_or(missing.clone())?.parse()?;
                let seconds = parts.next().ok_or(missing)?;
                let clock = seconds
                    .parse::<f64>()
                    .ok()
                    .and_then(|s| Duration::try_from_secs_f64(s).ok())
                    .ok_or_else(|| ProtocolError::InvalidClock(seconds.to_string()))?;
                Command::Go { side, clock }
            }
            "board" => Command::Board,
            "newgame" => Command::NewGame,
            "quit" => Command::Quit,
            other => return Err(ProtocolError::UnknownCommand(other.to_string())),
        };
        Ok(Some(command))
    }
}

/// Reads commands until `quit` or end of input.
///
/// Unparseable lines are answered with `error <reason>`. A placement that
/// does not load ends the session.
pub fn run_session<E, R, W>(
    agent: &mut Agent<E>,
    input: R,
    mut output: W,
) -> Result<(), SessionError>
where
    E: Engine,
    R: BufRead,
    W: Write,
{
    for line in input.lines() {
        let line = line?;
        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                warn!(line = %line.trim(), error = %e, "rejected command");
                writeln!(output, "error {e}")?;
                output.flush()?;
                continue;
            }
        };

        match command {
            Command::Position(placement) => {
                agent.set_position(&placement).map_err(SessionError::Position)?;
            }
            Command::Opponent(mv) => {
                agent.observe_opponent(mv).map_err(SessionError::Board)?;
            }
            Command::Go { side, clock } => {
                let result = agent.take_turn(side, clock).map_err(SessionError::Board)?;
                match result.best_move {
                    Some(mv) => writeln!(output, "bestmove {mv}")?,
                    None => writeln!(output, "bestmove none")?,
                }
                output.flush()?;
            }
            Command::Board => {
                write!(output, "{}", agent.board())?;
                output.flush()?;
            }
            Command::NewGame => agent.new_game(),
            Command::Quit => break,
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod protocol_tests;
