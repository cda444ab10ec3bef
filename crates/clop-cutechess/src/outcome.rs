//! Translation of cutechess-cli output into CLOP's W/L/D result.
//!
//! cutechess-cli reports a finished game with a line such as
//!
//! ```text
//! Finished game 1 (MyEngine vs Opponent): 1-0 {White mates}
//! ```
//!
//! Only the first such line is considered.

use std::fmt;
use thiserror::Error;

/// Prefix of the line reporting a finished game.
pub const FINISHED_GAME_PREFIX: &str = "Finished game";
/// Marker of a win for the first engine.
pub const FIRST_WINS_MARKER: &str = ": 1-0";
/// Marker of a win for the second engine.
pub const SECOND_WINS_MARKER: &str = ": 0-1";
/// Marker of a drawn game.
pub const DRAW_MARKER: &str = ": 1/2-1/2";

/// Errors raised when the output holds no usable result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranslationError {
    /// No line starts with `Finished game`.
    #[error("the game did not finish: no \"Finished game\" line in cutechess-cli output")]
    NoFinishedGame,
    /// The `Finished game` line carries none of the known results.
    #[error("the game did not terminate properly: {0}")]
    UnknownResult(String),
}

/// Result of a game as reported by cutechess-cli, in engine order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    /// The first `-engine` won.
    WinFirst,
    /// The second `-engine` won.
    WinSecond,
    /// The game was drawn.
    Draw,
    /// The line does not contain a known result.
    Indeterminate,
}

impl MatchOutcome {
    /// Reads the outcome from a `Finished game` line.
    ///
    /// Markers are checked in the order first-wins, second-wins, draw.
    pub fn from_line(line: &str) -> Self {
        if line.contains(FIRST_WINS_MARKER) {
            MatchOutcome::WinFirst
        } else if line.contains(SECOND_WINS_MARKER) {
            MatchOutcome::WinSecond
        } else if line.contains(DRAW_MARKER) {
            MatchOutcome::Draw
        } else {
            MatchOutcome::Indeterminate
        }
    }
}

/// Game result from the tuned engine's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultCode {
    Win,
    Loss,
    Draw,
}

impl ResultCode {
    /// Maps an outcome to the tuned engine's result.
    ///
    /// Returns `None` for [`MatchOutcome::Indeterminate`].
    pub fn from_outcome(outcome: MatchOutcome, tuned_side_is_first: bool) -> Option<Self> {
        match (outcome, tuned_side_is_first) {
            (MatchOutcome::WinFirst, true) | (MatchOutcome::WinSecond, false) => {
                Some(ResultCode::Win)
            }
            (MatchOutcome::WinFirst, false) | (MatchOutcome::WinSecond, true) => {
                Some(ResultCode::Loss)
            }
            (MatchOutcome::Draw, _) => Some(ResultCode::Draw),
            (MatchOutcome::Indeterminate, _) => None,
        }
    }

    /// The character CLOP expects.
    pub fn as_char(self) -> char {
        match self {
            ResultCode::Win => 'W',
            ResultCode::Loss => 'L',
            ResultCode::Draw => 'D',
        }
    }
}

impl fmt::Display for ResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Finds the first `Finished game` line in `output`.
pub fn finished_game_line(output: &str) -> Option<&str> {
    output
        .lines()
        .find(|line| line.starts_with(FINISHED_GAME_PREFIX))
}

/// Translates cutechess-cli output into the tuned engine's result.
///
/// # Errors
///
/// Returns [`TranslationError::NoFinishedGame`] if no game was reported and
/// [`TranslationError::UnknownResult`] if the first reported game has no
/// recognised result.
pub fn translate(output: &str, tuned_side_is_first: bool) -> Result<ResultCode, TranslationError> {
    let line = finished_game_line(output).ok_or(TranslationError::NoFinishedGame)?;
    let outcome = MatchOutcome::from_line(line);
    tracing::debug!(line, ?outcome, "parsed game result");

    ResultCode::from_outcome(outcome, tuned_side_is_first)
        .ok_or_else(|| TranslationError::UnknownResult(line.to_string()))
}
