//! The command vocabulary an operator composes into a program.
//!
//! The vocabulary is closed.  Operator text is turned into a [`Command`]
//! by [`parse_command`] (or `str::parse`), which either yields a real
//! vocabulary entry or an [`UnrecognizedCommand`] carrying the text, so
//! unparseable input never enters a program.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// One symbolic action of the user-programmed interpreter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Command {
    /// Placeholder with no effect.  Never produced by the parser; the
    /// interpreter reports and skips it if a program carries one.
    None,
    SongAndDance,
    MoveForward,
    MoveBackward,
    StopMotors,
    Wait,
    TurnRight,
    TurnLeft,
    LedOn,
    LedOff,
    GetTemperature,
    /// Terminal marker.  A no-op if it reaches the interpreter.
    Done,
}

impl Command {
    /// Every entry an operator can type, in menu order.
    pub const VOCABULARY: [Command; 11] = [
        Command::SongAndDance,
        Command::MoveForward,
        Command::MoveBackward,
        Command::StopMotors,
        Command::Wait,
        Command::TurnRight,
        Command::TurnLeft,
        Command::LedOn,
        Command::LedOff,
        Command::GetTemperature,
        Command::Done,
    ];

    /// Canonical upper-case spelling, as echoed in the trace.
    pub const fn name(self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::SongAndDance => "SONG_AND_DANCE",
            Self::MoveForward => "MOVE_FORWARD",
            Self::MoveBackward => "MOVE_BACKWARD",
            Self::StopMotors => "STOP_MOTORS",
            Self::Wait => "WAIT",
            Self::TurnRight => "TURN_RIGHT",
            Self::TurnLeft => "TURN_LEFT",
            Self::LedOn => "LED_ON",
            Self::LedOff => "LED_OFF",
            Self::GetTemperature => "GET_TEMPERATURE",
            Self::Done => "DONE",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Operator text that names no command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnrecognizedCommand(pub String);

impl fmt::Display for UnrecognizedCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognized command '{}'", self.0)
    }
}

impl std::error::Error for UnrecognizedCommand {}

impl FromStr for Command {
    type Err = UnrecognizedCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_command(s)
    }
}

/// Parse one operator entry.
///
/// Case-insensitive; surrounding whitespace is ignored, and `_`, `-`
/// and spaces inside the word are optional, so `move_forward`,
/// `Move Forward` and `MOVEFORWARD` all name the same command.
/// `NONE` is not accepted: it is not something an operator can ask for.
pub fn parse_command(raw: &str) -> Result<Command, UnrecognizedCommand> {
    let key: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, '_' | '-' | ' '))
        .map(|c| c.to_ascii_lowercase())
        .collect();

    let cmd = match key.as_str() {
        "songanddance" => Command::SongAndDance,
        "moveforward" => Command::MoveForward,
        "movebackward" => Command::MoveBackward,
        "stopmotors" => Command::StopMotors,
        "wait" => Command::Wait,
        "turnright" => Command::TurnRight,
        "turnleft" => Command::TurnLeft,
        "ledon" => Command::LedOn,
        "ledoff" => Command::LedOff,
        "gettemperature" => Command::GetTemperature,
        "done" => Command::Done,
        _ => return Err(UnrecognizedCommand(raw.trim().to_string())),
    };
    Ok(cmd)
}
