//! Command programs and the interactive builder that produces them.
//!
//! A program is built one validated entry at a time and closed by the
//! operator sentinel `done`.  Insertion order is execution order, and a
//! closed program cannot be edited: rebuilding means starting a new
//! builder.

use core::fmt;

use super::commands::{Command, UnrecognizedCommand, parse_command};

/// An ordered, immutable sequence of commands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandProgram {
    commands: Vec<Command>,
}

impl CommandProgram {
    /// An empty program.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl FromIterator<Command> for CommandProgram {
    /// Collect commands verbatim.  Unlike [`ProgramBuilder`], `Done` is
    /// kept as an element rather than treated as a terminator.
    fn from_iter<I: IntoIterator<Item = Command>>(iter: I) -> Self {
        Self {
            commands: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a CommandProgram {
    type Item = &'a Command;
    type IntoIter = core::slice::Iter<'a, Command>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter()
    }
}

/// What happened to one operator entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgramEntry {
    /// The command was appended to the program.
    Appended(Command),
    /// The entry was the `done` sentinel; the program is now closed.
    Closed,
}

/// Rejection of one operator entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgramError {
    /// The text named no command; the program is unchanged.
    Unrecognized(UnrecognizedCommand),
    /// The program was already closed with `done`.
    Closed,
}

impl fmt::Display for ProgramError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unrecognized(e) => write!(f, "{e}"),
            Self::Closed => write!(f, "program already closed"),
        }
    }
}

impl std::error::Error for ProgramError {}

impl From<UnrecognizedCommand> for ProgramError {
    fn from(e: UnrecognizedCommand) -> Self {
        Self::Unrecognized(e)
    }
}

/// Append-only builder fed by operator entries.
#[derive(Debug, Default)]
pub struct ProgramBuilder {
    commands: Vec<Command>,
    closed: bool,
}

impl ProgramBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and apply one raw operator entry.
    pub fn enter(&mut self, raw: &str) -> Result<ProgramEntry, ProgramError> {
        if self.closed {
            return Err(ProgramError::Closed);
        }
        let cmd = parse_command(raw)?;
        self.push(cmd)
    }

    /// Apply an already-typed command.  `Done` closes the program.
    pub fn push(&mut self, cmd: Command) -> Result<ProgramEntry, ProgramError> {
        if self.closed {
            return Err(ProgramError::Closed);
        }
        if cmd == Command::Done {
            self.closed = true;
            return Ok(ProgramEntry::Closed);
        }
        self.commands.push(cmd);
        Ok(ProgramEntry::Appended(cmd))
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Commands entered so far.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Freeze the builder into a program, closed or not.
    pub fn finish(self) -> CommandProgram {
        CommandProgram {
            commands: self.commands,
        }
    }
}
