//! Unified error types for FinchControl.
//!
//! A single `Error` enum that every subsystem converts into, so a
//! front end only ever matches on one type.  Leaf errors are small
//! `Copy` enums; the one exception is [`UnrecognizedCommand`], which
//! carries the offending operator text.

use core::fmt;

use crate::app::commands::UnrecognizedCommand;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation in the crate funnels into this type.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// The robot could not be reached or rejected a command.
    Device(DeviceError),
    /// An operator entry was non-numeric or outside its bounds.
    Validation(ValidationError),
    /// Configuration could not be loaded or failed validation.
    Config(ConfigError),
    /// Operator text did not name a command in the vocabulary.
    Command(UnrecognizedCommand),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Device(e) => write!(f, "device: {e}"),
            Self::Validation(e) => write!(f, "validation: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Command(e) => write!(f, "command: {e}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Device errors
// ---------------------------------------------------------------------------

/// Failures reported by a [`RobotPort`](crate::app::ports::RobotPort).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceError {
    /// An operation was attempted before `connect()` succeeded.
    NotConnected,
    /// `connect()` gave up.
    ConnectFailed,
    /// An actuator write failed; the tag names the operation.
    WriteFailed(&'static str),
    /// A sensor read failed; the tag names the sensor.
    ReadFailed(&'static str),
}

impl fmt::Display for DeviceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotConnected => write!(f, "robot not connected"),
            Self::ConnectFailed => write!(f, "robot connect failed"),
            Self::WriteFailed(op) => write!(f, "write failed: {op}"),
            Self::ReadFailed(sensor) => write!(f, "read failed: {sensor}"),
        }
    }
}

impl std::error::Error for DeviceError {}

impl From<DeviceError> for Error {
    fn from(e: DeviceError) -> Self {
        Self::Device(e)
    }
}

// ---------------------------------------------------------------------------
// Validation errors
// ---------------------------------------------------------------------------

/// Rejection of a raw operator entry.  The stored value is never touched
/// when one of these is returned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValidationError {
    /// The text did not parse as a number of the expected type.
    NotANumber,
    /// The number parsed but lies outside `[min, max]`.
    OutOfRange { min: f64, max: f64 },
    /// The text named none of the allowed choices (sensor side, range type).
    UnknownChoice,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotANumber => write!(f, "not a number"),
            Self::OutOfRange { min, max } => {
                write!(f, "value must be between {min} and {max}")
            }
            Self::UnknownChoice => write!(f, "not one of the listed choices"),
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for Error {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

/// Errors from [`ConfigPort`](crate::app::ports::ConfigPort) operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// No configuration source exists.
    NotFound,
    /// The stored configuration could not be deserialised.
    Corrupted,
    /// A field failed range validation; the tag names the field.
    ValidationFailed(&'static str),
    /// Generic I/O error from the backing store.
    IoError,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "config not found"),
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {msg}"),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<UnrecognizedCommand> for Error {
    fn from(e: UnrecognizedCommand) -> Self {
        Self::Command(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
