//! Outbound application events.
//!
//! The interpreter, monitor, recorder and session emit these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them: log them, render the operator
//! trace, or record them in a test.

use super::commands::Command;
use super::monitor::MonitorKind;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// A program command finished its effect (trace echo).
    CommandExecuted { index: usize, command: Command },

    /// A `NONE` command was skipped.
    CommandSkipped { index: usize },

    /// The data recorder took a temperature sample.
    TemperatureRecorded { index: usize, celsius: f64 },

    /// The data recorder stopped before taking every sample.
    RecordingCancelled { taken: usize, requested: usize },

    /// A threshold monitor took one sample.
    MonitorSample {
        kind: MonitorKind,
        tick: u32,
        left: Option<f64>,
        right: Option<f64>,
    },

    /// A threshold monitor fired its alarm.
    AlarmTriggered { kind: MonitorKind, elapsed_secs: u32 },

    /// A threshold monitor ran for its full duration without firing.
    MonitorTimedOut { kind: MonitorKind, elapsed_secs: u32 },

    /// A threshold monitor was cancelled by its ticker.
    MonitorCancelled { kind: MonitorKind, elapsed_secs: u32 },

    /// A connect attempt finished.
    ConnectAttempt { attempt: u8, connected: bool },

    /// The link to the robot was closed.
    Disconnected,

    /// Motors stopped, tone off, LED off.
    RobotReset,
}
