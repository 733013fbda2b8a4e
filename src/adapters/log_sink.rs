//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the `log` facade (stderr through `env_logger` in the binary).  Each
//! line starts with a fixed tag so the trace can be grepped.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`].
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

fn side(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.1}"))
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::CommandExecuted { index, command } => {
                info!("EXEC | #{} {}", index + 1, command);
            }
            AppEvent::CommandSkipped { index } => {
                warn!("EXEC | #{} NONE skipped", index + 1);
            }
            AppEvent::TemperatureRecorded { index, celsius } => {
                info!("TEMP | #{} {:.2}\u{00b0}C", index + 1, celsius);
            }
            AppEvent::RecordingCancelled { taken, requested } => {
                warn!("TEMP | cancelled after {}/{} samples", taken, requested);
            }
            AppEvent::MonitorSample {
                kind,
                tick,
                left,
                right,
            } => {
                info!(
                    "SAMPLE | {:?} t={}s | left={} right={}",
                    kind,
                    tick,
                    side(*left),
                    side(*right)
                );
            }
            AppEvent::AlarmTriggered { kind, elapsed_secs } => {
                warn!("ALARM | {:?} threshold exceeded after {} s", kind, elapsed_secs);
            }
            AppEvent::MonitorTimedOut { kind, elapsed_secs } => {
                info!("ALARM | {:?} threshold not exceeded in {} s", kind, elapsed_secs);
            }
            AppEvent::MonitorCancelled { kind, elapsed_secs } => {
                info!("ALARM | {:?} monitoring cancelled after {} s", kind, elapsed_secs);
            }
            AppEvent::ConnectAttempt { attempt, connected } => {
                info!(
                    "LINK | attempt {} {}",
                    attempt,
                    if *connected { "connected" } else { "failed" }
                );
            }
            AppEvent::Disconnected => {
                info!("LINK | disconnected");
            }
            AppEvent::RobotReset => {
                info!("RESET | motors stopped, tone off, LED off");
            }
        }
    }
}
