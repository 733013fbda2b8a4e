//! Threshold alarm monitor.
//!
//! Samples a sensor once per one-second tick, compares each sample with a
//! minimum or maximum threshold, and stops at the first sample that
//! crosses it or once the configured duration has elapsed.
//!
//! ## Loop
//!
//! ```text
//! while !triggered && elapsed < duration:
//!     sample  → evaluate predicate → tick (1 s) → elapsed += 1
//! ```
//!
//! - `Minimum` fires on `sample <= threshold`, `Maximum` on
//!   `sample >= threshold`; both bounds are inclusive.
//! - With [`LightSensor::Both`] the monitor fires if *either* side
//!   crosses.
//! - The trigger tick still completes (so `elapsed` counts it); no
//!   sample is taken after it.
//! - `duration == 0` takes no samples and reports a timeout at 0 s.
//! - A cancelled tick ends the run with [`MonitorStatus::Cancelled`]
//!   unless the sample just taken had already triggered; a trigger
//!   counts its tick either way.
//!
//! On trigger the monitor sounds one fixed alarm tone, then silences
//! the buzzer.  A timeout makes no sound.

use core::fmt;
use core::str::FromStr;
use std::time::Duration;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::config::SessionConfig;
use crate::error::{DeviceError, ValidationError};
use crate::timing::{Tick, Ticker};

use super::events::AppEvent;
use super::params::validate_in_range;
use super::ports::{EventSink, RobotPort};

/// Fixed sampling tick.
pub const MONITOR_TICK: Duration = Duration::from_secs(1);

// ───────────────────────────────────────────────────────────────
// Configuration types
// ───────────────────────────────────────────────────────────────

/// Which sensor family a monitor run watches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MonitorKind {
    Light,
    Temperature,
}

/// Which light sensor(s) to sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LightSensor {
    Left,
    Right,
    Both,
}

impl FromStr for LightSensor {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            "both" => Ok(Self::Both),
            _ => Err(ValidationError::UnknownChoice),
        }
    }
}

/// Direction of the threshold comparison.  Fixed for a whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangeType {
    /// Fire when a sample falls to or below the threshold.
    Minimum,
    /// Fire when a sample rises to or above the threshold.
    Maximum,
}

impl RangeType {
    /// Inclusive threshold comparison.
    pub fn is_exceeded(self, sample: f64, threshold: f64) -> bool {
        match self {
            Self::Minimum => sample <= threshold,
            Self::Maximum => sample >= threshold,
        }
    }
}

impl FromStr for RangeType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "minimum" | "min" => Ok(Self::Minimum),
            "maximum" | "max" => Ok(Self::Maximum),
            _ => Err(ValidationError::UnknownChoice),
        }
    }
}

/// Range type, threshold and duration of one monitor run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorConfig {
    pub range: RangeType,
    pub threshold: i32,
    pub duration_secs: u32,
}

impl MonitorConfig {
    /// Build from raw operator text.  Any non-negative duration is
    /// accepted.
    pub fn from_raw(range: &str, threshold: &str, duration_secs: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            range: range.parse()?,
            threshold: validate_in_range(threshold, i32::MIN, i32::MAX)?,
            duration_secs: validate_in_range(duration_secs, u32::MIN, u32::MAX)?,
        })
    }
}

// ───────────────────────────────────────────────────────────────
// Samples and results
// ───────────────────────────────────────────────────────────────

/// One tick's worth of readings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sample {
    /// Light levels; a side that was not sampled is `None`.
    Light { left: Option<i32>, right: Option<i32> },
    /// Temperature in °C.
    Temperature(f64),
}

impl Sample {
    /// True if any reading in this sample crosses the threshold.
    pub fn exceeds(&self, range: RangeType, threshold: i32) -> bool {
        let threshold = f64::from(threshold);
        match *self {
            Self::Light { left, right } => [left, right]
                .into_iter()
                .flatten()
                .any(|v| range.is_exceeded(f64::from(v), threshold)),
            Self::Temperature(c) => range.is_exceeded(c, threshold),
        }
    }

    fn sides(&self) -> (Option<f64>, Option<f64>) {
        match *self {
            Self::Light { left, right } => (left.map(f64::from), right.map(f64::from)),
            Self::Temperature(c) => (Some(c), None),
        }
    }
}

/// How a monitor run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorStatus {
    /// A sample crossed the threshold; the alarm sounded.
    Triggered,
    /// The duration elapsed without a crossing.
    TimedOut,
    /// The ticker was cancelled first.
    Cancelled,
}

/// Result of one monitor run.  The sample series lives only as long as
/// this report.
#[derive(Debug, Clone, PartialEq)]
pub struct MonitorReport {
    pub status: MonitorStatus,
    pub elapsed_secs: u32,
    pub samples: Vec<Sample>,
}

impl MonitorReport {
    pub fn triggered(&self) -> bool {
        self.status == MonitorStatus::Triggered
    }
}

impl fmt::Display for MonitorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            MonitorStatus::Triggered => write!(f, "threshold exceeded after {} s", self.elapsed_secs),
            MonitorStatus::TimedOut => write!(f, "threshold not exceeded in {} s", self.elapsed_secs),
            MonitorStatus::Cancelled => write!(f, "monitoring cancelled after {} s", self.elapsed_secs),
        }
    }
}

// ───────────────────────────────────────────────────────────────
// ThresholdMonitor
// ───────────────────────────────────────────────────────────────

/// Sampling loop with an audible alarm.
#[derive(Debug, Clone, Copy)]
pub struct ThresholdMonitor {
    alarm_frequency_hz: u32,
    alarm_duration_ms: u32,
}

impl ThresholdMonitor {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            alarm_frequency_hz: config.alarm_frequency_hz,
            alarm_duration_ms: config.alarm_duration_ms,
        }
    }

    /// Watch one or both light sensors.
    pub fn monitor_light(
        &self,
        sensor: LightSensor,
        config: &MonitorConfig,
        robot: &mut impl RobotPort,
        ticker: &mut impl Ticker,
        sink: &mut impl EventSink,
    ) -> Result<MonitorReport, DeviceError> {
        self.run(MonitorKind::Light, config, robot, ticker, sink, |robot| {
            let left = match sensor {
                LightSensor::Left | LightSensor::Both => Some(robot.left_light()?),
                LightSensor::Right => None,
            };
            let right = match sensor {
                LightSensor::Right | LightSensor::Both => Some(robot.right_light()?),
                LightSensor::Left => None,
            };
            Ok(Sample::Light { left, right })
        })
    }

    /// Watch the temperature sensor.
    pub fn monitor_temperature(
        &self,
        config: &MonitorConfig,
        robot: &mut impl RobotPort,
        ticker: &mut impl Ticker,
        sink: &mut impl EventSink,
    ) -> Result<MonitorReport, DeviceError> {
        self.run(MonitorKind::Temperature, config, robot, ticker, sink, |robot| {
            Ok(Sample::Temperature(robot.temperature()?))
        })
    }

    fn run<R, F>(
        &self,
        kind: MonitorKind,
        config: &MonitorConfig,
        robot: &mut R,
        ticker: &mut impl Ticker,
        sink: &mut impl EventSink,
        mut read: F,
    ) -> Result<MonitorReport, DeviceError>
    where
        R: RobotPort,
        F: FnMut(&mut R) -> Result<Sample, DeviceError>,
    {
        info!(
            "Monitor: {:?} {:?} threshold={} for {} s",
            kind, config.range, config.threshold, config.duration_secs
        );

        let mut samples = Vec::new();
        let mut elapsed_secs = 0u32;
        let mut triggered = false;

        let status = loop {
            if triggered {
                break MonitorStatus::Triggered;
            }
            if elapsed_secs >= config.duration_secs {
                break MonitorStatus::TimedOut;
            }

            let sample = read(&mut *robot)?;
            triggered = sample.exceeds(config.range, config.threshold);
            let (left, right) = sample.sides();
            sink.emit(&AppEvent::MonitorSample {
                kind,
                tick: elapsed_secs + 1,
                left,
                right,
            });
            samples.push(sample);

            let tick = ticker.tick(MONITOR_TICK);
            if tick == Tick::Cancelled && !triggered {
                break MonitorStatus::Cancelled;
            }
            // A triggering sample counts its tick even if the wait was cut short.
            elapsed_secs += 1;
        };

        match status {
            MonitorStatus::Triggered => {
                warn!("Monitor: {:?} threshold exceeded after {} s", kind, elapsed_secs);
                sink.emit(&AppEvent::AlarmTriggered { kind, elapsed_secs });
                self.sound_alarm(robot)?;
            }
            MonitorStatus::TimedOut => {
                info!("Monitor: {:?} threshold not exceeded", kind);
                sink.emit(&AppEvent::MonitorTimedOut { kind, elapsed_secs });
            }
            MonitorStatus::Cancelled => {
                info!("Monitor: {:?} cancelled after {} s", kind, elapsed_secs);
                sink.emit(&AppEvent::MonitorCancelled { kind, elapsed_secs });
            }
        }

        Ok(MonitorReport {
            status,
            elapsed_secs,
            samples,
        })
    }

    fn sound_alarm(&self, robot: &mut impl RobotPort) -> Result<(), DeviceError> {
        robot.note_on(self.alarm_frequency_hz)?;
        robot.wait(self.alarm_duration_ms)?;
        robot.note_off()
    }
}
