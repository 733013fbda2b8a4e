//! Temperature data recorder.
//!
//! Takes a fixed number of temperature samples at a fixed cadence.  The
//! interpreter's GET_TEMPERATURE command delegates here, and a front end
//! can drive it directly with operator-chosen count and period.

use std::time::Duration;

use log::{debug, info};

use crate::error::{DeviceError, ValidationError};
use crate::timing::{Tick, Ticker};

use super::events::AppEvent;
use super::params::validate_in_range;
use super::ports::{EventSink, RobotPort};

pub const DATA_POINTS_MIN: u32 = 1;
pub const DATA_POINTS_MAX: u32 = 1000;
pub const PERIOD_SECS_MIN: f64 = 0.1;
pub const PERIOD_SECS_MAX: f64 = 3600.0;

/// Validate an operator-entered number of data points.
pub fn validate_data_points(raw: &str) -> Result<u32, ValidationError> {
    validate_in_range(raw, DATA_POINTS_MIN, DATA_POINTS_MAX)
}

/// Validate an operator-entered sampling period (seconds).
pub fn validate_period_secs(raw: &str) -> Result<Duration, ValidationError> {
    validate_in_range(raw, PERIOD_SECS_MIN, PERIOD_SECS_MAX).map(Duration::from_secs_f64)
}

/// Samples collected by one recording.  Dropped by the caller once
/// reported; nothing is kept between recordings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemperatureSeries {
    samples: Vec<f64>,
    requested: usize,
}

impl TemperatureSeries {
    /// Readings in the order they were taken (°C).
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// True if every requested sample was taken.
    pub fn is_complete(&self) -> bool {
        self.samples.len() == self.requested
    }

    pub fn average(&self) -> Option<f64> {
        if self.samples.is_empty() {
            return None;
        }
        Some(self.samples.iter().sum::<f64>() / self.samples.len() as f64)
    }

    pub fn min(&self) -> Option<f64> {
        self.samples.iter().copied().reduce(f64::min)
    }

    pub fn max(&self) -> Option<f64> {
        self.samples.iter().copied().reduce(f64::max)
    }
}

/// Fixed-cadence temperature sampler.
#[derive(Debug, Clone, Copy)]
pub struct DataRecorder {
    period: Duration,
}

impl DataRecorder {
    pub fn new(period: Duration) -> Self {
        Self { period }
    }

    /// One sample per second, the cadence of GET_TEMPERATURE.
    pub fn per_second() -> Self {
        Self::new(Duration::from_secs(1))
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Take `count` samples, one per period.
    ///
    /// Each sample is followed by one tick.  A cancelled tick ends the
    /// recording early; the samples taken so far are returned.
    pub fn record(
        &self,
        robot: &mut impl RobotPort,
        ticker: &mut impl Ticker,
        count: usize,
        sink: &mut impl EventSink,
    ) -> Result<TemperatureSeries, DeviceError> {
        let period = self.period;
        self.sample(robot, count, sink, |_| Ok(ticker.tick(period) == Tick::Elapsed))
    }

    /// Take `count` samples, pacing with [`RobotPort::wait`].
    ///
    /// Runs to completion: nothing can cut it short except a device
    /// failure.  This is the GET_TEMPERATURE recipe.
    pub fn record_blocking(
        &self,
        robot: &mut impl RobotPort,
        count: usize,
        sink: &mut impl EventSink,
    ) -> Result<TemperatureSeries, DeviceError> {
        let millis = u32::try_from(self.period.as_millis()).unwrap_or(u32::MAX);
        self.sample(robot, count, sink, |robot| {
            robot.wait(millis)?;
            Ok(true)
        })
    }

    /// `pace` runs after every sample; `Ok(false)` stops the recording.
    fn sample<R, P>(
        &self,
        robot: &mut R,
        count: usize,
        sink: &mut impl EventSink,
        mut pace: P,
    ) -> Result<TemperatureSeries, DeviceError>
    where
        R: RobotPort,
        P: FnMut(&mut R) -> Result<bool, DeviceError>,
    {
        let mut series = TemperatureSeries {
            samples: Vec::with_capacity(count),
            requested: count,
        };

        info!(
            "Recorder: {} samples every {} ms",
            count,
            self.period.as_millis()
        );

        for index in 0..count {
            let celsius = robot.temperature()?;
            debug!("Recorder: sample {} = {:.2} C", index + 1, celsius);
            series.samples.push(celsius);
            sink.emit(&AppEvent::TemperatureRecorded { index, celsius });

            if !pace(&mut *robot)? {
                break;
            }
        }

        if !series.is_complete() {
            sink.emit(&AppEvent::RecordingCancelled {
                taken: series.len(),
                requested: count,
            });
        }
        Ok(series)
    }
}
