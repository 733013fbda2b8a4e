//! Operator session: the application core a front end drives.
//!
//! [`Session`] owns the configuration, the current Parameter Set and the
//! current program.  It exposes a hardware-agnostic API; the robot, the
//! ticker and the event sink are borrowed per call, so the whole session
//! runs against mocks on the host.
//!
//! ```text
//!  operator text ──▶ ┌───────────────────────────────┐ ──▶ EventSink
//!                    │            Session             │
//!  RobotPort     ◀── │ Interpreter · Monitor · Recorder│
//!                    └───────────────────────────────┘
//! ```

use std::time::Duration;

use log::{error, info, warn};

use crate::config::SessionConfig;
use crate::error::Result;
use crate::timing::Ticker;

use super::events::AppEvent;
use super::interpreter::{Interpreter, Trace};
use super::monitor::{LightSensor, MonitorConfig, MonitorReport, ThresholdMonitor};
use super::params::ParameterSet;
use super::ports::{EventSink, RobotPort};
use super::program::CommandProgram;
use super::recorder::{DataRecorder, TemperatureSeries};

/// One operator session against one robot.
pub struct Session {
    config: SessionConfig,
    params: ParameterSet,
    program: CommandProgram,
    interpreter: Interpreter,
    monitor: ThresholdMonitor,
    connected: bool,
}

impl Session {
    /// Build a session from configuration.  Parameters start at the
    /// configured defaults; the program starts empty.
    pub fn new(config: SessionConfig) -> Result<Self> {
        config.validate()?;
        let params = ParameterSet::new(
            config.default_motor_speed,
            config.default_led_brightness,
            config.default_wait_secs,
        )?;
        Ok(Self {
            interpreter: Interpreter::new(&config),
            monitor: ThresholdMonitor::new(&config),
            config,
            params,
            program: CommandProgram::new(),
            connected: false,
        })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    pub fn program(&self) -> &CommandProgram {
        &self.program
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    // ── Link ──────────────────────────────────────────────────

    /// Try to reach the robot up to `connect_attempts` times.
    ///
    /// Every attempt is shown on the LED: blue on success, red on
    /// failure, each held for `connect_feedback_ms`.  The device is reset
    /// after a successful connect.  Returns `Ok(false)` if every attempt
    /// came back unreachable.
    pub fn connect(&mut self, robot: &mut impl RobotPort, sink: &mut impl EventSink) -> Result<bool> {
        let feedback = self.config.connect_feedback_ms;

        for attempt in 1..=self.config.connect_attempts {
            let connected = robot.connect()?;
            sink.emit(&AppEvent::ConnectAttempt { attempt, connected });

            if connected {
                info!("Session: connected on attempt {attempt}");
                robot.set_led(0, 0, 255)?;
                robot.wait(feedback)?;
                self.connected = true;
                self.reset(robot, sink)?;
                return Ok(true);
            }

            warn!(
                "Session: connect attempt {attempt}/{} failed",
                self.config.connect_attempts
            );
            // Best effort: the LED may be unreachable along with the rest.
            if robot.set_led(255, 0, 0).is_ok() {
                robot.wait(feedback)?;
            }
        }

        error!("Session: robot unreachable");
        Ok(false)
    }

    /// Quiesce the robot and close the link.
    pub fn disconnect(&mut self, robot: &mut impl RobotPort, sink: &mut impl EventSink) -> Result<()> {
        if !self.connected {
            return Ok(());
        }
        self.reset(robot, sink)?;
        robot.disconnect()?;
        self.connected = false;
        sink.emit(&AppEvent::Disconnected);
        info!("Session: disconnected");
        Ok(())
    }

    /// Motors stopped, tone off, LED off.
    pub fn reset(&self, robot: &mut impl RobotPort, sink: &mut impl EventSink) -> Result<()> {
        robot.reset()?;
        sink.emit(&AppEvent::RobotReset);
        Ok(())
    }

    // ── Parameters and program ────────────────────────────────

    /// Replace the Parameter Set.
    pub fn set_parameters(&mut self, params: ParameterSet) {
        info!(
            "Session: parameters speed={} brightness={} wait={}s",
            params.motor_speed(),
            params.led_brightness(),
            params.wait_secs()
        );
        self.params = params;
    }

    /// Replace the Parameter Set from raw operator text.  On error the
    /// current parameters are left untouched.
    pub fn enter_parameters(&mut self, speed: &str, brightness: &str, wait_secs: &str) -> Result<()> {
        let params = ParameterSet::from_raw(speed, brightness, wait_secs)?;
        self.set_parameters(params);
        Ok(())
    }

    /// Replace the current program.
    pub fn set_program(&mut self, program: CommandProgram) {
        info!("Session: program of {} commands loaded", program.len());
        self.program = program;
    }

    // ── Runs ──────────────────────────────────────────────────

    /// Run the current program, then reset the robot.
    ///
    /// The reset happens whether or not the program completed.  If both
    /// fail, the program's error is returned and the reset error logged.
    pub fn run_program(&mut self, robot: &mut impl RobotPort, sink: &mut impl EventSink) -> Result<Trace> {
        let outcome = self
            .interpreter
            .execute(&self.program, &self.params, robot, sink);

        match (outcome, self.reset(robot, sink)) {
            (Ok(trace), Ok(())) => Ok(trace),
            (Ok(_), Err(e)) => Err(e),
            (Err(e), reset) => {
                error!("Session: program aborted: {e}");
                if let Err(reset_err) = reset {
                    error!("Session: reset after abort failed: {reset_err}");
                }
                Err(e.into())
            }
        }
    }

    /// Watch the light sensor(s) until the threshold is crossed or the
    /// duration runs out.
    pub fn monitor_light(
        &self,
        sensor: LightSensor,
        config: &MonitorConfig,
        robot: &mut impl RobotPort,
        ticker: &mut impl Ticker,
        sink: &mut impl EventSink,
    ) -> Result<MonitorReport> {
        Ok(self.monitor.monitor_light(sensor, config, robot, ticker, sink)?)
    }

    /// Watch the temperature until the threshold is crossed or the
    /// duration runs out.
    pub fn monitor_temperature(
        &self,
        config: &MonitorConfig,
        robot: &mut impl RobotPort,
        ticker: &mut impl Ticker,
        sink: &mut impl EventSink,
    ) -> Result<MonitorReport> {
        Ok(self.monitor.monitor_temperature(config, robot, ticker, sink)?)
    }

    /// Record `count` temperatures, one every `period`.
    pub fn record_temperature(
        &self,
        count: u32,
        period: Duration,
        robot: &mut impl RobotPort,
        ticker: &mut impl Ticker,
        sink: &mut impl EventSink,
    ) -> Result<TemperatureSeries> {
        Ok(DataRecorder::new(period).record(robot, ticker, count as usize, sink)?)
    }
}
