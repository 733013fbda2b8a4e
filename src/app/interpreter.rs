//! Program interpreter.
//!
//! Runs a [`CommandProgram`] against a [`RobotPort`] with one shared
//! [`ParameterSet`].  Every command maps to exactly one fixed recipe of
//! device calls:
//!
//! | Command          | Recipe                                                  |
//! |------------------|---------------------------------------------------------|
//! | `NONE`           | diagnostic only                                         |
//! | `SONG_AND_DANCE` | five-phase LED / spin / tone routine at ¾ speed         |
//! | `MOVE_FORWARD`   | `set_motors(speed, speed)`                              |
//! | `MOVE_BACKWARD`  | `set_motors(-speed, -speed)`                            |
//! | `STOP_MOTORS`    | `set_motors(0, 0)`                                      |
//! | `WAIT`           | `wait(wait_secs * 1000)`                                |
//! | `TURN_RIGHT`     | `set_motors(speed / 4, speed)`                          |
//! | `TURN_LEFT`      | `set_motors(speed, speed / 4)`                          |
//! | `LED_ON`         | red → green → blue, `floor(wait_secs)` times            |
//! | `LED_OFF`        | `set_led(0, 0, 0)`                                      |
//! | `GET_TEMPERATURE`| `floor(wait_secs)` samples, each followed by `wait(1000)`|
//! | `DONE`           | nothing                                                 |
//!
//! All pacing goes through [`RobotPort::wait`], so a run cannot be
//! cancelled part way through.  The interpreter never stops early on its
//! own and raises nothing for the parameters (they were bounded at
//! entry).  Device failures are propagated unchanged.  Quiescing the robot afterwards is the
//! caller's job; [`Session::run_program`](super::session::Session::run_program)
//! does it unconditionally.

use log::{debug, info, warn};

use crate::config::SessionConfig;
use crate::error::DeviceError;

use super::commands::Command;
use super::events::AppEvent;
use super::params::ParameterSet;
use super::ports::{EventSink, RobotPort};
use super::program::CommandProgram;
use super::recorder::DataRecorder;

/// Commands in the order they were executed.
pub type Trace = Vec<Command>;

// Song-and-dance tones (C major arpeggio, finale an octave up).
const NOTE_C5: u32 = 523;
const NOTE_E5: u32 = 659;
const NOTE_G5: u32 = 784;
const NOTE_C6: u32 = 1047;

/// Executes command programs.
#[derive(Debug, Clone, Copy)]
pub struct Interpreter {
    led_step_ms: u32,
    dance_step_ms: u32,
    recorder: DataRecorder,
}

impl Interpreter {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            led_step_ms: config.led_step_ms,
            dance_step_ms: config.dance_step_ms,
            recorder: DataRecorder::per_second(),
        }
    }

    /// Run every command of `program` in order and return the trace.
    pub fn execute(
        &self,
        program: &CommandProgram,
        params: &ParameterSet,
        robot: &mut impl RobotPort,
        sink: &mut impl EventSink,
    ) -> Result<Trace, DeviceError> {
        let mut trace = Trace::with_capacity(program.len());
        if program.is_empty() {
            return Ok(trace);
        }

        info!(
            "Interpreter: running {} commands (speed={}, brightness={}, wait={}s)",
            program.len(),
            params.motor_speed(),
            params.led_brightness(),
            params.wait_secs()
        );

        for (index, &command) in program.commands().iter().enumerate() {
            self.apply(command, params, robot, sink)?;
            trace.push(command);
            if command == Command::None {
                sink.emit(&AppEvent::CommandSkipped { index });
            } else {
                sink.emit(&AppEvent::CommandExecuted { index, command });
            }
        }

        Ok(trace)
    }

    fn apply(
        &self,
        command: Command,
        params: &ParameterSet,
        robot: &mut impl RobotPort,
        sink: &mut impl EventSink,
    ) -> Result<(), DeviceError> {
        let speed = params.motor_speed();
        debug!("Interpreter: {command}");

        match command {
            Command::None => {
                warn!("Interpreter: unrecognized input, skipping");
            }
            Command::SongAndDance => {
                self.song_and_dance(params, robot)?;
            }
            Command::MoveForward => {
                robot.set_motors(speed, speed)?;
            }
            Command::MoveBackward => {
                robot.set_motors(-speed, -speed)?;
            }
            Command::StopMotors => {
                robot.set_motors(0, 0)?;
            }
            Command::Wait => {
                robot.wait(params.wait_millis())?;
            }
            Command::TurnRight => {
                robot.set_motors(speed / 4, speed)?;
            }
            Command::TurnLeft => {
                robot.set_motors(speed, speed / 4)?;
            }
            Command::LedOn => {
                let b = params.led_brightness();
                for _ in 0..params.whole_wait_secs() {
                    robot.set_led(b, 0, 0)?;
                    robot.wait(self.led_step_ms)?;
                    robot.set_led(0, b, 0)?;
                    robot.wait(self.led_step_ms)?;
                    robot.set_led(0, 0, b)?;
                    robot.wait(self.led_step_ms)?;
                }
            }
            Command::LedOff => {
                robot.set_led(0, 0, 0)?;
            }
            Command::GetTemperature => {
                let count = params.whole_wait_secs() as usize;
                let series = self.recorder.record_blocking(robot, count, sink)?;
                if let Some(avg) = series.average() {
                    info!(
                        "Interpreter: {} temperature samples, average {:.2} C",
                        series.len(),
                        avg
                    );
                }
            }
            Command::Done => {}
        }
        Ok(())
    }

    /// Five phases: colour + spin + first tone, second tone, new colour +
    /// opposite spin + third tone, stop + finale tone, silence.
    ///
    /// The spin drives the left wheel only, at ¾ of the set speed.
    fn song_and_dance(&self, params: &ParameterSet, robot: &mut impl RobotPort) -> Result<(), DeviceError> {
        let spin = (i32::from(params.motor_speed()) * 3 / 4) as i16;
        let b = params.led_brightness();
        let step = self.dance_step_ms;

        robot.set_led(b, 0, b)?;
        robot.set_motors(spin, 0)?;
        robot.note_on(NOTE_C5)?;
        robot.wait(step)?;

        robot.note_on(NOTE_E5)?;
        robot.wait(step)?;

        robot.set_led(0, b, b)?;
        robot.set_motors(-spin, 0)?;
        robot.note_on(NOTE_G5)?;
        robot.wait(step)?;

        robot.set_motors(0, 0)?;
        robot.note_on(NOTE_C6)?;
        robot.wait(step)?;

        robot.note_off()
    }
}
