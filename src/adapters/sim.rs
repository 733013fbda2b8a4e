//! Simulated robot adapter.
//!
//! Implements [`RobotPort`] entirely in memory so sessions can run on the
//! host.  Every accepted call is appended to a log of [`DeviceCall`]s;
//! sensor readings come from scripted streams whose last value repeats
//! once the script runs out.
//!
//! Operations other than `connect` fail with
//! [`DeviceError::NotConnected`] until a connect has succeeded.  With
//! `realtime` enabled, `wait` really sleeps.

use std::collections::VecDeque;
use std::thread;
use std::time::Duration;

use log::{debug, trace};

use crate::app::ports::RobotPort;
use crate::error::DeviceError;

/// One primitive operation accepted by the simulated robot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeviceCall {
    Connect,
    Disconnect,
    SetMotors(i16, i16),
    SetLed(u8, u8, u8),
    NoteOn(u32),
    NoteOff,
    Wait(u32),
    Temperature,
    LeftLight,
    RightLight,
}

impl DeviceCall {
    /// Operation name, as used for fault injection.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Connect => "connect",
            Self::Disconnect => "disconnect",
            Self::SetMotors(..) => "set_motors",
            Self::SetLed(..) => "set_led",
            Self::NoteOn(_) => "note_on",
            Self::NoteOff => "note_off",
            Self::Wait(_) => "wait",
            Self::Temperature => "temperature",
            Self::LeftLight => "left_light",
            Self::RightLight => "right_light",
        }
    }

    fn is_read(&self) -> bool {
        matches!(self, Self::Temperature | Self::LeftLight | Self::RightLight)
    }
}

/// Sensor script: values are consumed in order, the last one sticks.
#[derive(Debug, Clone)]
struct Script<T: Copy> {
    queue: VecDeque<T>,
    last: T,
}

impl<T: Copy> Script<T> {
    fn constant(value: T) -> Self {
        Self {
            queue: VecDeque::new(),
            last: value,
        }
    }

    fn next(&mut self) -> T {
        if let Some(v) = self.queue.pop_front() {
            self.last = v;
        }
        self.last
    }
}

/// In-memory robot.
#[derive(Debug, Clone)]
pub struct SimulatedRobot {
    calls: Vec<DeviceCall>,
    connected: bool,
    unreachable_attempts: u32,
    fail_on: Option<&'static str>,
    realtime: bool,
    temperature: Script<f64>,
    left_light: Script<i32>,
    right_light: Script<i32>,
    motors: (i16, i16),
    led: (u8, u8, u8),
    tone: Option<u32>,
}

impl Default for SimulatedRobot {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedRobot {
    /// A reachable robot at room temperature in a dim room.
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            connected: false,
            unreachable_attempts: 0,
            fail_on: None,
            realtime: false,
            temperature: Script::constant(21.0),
            left_light: Script::constant(20),
            right_light: Script::constant(20),
            motors: (0, 0),
            led: (0, 0, 0),
            tone: None,
        }
    }

    /// Sleep for real in `wait`.
    pub fn realtime(mut self, on: bool) -> Self {
        self.realtime = on;
        self
    }

    /// The first `attempts` connects report "not reachable".
    pub fn unreachable_for(mut self, attempts: u32) -> Self {
        self.unreachable_attempts = attempts;
        self
    }

    /// Make every call to the named operation fail.
    pub fn fail_on(mut self, operation: &'static str) -> Self {
        self.fail_on = Some(operation);
        self
    }

    pub fn script_temperature(mut self, values: impl IntoIterator<Item = f64>) -> Self {
        self.temperature.queue.extend(values);
        self
    }

    pub fn script_left_light(mut self, values: impl IntoIterator<Item = i32>) -> Self {
        self.left_light.queue.extend(values);
        self
    }

    pub fn script_right_light(mut self, values: impl IntoIterator<Item = i32>) -> Self {
        self.right_light.queue.extend(values);
        self
    }

    /// Every call accepted so far, in order.
    pub fn calls(&self) -> &[DeviceCall] {
        &self.calls
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn motors(&self) -> (i16, i16) {
        self.motors
    }

    pub fn led(&self) -> (u8, u8, u8) {
        self.led
    }

    pub fn tone(&self) -> Option<u32> {
        self.tone
    }

    /// True when motors are stopped, the buzzer is silent and the LED is dark.
    pub fn is_quiescent(&self) -> bool {
        self.motors == (0, 0) && self.tone.is_none() && self.led == (0, 0, 0)
    }

    fn accept(&mut self, call: DeviceCall) -> Result<(), DeviceError> {
        if call != DeviceCall::Connect && !self.connected {
            return Err(DeviceError::NotConnected);
        }
        if self.fail_on == Some(call.name()) {
            debug!("SimulatedRobot: injected fault on {}", call.name());
            return Err(if call.is_read() {
                DeviceError::ReadFailed(call.name())
            } else {
                DeviceError::WriteFailed(call.name())
            });
        }
        trace!("SimulatedRobot: {:?}", call);
        self.calls.push(call);
        Ok(())
    }
}

impl RobotPort for SimulatedRobot {
    fn connect(&mut self) -> Result<bool, DeviceError> {
        self.accept(DeviceCall::Connect)?;
        if self.unreachable_attempts > 0 {
            self.unreachable_attempts -= 1;
            return Ok(false);
        }
        self.connected = true;
        Ok(true)
    }

    fn disconnect(&mut self) -> Result<(), DeviceError> {
        self.accept(DeviceCall::Disconnect)?;
        self.connected = false;
        Ok(())
    }

    fn set_motors(&mut self, left: i16, right: i16) -> Result<(), DeviceError> {
        self.accept(DeviceCall::SetMotors(left, right))?;
        self.motors = (left, right);
        Ok(())
    }

    fn set_led(&mut self, r: u8, g: u8, b: u8) -> Result<(), DeviceError> {
        self.accept(DeviceCall::SetLed(r, g, b))?;
        self.led = (r, g, b);
        Ok(())
    }

    fn note_on(&mut self, frequency_hz: u32) -> Result<(), DeviceError> {
        self.accept(DeviceCall::NoteOn(frequency_hz))?;
        self.tone = Some(frequency_hz);
        Ok(())
    }

    fn note_off(&mut self) -> Result<(), DeviceError> {
        self.accept(DeviceCall::NoteOff)?;
        self.tone = None;
        Ok(())
    }

    fn wait(&mut self, millis: u32) -> Result<(), DeviceError> {
        self.accept(DeviceCall::Wait(millis))?;
        if self.realtime {
            thread::sleep(Duration::from_millis(u64::from(millis)));
        }
        Ok(())
    }

    fn temperature(&mut self) -> Result<f64, DeviceError> {
        self.accept(DeviceCall::Temperature)?;
        Ok(self.temperature.next())
    }

    fn left_light(&mut self) -> Result<i32, DeviceError> {
        self.accept(DeviceCall::LeftLight)?;
        Ok(self.left_light.next())
    }

    fn right_light(&mut self) -> Result<i32, DeviceError> {
        self.accept(DeviceCall::RightLight)?;
        Ok(self.right_light.next())
    }
}
