//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ Interpreter / ThresholdMonitor / Session
//! ```
//!
//! The robot itself, the event destination and the configuration source
//! are all adapters.  The domain borrows them for the length of one call
//! and never owns them, so the whole core runs against mocks on the host.

use crate::config::SessionConfig;
use crate::error::{ConfigError, DeviceError};

// ───────────────────────────────────────────────────────────────
// Robot port (the device capability interface)
// ───────────────────────────────────────────────────────────────

/// Primitive actuator and sensor operations of the robot.
///
/// Units are fixed by contract: motor power is signed `-255..=255`
/// (sign = direction, 0 = stop), LED channels `0..=255`, tones in Hz,
/// waits in milliseconds, temperature in degrees Celsius.  Every call
/// may fail; callers propagate the failure rather than masking it.
pub trait RobotPort {
    /// Open the link to the robot.  `Ok(false)` means "not reachable,
    /// try again"; `Err` is reserved for faults in the link itself.
    fn connect(&mut self) -> Result<bool, DeviceError>;

    /// Close the link.
    fn disconnect(&mut self) -> Result<(), DeviceError>;

    /// Set left and right motor power.
    fn set_motors(&mut self, left: i16, right: i16) -> Result<(), DeviceError>;

    /// Set the RGB LED colour.
    fn set_led(&mut self, r: u8, g: u8, b: u8) -> Result<(), DeviceError>;

    /// Start a tone.
    fn note_on(&mut self, frequency_hz: u32) -> Result<(), DeviceError>;

    /// Silence the buzzer.
    fn note_off(&mut self) -> Result<(), DeviceError>;

    /// Block for `millis` milliseconds on the calling thread.
    fn wait(&mut self, millis: u32) -> Result<(), DeviceError>;

    /// Temperature in degrees Celsius.
    fn temperature(&mut self) -> Result<f64, DeviceError>;

    /// Raw left light sensor level.
    fn left_light(&mut self) -> Result<i32, DeviceError>;

    /// Raw right light sensor level.
    fn right_light(&mut self) -> Result<i32, DeviceError>;

    /// Motors stopped, tone off, LED off.
    ///
    /// Provided so every front end quiesces the robot the same way.
    fn reset(&mut self) -> Result<(), DeviceError> {
        self.set_motors(0, 0)?;
        self.note_off()?;
        self.set_led(0, 0, 0)
    }
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / UI)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go (log, console
/// table, test recorder).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

/// Sink that discards every event.
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: &super::events::AppEvent) {}
}

// ───────────────────────────────────────────────────────────────
// Configuration port (driven adapter: domain ← persistent config)
// ───────────────────────────────────────────────────────────────

/// Loads session configuration.
///
/// Implementations MUST validate before returning: an invalid file is
/// rejected with [`ConfigError::ValidationFailed`], not silently clamped.
pub trait ConfigPort {
    /// Load configuration.
    /// Returns [`SessionConfig::default()`] if no stored config exists.
    fn load(&self) -> Result<SessionConfig, ConfigError>;
}
