//! The Parameter Set shared by every command of a program run.
//!
//! Bounds are enforced when a value is entered, never at execution
//! time: a [`ParameterSet`] can only be built through validating
//! constructors, so the interpreter never sees an out-of-range value.

use core::str::FromStr;

use serde::Serialize;

use crate::error::ValidationError;

pub const MOTOR_SPEED_MIN: i16 = -255;
pub const MOTOR_SPEED_MAX: i16 = 255;
pub const LED_BRIGHTNESS_MIN: u8 = 0;
pub const LED_BRIGHTNESS_MAX: u8 = 255;
pub const WAIT_SECS_MIN: f64 = 0.0;
pub const WAIT_SECS_MAX: f64 = 180.0;

/// Parse `raw` and check it lies in `[min, max]` (inclusive).
///
/// Pure: no prompting, no side effects.  A front end calls it in its own
/// read/re-prompt loop and only stores the value on `Ok`.
pub fn validate_in_range<T>(raw: &str, min: T, max: T) -> Result<T, ValidationError>
where
    T: FromStr + PartialOrd + Copy + Into<f64>,
{
    let value: T = raw
        .trim()
        .parse()
        .map_err(|_| ValidationError::NotANumber)?;
    // NaN compares false against both bounds and lands here too.
    if !(value >= min && value <= max) {
        return Err(ValidationError::OutOfRange {
            min: min.into(),
            max: max.into(),
        });
    }
    Ok(value)
}

/// Motor speed, LED brightness and wait duration for one program run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParameterSet {
    motor_speed: i16,
    led_brightness: u8,
    wait_secs: f64,
}

impl ParameterSet {
    /// Build from typed values, rejecting anything out of bounds.
    pub fn new(motor_speed: i16, led_brightness: u8, wait_secs: f64) -> Result<Self, ValidationError> {
        if !(MOTOR_SPEED_MIN..=MOTOR_SPEED_MAX).contains(&motor_speed) {
            return Err(ValidationError::OutOfRange {
                min: MOTOR_SPEED_MIN.into(),
                max: MOTOR_SPEED_MAX.into(),
            });
        }
        if !(WAIT_SECS_MIN..=WAIT_SECS_MAX).contains(&wait_secs) {
            return Err(ValidationError::OutOfRange {
                min: WAIT_SECS_MIN,
                max: WAIT_SECS_MAX,
            });
        }
        Ok(Self {
            motor_speed,
            led_brightness,
            wait_secs,
        })
    }

    /// Build from raw operator text.  All three entries must validate;
    /// there is no partial update.
    pub fn from_raw(motor_speed: &str, led_brightness: &str, wait_secs: &str) -> Result<Self, ValidationError> {
        let motor_speed = validate_in_range(motor_speed, MOTOR_SPEED_MIN, MOTOR_SPEED_MAX)?;
        let led_brightness = validate_in_range(led_brightness, LED_BRIGHTNESS_MIN, LED_BRIGHTNESS_MAX)?;
        let wait_secs = validate_in_range(wait_secs, WAIT_SECS_MIN, WAIT_SECS_MAX)?;
        Self::new(motor_speed, led_brightness, wait_secs)
    }

    pub fn motor_speed(&self) -> i16 {
        self.motor_speed
    }

    pub fn led_brightness(&self) -> u8 {
        self.led_brightness
    }

    pub fn wait_secs(&self) -> f64 {
        self.wait_secs
    }

    /// Wait converted to milliseconds, rounded to the nearest one.
    pub fn wait_millis(&self) -> u32 {
        (self.wait_secs * 1000.0).round() as u32
    }

    /// Whole seconds of wait; repeat count for LED_ON and GET_TEMPERATURE.
    pub fn whole_wait_secs(&self) -> u32 {
        self.wait_secs.floor() as u32
    }
}
