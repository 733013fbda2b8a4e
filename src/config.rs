//! Session configuration parameters
//!
//! All tunable timings and defaults for a FinchControl session.
//! Values can be overridden from a JSON file through a
//! [`ConfigPort`](crate::app::ports::ConfigPort) adapter.

use serde::{Deserialize, Serialize};

use crate::app::params::{MOTOR_SPEED_MAX, MOTOR_SPEED_MIN, WAIT_SECS_MAX, WAIT_SECS_MIN};
use crate::error::ConfigError;

/// Core session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    // --- Parameter Set defaults ---
    /// Motor speed used until the operator enters one (-255..=255)
    pub default_motor_speed: i16,
    /// LED brightness used until the operator enters one (0..=255)
    pub default_led_brightness: u8,
    /// Wait duration used until the operator enters one (0..=180 s)
    pub default_wait_secs: f64,

    // --- Threshold monitor ---
    /// Alarm tone frequency (Hz)
    pub alarm_frequency_hz: u32,
    /// Alarm tone length (milliseconds)
    pub alarm_duration_ms: u32,

    // --- Interpreter recipes ---
    /// Dwell per colour while LED_ON cycles red/green/blue (milliseconds)
    pub led_step_ms: u32,
    /// Dwell per phase of SONG_AND_DANCE (milliseconds)
    pub dance_step_ms: u32,

    // --- Connection ---
    /// Connect attempts before giving up
    pub connect_attempts: u8,
    /// LED feedback dwell after each connect attempt (milliseconds)
    pub connect_feedback_ms: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            // Parameter Set
            default_motor_speed: 100,
            default_led_brightness: 255,
            default_wait_secs: 1.0,

            // Monitor
            alarm_frequency_hz: 1000,
            alarm_duration_ms: 1000,

            // Recipes
            led_step_ms: 333, // ~1 s per red/green/blue cycle
            dance_step_ms: 500,

            // Connection
            connect_attempts: 3,
            connect_feedback_ms: 1500,
        }
    }
}

impl SessionConfig {
    /// Reject values that would make a session misbehave.
    ///
    /// Invalid ranges are rejected, never clamped.  Brightness needs no
    /// check: its type already matches its bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MOTOR_SPEED_MIN..=MOTOR_SPEED_MAX).contains(&self.default_motor_speed) {
            return Err(ConfigError::ValidationFailed("default_motor_speed"));
        }
        if !self.default_wait_secs.is_finite()
            || !(WAIT_SECS_MIN..=WAIT_SECS_MAX).contains(&self.default_wait_secs)
        {
            return Err(ConfigError::ValidationFailed("default_wait_secs"));
        }
        if self.alarm_frequency_hz == 0 {
            return Err(ConfigError::ValidationFailed("alarm_frequency_hz"));
        }
        if self.connect_attempts == 0 {
            return Err(ConfigError::ValidationFailed("connect_attempts"));
        }
        Ok(())
    }
}
