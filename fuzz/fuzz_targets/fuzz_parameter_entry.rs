//! Fuzz target: `ParameterSet::from_raw`
//!
//! Whatever the operator types, an accepted Parameter Set is always
//! within bounds and its derived durations never overflow.
//!
//! cargo fuzz run fuzz_parameter_entry

#![no_main]

use finchcontrol::app::params::{MOTOR_SPEED_MAX, MOTOR_SPEED_MIN, ParameterSet, WAIT_SECS_MAX};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let mut fields = text.splitn(3, '\n');
    let speed = fields.next().unwrap_or("");
    let brightness = fields.next().unwrap_or("");
    let wait = fields.next().unwrap_or("");

    if let Ok(params) = ParameterSet::from_raw(speed, brightness, wait) {
        assert!((MOTOR_SPEED_MIN..=MOTOR_SPEED_MAX).contains(&params.motor_speed()));
        assert!(params.wait_secs() >= 0.0 && params.wait_secs() <= WAIT_SECS_MAX);
        assert!(params.wait_millis() <= 180_000);
        assert!(params.whole_wait_secs() <= 180);
    }
});
