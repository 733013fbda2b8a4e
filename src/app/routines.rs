//! Talent-show routines.
//!
//! Fixed, self-contained performances that bypass the interpreter.  Every
//! routine leaves the robot quiesced (motors stopped, tone off, LED off)
//! when it returns `Ok`.

use core::f64::consts::{FRAC_PI_2, PI};

use log::info;

use crate::error::DeviceError;

use super::ports::RobotPort;

/// Top of the light-and-sound tone sweep when the operator gives none.
pub const LIGHT_AND_SOUND_DEFAULT_HZ: u32 = 600;

const SWEEP_START: u32 = 200;
const SWEEP_STEP: usize = 50;
const SWEEP_HOLD_MS: u32 = 20;
const COLOUR_STEPS: u32 = 16;
const COLOUR_HOLD_MS: u32 = 60;

/// Parse the operator's top note, falling back to
/// [`LIGHT_AND_SOUND_DEFAULT_HZ`] for anything that is not a whole
/// number above the sweep start.
pub fn top_note_or_default(raw: &str) -> u32 {
    match raw.trim().parse::<u32>() {
        Ok(hz) if hz > SWEEP_START => hz,
        _ => LIGHT_AND_SOUND_DEFAULT_HZ,
    }
}

/// Rising tone sweep up to `top_hz`, then a quarter-turn colour wheel
/// from red through green with blue fading in.
pub fn light_and_sound(robot: &mut impl RobotPort, top_hz: u32) -> Result<(), DeviceError> {
    info!("Routine: light and sound up to {top_hz} Hz");

    for r in (SWEEP_START..top_hz).step_by(SWEEP_STEP) {
        robot.note_on((PI * f64::from(r)).round() as u32)?;
        robot.wait(SWEEP_HOLD_MS)?;
    }
    robot.note_off()?;

    for step in 0..=COLOUR_STEPS {
        let theta = FRAC_PI_2 * f64::from(step) / f64::from(COLOUR_STEPS);
        let red = (theta.cos() * 255.0).round() as u8;
        let green = (theta.sin() * 255.0).round() as u8;
        let blue = (255 * step / COLOUR_STEPS) as u8;
        robot.set_led(red, green, blue)?;
        robot.wait(COLOUR_HOLD_MS)?;
    }

    robot.reset()
}

/// Wheel-by-wheel choreography.
pub fn dance(robot: &mut impl RobotPort) -> Result<(), DeviceError> {
    const MOVES: [(i16, i16, u32); 6] = [
        (0, 100, 1000),
        (0, -100, 1000),
        (100, 0, 1000),
        (-100, 0, 100),
        (200, 0, 500),
        (0, -200, 1000),
    ];

    info!("Routine: dance");
    for (left, right, hold) in MOVES {
        robot.set_motors(left, right)?;
        robot.wait(hold)?;
    }
    robot.reset()
}

/// Coloured swerves followed by a rising then falling tone.
pub fn mixing_it_up(robot: &mut impl RobotPort) -> Result<(), DeviceError> {
    info!("Routine: mixing it up");

    robot.set_led(255, 0, 0)?;
    robot.set_motors(200, 250)?;
    robot.wait(1000)?;
    robot.set_led(0, 255, 0)?;
    robot.set_motors(250, 200)?;
    robot.wait(1000)?;
    robot.set_motors(0, 0)?;
    robot.set_led(0, 0, 0)?;

    for hz in (100..500).step_by(SWEEP_STEP) {
        robot.note_on(hz)?;
        robot.wait(SWEEP_HOLD_MS)?;
    }
    for hz in (101..=600).rev().step_by(SWEEP_STEP) {
        robot.note_on(hz)?;
        robot.wait(SWEEP_HOLD_MS)?;
    }

    robot.reset()
}
