//! Application core: pure domain logic, zero I/O.
//!
//! This module contains the rules of a FinchControl session: the
//! command vocabulary, program building, parameter validation, program
//! interpretation, threshold monitoring and temperature recording.
//! All interaction with the robot happens through **port traits**
//! defined in [`ports`], keeping this layer fully testable without a
//! real device.

pub mod commands;
pub mod events;
pub mod interpreter;
pub mod monitor;
pub mod params;
pub mod ports;
pub mod program;
pub mod recorder;
pub mod routines;
pub mod session;
