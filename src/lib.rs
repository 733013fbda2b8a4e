//! FinchControl library.
//!
//! A command interpreter and threshold alarm monitor for a small
//! educational robot.  The domain core in [`app`] talks to the robot only
//! through [`app::ports::RobotPort`]; the [`adapters`] provide a
//! simulated robot, a log-based event sink and a JSON config loader so
//! everything runs on the host.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod error;
pub mod timing;

pub use error::{Error, Result};
