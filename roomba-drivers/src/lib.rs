//! Roomba Open Interface driver
//!
//! [`OpenInterface`] owns the serial link to the robot and the wake (BRC)
//! line. It provides:
//!
//! - One method per Open Interface command, sent fire-and-forget
//! - Blocking sensor and script queries with a per-byte timeout
//! - [`OpenInterface::poll_once`], the non-blocking tick that decodes the
//!   sensor stream, logs the robot's text output and keeps it awake
//!
//! Wire layouts live in `roomba-protocol`; the hardware seams (serial port,
//! wake pin, clock) are the traits of `roomba-hal` plus embedded-hal's
//! `DelayNs`.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod config;
pub mod error;
pub mod liveness;
pub mod oi;

#[cfg(test)]
mod mock;

pub use config::{ConfigError, DriverConfig};
pub use error::{OiError, ScriptRead};
pub use liveness::WakePulse;
pub use oi::{OpenInterface, PollStats, TimeOfDaySource};
