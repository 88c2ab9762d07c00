//! Roomba Hardware Abstraction Layer
//!
//! This crate defines the hardware traits the Open Interface driver is
//! written against. Board support code (ESP8266 soft-serial, a Linux tty,
//! a test double) implements them; the driver never touches registers.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  roomba-drivers (OpenInterface)         │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  roomba-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ board serial  │       │  test doubles │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`uart::ByteChannel`] - Byte-granular half-duplex serial link
//! - [`gpio::OutputPin`] - The BRC wake line
//! - [`time::Clock`] - Monotonic millisecond clock

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod time;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use gpio::OutputPin;
pub use time::{Clock, Duration, Instant};
pub use uart::{ByteChannel, UartConfig};
