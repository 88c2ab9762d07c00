//! Driver configuration
//!
//! The record the configuration store persists. Every field has a default,
//! so a partial document deserializes.

use roomba_protocol::BaudCode;
use serde::{Deserialize, Serialize};

/// Timing and link settings for [`crate::OpenInterface`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(default)]
pub struct DriverConfig {
    /// Line rate the link is opened at
    pub baud: BaudCode,
    /// Per-byte deadline for blocking reads
    pub read_timeout_ms: u32,
    /// Time between wake pulses
    pub wake_interval_ms: u32,
    /// How long the wake line is held high
    pub wake_pulse_ms: u32,
    /// Settle time after `start`
    pub startup_delay_ms: u32,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            baud: BaudCode::Baud115200,
            read_timeout_ms: 200,
            wake_interval_ms: 30_000,
            wake_pulse_ms: 200,
            startup_delay_ms: 300,
        }
    }
}

/// Rejected configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A zero read timeout fails every query
    ZeroReadTimeout,
    /// A zero interval would pulse on every tick
    ZeroWakeInterval,
    /// The pulse must end before the next one is due
    WakePulseTooLong,
}

impl DriverConfig {
    /// Check the timing values are usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.read_timeout_ms == 0 {
            return Err(ConfigError::ZeroReadTimeout);
        }
        if self.wake_interval_ms == 0 {
            return Err(ConfigError::ZeroWakeInterval);
        }
        if self.wake_pulse_ms >= self.wake_interval_ms {
            return Err(ConfigError::WakePulseTooLong);
        }
        Ok(())
    }
}
