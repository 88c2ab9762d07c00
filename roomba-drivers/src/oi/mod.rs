//! Open Interface driver
//!
//! One instance owns the serial link and the wake line for one robot. The
//! caller serializes access: a poll loop calling
//! [`OpenInterface::poll_once`], with commands and queries interleaved
//! between ticks.

mod commands;
mod poll;
mod query;

pub use poll::PollStats;
pub use query::MAX_SENSOR_LEN;

use embedded_hal::delay::DelayNs;
use roomba_hal::{ByteChannel, Clock, Duration, Instant, OutputPin, UartConfig};
use roomba_protocol::{BaudCode, DayTime, LineReader, StreamControl, StreamDecoder, MAX_STREAM_PAYLOAD};

use crate::config::{ConfigError, DriverConfig};
use crate::liveness::WakePulse;

/// Supplies the wall-clock day and time pushed to the robot on setup
///
/// Returns `None` while the time is not known yet (no NTP sync).
pub trait TimeOfDaySource {
    fn day_time(&self) -> Option<DayTime>;
}

impl<F> TimeOfDaySource for F
where
    F: Fn() -> Option<DayTime>,
{
    fn day_time(&self) -> Option<DayTime> {
        self()
    }
}

/// Roomba Open Interface driver
///
/// `N` is the capacity for stream payloads; longer payloads are checked
/// in full but stored truncated.
pub struct OpenInterface<C, P, K, D, const N: usize = MAX_STREAM_PAYLOAD> {
    channel: C,
    wake_pin: P,
    clock: K,
    delay: D,
    config: DriverConfig,
    /// Rate the channel is currently open at
    baud: BaudCode,
    read_timeout: Duration,
    decoder: StreamDecoder<N>,
    lines: LineReader,
    wake: WakePulse,
    stats: PollStats,
}

impl<C, P, K, D, const N: usize> OpenInterface<C, P, K, D, N>
where
    C: ByteChannel,
    P: OutputPin,
    K: Clock,
    D: DelayNs,
{
    /// Create a driver. Nothing touches the hardware until [`setup`](Self::setup).
    ///
    /// Fails if `config` does not pass [`DriverConfig::validate`].
    pub fn new(
        channel: C,
        wake_pin: P,
        clock: K,
        delay: D,
        config: DriverConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            channel,
            wake_pin,
            clock,
            delay,
            baud: config.baud,
            read_timeout: Duration::millis(config.read_timeout_ms),
            wake: WakePulse::new(
                Duration::millis(config.wake_interval_ms),
                Duration::millis(config.wake_pulse_ms),
            ),
            config,
            decoder: StreamDecoder::new(),
            lines: LineReader::new(),
            stats: PollStats::default(),
        })
    }

    /// Open the link and start the Open Interface
    ///
    /// Opens the channel at the configured rate, drives the wake line low,
    /// sends `start`, waits for the robot to settle and then sets its clock
    /// if `time` knows the time of day.
    pub fn setup<S: TimeOfDaySource + ?Sized>(&mut self, time: &S) {
        self.baud = self.config.baud;
        self.channel.open(UartConfig::with_baudrate(self.baud.rate()));
        self.wake_pin.set_low();
        self.start();
        self.delay.delay_ms(self.config.startup_delay_ms);

        match time.day_time() {
            Some(now) => self.set_day_time(now),
            None => debug!("time of day unknown, robot clock not set"),
        }
        info!("open interface started at {} baud", self.baud.rate());
    }

    /// Pulse the wake line and resume the sensor stream
    ///
    /// `now` schedules the next periodic pulse, so it must come from the
    /// same time base as the `now` given to [`poll_once`](Self::poll_once).
    pub fn wake(&mut self, now: Instant) {
        self.wake.pulse(&mut self.wake_pin, &mut self.delay, now);
        self.stream_command(StreamControl::Resume);
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// Rate the link is currently running at
    pub fn baud_code(&self) -> BaudCode {
        self.baud
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    pub fn channel_mut(&mut self) -> &mut C {
        &mut self.channel
    }

    pub fn wake_pin(&self) -> &P {
        &self.wake_pin
    }

    pub fn clock(&self) -> &K {
        &self.clock
    }

    pub fn delay(&self) -> &D {
        &self.delay
    }

    pub fn wake_schedule(&self) -> &WakePulse {
        &self.wake
    }

    /// Give back the hardware
    pub fn release(self) -> (C, P, K, D) {
        (self.channel, self.wake_pin, self.clock, self.delay)
    }
}
