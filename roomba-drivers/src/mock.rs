//! Test doubles for the hardware seams
//!
//! The channel records everything the driver does to it and hands out
//! scripted robot replies; the clock advances on every read so busy-wait
//! loops make progress.

use std::cell::Cell;
use std::collections::VecDeque;

use embedded_hal::delay::DelayNs;
use roomba_hal::{ByteChannel, Clock, Instant, OutputPin, UartConfig};

use crate::{DriverConfig, OpenInterface};

/// Something the driver did to the channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelEvent {
    Open(u32),
    Close,
    Write(Vec<u8>),
    Flush,
}

/// Scripted serial link
#[derive(Debug, Default)]
pub struct MockChannel {
    pub events: Vec<ChannelEvent>,
    rx: VecDeque<u8>,
    /// Delivered one per write, after the write
    replies: VecDeque<Vec<u8>>,
    /// Delivered one byte per `trickle_every` polls of an empty channel
    trickle: VecDeque<u8>,
    trickle_every: usize,
    polls: Cell<usize>,
}

impl MockChannel {
    /// Make bytes readable now
    pub fn feed(&mut self, bytes: &[u8]) {
        self.rx.extend(bytes);
    }

    /// Make bytes readable after the next write
    pub fn reply_with(&mut self, bytes: &[u8]) {
        self.replies.push_back(bytes.to_vec());
    }

    /// Every write, in order
    pub fn writes(&self) -> Vec<Vec<u8>> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ChannelEvent::Write(bytes) => Some(bytes.clone()),
                _ => None,
            })
            .collect()
    }

    /// All written bytes concatenated
    pub fn written(&self) -> Vec<u8> {
        self.writes().concat()
    }

    /// Make bytes readable slowly: each one shows up on the `every`th call
    /// to `available` after the previous byte was read
    pub fn trickle(&mut self, bytes: &[u8], every: usize) {
        self.trickle.extend(bytes);
        self.trickle_every = every;
        self.polls.set(0);
    }

    pub fn pending(&self) -> usize {
        self.rx.len() + self.trickle.len()
    }
}

impl ByteChannel for MockChannel {
    fn open(&mut self, config: UartConfig) {
        self.events.push(ChannelEvent::Open(config.baudrate));
    }

    fn close(&mut self) {
        self.events.push(ChannelEvent::Close);
    }

    fn write_bytes(&mut self, data: &[u8]) {
        self.events.push(ChannelEvent::Write(data.to_vec()));
        if let Some(reply) = self.replies.pop_front() {
            self.rx.extend(reply);
        }
    }

    fn flush(&mut self) {
        self.events.push(ChannelEvent::Flush);
    }

    fn available(&self) -> usize {
        if self.rx.is_empty() && !self.trickle.is_empty() {
            let polls = self.polls.get() + 1;
            self.polls.set(polls);
            return usize::from(polls >= self.trickle_every);
        }
        self.rx.len()
    }

    fn read_byte(&mut self) -> u8 {
        if let Some(byte) = self.rx.pop_front() {
            return byte;
        }
        assert!(self.polls.get() >= self.trickle_every, "read_byte before byte arrived");
        self.polls.set(0);
        self.trickle.pop_front().expect("read_byte with nothing available")
    }
}

/// Clock that moves forward `step` ms every time it is read
#[derive(Debug)]
pub struct MockClock {
    ticks: Cell<u32>,
    step: u32,
}

impl MockClock {
    pub fn new(start: u32, step: u32) -> Self {
        Self {
            ticks: Cell::new(start),
            step,
        }
    }

    pub fn ticks(&self) -> u32 {
        self.ticks.get()
    }

    /// The value the last `now()` returned
    pub fn last_read(&self) -> u32 {
        self.ticks.get().wrapping_sub(self.step)
    }
}

impl Default for MockClock {
    fn default() -> Self {
        Self::new(0, 1)
    }
}

impl Clock for MockClock {
    fn now(&self) -> Instant {
        let now = self.ticks.get();
        self.ticks.set(now.wrapping_add(self.step));
        Instant::from_ticks(now)
    }
}

/// Wake line that records every level it was set to
#[derive(Debug, Default)]
pub struct MockPin {
    pub transitions: Vec<bool>,
}

impl MockPin {
    /// Number of complete high-then-low pulses
    pub fn pulses(&self) -> usize {
        self.transitions
            .windows(2)
            .filter(|w| w[0] && !w[1])
            .count()
    }
}

impl OutputPin for MockPin {
    fn set_high(&mut self) {
        self.transitions.push(true);
    }

    fn set_low(&mut self) {
        self.transitions.push(false);
    }

    fn is_set_high(&self) -> bool {
        self.transitions.last().copied().unwrap_or(false)
    }
}

/// Delay that only adds up how long it was asked to wait
#[derive(Debug, Default)]
pub struct MockDelay {
    total_ns: u64,
}

impl MockDelay {
    pub fn total_ms(&self) -> u64 {
        self.total_ns / 1_000_000
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }
}

pub type MockInterface = OpenInterface<MockChannel, MockPin, MockClock, MockDelay>;

/// Driver over fresh doubles with the default configuration
pub fn interface() -> MockInterface {
    interface_with(DriverConfig::default())
}

pub fn interface_with(config: DriverConfig) -> MockInterface {
    OpenInterface::new(
        MockChannel::default(),
        MockPin::default(),
        MockClock::default(),
        MockDelay::default(),
        config,
    )
    .expect("valid test config")
}
