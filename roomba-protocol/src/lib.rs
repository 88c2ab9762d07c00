//! Roomba Open Interface protocol
//!
//! This crate defines the binary protocol spoken over the robot's serial
//! port: command opcodes and their payload layouts, sensor packet IDs, and
//! the framing of the unsolicited sensor stream.
//!
//! # Commands
//!
//! Every command is one opcode byte followed by a fixed or length-prefixed
//! payload. Multi-byte integers are big-endian.
//! ```text
//! ┌────────┬──────────────────┐
//! │ OPCODE │ PAYLOAD          │
//! │ 1B     │ 0–256B           │
//! └────────┴──────────────────┘
//! ```
//!
//! # Sensor stream
//!
//! Once streaming is requested the robot sends a frame every 15 ms,
//! interleaved with whatever text it prints while booting or charging:
//! ```text
//! ┌────────┬────────┬─────────────┬──────────┐
//! │ HEADER │ LENGTH │ PAYLOAD     │ CHECKSUM │
//! │ 19     │ 1B     │ 0–255B      │ 1B       │
//! └────────┴────────┴─────────────┴──────────┘
//! ```
//! The checksum makes the byte sum of the whole frame zero modulo 256.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod command;
pub mod line;
pub mod opcode;
pub mod schedule;
pub mod sensor;
pub mod stream;

pub use command::{Command, CommandError, StreamControl, MAX_COMMAND_SIZE};
pub use line::{LineReader, MAX_LINE_LEN};
pub use opcode::{BaudCode, InvalidBaudRate};
pub use schedule::{Day, DayTime, Schedule, ScheduleDay};
pub use sensor::{ChargeState, IrCommand, OiMode, SensorPacket};
pub use stream::{
    EncodeError, PollState, StreamDecoder, StreamError, StreamPacket, MAX_STREAM_PAYLOAD, STREAM_HEADER,
};
