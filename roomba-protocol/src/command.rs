//! Command encoding
//!
//! Each command is an opcode followed by its payload, sent in one write.
//! The robot does not acknowledge commands.

use heapless::Vec;

use crate::opcode::{op, BaudCode};
use crate::schedule::{DayTime, Schedule};
use crate::sensor::SensorPacket;

/// Largest encoded command: opcode + count + 255 packet IDs
pub const MAX_COMMAND_SIZE: usize = 2 + 255;

/// Radius for driving straight
pub const DRIVE_STRAIGHT: i16 = i16::MIN;
/// Radius for turning in place clockwise
pub const DRIVE_IN_PLACE_CLOCKWISE: i16 = -1;
/// Radius for turning in place counter-clockwise
pub const DRIVE_IN_PLACE_COUNTER_CLOCKWISE: i16 = 1;

/// Longest song the robot stores, in notes
pub const MAX_SONG_NOTES: usize = 16;

/// Longest script the robot stores, in bytes
pub const MAX_SCRIPT_LEN: usize = 100;

/// Errors that can occur while encoding a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandError {
    /// Payload does not fit its count byte or the command buffer
    PayloadTooLarge,
}

/// Argument of the PAUSE_RESUME_STREAM command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StreamControl {
    Pause = 0,
    Resume = 1,
}

/// A command sent to the robot
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command<'a> {
    /// Soft reset
    Reset,
    /// Start the Open Interface (Passive mode)
    Start,
    /// Change the link rate
    Baud(BaudCode),
    SafeMode,
    FullMode,
    /// Put the robot to sleep
    Power,
    Spot,
    Clean,
    MaxClean,
    SeekDock,
    /// Velocity in mm/s and turn radius in mm
    Drive { velocity: i16, radius: i16 },
    /// Per-wheel velocity in mm/s
    DriveDirect { left: i16, right: i16 },
    Leds {
        bits: u8,
        power_colour: u8,
        power_intensity: u8,
    },
    /// Low side drivers on/off (cleaning motors on a Roomba)
    Drivers(u8),
    /// Low side driver duty cycles, 0-128
    PwmDrivers {
        duty0: u8,
        duty1: u8,
        duty2: u8,
    },
    DigitalOut(u8),
    /// Define a song from note/duration byte pairs
    ///
    /// The note count sent is `notes.len() / 2`; odd lengths and songs over
    /// [`MAX_SONG_NOTES`] are the caller's responsibility.
    Song { number: u8, notes: &'a [u8] },
    PlaySong(u8),
    /// Query one sensor packet
    Sensors(SensorPacket),
    /// Query several sensor packets at once
    QueryList(&'a [SensorPacket]),
    /// Start streaming the given packets
    Stream(&'a [SensorPacket]),
    StreamControl(StreamControl),
    /// Define a script
    Script(&'a [u8]),
    PlayScript,
    /// Ask the robot to send back the current script
    ShowScript,
    SetSchedule(Schedule),
    SetDayTime(DayTime),
    /// A bare byte, for opcodes this enum does not cover
    Raw(u8),
}

impl<'a> Command<'a> {
    /// Opcode byte of this command
    pub fn opcode(&self) -> u8 {
        match self {
            Command::Reset => op::RESET,
            Command::Start => op::START,
            Command::Baud(_) => op::BAUD,
            Command::SafeMode => op::SAFE,
            Command::FullMode => op::FULL,
            Command::Power => op::POWER,
            Command::Spot => op::SPOT,
            Command::Clean => op::CLEAN,
            Command::MaxClean => op::MAX,
            Command::SeekDock => op::SEEK_DOCK,
            Command::Drive { .. } => op::DRIVE,
            Command::DriveDirect { .. } => op::DRIVE_DIRECT,
            Command::Leds { .. } => op::LEDS,
            Command::Drivers(_) => op::MOTORS,
            Command::PwmDrivers { .. } => op::PWM_MOTORS,
            Command::DigitalOut(_) => op::DIGITAL_OUTPUTS,
            Command::Song { .. } => op::SONG,
            Command::PlaySong(_) => op::PLAY,
            Command::Sensors(_) => op::SENSORS,
            Command::QueryList(_) => op::QUERY_LIST,
            Command::Stream(_) => op::STREAM,
            Command::StreamControl(_) => op::PAUSE_RESUME_STREAM,
            Command::Script(_) => op::SCRIPT,
            Command::PlayScript => op::PLAY_SCRIPT,
            Command::ShowScript => op::SHOW_SCRIPT,
            Command::SetSchedule(_) => op::SCHEDULE,
            Command::SetDayTime(_) => op::SET_DAY_TIME,
            Command::Raw(byte) => *byte,
        }
    }

    /// Encode this command into its wire bytes
    pub fn encode(&self) -> Result<Vec<u8, MAX_COMMAND_SIZE>, CommandError> {
        let mut out = Vec::new();
        push(&mut out, &[self.opcode()])?;

        match self {
            Command::Reset
            | Command::Start
            | Command::SafeMode
            | Command::FullMode
            | Command::Power
            | Command::Spot
            | Command::Clean
            | Command::MaxClean
            | Command::SeekDock
            | Command::PlayScript
            | Command::ShowScript
            | Command::Raw(_) => {}
            Command::Baud(code) => push(&mut out, &[code.to_byte()])?,
            Command::Drive { velocity, radius } => {
                push(&mut out, &velocity.to_be_bytes())?;
                push(&mut out, &radius.to_be_bytes())?;
            }
            Command::DriveDirect { left, right } => {
                // Right wheel first
                push(&mut out, &right.to_be_bytes())?;
                push(&mut out, &left.to_be_bytes())?;
            }
            Command::Leds {
                bits,
                power_colour,
                power_intensity,
            } => push(&mut out, &[*bits, *power_colour, *power_intensity])?,
            Command::Drivers(bits) | Command::DigitalOut(bits) => push(&mut out, &[*bits])?,
            Command::PwmDrivers {
                duty0,
                duty1,
                duty2,
            } => push(&mut out, &[*duty2, *duty1, *duty0])?,
            Command::Song { number, notes } => {
                let count = u8::try_from(notes.len() / 2).map_err(|_| CommandError::PayloadTooLarge)?;
                push(&mut out, &[*number, count])?;
                push(&mut out, notes)?;
            }
            Command::PlaySong(number) => push(&mut out, &[*number])?,
            Command::Sensors(packet) => push(&mut out, &[packet.to_byte()])?,
            Command::QueryList(packets) | Command::Stream(packets) => {
                push(&mut out, &[count_byte(packets.len())?])?;
                for packet in packets.iter() {
                    push(&mut out, &[packet.to_byte()])?;
                }
            }
            Command::StreamControl(control) => push(&mut out, &[*control as u8])?,
            Command::Script(bytes) => {
                push(&mut out, &[count_byte(bytes.len())?])?;
                push(&mut out, bytes)?;
            }
            Command::SetSchedule(schedule) => push(&mut out, &schedule.to_bytes())?,
            Command::SetDayTime(time) => push(&mut out, &time.to_bytes())?,
        }

        Ok(out)
    }
}

fn push(out: &mut Vec<u8, MAX_COMMAND_SIZE>, bytes: &[u8]) -> Result<(), CommandError> {
    out.extend_from_slice(bytes)
        .map_err(|_| CommandError::PayloadTooLarge)
}

fn count_byte(len: usize) -> Result<u8, CommandError> {
    u8::try_from(len).map_err(|_| CommandError::PayloadTooLarge)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::{Day, ScheduleDay};

    fn encode(cmd: Command) -> std::vec::Vec<u8> {
        cmd.encode().unwrap().to_vec()
    }

    #[test]
    fn test_single_byte_commands() {
        assert_eq!(encode(Command::Start), [128]);
        assert_eq!(encode(Command::Reset), [7]);
        assert_eq!(encode(Command::SafeMode), [131]);
        assert_eq!(encode(Command::FullMode), [132]);
        assert_eq!(encode(Command::Power), [133]);
        assert_eq!(encode(Command::Spot), [134]);
        assert_eq!(encode(Command::Clean), [135]);
        assert_eq!(encode(Command::MaxClean), [136]);
        assert_eq!(encode(Command::SeekDock), [143]);
        assert_eq!(encode(Command::ShowScript), [154]);
    }

    #[test]
    fn test_drive_big_endian() {
        // -200 mm/s, radius 500 mm
        assert_eq!(
            encode(Command::Drive {
                velocity: -200,
                radius: 500
            }),
            [137, 0xFF, 0x38, 0x01, 0xF4]
        );
    }

    #[test]
    fn test_drive_straight() {
        assert_eq!(
            encode(Command::Drive {
                velocity: 100,
                radius: DRIVE_STRAIGHT
            }),
            [137, 0x00, 0x64, 0x80, 0x00]
        );
        assert_eq!(
            encode(Command::Drive {
                velocity: 100,
                radius: DRIVE_IN_PLACE_CLOCKWISE
            })[3..],
            [0xFF, 0xFF]
        );
    }

    #[test]
    fn test_drive_direct_right_first() {
        assert_eq!(
            encode(Command::DriveDirect {
                left: 100,
                right: -100
            }),
            [145, 0xFF, 0x9C, 0x00, 0x64]
        );
    }

    #[test]
    fn test_leds_and_drivers() {
        assert_eq!(
            encode(Command::Leds {
                bits: 0x0A,
                power_colour: 128,
                power_intensity: 255
            }),
            [139, 0x0A, 128, 255]
        );
        assert_eq!(encode(Command::Drivers(0x07)), [138, 0x07]);
        assert_eq!(encode(Command::DigitalOut(0x05)), [147, 0x05]);
    }

    #[test]
    fn test_pwm_drivers_reversed() {
        assert_eq!(
            encode(Command::PwmDrivers {
                duty0: 10,
                duty1: 20,
                duty2: 30
            }),
            [144, 30, 20, 10]
        );
    }

    #[test]
    fn test_song() {
        let notes = [60, 32, 62, 32, 64, 64];
        assert_eq!(
            encode(Command::Song {
                number: 2,
                notes: &notes
            }),
            [140, 2, 3, 60, 32, 62, 32, 64, 64]
        );
        assert_eq!(encode(Command::PlaySong(2)), [141, 2]);
    }

    #[test]
    fn test_song_odd_length_not_validated() {
        let notes = [60, 32, 62];
        assert_eq!(
            encode(Command::Song {
                number: 0,
                notes: &notes
            }),
            [140, 0, 1, 60, 32, 62]
        );
    }

    #[test]
    fn test_stream_and_query_list() {
        let ids = [SensorPacket::Group21To26, SensorPacket::BumpsAndWheelDrops];
        assert_eq!(encode(Command::Stream(&ids)), [148, 2, 3, 7]);
        assert_eq!(encode(Command::QueryList(&ids)), [149, 2, 3, 7]);
        assert_eq!(
            encode(Command::Sensors(SensorPacket::Voltage)),
            [142, 22]
        );
        assert_eq!(
            encode(Command::StreamControl(StreamControl::Resume)),
            [150, 1]
        );
        assert_eq!(
            encode(Command::StreamControl(StreamControl::Pause)),
            [150, 0]
        );
    }

    #[test]
    fn test_too_many_ids() {
        let ids = [SensorPacket::Wall; 256];
        assert_eq!(
            Command::QueryList(&ids).encode(),
            Err(CommandError::PayloadTooLarge)
        );
        let ids = [SensorPacket::Wall; 255];
        assert_eq!(Command::Stream(&ids).encode().unwrap().len(), 257);
    }

    #[test]
    fn test_script() {
        assert_eq!(encode(Command::Script(&[137, 0, 100, 0x80, 0])), [
            152, 5, 137, 0, 100, 0x80, 0
        ]);
        assert_eq!(encode(Command::PlayScript), [153]);
    }

    #[test]
    fn test_baud() {
        assert_eq!(encode(Command::Baud(BaudCode::Baud19200)), [129, 7]);
    }

    #[test]
    fn test_set_day_time() {
        assert_eq!(
            encode(Command::SetDayTime(DayTime::new(Day::Tuesday, 8, 5))),
            [168, 2, 8, 5]
        );
    }

    #[test]
    fn test_set_schedule() {
        let mut schedule = Schedule::default();
        *schedule.day_mut(Day::Monday) = ScheduleDay::at(10, 30);
        let bytes = encode(Command::SetSchedule(schedule));
        assert_eq!(bytes.len(), 16);
        assert_eq!(bytes[0], 167);
        assert_eq!(bytes[1], 0b0000_0010);
        assert_eq!(&bytes[4..6], &[10, 30]);
    }
}
