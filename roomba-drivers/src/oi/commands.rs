//! Command transmission
//!
//! Every command is encoded in full and written with a single
//! `write_bytes` call. The robot does not acknowledge control commands, so
//! there is nothing to wait for afterwards.

use embedded_hal::delay::DelayNs;
use roomba_hal::{ByteChannel, Clock, OutputPin, UartConfig};
use roomba_protocol::{BaudCode, Command, Day, DayTime, Schedule, SensorPacket, StreamControl};

use super::OpenInterface;
use crate::error::OiError;

impl<C, P, K, D, const N: usize> OpenInterface<C, P, K, D, N>
where
    C: ByteChannel,
    P: OutputPin,
    K: Clock,
    D: DelayNs,
{
    /// Encode and write one command
    pub(super) fn transmit(&mut self, command: Command<'_>) -> Result<(), OiError> {
        let bytes = command.encode()?;
        trace!("tx opcode {} ({} bytes)", command.opcode(), bytes.len());
        self.channel.write_bytes(&bytes);
        Ok(())
    }

    /// Write a command whose encoding cannot fail
    fn transmit_fixed(&mut self, command: Command<'_>) {
        let opcode = command.opcode();
        if let Err(e) = self.transmit(command) {
            warn!("dropped opcode {}: {}", opcode, e);
        }
    }

    /// Start the Open Interface (Passive mode)
    pub fn start(&mut self) {
        self.transmit_fixed(Command::Start);
    }

    /// Soft reset. The robot prints its boot banner afterwards.
    pub fn reset(&mut self) {
        self.transmit_fixed(Command::Reset);
    }

    pub fn safe_mode(&mut self) {
        self.transmit_fixed(Command::SafeMode);
    }

    pub fn full_mode(&mut self) {
        self.transmit_fixed(Command::FullMode);
    }

    /// Power down
    pub fn power(&mut self) {
        self.transmit_fixed(Command::Power);
    }

    pub fn spot(&mut self) {
        self.transmit_fixed(Command::Spot);
    }

    pub fn clean(&mut self) {
        self.transmit_fixed(Command::Clean);
    }

    pub fn max_clean(&mut self) {
        self.transmit_fixed(Command::MaxClean);
    }

    pub fn seek_dock(&mut self) {
        self.transmit_fixed(Command::SeekDock);
    }

    /// Drive at `velocity` mm/s along a circle of `radius` mm
    ///
    /// See [`roomba_protocol::command::DRIVE_STRAIGHT`] and the in-place
    /// radii for the special values.
    pub fn drive(&mut self, velocity: i16, radius: i16) {
        self.transmit_fixed(Command::Drive { velocity, radius });
    }

    /// Set each wheel's velocity in mm/s
    pub fn drive_direct(&mut self, left: i16, right: i16) {
        self.transmit_fixed(Command::DriveDirect { left, right });
    }

    pub fn leds(&mut self, bits: u8, power_colour: u8, power_intensity: u8) {
        self.transmit_fixed(Command::Leds {
            bits,
            power_colour,
            power_intensity,
        });
    }

    /// Switch the cleaning motors on or off, see `sensor::mask`
    pub fn drivers(&mut self, bits: u8) {
        self.transmit_fixed(Command::Drivers(bits));
    }

    /// Set the low side driver duty cycles (0-128)
    pub fn pwm_drivers(&mut self, duty0: u8, duty1: u8, duty2: u8) {
        self.transmit_fixed(Command::PwmDrivers {
            duty0,
            duty1,
            duty2,
        });
    }

    pub fn digital_out(&mut self, bits: u8) {
        self.transmit_fixed(Command::DigitalOut(bits));
    }

    /// Define song `number` from note/duration byte pairs
    ///
    /// An odd trailing byte is sent but not counted. Keeping to 16 notes is
    /// up to the caller.
    pub fn song(&mut self, number: u8, notes: &[u8]) -> Result<(), OiError> {
        self.transmit(Command::Song { number, notes })
    }

    pub fn play_song(&mut self, number: u8) {
        self.transmit_fixed(Command::PlaySong(number));
    }

    /// Ask the robot to stream the given packets
    ///
    /// Frames arrive through [`poll_once`](Self::poll_once).
    pub fn stream(&mut self, packets: &[SensorPacket]) -> Result<(), OiError> {
        self.transmit(Command::Stream(packets))
    }

    /// Pause or resume the stream
    pub fn stream_command(&mut self, control: StreamControl) {
        self.transmit_fixed(Command::StreamControl(control));
    }

    /// Define the script
    pub fn script(&mut self, bytes: &[u8]) -> Result<(), OiError> {
        self.transmit(Command::Script(bytes))
    }

    pub fn play_script(&mut self) {
        self.transmit_fixed(Command::PlayScript);
    }

    pub fn set_schedule(&mut self, schedule: &Schedule) {
        self.transmit_fixed(Command::SetSchedule(*schedule));
    }

    pub fn set_day_time(&mut self, time: DayTime) {
        self.transmit_fixed(Command::SetDayTime(time));
    }

    pub fn set_clock(&mut self, day: Day, hour: u8, minute: u8) {
        self.set_day_time(DayTime::new(day, hour, minute));
    }

    /// Switch the robot and the link to a new rate
    ///
    /// The command is drained at the old rate before the channel is
    /// reopened.
    pub fn baud(&mut self, code: BaudCode) {
        self.transmit_fixed(Command::Baud(code));
        self.channel.flush();
        self.channel.close();
        self.channel.open(UartConfig::with_baudrate(code.rate()));
        self.baud = code;
        info!("baud changed to {}", code.rate());
    }

    /// Write a bare byte
    pub fn send(&mut self, byte: u8) {
        self.transmit_fixed(Command::Raw(byte));
    }
}
