//! Open Interface opcodes and baud codes

/// Opcode values
pub mod op {
    /// Soft reset, the robot prints its boot banner afterwards
    pub const RESET: u8 = 7;
    /// Start the Open Interface in Passive mode
    pub const START: u8 = 128;
    /// Change the baud rate
    pub const BAUD: u8 = 129;
    /// Legacy alias of SAFE
    pub const CONTROL: u8 = 130;
    pub const SAFE: u8 = 131;
    pub const FULL: u8 = 132;
    /// Power down (sleep)
    pub const POWER: u8 = 133;
    pub const SPOT: u8 = 134;
    pub const CLEAN: u8 = 135;
    pub const MAX: u8 = 136;
    pub const DRIVE: u8 = 137;
    /// Low side drivers / cleaning motors on-off
    pub const MOTORS: u8 = 138;
    pub const LEDS: u8 = 139;
    pub const SONG: u8 = 140;
    pub const PLAY: u8 = 141;
    /// Query one sensor packet
    pub const SENSORS: u8 = 142;
    pub const SEEK_DOCK: u8 = 143;
    /// Low side driver duty cycles
    pub const PWM_MOTORS: u8 = 144;
    pub const DRIVE_DIRECT: u8 = 145;
    pub const DIGITAL_OUTPUTS: u8 = 147;
    pub const STREAM: u8 = 148;
    pub const QUERY_LIST: u8 = 149;
    pub const PAUSE_RESUME_STREAM: u8 = 150;
    pub const SCRIPT: u8 = 152;
    pub const PLAY_SCRIPT: u8 = 153;
    pub const SHOW_SCRIPT: u8 = 154;
    pub const SCHEDULE: u8 = 167;
    pub const SET_DAY_TIME: u8 = 168;
}

/// Baud code accepted by the BAUD command
///
/// Serialized as its line rate, so configuration reads `baud = 115200`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "u32", into = "u32")
)]
#[repr(u8)]
pub enum BaudCode {
    Baud300 = 0,
    Baud600 = 1,
    Baud1200 = 2,
    Baud2400 = 3,
    Baud4800 = 4,
    Baud9600 = 5,
    Baud14400 = 6,
    Baud19200 = 7,
    Baud28800 = 8,
    Baud38400 = 9,
    Baud57600 = 10,
    #[default]
    Baud115200 = 11,
}

impl BaudCode {
    /// Parse a baud code from its wire byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        Some(match byte {
            0 => BaudCode::Baud300,
            1 => BaudCode::Baud600,
            2 => BaudCode::Baud1200,
            3 => BaudCode::Baud2400,
            4 => BaudCode::Baud4800,
            5 => BaudCode::Baud9600,
            6 => BaudCode::Baud14400,
            7 => BaudCode::Baud19200,
            8 => BaudCode::Baud28800,
            9 => BaudCode::Baud38400,
            10 => BaudCode::Baud57600,
            11 => BaudCode::Baud115200,
            _ => return None,
        })
    }

    /// Wire byte
    pub fn to_byte(self) -> u8 {
        self as u8
    }

    /// Line rate in bits per second
    pub fn rate(self) -> u32 {
        match self {
            BaudCode::Baud300 => 300,
            BaudCode::Baud600 => 600,
            BaudCode::Baud1200 => 1200,
            BaudCode::Baud2400 => 2400,
            BaudCode::Baud4800 => 4800,
            BaudCode::Baud9600 => 9600,
            BaudCode::Baud14400 => 14400,
            BaudCode::Baud19200 => 19200,
            BaudCode::Baud28800 => 28800,
            BaudCode::Baud38400 => 38400,
            BaudCode::Baud57600 => 57600,
            BaudCode::Baud115200 => 115200,
        }
    }

    /// Find the code for an exact line rate
    pub fn from_rate(rate: u32) -> Option<Self> {
        (0..=11)
            .filter_map(Self::from_byte)
            .find(|code| code.rate() == rate)
    }
}

/// A line rate the robot has no baud code for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidBaudRate(pub u32);

impl core::fmt::Display for InvalidBaudRate {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "unsupported baud rate {}", self.0)
    }
}

impl TryFrom<u32> for BaudCode {
    type Error = InvalidBaudRate;

    fn try_from(rate: u32) -> Result<Self, Self::Error> {
        Self::from_rate(rate).ok_or(InvalidBaudRate(rate))
    }
}

impl From<BaudCode> for u32 {
    fn from(code: BaudCode) -> u32 {
        code.rate()
    }
}
