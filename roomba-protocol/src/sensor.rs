//! Sensor packet IDs, their fixed lengths, and value decoding
//!
//! The length of a sensor packet is never sent on the wire for single-ID
//! queries; both sides know it from the packet ID.

/// Sensor packet ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum SensorPacket {
    /// Group: packets 7 to 26
    Group7To26 = 0,
    /// Group: packets 7 to 16
    Group7To16 = 1,
    /// Group: packets 17 to 20
    Group17To20 = 2,
    /// Group: packets 21 to 26 (charging and battery)
    Group21To26 = 3,
    /// Group: packets 27 to 34
    Group27To34 = 4,
    /// Group: packets 35 to 42
    Group35To42 = 5,
    /// Group: packets 7 to 42
    Group7To42 = 6,
    BumpsAndWheelDrops = 7,
    Wall = 8,
    CliffLeft = 9,
    CliffFrontLeft = 10,
    CliffFrontRight = 11,
    CliffRight = 12,
    VirtualWall = 13,
    Overcurrents = 14,
    DirtDetect = 15,
    Unused16 = 16,
    IrOmni = 17,
    Buttons = 18,
    Distance = 19,
    Angle = 20,
    ChargingState = 21,
    Voltage = 22,
    Current = 23,
    BatteryTemperature = 24,
    BatteryCharge = 25,
    BatteryCapacity = 26,
    WallSignal = 27,
    CliffLeftSignal = 28,
    CliffFrontLeftSignal = 29,
    CliffFrontRightSignal = 30,
    CliffRightSignal = 31,
    UserDigitalInputs = 32,
    UserAnalogInput = 33,
    ChargingSourcesAvailable = 34,
    OpenInterfaceMode = 35,
    SongNumber = 36,
    SongPlaying = 37,
    NumberOfStreamPackets = 38,
    Velocity = 39,
    Radius = 40,
    RightVelocity = 41,
    LeftVelocity = 42,
    LeftEncoderCounts = 43,
    RightEncoderCounts = 44,
    LightBumper = 45,
    LightBumpLeftSignal = 46,
    LightBumpFrontLeftSignal = 47,
    LightBumpCenterLeftSignal = 48,
    LightBumpCenterRightSignal = 49,
    LightBumpFrontRightSignal = 50,
    LightBumpRightSignal = 51,
    IrLeft = 52,
    IrRight = 53,
    LeftMotorCurrent = 54,
    RightMotorCurrent = 55,
    MainBrushMotorCurrent = 56,
    SideBrushMotorCurrent = 57,
    Stasis = 58,
    /// Group: packets 7 to 58
    Group7To58 = 100,
    /// Group: packets 43 to 58
    Group43To58 = 101,
    /// Group: packets 46 to 51 (light bumper signals)
    Group46To51 = 106,
    /// Group: packets 54 to 58 (motor currents and stasis)
    Group54To58 = 107,
}

/// Stream set used while docked
pub const DOCK_SENSORS: [SensorPacket; 1] = [SensorPacket::Group21To26];

/// Stream set used while cleaning
pub const CLEAN_SENSORS: [SensorPacket; 1] = [SensorPacket::Group7To26];

/// Stream set used while driving
pub const DRIVE_SENSORS: [SensorPacket; 1] = [SensorPacket::Group43To58];

impl SensorPacket {
    /// Parse a packet ID from its wire byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        use SensorPacket::*;
        const SINGLE: [SensorPacket; 59] = [
            Group7To26,
            Group7To16,
            Group17To20,
            Group21To26,
            Group27To34,
            Group35To42,
            Group7To42,
            BumpsAndWheelDrops,
            Wall,
            CliffLeft,
            CliffFrontLeft,
            CliffFrontRight,
            CliffRight,
            VirtualWall,
            Overcurrents,
            DirtDetect,
            Unused16,
            IrOmni,
            Buttons,
            Distance,
            Angle,
            ChargingState,
            Voltage,
            Current,
            BatteryTemperature,
            BatteryCharge,
            BatteryCapacity,
            WallSignal,
            CliffLeftSignal,
            CliffFrontLeftSignal,
            CliffFrontRightSignal,
            CliffRightSignal,
            UserDigitalInputs,
            UserAnalogInput,
            ChargingSourcesAvailable,
            OpenInterfaceMode,
            SongNumber,
            SongPlaying,
            NumberOfStreamPackets,
            Velocity,
            Radius,
            RightVelocity,
            LeftVelocity,
            LeftEncoderCounts,
            RightEncoderCounts,
            LightBumper,
            LightBumpLeftSignal,
            LightBumpFrontLeftSignal,
            LightBumpCenterLeftSignal,
            LightBumpCenterRightSignal,
            LightBumpFrontRightSignal,
            LightBumpRightSignal,
            IrLeft,
            IrRight,
            LeftMotorCurrent,
            RightMotorCurrent,
            MainBrushMotorCurrent,
            SideBrushMotorCurrent,
            Stasis,
        ];

        match byte {
            0..=58 => Some(SINGLE[byte as usize]),
            100 => Some(Group7To58),
            101 => Some(Group43To58),
            106 => Some(Group46To51),
            107 => Some(Group54To58),
            _ => None,
        }
    }

    /// Wire byte
    pub fn to_byte(self) -> u8 {
        self as u8
    }

    /// Number of data bytes the robot sends for this packet
    pub fn len(self) -> usize {
        use SensorPacket::*;
        match self {
            Group7To26 => 26,
            Group7To16 => 10,
            Group17To20 => 6,
            Group21To26 => 10,
            Group27To34 => 14,
            Group35To42 => 12,
            Group7To42 => 52,
            Group7To58 => 80,
            Group43To58 => 28,
            Group46To51 => 12,
            Group54To58 => 9,
            Distance | Angle | Voltage | Current | BatteryCharge | BatteryCapacity
            | WallSignal | CliffLeftSignal | CliffFrontLeftSignal | CliffFrontRightSignal
            | CliffRightSignal | UserAnalogInput | Velocity | Radius | RightVelocity
            | LeftVelocity | LeftEncoderCounts | RightEncoderCounts | LightBumpLeftSignal
            | LightBumpFrontLeftSignal | LightBumpCenterLeftSignal
            | LightBumpCenterRightSignal | LightBumpFrontRightSignal | LightBumpRightSignal
            | LeftMotorCurrent | RightMotorCurrent | MainBrushMotorCurrent
            | SideBrushMotorCurrent => 2,
            _ => 1,
        }
    }

    /// Check if this ID selects a group of packets
    pub fn is_group(self) -> bool {
        matches!(self.to_byte(), 0..=6 | 100..=107)
    }

    /// Check if the value of this single packet is a signed integer
    pub fn is_signed(self) -> bool {
        use SensorPacket::*;
        matches!(
            self,
            Distance
                | Angle
                | Current
                | BatteryTemperature
                | Velocity
                | Radius
                | RightVelocity
                | LeftVelocity
                | LeftMotorCurrent
                | RightMotorCurrent
                | MainBrushMotorCurrent
                | SideBrushMotorCurrent
        )
    }
}

/// Decode a big-endian unsigned 16-bit sensor field
pub fn be_u16(data: &[u8]) -> Option<u16> {
    match data {
        [hi, lo, ..] => Some(u16::from_be_bytes([*hi, *lo])),
        _ => None,
    }
}

/// Decode a big-endian signed 16-bit sensor field
pub fn be_i16(data: &[u8]) -> Option<i16> {
    match data {
        [hi, lo, ..] => Some(i16::from_be_bytes([*hi, *lo])),
        _ => None,
    }
}

/// Bit masks for packet values and command arguments
pub mod mask {
    // LEDS command
    pub const LED_NONE: u8 = 0x00;
    pub const LED_PLAY: u8 = 0x02;
    pub const LED_ADVANCE: u8 = 0x08;

    // DIGITAL_OUTPUTS command
    pub const DIGITAL_OUT_0: u8 = 0x01;
    pub const DIGITAL_OUT_1: u8 = 0x02;
    pub const DIGITAL_OUT_2: u8 = 0x04;

    // MOTORS command
    pub const DRIVER_0: u8 = 0x01;
    pub const DRIVER_1: u8 = 0x02;
    pub const DRIVER_2: u8 = 0x04;
    pub const SIDE_BRUSH: u8 = 0x01;
    pub const VACUUM: u8 = 0x02;
    pub const MAIN_BRUSH: u8 = 0x04;

    // Packet 7
    pub const BUMP_RIGHT: u8 = 0x01;
    pub const BUMP_LEFT: u8 = 0x02;
    pub const WHEELDROP_RIGHT: u8 = 0x04;
    pub const WHEELDROP_LEFT: u8 = 0x08;
    pub const WHEELDROP_CASTER: u8 = 0x10;

    // Packet 14
    pub const LD1: u8 = 0x01;
    pub const LD0: u8 = 0x02;
    pub const LD2: u8 = 0x04;
    pub const RIGHT_WHEEL: u8 = 0x08;
    pub const LEFT_WHEEL: u8 = 0x10;

    // Packet 18, Create buttons
    pub const BUTTON_PLAY: u8 = 0x01;
    pub const BUTTON_ADVANCE: u8 = 0x04;
    // Packet 18, Roomba buttons
    pub const BUTTON_MAX: u8 = 0x01;
    pub const BUTTON_CLEAN: u8 = 0x02;
    pub const BUTTON_SPOT: u8 = 0x04;
    pub const BUTTON_POWER: u8 = 0x08;

    // Packet 32
    pub const DIGITAL_IN_0: u8 = 0x01;
    pub const DIGITAL_IN_1: u8 = 0x02;
    pub const DIGITAL_IN_2: u8 = 0x04;
    pub const DIGITAL_IN_3: u8 = 0x08;
    pub const DIGITAL_IN_DEVICE_DETECT: u8 = 0x10;

    // Packet 34
    pub const INTERNAL_CHARGER: u8 = 0x01;
    pub const HOME_BASE: u8 = 0x02;
}

/// Charging state (packet 21)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChargeState {
    NotCharging,
    ReconditioningCharging,
    FullCharging,
    TrickleCharging,
    Waiting,
    Fault,
}

impl ChargeState {
    /// Parse from the packet byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(ChargeState::NotCharging),
            1 => Some(ChargeState::ReconditioningCharging),
            2 => Some(ChargeState::FullCharging),
            3 => Some(ChargeState::TrickleCharging),
            4 => Some(ChargeState::Waiting),
            5 => Some(ChargeState::Fault),
            _ => None,
        }
    }

    /// Convert to the packet byte
    pub fn to_byte(self) -> u8 {
        match self {
            ChargeState::NotCharging => 0,
            ChargeState::ReconditioningCharging => 1,
            ChargeState::FullCharging => 2,
            ChargeState::TrickleCharging => 3,
            ChargeState::Waiting => 4,
            ChargeState::Fault => 5,
        }
    }

    /// Returns true while current is flowing into the battery
    pub fn is_charging(&self) -> bool {
        matches!(
            self,
            ChargeState::ReconditioningCharging
                | ChargeState::FullCharging
                | ChargeState::TrickleCharging
        )
    }
}

/// Open Interface mode (packet 35)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OiMode {
    Off,
    Passive,
    Safe,
    Full,
}

impl OiMode {
    /// Parse from the packet byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(OiMode::Off),
            1 => Some(OiMode::Passive),
            2 => Some(OiMode::Safe),
            3 => Some(OiMode::Full),
            _ => None,
        }
    }

    /// Convert to the packet byte
    pub fn to_byte(self) -> u8 {
        match self {
            OiMode::Off => 0,
            OiMode::Passive => 1,
            OiMode::Safe => 2,
            OiMode::Full => 3,
        }
    }

    /// Returns true if the host may drive the actuators
    pub fn accepts_actuator_commands(&self) -> bool {
        matches!(self, OiMode::Safe | OiMode::Full)
    }
}

/// Infrared character (packets 17, 52, 53)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IrCommand {
    // Remote control
    Left,
    Forward,
    Right,
    Spot,
    Max,
    Small,
    Medium,
    LargeClean,
    Pause,
    Power,
    ArcForwardLeft,
    ArcForwardRight,
    DriveStop,
    // Scheduling remote
    SendAll,
    SeekDock,
    /// Home base beacon; `red`/`green` buoys and `force_field`
    HomeBase {
        red: bool,
        green: bool,
        force_field: bool,
    },
    /// Roomba 600 home base beacon
    HomeBase600 {
        red: bool,
        green: bool,
        force_field: bool,
    },
    /// Roomba 600 virtual wall
    VirtualWall600,
}

impl IrCommand {
    /// Parse from the packet byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        let beacon = |base: u8, red: u8, green: u8, field: u8| {
            let bits = byte - base;
            (bits & !(red | green | field) == 0).then_some((
                bits & red != 0,
                bits & green != 0,
                bits & field != 0,
            ))
        };

        Some(match byte {
            129 => IrCommand::Left,
            130 => IrCommand::Forward,
            131 => IrCommand::Right,
            132 => IrCommand::Spot,
            133 => IrCommand::Max,
            134 => IrCommand::Small,
            135 => IrCommand::Medium,
            136 => IrCommand::LargeClean,
            137 => IrCommand::Pause,
            138 => IrCommand::Power,
            139 => IrCommand::ArcForwardLeft,
            140 => IrCommand::ArcForwardRight,
            141 => IrCommand::DriveStop,
            142 => IrCommand::SendAll,
            143 => IrCommand::SeekDock,
            162 => IrCommand::VirtualWall600,
            160..=175 => {
                let (red, green, force_field) = beacon(160, 0x08, 0x04, 0x01)?;
                IrCommand::HomeBase600 {
                    red,
                    green,
                    force_field,
                }
            }
            240..=255 => {
                let (red, green, force_field) = beacon(240, 0x08, 0x04, 0x02)?;
                IrCommand::HomeBase {
                    red,
                    green,
                    force_field,
                }
            }
            _ => return None,
        })
    }

    /// Convert to the packet byte
    pub fn to_byte(self) -> u8 {
        let beacon = |base: u8, red: bool, green: bool, field: bool, field_bit: u8| {
            let mut byte = base;
            if red {
                byte |= 0x08;
            }
            if green {
                byte |= 0x04;
            }
            if field {
                byte |= field_bit;
            }
            byte
        };

        match self {
            IrCommand::Left => 129,
            IrCommand::Forward => 130,
            IrCommand::Right => 131,
            IrCommand::Spot => 132,
            IrCommand::Max => 133,
            IrCommand::Small => 134,
            IrCommand::Medium => 135,
            IrCommand::LargeClean => 136,
            IrCommand::Pause => 137,
            IrCommand::Power => 138,
            IrCommand::ArcForwardLeft => 139,
            IrCommand::ArcForwardRight => 140,
            IrCommand::DriveStop => 141,
            IrCommand::SendAll => 142,
            IrCommand::SeekDock => 143,
            IrCommand::VirtualWall600 => 162,
            IrCommand::HomeBase600 {
                red,
                green,
                force_field,
            } => beacon(160, red, green, force_field, 0x01),
            IrCommand::HomeBase {
                red,
                green,
                force_field,
            } => beacon(240, red, green, force_field, 0x02),
        }
    }
}
