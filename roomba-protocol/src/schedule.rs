//! Clock and cleaning schedule layouts
//!
//! Both are write-only projections: the driver encodes and sends them and
//! keeps no copy.

/// Day of the week, as numbered by the robot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Day {
    #[default]
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Day {
    /// All days in wire order
    pub const ALL: [Day; 7] = [
        Day::Sunday,
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
    ];

    /// Parse from the wire byte (0 = Sunday)
    pub fn from_byte(byte: u8) -> Option<Self> {
        Self::ALL.get(byte as usize).copied()
    }

    /// Wire byte (0 = Sunday)
    pub fn to_byte(self) -> u8 {
        self as u8
    }

    /// Bit for this day in the schedule day mask
    pub fn mask(self) -> u8 {
        1 << self.to_byte()
    }
}

/// Day and 24-hour time of day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DayTime {
    pub day: Day,
    /// 0-23
    pub hour: u8,
    /// 0-59
    pub minute: u8,
}

impl DayTime {
    pub fn new(day: Day, hour: u8, minute: u8) -> Self {
        Self { day, hour, minute }
    }

    /// Payload of the SET_DAY_TIME command
    pub fn to_bytes(&self) -> [u8; 3] {
        [self.day.to_byte(), self.hour, self.minute]
    }
}

/// Schedule entry for one day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScheduleDay {
    pub enable: bool,
    /// 0-23
    pub hour: u8,
    /// 0-59
    pub minute: u8,
}

impl ScheduleDay {
    /// An enabled entry at the given time
    pub fn at(hour: u8, minute: u8) -> Self {
        Self {
            enable: true,
            hour,
            minute,
        }
    }
}

/// Weekly cleaning schedule, indexed Sunday first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Schedule {
    pub days: [ScheduleDay; 7],
}

/// Size of the SCHEDULE command payload: day mask + 7 × (hour, minute)
pub const SCHEDULE_PAYLOAD_SIZE: usize = 15;

impl Schedule {
    /// Entry for a given day
    pub fn day(&self, day: Day) -> &ScheduleDay {
        &self.days[day.to_byte() as usize]
    }

    /// Mutable entry for a given day
    pub fn day_mut(&mut self, day: Day) -> &mut ScheduleDay {
        &mut self.days[day.to_byte() as usize]
    }

    /// Bit mask of enabled days, bit 0 = Sunday
    pub fn day_mask(&self) -> u8 {
        Day::ALL
            .iter()
            .filter(|day| self.day(**day).enable)
            .fold(0, |mask, day| mask | day.mask())
    }

    /// Payload of the SCHEDULE command
    ///
    /// Times are sent for every day, enabled or not.
    pub fn to_bytes(&self) -> [u8; SCHEDULE_PAYLOAD_SIZE] {
        let mut payload = [0u8; SCHEDULE_PAYLOAD_SIZE];
        payload[0] = self.day_mask();
        for (i, entry) in self.days.iter().enumerate() {
            payload[1 + 2 * i] = entry.hour;
            payload[2 + 2 * i] = entry.minute;
        }
        payload
    }
}
