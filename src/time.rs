//! # Time counter
//!
//! The clock keeps time as a single number of seconds since 12:00:00, wrapping every twelve
//! hours. Hours are stored as 0 to 11; the display shows hour 0 as 12 (see
//! [`crate::frame`]).

/// Number of seconds in one twelve hour cycle
pub const SECONDS_PER_CYCLE: u16 = 12 * SECONDS_PER_HOUR;

const SECONDS_PER_HOUR: u16 = 60 * SECONDS_PER_MINUTE;
const SECONDS_PER_MINUTE: u16 = 60;

/// Which way a field is being adjusted
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Up,
    Down,
}

/// An editable component of the time
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Field {
    Hours,
    Minutes,
    Seconds,
}

impl Field {
    /// Seconds represented by one step of this field
    const fn unit(self) -> u16 {
        match self {
            Field::Hours => SECONDS_PER_HOUR,
            Field::Minutes => SECONDS_PER_MINUTE,
            Field::Seconds => 1,
        }
    }

    /// Number of values the field cycles through
    const fn modulus(self) -> u8 {
        match self {
            Field::Hours => 12,
            Field::Minutes | Field::Seconds => 60,
        }
    }
}

/// Seconds since 12:00:00, always in `0..SECONDS_PER_CYCLE`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockTime(u16);

impl ClockTime {
    /// 12:00:00, the power-on time
    pub const TWELVE: Self = Self(0);

    /// Create a time from a raw second count.
    ///
    /// A count outside the twelve hour cycle can only come from a programming error, so it is
    /// clamped to [`ClockTime::TWELVE`] rather than reduced, matching what the display would
    /// have done with it.
    pub const fn new(seconds: u16) -> Self {
        if seconds >= SECONDS_PER_CYCLE {
            Self::TWELVE
        } else {
            Self(seconds)
        }
    }

    /// Create a time from its components, each reduced into range.
    ///
    /// Hour 12 and hour 0 are the same hour.
    pub const fn from_hms(hour: u8, minute: u8, second: u8) -> Self {
        let hour = (hour % 12) as u16;
        let minute = (minute % 60) as u16;
        let second = (second % 60) as u16;

        Self(hour * SECONDS_PER_HOUR + minute * SECONDS_PER_MINUTE + second)
    }

    pub const fn as_seconds(self) -> u16 {
        self.0
    }

    /// Hour within the cycle, 0 to 11
    pub const fn hour(self) -> u8 {
        (self.0 / SECONDS_PER_HOUR) as u8
    }

    pub const fn minute(self) -> u8 {
        ((self.0 / SECONDS_PER_MINUTE) % 60) as u8
    }

    pub const fn second(self) -> u8 {
        (self.0 % SECONDS_PER_MINUTE) as u8
    }

    /// The time one second later
    pub const fn next(self) -> Self {
        if self.0 + 1 >= SECONDS_PER_CYCLE {
            Self::TWELVE
        } else {
            Self(self.0 + 1)
        }
    }

    /// Advance by one second
    pub fn tick(&mut self) {
        *self = self.next();
    }

    fn field(self, field: Field) -> u8 {
        match field {
            Field::Hours => self.hour(),
            Field::Minutes => self.minute(),
            Field::Seconds => self.second(),
        }
    }

    /// Step one field up or down, wrapping within that field only.
    ///
    /// The other two fields are left exactly as they were; stepping minutes past 59 does not
    /// carry into the hour.
    pub fn adjust(&mut self, field: Field, direction: Direction) {
        let modulus = field.modulus();
        let current = self.field(field);

        let stepped = match direction {
            Direction::Up if current + 1 >= modulus => 0,
            Direction::Up => current + 1,
            Direction::Down if current == 0 => modulus - 1,
            Direction::Down => current - 1,
        };

        let unit = field.unit();
        self.0 = self.0 - current as u16 * unit + stepped as u16 * unit;
    }

    pub fn adjust_hour(&mut self, direction: Direction) {
        self.adjust(Field::Hours, direction)
    }

    pub fn adjust_minute(&mut self, direction: Direction) {
        self.adjust(Field::Minutes, direction)
    }

    pub fn adjust_second(&mut self, direction: Direction) {
        self.adjust(Field::Seconds, direction)
    }
}
