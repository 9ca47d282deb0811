//! # Frame encoding
//!
//! Each tube has one shift register output per cathode, so a digit is sent one-hot: digit `d`
//! sets bit `d` of that tube's field and nothing else. The six fields are packed into a 44 bit
//! frame, hours tens first.
//!
//! # Frame layout
//!
//! ```txt
//!          H1      H0        M1      M0        S1      S0
//! (MSB)    xx  xxxxxxxxxx  xxxxxx  xxxxxxxxxx  xxxxxx  xxxxxxxxxx  (LSB)
//! bit      43  41      32  31  26  25      16  15  10  9        0
//! ```
//!
//! The hours tens tube only ever shows 0 or 1 and the minute and second tens tubes only 0 to 5,
//! so their fields are narrower. On the wire the frame is six bytes, most significant first;
//! the top four bits of the first byte are always clear.

use crate::time::ClockTime;

/// Number of bytes shifted out per frame
pub const FRAME_BYTES: usize = 6;

/// Cathode select for each digit
const ONE_HOT: [u16; 10] = [
    1 << 0,
    1 << 1,
    1 << 2,
    1 << 3,
    1 << 4,
    1 << 5,
    1 << 6,
    1 << 7,
    1 << 8,
    1 << 9,
];

/// `(shift, width)` of each tube's field, in display order
const FIELDS: [(u32, u32); 6] = [(42, 2), (32, 10), (26, 6), (16, 10), (10, 6), (0, 10)];

const FRAME_MASK: u64 = (1 << 44) - 1;

/// Binary coded decimal representation of the displayed time.
///
/// Only built from a [`ClockTime`] or a decoded [`Frame`], so every digit is within its
/// tube's range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayDigits {
    /// hour tens digit (0-1)
    hour_tens: u8,
    /// hour units digit (0-9)
    hour_units: u8,

    /// minute tens digit (0-5)
    minute_tens: u8,
    /// minute units digit (0-9)
    minute_units: u8,

    /// seconds tens digit (0-5)
    seconds_tens: u8,
    /// seconds units digit (0-9)
    seconds_units: u8,
}

impl DisplayDigits {
    /// Split a time into digits. Hour 0 is displayed as 12.
    pub const fn from_time(time: ClockTime) -> Self {
        let hour = match time.hour() {
            0 => 12,
            hour => hour,
        };
        let minute = time.minute();
        let second = time.second();

        Self {
            hour_tens: hour / 10,
            hour_units: hour % 10,
            minute_tens: minute / 10,
            minute_units: minute % 10,
            seconds_tens: second / 10,
            seconds_units: second % 10,
        }
    }

    /// Digits in display order, hours tens first
    pub const fn to_array(self) -> [u8; 6] {
        [
            self.hour_tens,
            self.hour_units,
            self.minute_tens,
            self.minute_units,
            self.seconds_tens,
            self.seconds_units,
        ]
    }

    const fn from_array(d: [u8; 6]) -> Self {
        Self {
            hour_tens: d[0],
            hour_units: d[1],
            minute_tens: d[2],
            minute_units: d[3],
            seconds_tens: d[4],
            seconds_units: d[5],
        }
    }

    /// Displayed hour, 1 to 12
    pub const fn hour(&self) -> u8 {
        self.hour_tens * 10 + self.hour_units
    }

    pub const fn minute(&self) -> u8 {
        self.minute_tens * 10 + self.minute_units
    }

    pub const fn second(&self) -> u8 {
        self.seconds_tens * 10 + self.seconds_units
    }
}

/// 44 bit shift register image, one-hot per tube
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame(u64);

impl Frame {
    /// Every cathode off
    pub const BLANK: Self = Self(0);

    const fn from_digits(digits: DisplayDigits) -> Self {
        let digits = digits.to_array();
        let mut bits = 0u64;

        let mut i = 0;
        while i < FIELDS.len() {
            let (shift, _) = FIELDS[i];
            bits |= (ONE_HOT[digits[i] as usize] as u64) << shift;
            i += 1;
        }

        Self(bits)
    }

    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Bytes in transmission order, most significant first
    pub const fn to_bytes(self) -> [u8; FRAME_BYTES] {
        let b = self.0.to_be_bytes();
        [b[2], b[3], b[4], b[5], b[6], b[7]]
    }

    /// Recover the digits this frame selects.
    ///
    /// Returns `None` unless every field has exactly one bit set and the hour is 1 to 12.
    pub fn digits(self) -> Option<DisplayDigits> {
        if self.0 & !FRAME_MASK != 0 {
            return None;
        }

        let mut digits = [0u8; 6];
        for (digit, (shift, width)) in digits.iter_mut().zip(FIELDS) {
            let field = (self.0 >> shift) & ((1u64 << width) - 1);
            if field.count_ones() != 1 {
                return None;
            }
            *digit = field.trailing_zeros() as u8;
        }

        let digits = DisplayDigits::from_array(digits);
        if !(1..=12).contains(&digits.hour()) {
            return None;
        }

        Some(digits)
    }
}

impl From<ClockTime> for Frame {
    fn from(time: ClockTime) -> Self {
        encode(time)
    }
}

/// Encode a time into the frame that displays it
pub const fn encode(time: ClockTime) -> Frame {
    Frame::from_digits(DisplayDigits::from_time(time))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::SECONDS_PER_CYCLE;

    #[test]
    fn twelve_oclock() {
        let frame = encode(ClockTime::TWELVE);

        let digits = DisplayDigits::from_time(ClockTime::TWELVE);
        assert_eq!(digits.to_array(), [1, 2, 0, 0, 0, 0]);

        // H1 bit 1, H0 bit 2, every other tube bit 0
        let expected: u64 = 1 << (42 + 1) | 1 << (32 + 2) | 1 << 26 | 1 << 16 | 1 << 10 | 1;
        assert_eq!(frame.bits(), expected);
        assert_eq!(frame.to_bytes(), [0x08, 0x04, 0x04, 0x01, 0x04, 0x01]);
    }

    #[test]
    fn one_oclock() {
        let digits = DisplayDigits::from_time(ClockTime::new(3600));
        assert_eq!(digits.to_array(), [0, 1, 0, 0, 0, 0]);
    }

    #[test]
    fn byte_packing() {
        let frame = encode(ClockTime::from_hms(10, 38, 27));
        assert_eq!(frame.to_bytes(), [0x08, 0x01, 0x21, 0x00, 0x10, 0x80]);
    }

    #[test]
    fn top_nibble_clear() {
        for t in 0..SECONDS_PER_CYCLE {
            assert_eq!(encode(ClockTime::new(t)).to_bytes()[0] & 0xF0, 0);
        }
    }

    #[test]
    fn every_field_is_one_hot() {
        for t in 0..SECONDS_PER_CYCLE {
            let bits = encode(ClockTime::new(t)).bits();

            assert_eq!(bits & !FRAME_MASK, 0);
            for (shift, width) in FIELDS {
                let field = (bits >> shift) & ((1u64 << width) - 1);
                assert_eq!(field.count_ones(), 1, "time {} field at {}", t, shift);
            }
        }
    }

    #[test]
    fn decode_matches_divmod() {
        for t in 0..SECONDS_PER_CYCLE {
            let digits = encode(ClockTime::new(t)).digits().unwrap();

            let hour = match t / 3600 {
                0 => 12,
                h => h as u8,
            };
            assert_eq!(digits.hour(), hour);
            assert_eq!(digits.minute() as u16, (t / 60) % 60);
            assert_eq!(digits.second() as u16, t % 60);
        }
    }

    #[test]
    fn digits_survive_the_frame() {
        for t in 0..SECONDS_PER_CYCLE {
            let digits = DisplayDigits::from_time(ClockTime::new(t));
            let [h1, h0, m1, m0, s1, s0] = digits.to_array();

            assert!(h1 <= 1 && m1 <= 5 && s1 <= 5, "time {}", t);
            assert!(h0 <= 9 && m0 <= 9 && s0 <= 9, "time {}", t);
            assert_eq!(Frame::from_digits(digits).digits(), Some(digits));
        }
    }

    #[test]
    fn decode_rejects_malformed() {
        assert_eq!(Frame::BLANK.digits(), None);

        let good = encode(ClockTime::from_hms(7, 7, 7)).bits();
        // Second cathode lit on the seconds units tube
        assert_eq!(Frame(good | 1 << 3).digits(), None);
        // Stray bit above the frame
        assert_eq!(Frame(good | 1u64 << 44).digits(), None);

        // "00" and "19" are not hours
        let low = good & 0xFFFF_FFFF;
        let zero_hour = 1u64 << 42 | 1 << 32 | low;
        assert_eq!(Frame(zero_hour).digits(), None);
        let nineteen = 1u64 << 43 | 1 << (32 + 9) | low;
        assert_eq!(Frame(nineteen).digits(), None);
    }
}
