use std::{cmp::Ordering, fmt, ops::Add, str::FromStr};

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// Largest per-day revision in a `YYYYMMDDnn` serial.
pub const MAX_REVISION: u8 = 99;

/// SOA serial as written in zone content.
///
/// Held as a `u64` so that arithmetic on `YYYYMMDDnn` values never overflows;
/// use [`Serial::to_serial_number`] to get the 32-bit wire value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct Serial(u64);

impl Serial {
    /// The auto-serial. Zones using it are never renumbered.
    pub const ZERO: Serial = Serial(0);

    pub const fn new(value: u64) -> Self {
        Serial(value)
    }

    pub fn get(&self) -> u64 {
        self.0
    }

    pub fn is_auto(&self) -> bool {
        self.0 == 0
    }

    /// Build a `YYYYMMDDnn` serial. Revisions above 99 are clamped.
    pub fn from_date(date: NaiveDate, revision: u8) -> Self {
        Serial(date_number(date) * 100 + u64::from(revision.min(MAX_REVISION)))
    }

    /// The calendar date encoded in the first eight digits, if this is a
    /// ten-digit serial whose date actually exists.
    pub fn date(&self) -> Option<NaiveDate> {
        if !(1_000_000_000..=9_999_999_999).contains(&self.0) {
            return None;
        }

        let date = self.0 / 100;
        let year = i32::try_from(date / 10_000).ok()?;
        let month = u32::try_from(date / 100 % 100).ok()?;
        let day = u32::try_from(date % 100).ok()?;
        NaiveDate::from_ymd_opt(year, month, day)
    }

    /// The trailing two digits.
    pub fn revision(&self) -> u8 {
        (self.0 % 100) as u8
    }

    /// Plain counter increment, saturating at `u64::MAX`.
    pub fn increment(&self) -> Self {
        Serial(self.0.saturating_add(1))
    }

    /// Best-effort numeric coercion: the leading run of ASCII digits after
    /// trimming, or zero when there is none.
    pub fn parse_lenient(text: &str) -> Self {
        let value = text
            .trim()
            .bytes()
            .take_while(u8::is_ascii_digit)
            .fold(0u64, |acc, digit| {
                acc.saturating_mul(10)
                    .saturating_add(u64::from(digit - b'0'))
            });
        Serial(value)
    }

    /// The 32-bit value carried on the wire, if it fits.
    pub fn to_serial_number(&self) -> Option<SerialNumber> {
        u32::try_from(self.0).ok().map(SerialNumber::from)
    }
}

fn date_number(date: NaiveDate) -> u64 {
    let year = u64::try_from(date.year()).unwrap_or_default();
    year * 10_000 + u64::from(date.month()) * 100 + u64::from(date.day())
}

impl fmt::Display for Serial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Serial {
    fn from(value: u64) -> Self {
        Serial(value)
    }
}

impl From<u32> for Serial {
    fn from(value: u32) -> Self {
        Serial(u64::from(value))
    }
}

impl From<Serial> for u64 {
    fn from(value: Serial) -> Self {
        value.0
    }
}

/// Error returned when a serial is not a plain string of ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("serial {0:?} is not an unsigned decimal number")]
pub struct ParseSerialError(String);

impl FromStr for Serial {
    type Err = ParseSerialError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseSerialError(s.to_owned()));
        }

        s.parse::<u64>()
            .map(Serial)
            .map_err(|_| ParseSerialError(s.to_owned()))
    }
}

/// 32-bit serial number with RFC 1982 arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SerialNumber(u32);

impl SerialNumber {
    pub const ZERO: SerialNumber = SerialNumber(0);

    pub fn get(&self) -> u32 {
        self.0
    }

    /// Whether secondaries holding `self` will transfer a zone at `other`.
    pub fn is_superseded_by(&self, other: SerialNumber) -> bool {
        self.partial_cmp(&other) == Some(Ordering::Less)
    }
}

impl From<u32> for SerialNumber {
    fn from(value: u32) -> Self {
        SerialNumber(value)
    }
}

impl From<SerialNumber> for u32 {
    fn from(value: SerialNumber) -> Self {
        value.0
    }
}

/// Serial Number Addition, see RFC 1982, section 3.1
///
/// The result is a wrapping add.
impl Add for SerialNumber {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.wrapping_add(rhs.0))
    }
}

/// Serial Number Comparison, see RFC 1982, section 3.2
///
/// Two serials exactly half the number space apart are incomparable.
impl PartialOrd for SerialNumber {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        const SERIAL_BITS_HALF: u32 = 1 << (u32::BITS - 1);

        let i1 = self.0;
        let i2 = other.0;

        if i1 == i2 {
            Some(Ordering::Equal)
        } else if (i1 < i2 && (i2 - i1) < SERIAL_BITS_HALF)
            || (i1 > i2 && (i1 - i2) > SERIAL_BITS_HALF)
        {
            Some(Ordering::Less)
        } else if (i1 < i2 && (i2 - i1) > SERIAL_BITS_HALF)
            || (i1 > i2 && (i1 - i2) < SERIAL_BITS_HALF)
        {
            Some(Ordering::Greater)
        } else {
            None
        }
    }
}
