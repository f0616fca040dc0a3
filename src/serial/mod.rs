//! SOA serial arithmetic
//!
//! Zone serials follow the `YYYYMMDDnn` convention: the date of the change
//! followed by a two digit revision for that day. Secondaries only transfer
//! a zone when its serial increases, so every edit has to produce a serial
//! strictly larger than the last one, even when the stored serial is dated
//! in the future or has already used up all 100 revisions for its day.
//!
//! Serials below [`LEGACY_EPOCH`] predate the date scheme and are treated as
//! plain counters. A serial of `0` asks the server to manage the serial
//! itself and is never rewritten.

use std::cmp::Ordering;

use chrono::NaiveDate;
use tracing::trace;

mod number;
mod soa;

pub use self::number::{MAX_REVISION, ParseSerialError, Serial, SerialNumber};
pub use self::soa::{compute_updated_soa_content, serial_from_soa_content, set_soa_serial};

/// The last serial handed out by plain-counter tooling.
///
/// Serials below this value are incremented by one. The value itself is an
/// overflowed counter and restarts at `1`.
pub const LEGACY_EPOCH: u64 = 1_979_999_999;

/// Compute the serial that should follow `current` when the zone is edited on
/// `today`.
pub fn compute_next_serial(current: Serial, today: NaiveDate) -> Serial {
    if current.is_auto() {
        return Serial::ZERO;
    }

    match current.get().cmp(&LEGACY_EPOCH) {
        Ordering::Less => return current.increment(),
        Ordering::Equal => return Serial::new(1),
        Ordering::Greater => {}
    }

    let Some(date) = current.date() else {
        trace!(%current, "serial is not date based, incrementing");
        return current.increment();
    };

    let revision = current.revision();
    match date.cmp(&today) {
        Ordering::Equal if revision == MAX_REVISION => Serial::from_date(next_day(today), 0),
        Ordering::Equal => Serial::from_date(today, revision + 1),
        Ordering::Less => Serial::from_date(today, 0),
        Ordering::Greater if revision == MAX_REVISION => {
            trace!(%current, "future serial exhausted its revisions");
            Serial::from_date(next_day(date), 0)
        }
        Ordering::Greater => Serial::from_date(date, revision + 1),
    }
}

/// Next serial for a serial still in its textual form.
///
/// Strings that are not plain digits fall back to incrementing their leading
/// numeric part, so this never fails.
pub fn next_serial_from_str(text: &str, today: NaiveDate) -> Serial {
    match text.trim().parse::<Serial>() {
        Ok(serial) => compute_next_serial(serial, today),
        Err(error) => {
            trace!(%error, "falling back to linear increment");
            Serial::parse_lenient(text).increment()
        }
    }
}

fn next_day(date: NaiveDate) -> NaiveDate {
    date.succ_opt().unwrap_or(date)
}
