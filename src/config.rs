use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};
use serde::Deserialize;
use tracing::warn;

use crate::rr::RecordTypeTable;
use crate::serial::{Serial, compute_next_serial, compute_updated_soa_content};

/// Settings for serial updates and record validation.
///
/// Every field is optional; the default configuration uses UTC dates and the
/// standard record type table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Configuration {
    /// Offset from UTC, in seconds east, used to decide what "today" is when
    /// dating serials.
    utc_offset: Option<i32>,

    /// Record types accepted in addition to the standard table.
    #[serde(default)]
    record_types: Vec<String>,
}

impl Configuration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_utc_offset(mut self, seconds: i32) -> Self {
        self.utc_offset = Some(seconds);
        self
    }

    pub fn with_record_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.record_types.extend(types.into_iter().map(Into::into));
        self
    }

    /// The configured offset. Offsets of a day or more fall back to UTC.
    pub fn offset(&self) -> FixedOffset {
        let utc = Utc.fix();
        match self.utc_offset {
            None => utc,
            Some(seconds) => FixedOffset::east_opt(seconds).unwrap_or_else(|| {
                warn!(seconds, "ignoring out of range UTC offset");
                utc
            }),
        }
    }

    /// The local date at `now`.
    pub fn date_at(&self, now: DateTime<Utc>) -> NaiveDate {
        now.with_timezone(&self.offset()).date_naive()
    }

    pub fn today(&self) -> NaiveDate {
        self.date_at(Utc::now())
    }

    /// The record type table, extended with any configured types.
    pub fn record_types(&self) -> RecordTypeTable {
        RecordTypeTable::standard().with_types(&self.record_types)
    }

    /// The serial following `current` for an edit made now.
    pub fn next_serial(&self, current: Serial) -> Serial {
        compute_next_serial(current, self.today())
    }

    /// SOA content with its serial advanced for an edit made now.
    pub fn updated_soa_content(&self, content: &str) -> String {
        compute_updated_soa_content(content, self.today())
    }
}
