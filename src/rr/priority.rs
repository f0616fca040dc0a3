use super::RecordTypeTable;

/// A priority as received from a caller: a number, or text that may hold one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority<'a> {
    Number(i64),
    Text(&'a str),
}

impl Priority<'_> {
    /// The integer value. Text may carry surrounding whitespace and a sign.
    pub fn value(&self) -> Option<i64> {
        match *self {
            Priority::Number(value) => Some(value),
            Priority::Text(text) => {
                let text = text.trim();
                let digits = text.strip_prefix(['-', '+']).unwrap_or(text);
                if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                    return None;
                }
                text.parse().ok()
            }
        }
    }
}

macro_rules! priority_from_int {
    ($($int:ty),*) => {
        $(
            impl From<$int> for Priority<'_> {
                fn from(value: $int) -> Self {
                    Priority::Number(i64::from(value))
                }
            }
        )*
    };
}

priority_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl<'a> From<&'a str> for Priority<'a> {
    fn from(value: &'a str) -> Self {
        Priority::Text(value)
    }
}

impl<'a> From<&'a String> for Priority<'a> {
    fn from(value: &'a String) -> Self {
        Priority::Text(value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PriorityError {
    #[error("priority is not an integer")]
    NotNumeric,

    #[error("priority {value} is outside 0..=65535")]
    OutOfRange { value: i64 },

    #[error("{record_type} records do not carry a priority, found {value}")]
    NotPrioritized { record_type: String, value: i64 },
}

/// Check a priority for a record of `record_type`.
///
/// Types that carry a priority accept `0..=65535`. Every other type only
/// accepts the placeholder `0`.
pub fn check_rr_priority<'a>(
    value: impl Into<Priority<'a>>,
    record_type: &str,
    table: &RecordTypeTable,
) -> Result<u16, PriorityError> {
    let value = value.into().value().ok_or(PriorityError::NotNumeric)?;

    if !table.has_priority(record_type) {
        return match value {
            0 => Ok(0),
            value => Err(PriorityError::NotPrioritized {
                record_type: record_type.to_owned(),
                value,
            }),
        };
    }

    u16::try_from(value).map_err(|_| PriorityError::OutOfRange { value })
}

pub fn is_valid_rr_priority<'a>(value: impl Into<Priority<'a>>, record_type: &str) -> bool {
    check_rr_priority(value, record_type, RecordTypeTable::standard()).is_ok()
}
