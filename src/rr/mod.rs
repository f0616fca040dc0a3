//! Resource Record content validation
//!
//! Every record type gets a typed parser returning a `Result` whose error
//! explains the problem, and an `is_valid_*` predicate for callers that only
//! need a yes or no. None of these touch shared state.

mod csync;
mod ds;
mod loc;
mod priority;
mod rtype;
mod soa;
mod text;

pub use self::csync::{Csync, CsyncError, CsyncFlags, is_valid_csync};
pub use self::ds::{Cds, DigestType, Ds, DsError, is_valid_cds, is_valid_ds};
pub use self::loc::{Coordinate, Hemisphere, Loc, LocError, LocField, is_valid_loc};
pub use self::priority::{Priority, PriorityError, check_rr_priority, is_valid_rr_priority};
pub use self::rtype::RecordTypeTable;
pub use self::soa::{
    SoaContent, SoaContentError, SoaWarning, is_valid_soa_content, is_valid_soa_name,
};
pub use self::text::{ends_with, has_quotes_around, is_properly_quoted};

pub(crate) use self::soa::same_owner;

use crate::error::ValidationError;

/// Validate `content` for a record of `record_type`.
///
/// Types without a dedicated content grammar only need to appear in `table`.
pub fn validate_content(
    record_type: &str,
    content: &str,
    table: &RecordTypeTable,
) -> Result<(), ValidationError> {
    match record_type.to_ascii_uppercase().as_str() {
        "SOA" => SoaContent::parse(content).map(drop)?,
        "LOC" => Loc::parse(content).map(drop)?,
        "DS" => Ds::parse(content).map(drop)?,
        "CDS" => Cds::parse(content).map(drop)?,
        "CSYNC" => Csync::parse(content, table).map(drop)?,
        "TXT" | "SPF" => {
            if !is_properly_quoted(content) {
                return Err(ValidationError::Unescaped);
            }
        }
        other if !table.contains(other) => {
            return Err(ValidationError::UnknownType(record_type.to_owned()));
        }
        _ => {}
    }
    Ok(())
}

/// Parse a field made only of ASCII digits.
///
/// `str::parse` alone would also accept a leading `+`.
pub(crate) fn parse_digits<T: std::str::FromStr>(field: &str) -> Option<T> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}
