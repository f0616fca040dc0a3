//! Zone serial management and record validation for DNS zones.
//!
//! - [`serial`] advances `YYYYMMDDnn` SOA serials.
//! - [`rr`] validates record content such as SOA, LOC, DS and CSYNC.
//! - [`preflight`] checks that a zone can be DNSSEC signed.

pub mod config;
pub mod error;
pub mod preflight;
pub mod rr;
pub mod serial;

pub use self::config::Configuration;
pub use self::error::ValidationError;
pub use self::preflight::{
    Issue, IssueKind, PreflightError, PreflightReport, Severity, ZoneRecordSource,
    formatted_error_message, validate_zone_for_dnssec,
};
pub use self::rr::{RecordTypeTable, validate_content};
pub use self::serial::{Serial, compute_next_serial, compute_updated_soa_content};
