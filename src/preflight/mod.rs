//! Zone pre-flight checks for DNSSEC signing
//!
//! Signing a zone that has no SOA at its apex, more than one SOA, or no apex
//! NS records produces a broken signed zone. These checks run before the
//! signer and report every problem found, in a fixed order, so operators can
//! fix them in one pass.
//!
//! Records are read through [`ZoneRecordSource`]. Storage failures are
//! returned as [`PreflightError`] and never reported as zone issues.

use std::fmt;

use serde::Serialize;
use tracing::{debug, trace};

use crate::rr::{SoaContent, same_owner};

mod format;
mod source;

pub use self::format::formatted_error_message;
pub use self::source::{NsRow, SoaRow, SourceError, ZoneRecordSource, ZoneSnapshot};

/// How serious an [`Issue`] is.
///
/// Any issue blocks signing. Severity only affects how issues are presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Critical,
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Critical => "CRITICAL",
            Severity::Error => "ERROR",
            Severity::Warning => "WARNING",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    MissingSoa,
    MultipleSoa,
    SoaNotAtApex,
    InvalidSoaContent,
    MissingApexNs,
}

impl IssueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueKind::MissingSoa => "missing_soa",
            IssueKind::MultipleSoa => "multiple_soa",
            IssueKind::SoaNotAtApex => "soa_not_at_apex",
            IssueKind::InvalidSoaContent => "invalid_soa_content",
            IssueKind::MissingApexNs => "missing_apex_ns",
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A problem that prevents a zone from being signed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    #[serde(rename = "type")]
    kind: IssueKind,
    severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    record_name: Option<String>,
    message: String,
    suggestion: String,
}

impl Issue {
    pub fn new(
        kind: IssueKind,
        severity: Severity,
        message: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> Self {
        Issue {
            kind,
            severity,
            record_name: None,
            message: message.into(),
            suggestion: suggestion.into(),
        }
    }

    /// Attach the owner name of the offending record.
    pub fn with_record_name(mut self, name: impl Into<String>) -> Self {
        self.record_name = Some(name.into());
        self
    }

    pub fn kind(&self) -> IssueKind {
        self.kind
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn record_name(&self) -> Option<&str> {
        self.record_name.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn suggestion(&self) -> &str {
        &self.suggestion
    }
}

/// Outcome of the pre-flight checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreflightReport {
    valid: bool,
    issues: Vec<Issue>,
}

impl PreflightReport {
    /// A report is valid exactly when it has no issues.
    pub fn new(issues: Vec<Issue>) -> Self {
        PreflightReport {
            valid: issues.is_empty(),
            issues,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Issues in the order the checks ran.
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn has_issue(&self, kind: IssueKind) -> bool {
        self.issues.iter().any(|issue| issue.kind == kind)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PreflightError {
    #[error("fetching zone records: {0}")]
    Source(#[from] SourceError),
}

/// Check whether the zone `zone_name` can be DNSSEC signed.
///
/// Checks run in this order and every failing check adds one issue:
///
/// 1. There is at least one active SOA record. Without one nothing else is
///    checked.
/// 2. There is at most one active SOA record. The remaining SOA checks use
///    the row with the lowest id.
/// 3. The SOA record is at the apex.
/// 4. The SOA content is well formed.
/// 5. There is at least one NS record at the apex. Delegations below the
///    apex do not count.
///
/// Owner names are compared exactly, ignoring one trailing dot.
#[tracing::instrument(skip_all, fields(zone_id = zone_id, zone = %zone_name), level = "debug")]
pub fn validate_zone_for_dnssec<S>(
    source: &S,
    zone_id: i64,
    zone_name: &str,
) -> Result<PreflightReport, PreflightError>
where
    S: ZoneRecordSource + ?Sized,
{
    let mut issues = Vec::new();

    let soa_rows = source.active_soa_rows(zone_id, zone_name)?;
    trace!(count = soa_rows.len(), "fetched SOA rows");

    let Some(soa) = soa_rows.iter().min_by_key(|row| row.id) else {
        issues.push(Issue::new(
            IssueKind::MissingSoa,
            Severity::Critical,
            "No SOA record present, or active, in zone. This is required for DNSSEC.",
            "Add an SOA record to the zone before attempting to sign it.",
        ));
        debug!("zone has no active SOA record");
        return Ok(PreflightReport::new(issues));
    };

    if soa_rows.len() > 1 {
        issues.push(Issue::new(
            IssueKind::MultipleSoa,
            Severity::Error,
            format!(
                "Zone has {} SOA records. Only one SOA record is allowed per zone.",
                soa_rows.len()
            ),
            "Remove duplicate SOA records, keeping only one.",
        ));
        trace!(id = soa.id, "checking SOA row with the lowest id");
    }

    if !same_owner(&soa.name, zone_name) {
        issues.push(
            Issue::new(
                IssueKind::SoaNotAtApex,
                Severity::Error,
                format!(
                    "SOA record not at apex. Found at \"{}\" but zone is \"{}\".",
                    soa.name, zone_name
                ),
                "Move the SOA record to the zone apex.",
            )
            .with_record_name(&soa.name),
        );
    }

    if let Err(error) = SoaContent::parse(&soa.content) {
        trace!(%error, "SOA content rejected");
        issues.push(
            Issue::new(
                IssueKind::InvalidSoaContent,
                Severity::Error,
                "SOA record has invalid content format.",
                "SOA format should be: primary-ns hostmaster serial refresh retry expire minimum",
            )
            .with_record_name(&soa.name),
        );
    }

    let ns_rows = source.ns_rows(zone_id, zone_name)?;
    let apex_ns = ns_rows
        .iter()
        .filter(|row| same_owner(&row.name, zone_name))
        .count();
    trace!(total = ns_rows.len(), apex = apex_ns, "fetched NS rows");

    if apex_ns == 0 {
        issues.push(Issue::new(
            IssueKind::MissingApexNs,
            Severity::Error,
            "Zone has no NS (Name Server) records at the apex. At least one apex NS record is required for DNSSEC.",
            "Add NS records at the zone apex for your authoritative name servers.",
        ));
    }

    debug!(issues = issues.len(), "pre-flight checks complete");
    Ok(PreflightReport::new(issues))
}
