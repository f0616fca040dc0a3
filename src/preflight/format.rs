use std::fmt;

use super::{Issue, PreflightReport};

const HEADER: &str = "DNSSEC signing cannot proceed due to the following errors:";

/// Operator-facing summary of a report. Empty when the zone can be signed.
///
/// The first line is a fixed header, followed by one line per issue in
/// report order.
pub fn formatted_error_message(report: &PreflightReport) -> String {
    report.to_string()
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.severity, self.message)?;
        if !self.suggestion.is_empty() {
            write!(f, " Suggestion: {}", self.suggestion)?;
        }
        Ok(())
    }
}

impl fmt::Display for PreflightReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.issues.is_empty() {
            return Ok(());
        }

        f.write_str(HEADER)?;
        for issue in &self.issues {
            write!(f, "\n{issue}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preflight::{IssueKind, Severity};

    #[test]
    fn test_valid_report_formats_empty() {
        assert_eq!(formatted_error_message(&PreflightReport::new(Vec::new())), "");
    }

    #[test]
    fn test_formatted_error_message() {
        let report = PreflightReport::new(vec![
            Issue::new(
                IssueKind::MissingSoa,
                Severity::Critical,
                "No SOA record present",
                "Add an SOA record",
            ),
            Issue::new(
                IssueKind::SoaNotAtApex,
                Severity::Error,
                "SOA record not at apex",
                "",
            ),
        ]);

        assert_eq!(
            formatted_error_message(&report),
            "DNSSEC signing cannot proceed due to the following errors:\n\
             [CRITICAL] No SOA record present Suggestion: Add an SOA record\n\
             [ERROR] SOA record not at apex"
        );
    }
}
