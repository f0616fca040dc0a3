use chrono::NaiveDate;

use super::{Serial, next_serial_from_str};

/// The serial field (third field) of SOA content, if present.
pub fn serial_from_soa_content(content: &str) -> Option<&str> {
    content.split_whitespace().nth(2)
}

/// Replace the serial field of SOA content.
///
/// Fields are re-joined with single spaces. Content without a serial field
/// is returned re-joined but otherwise unchanged.
pub fn set_soa_serial(content: &str, serial: Serial) -> String {
    let rendered = serial.to_string();
    let mut fields: Vec<&str> = content.split_whitespace().collect();
    if let Some(field) = fields.get_mut(2) {
        *field = rendered.as_str();
    }
    fields.join(" ")
}

/// SOA content with its serial advanced for an edit made on `today`.
///
/// Empty content yields an empty string.
pub fn compute_updated_soa_content(content: &str, today: NaiveDate) -> String {
    match serial_from_soa_content(content) {
        Some(current) => set_soa_serial(content, next_serial_from_str(current, today)),
        None => content.split_whitespace().collect::<Vec<_>>().join(" "),
    }
}
