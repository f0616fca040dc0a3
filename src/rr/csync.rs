use std::fmt;

use super::{RecordTypeTable, parse_digits};
use crate::serial::SerialNumber;

/// CSYNC flags field (RFC 7477, section 2.1.1.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CsyncFlags(u8);

impl CsyncFlags {
    pub const IMMEDIATE: u8 = 0b01;
    pub const SOA_MINIMUM: u8 = 0b10;

    const ALL: u8 = Self::IMMEDIATE | Self::SOA_MINIMUM;

    /// Flags from their numeric value. Undefined bits are rejected.
    pub fn new(bits: u8) -> Option<Self> {
        (bits & !Self::ALL == 0).then_some(CsyncFlags(bits))
    }

    pub fn bits(&self) -> u8 {
        self.0
    }

    pub fn immediate(&self) -> bool {
        self.0 & Self::IMMEDIATE != 0
    }

    pub fn soa_minimum(&self) -> bool {
        self.0 & Self::SOA_MINIMUM != 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CsyncError {
    #[error("missing SOA serial")]
    MissingSerial,

    #[error("SOA serial {0:?} is not a 32-bit unsigned integer")]
    Serial(String),

    #[error("missing flags")]
    MissingFlags,

    #[error("flags {0:?} must be between 0 and 3")]
    Flags(String),

    #[error("at least one record type is required")]
    MissingTypes,

    #[error("unknown record type {0:?}")]
    UnknownType(String),

    #[error("record type {0} is prohibited in CSYNC")]
    ProhibitedType(String),
}

/// Types a child may not ask its parent to synchronize (RFC 7477, section 3.2).
const PROHIBITED_TYPES: &[&str] = &["DS", "CDNSKEY", "CSYNC"];

/// Parsed CSYNC content: `soa-serial flags type...`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Csync {
    soa_serial: SerialNumber,
    flags: CsyncFlags,
    types: Vec<String>,
}

impl Csync {
    /// Parse CSYNC content, accepting the record types known to `table`.
    ///
    /// Mnemonics must be written in their canonical upper-case form.
    pub fn parse(text: &str, table: &RecordTypeTable) -> Result<Self, CsyncError> {
        let mut fields = text.split_whitespace();

        let serial = fields.next().ok_or(CsyncError::MissingSerial)?;
        let soa_serial = parse_digits::<u32>(serial)
            .map(SerialNumber::from)
            .ok_or_else(|| CsyncError::Serial(serial.into()))?;

        let flags = fields.next().ok_or(CsyncError::MissingFlags)?;
        let flags = parse_digits::<u8>(flags)
            .and_then(CsyncFlags::new)
            .ok_or_else(|| CsyncError::Flags(flags.into()))?;

        let types = fields
            .map(|mnemonic| {
                if !table.contains_exact(mnemonic) {
                    Err(CsyncError::UnknownType(mnemonic.into()))
                } else if PROHIBITED_TYPES.contains(&mnemonic) {
                    Err(CsyncError::ProhibitedType(mnemonic.into()))
                } else {
                    Ok(mnemonic.to_owned())
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        if types.is_empty() {
            return Err(CsyncError::MissingTypes);
        }

        Ok(Csync {
            soa_serial,
            flags,
            types,
        })
    }

    pub fn soa_serial(&self) -> SerialNumber {
        self.soa_serial
    }

    pub fn flags(&self) -> CsyncFlags {
        self.flags
    }

    /// Mnemonics, in the order given.
    pub fn types(&self) -> &[String] {
        &self.types
    }
}

impl fmt::Display for Csync {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.soa_serial.get(), self.flags.bits())?;
        for rtype in &self.types {
            write!(f, " {rtype}")?;
        }
        Ok(())
    }
}

/// CSYNC validity against the standard record type table.
pub fn is_valid_csync(text: &str) -> bool {
    Csync::parse(text, RecordTypeTable::standard()).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_csync() {
        assert!(is_valid_csync("1234567890 1 A NS AAAA"));
        assert!(is_valid_csync("1234 3 A NS AAAA"));
        assert!(is_valid_csync("4294967295 0 NS SOA"));
    }

    #[test]
    fn test_invalid_csync() {
        for content in [
            "-1 1 A NS AAAA",
            "4294967296 3 A NS",
            "1234 4 A NS",
            "1234567890 1",
            "1234567890 1 A NS INVALID",
            "1234567890",
            "",
            "66 3 a",
            "66 3 A ns",
        ] {
            assert!(!is_valid_csync(content), "{content}");
        }
    }

    #[test]
    fn test_csync_errors() {
        let table = RecordTypeTable::standard();
        assert_eq!(
            Csync::parse("1 4 A", table),
            Err(CsyncError::Flags("4".into()))
        );
        assert_eq!(Csync::parse("1 1", table), Err(CsyncError::MissingTypes));
        assert_eq!(
            Csync::parse("1 1 A BOGUS", table),
            Err(CsyncError::UnknownType("BOGUS".into()))
        );
    }

    #[test]
    fn test_csync_lower_case_mnemonic() {
        assert_eq!(
            Csync::parse("66 3 A ns", RecordTypeTable::standard()),
            Err(CsyncError::UnknownType("ns".into()))
        );
    }

    #[test]
    fn test_csync_prohibited_types() {
        let table = RecordTypeTable::standard();
        for (content, rtype) in [
            ("1234567890 1 A NS DS", "DS"),
            ("1234567890 1 A CDNSKEY", "CDNSKEY"),
            ("1234567890 1 A CSYNC", "CSYNC"),
        ] {
            assert_eq!(
                Csync::parse(content, table),
                Err(CsyncError::ProhibitedType(rtype.into()))
            );
            assert!(!is_valid_csync(content), "{content}");
        }
    }

    #[test]
    fn test_csync_with_extended_table() {
        let table = RecordTypeTable::standard().with_types(["type65534"]);
        assert!(Csync::parse("1 0 A TYPE65534", &table).is_ok());
        assert!(Csync::parse("1 0 A type65534", &table).is_err());
        assert!(!is_valid_csync("1 0 A TYPE65534"));
    }

    #[test]
    fn test_csync_fields() {
        let csync = Csync::parse("66 3 A NS AAAA", RecordTypeTable::standard()).unwrap();
        assert_eq!(csync.soa_serial().get(), 66);
        assert!(csync.flags().immediate());
        assert!(csync.flags().soa_minimum());
        assert_eq!(csync.types(), ["A", "NS", "AAAA"]);
        assert_eq!(csync.to_string(), "66 3 A NS AAAA");
    }
}
