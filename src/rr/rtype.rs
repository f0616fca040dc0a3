use std::{collections::BTreeSet, sync::LazyLock};

use hickory_proto::rr::RecordType;

/// Mnemonics accepted when no other table is supplied.
const KNOWN_TYPES: &[&str] = &[
    "A",
    "AAAA",
    "AFSDB",
    "ALIAS",
    "APL",
    "CAA",
    "CDNSKEY",
    "CDS",
    "CERT",
    "CNAME",
    "CSYNC",
    "DHCID",
    "DLV",
    "DNAME",
    "DNSKEY",
    "DS",
    "EUI48",
    "EUI64",
    "HINFO",
    "HTTPS",
    "IPSECKEY",
    "KEY",
    "KX",
    "LOC",
    "MX",
    "NAPTR",
    "NID",
    "NS",
    "NSEC",
    "NSEC3",
    "NSEC3PARAM",
    "OPENPGPKEY",
    "PTR",
    "RP",
    "RRSIG",
    "SMIMEA",
    "SOA",
    "SPF",
    "SRV",
    "SSHFP",
    "SVCB",
    "TKEY",
    "TLSA",
    "TSIG",
    "TXT",
    "URI",
    "ZONEMD",
];

/// Types whose records carry a priority value.
const PRIORITY_TYPES: &[&str] = &["MX", "SRV"];

static STANDARD: LazyLock<RecordTypeTable> = LazyLock::new(|| {
    RecordTypeTable::new(KNOWN_TYPES.iter().copied(), PRIORITY_TYPES.iter().copied())
});

/// Allow-list of record type mnemonics.
///
/// Lookups are case-insensitive apart from [`RecordTypeTable::contains_exact`]. A table never changes after construction;
/// build a new one with [`RecordTypeTable::with_types`] to accept more types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordTypeTable {
    known: BTreeSet<String>,
    prioritized: BTreeSet<String>,
}

impl RecordTypeTable {
    /// Build a table from mnemonics. Priority types are also known types.
    pub fn new<I, P, S, T>(known: I, prioritized: P) -> Self
    where
        I: IntoIterator<Item = S>,
        P: IntoIterator<Item = T>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        let prioritized: BTreeSet<String> = prioritized
            .into_iter()
            .map(|t| t.as_ref().to_ascii_uppercase())
            .collect();
        let known = known
            .into_iter()
            .map(|t| t.as_ref().to_ascii_uppercase())
            .chain(prioritized.iter().cloned())
            .collect();
        RecordTypeTable { known, prioritized }
    }

    /// The shared table of commonly deployed types.
    pub fn standard() -> &'static RecordTypeTable {
        &STANDARD
    }

    /// A copy of this table that also accepts `types`.
    pub fn with_types<I, S>(&self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = self.clone();
        table.known.extend(
            types
                .into_iter()
                .map(|t| t.as_ref().trim().to_ascii_uppercase())
                .filter(|t| !t.is_empty()),
        );
        table
    }

    pub fn contains(&self, mnemonic: &str) -> bool {
        self.known.contains(&mnemonic.to_ascii_uppercase())
    }

    /// Case-sensitive lookup: only the canonical upper-case mnemonic matches.
    pub fn contains_exact(&self, mnemonic: &str) -> bool {
        self.known.contains(mnemonic)
    }

    pub fn contains_type(&self, rtype: RecordType) -> bool {
        self.contains(&rtype.to_string())
    }

    /// Whether records of this type carry a priority (`MX`, `SRV`).
    pub fn has_priority(&self, mnemonic: &str) -> bool {
        self.prioritized.contains(&mnemonic.to_ascii_uppercase())
    }

    /// Known mnemonics, upper case and sorted.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.known.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.known.len()
    }

    pub fn is_empty(&self) -> bool {
        self.known.is_empty()
    }
}

impl Default for RecordTypeTable {
    fn default() -> Self {
        RecordTypeTable::standard().clone()
    }
}
