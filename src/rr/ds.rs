use std::{fmt, str::FromStr};

use super::parse_digits;

/// Hex lengths of the digests in the IANA registry (SHA-1, SHA-256/GOST, SHA-384).
const DIGEST_LENGTHS: [usize; 3] = [40, 64, 96];

/// DS digest algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DigestType {
    Sha1,
    Sha256,
    Gost,
    Sha384,
    Other(u8),
}

impl DigestType {
    /// Expected digest length in hex characters, when the type is known.
    pub fn hex_len(&self) -> Option<usize> {
        match self {
            DigestType::Sha1 => Some(40),
            DigestType::Sha256 | DigestType::Gost => Some(64),
            DigestType::Sha384 => Some(96),
            DigestType::Other(_) => None,
        }
    }

    fn accepts(&self, len: usize) -> bool {
        match self.hex_len() {
            Some(expected) => expected == len,
            None => DIGEST_LENGTHS.contains(&len),
        }
    }
}

impl From<u8> for DigestType {
    fn from(value: u8) -> Self {
        match value {
            1 => DigestType::Sha1,
            2 => DigestType::Sha256,
            3 => DigestType::Gost,
            4 => DigestType::Sha384,
            other => DigestType::Other(other),
        }
    }
}

impl From<DigestType> for u8 {
    fn from(value: DigestType) -> Self {
        match value {
            DigestType::Sha1 => 1,
            DigestType::Sha256 => 2,
            DigestType::Gost => 3,
            DigestType::Sha384 => 4,
            DigestType::Other(other) => other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DsError {
    #[error("expected 4 fields, found {0}")]
    FieldCount(usize),

    #[error("key tag {0:?} is not a 16-bit unsigned integer")]
    KeyTag(String),

    #[error("algorithm {0:?} is not an 8-bit unsigned integer")]
    Algorithm(String),

    #[error("digest type {0:?} is not an 8-bit unsigned integer")]
    DigestType(String),

    #[error("digest is not hexadecimal")]
    NotHex,

    #[error("digest of {found} hex characters does not match digest type {digest_type}")]
    DigestLength { digest_type: u8, found: usize },
}

/// Parsed DS content: `key-tag algorithm digest-type digest`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ds {
    key_tag: u16,
    algorithm: u8,
    digest_type: DigestType,
    digest: String,
}

impl Ds {
    pub fn parse(text: &str) -> Result<Self, DsError> {
        let fields: Vec<&str> = text.split_whitespace().collect();
        let [key_tag, algorithm, digest_type, digest] = fields[..] else {
            return Err(DsError::FieldCount(fields.len()));
        };

        let key_tag = parse_digits(key_tag).ok_or_else(|| DsError::KeyTag(key_tag.into()))?;
        let algorithm =
            parse_digits(algorithm).ok_or_else(|| DsError::Algorithm(algorithm.into()))?;
        let digest_type: u8 =
            parse_digits(digest_type).ok_or_else(|| DsError::DigestType(digest_type.into()))?;

        if digest.is_empty() || !digest.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(DsError::NotHex);
        }

        let ds = Ds {
            key_tag,
            algorithm,
            digest_type: digest_type.into(),
            digest: digest.to_ascii_lowercase(),
        };
        if !ds.digest_type.accepts(ds.digest.len()) {
            return Err(DsError::DigestLength {
                digest_type,
                found: ds.digest.len(),
            });
        }
        Ok(ds)
    }

    pub fn key_tag(&self) -> u16 {
        self.key_tag
    }

    pub fn algorithm(&self) -> u8 {
        self.algorithm
    }

    pub fn digest_type(&self) -> DigestType {
        self.digest_type
    }

    /// Lower-case hex digest.
    pub fn digest(&self) -> &str {
        &self.digest
    }
}

impl fmt::Display for Ds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.key_tag,
            self.algorithm,
            u8::from(self.digest_type),
            self.digest
        )
    }
}

impl FromStr for Ds {
    type Err = DsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ds::parse(s)
    }
}

/// CDS content: a DS record, or the RFC 8078 request to remove DS records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cds {
    /// `0 0 0 00`
    Delete,
    Publish(Ds),
}

impl Cds {
    pub fn parse(text: &str) -> Result<Self, DsError> {
        let fields: Vec<&str> = text.split_whitespace().collect();
        if fields == ["0", "0", "0", "00"] {
            return Ok(Cds::Delete);
        }
        Ds::parse(text).map(Cds::Publish)
    }
}

impl FromStr for Cds {
    type Err = DsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Cds::parse(s)
    }
}

pub fn is_valid_ds(text: &str) -> bool {
    Ds::parse(text).is_ok()
}

pub fn is_valid_cds(text: &str) -> bool {
    Cds::parse(text).is_ok()
}
