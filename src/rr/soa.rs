use std::{fmt, str::FromStr};

use hickory_proto::rr::Name;

use super::parse_digits;
use crate::serial::{Serial, SerialNumber};

const MAX_LABEL_LEN: usize = 63;

/// Recommended floors for the SOA timers (RFC 1912, RFC 2308).
const RECOMMENDED_REFRESH: u32 = 1800;
const RECOMMENDED_RETRY: u32 = 600;
const RECOMMENDED_EXPIRE: u32 = 604_800;
const RECOMMENDED_MINIMUM: u32 = 300;

/// Longest negative caching TTL before a warning.
const MAX_NEGATIVE_TTL: u32 = 86_400;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SoaContentError {
    #[error("SOA content must have exactly 7 fields, found {0}")]
    FieldCount(usize),

    #[error("invalid primary nameserver {0:?}")]
    Primary(String),

    #[error("primary nameserver {0:?} is a reverse lookup name")]
    ReversePrimary(String),

    #[error("invalid hostmaster address {0:?}")]
    Hostmaster(String),

    #[error("serial {0:?} is not a 32-bit unsigned integer")]
    Serial(String),

    #[error("SOA {field} {value:?} is not a 32-bit unsigned integer")]
    Timer { field: &'static str, value: String },
}

/// Things about otherwise valid SOA content that operators probably did not
/// intend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SoaWarning {
    /// A ten digit serial whose first eight digits are not a calendar date.
    SerialNotDate(u32),
    BelowRecommended {
        field: &'static str,
        value: u32,
        recommended: u32,
    },
    RetryNotBelowRefresh { refresh: u32, retry: u32 },
    NegativeTtlAboveDay(u32),
}

impl fmt::Display for SoaWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SoaWarning::SerialNotDate(serial) => write!(
                f,
                "serial {serial} looks like YYYYMMDDnn but does not contain a valid date"
            ),
            SoaWarning::BelowRecommended {
                field,
                value,
                recommended,
            } => write!(
                f,
                "SOA {field} value ({value}) is below the recommended minimum ({recommended})"
            ),
            SoaWarning::RetryNotBelowRefresh { refresh, retry } => write!(
                f,
                "SOA retry ({retry}) should be less than refresh ({refresh})"
            ),
            SoaWarning::NegativeTtlAboveDay(minimum) => write!(
                f,
                "SOA minimum (negative caching TTL) of {minimum} exceeds 24 hours"
            ),
        }
    }
}

/// Parsed SOA content:
/// `primary-ns hostmaster serial refresh retry expire minimum`.
///
/// The hostmaster may be written as a mailbox name
/// (`hostmaster.example.com`, in DNS presentation format, so `\.` escapes a
/// dot in the local part) or
/// as an address (`hostmaster@example.com`). Both forms parse to the same
/// mailbox name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoaContent {
    primary: Name,
    hostmaster: Name,
    serial: SerialNumber,
    refresh: u32,
    retry: u32,
    expire: u32,
    minimum: u32,
}

impl SoaContent {
    pub fn parse(text: &str) -> Result<Self, SoaContentError> {
        let fields: Vec<&str> = text.split_whitespace().collect();
        let [primary, hostmaster, serial, refresh, retry, expire, minimum] = fields[..] else {
            return Err(SoaContentError::FieldCount(fields.len()));
        };

        if is_reverse_name(primary) {
            return Err(SoaContentError::ReversePrimary(primary.into()));
        }
        let primary =
            parse_hostname(primary).ok_or_else(|| SoaContentError::Primary(primary.into()))?;

        let hostmaster = parse_mailbox(hostmaster)
            .ok_or_else(|| SoaContentError::Hostmaster(hostmaster.into()))?;

        let serial = parse_digits::<u32>(serial)
            .map(SerialNumber::from)
            .ok_or_else(|| SoaContentError::Serial(serial.into()))?;

        let timer = |field: &'static str, value: &str| {
            parse_digits::<u32>(value).ok_or_else(|| SoaContentError::Timer {
                field,
                value: value.into(),
            })
        };

        Ok(SoaContent {
            primary,
            hostmaster,
            serial,
            refresh: timer("refresh", refresh)?,
            retry: timer("retry", retry)?,
            expire: timer("expire", expire)?,
            minimum: timer("minimum", minimum)?,
        })
    }

    pub fn primary(&self) -> &Name {
        &self.primary
    }

    /// The hostmaster mailbox as a domain name.
    pub fn hostmaster(&self) -> &Name {
        &self.hostmaster
    }

    /// The hostmaster mailbox as an email address.
    pub fn hostmaster_email(&self) -> String {
        let mut labels = self
            .hostmaster
            .iter()
            .map(|label| String::from_utf8_lossy(label).into_owned());
        let local = labels.next().unwrap_or_default();
        let domain: Vec<String> = labels.collect();
        format!("{local}@{}", domain.join("."))
    }

    pub fn serial(&self) -> SerialNumber {
        self.serial
    }

    pub fn refresh(&self) -> u32 {
        self.refresh
    }

    pub fn retry(&self) -> u32 {
        self.retry
    }

    pub fn expire(&self) -> u32 {
        self.expire
    }

    pub fn minimum(&self) -> u32 {
        self.minimum
    }

    /// Deviations from RFC 1912 and RFC 2308 recommendations. None of these
    /// make the content invalid.
    pub fn warnings(&self) -> Vec<SoaWarning> {
        let mut warnings = Vec::new();

        let serial = Serial::from(self.serial.get());
        if serial.get() >= 1_000_000_000 && serial.date().is_none() {
            warnings.push(SoaWarning::SerialNotDate(self.serial.get()));
        }

        for (field, value, recommended) in [
            ("refresh", self.refresh, RECOMMENDED_REFRESH),
            ("retry", self.retry, RECOMMENDED_RETRY),
            ("expire", self.expire, RECOMMENDED_EXPIRE),
            ("minimum", self.minimum, RECOMMENDED_MINIMUM),
        ] {
            if value < recommended {
                warnings.push(SoaWarning::BelowRecommended {
                    field,
                    value,
                    recommended,
                });
            }
        }

        if self.retry >= self.refresh {
            warnings.push(SoaWarning::RetryNotBelowRefresh {
                refresh: self.refresh,
                retry: self.retry,
            });
        }

        if self.minimum > MAX_NEGATIVE_TTL {
            warnings.push(SoaWarning::NegativeTtlAboveDay(self.minimum));
        }

        warnings
    }
}

impl FromStr for SoaContent {
    type Err = SoaContentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SoaContent::parse(s)
    }
}

pub fn is_valid_soa_content(text: &str) -> bool {
    SoaContent::parse(text).is_ok()
}

/// An SOA record may only live at the zone apex.
pub fn is_valid_soa_name(name: &str, zone: &str) -> bool {
    same_owner(name, zone)
}

/// Owner name equality, ignoring one trailing dot on either side.
pub(crate) fn same_owner(a: &str, b: &str) -> bool {
    a.strip_suffix('.').unwrap_or(a) == b.strip_suffix('.').unwrap_or(b)
}

fn is_reverse_name(name: &str) -> bool {
    let name = name.strip_suffix('.').unwrap_or(name);
    name.len() >= 5
        && name.is_char_boundary(name.len() - 5)
        && name[name.len() - 5..].eq_ignore_ascii_case(".arpa")
}

/// Parse a host name such as the primary nameserver.
fn parse_hostname(text: &str) -> Option<Name> {
    let name = Name::from_ascii(text).ok()?;
    name.iter().all(is_host_label).then_some(name)
}

fn is_host_label(label: &[u8]) -> bool {
    (1..=MAX_LABEL_LEN).contains(&label.len())
        && !label.starts_with(b"-")
        && !label.ends_with(b"-")
        && label
            .iter()
            .all(|&b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_'))
}

fn is_mailbox_local(local: &[u8]) -> bool {
    !local.is_empty()
        && !local.starts_with(b".")
        && !local.ends_with(b".")
        && !local.windows(2).any(|pair| pair == b"..")
}

/// Parse a hostmaster field in either address or mailbox-name form.
///
/// An address has the dots of its local part escaped so that the local part
/// stays a single label.
fn parse_mailbox(field: &str) -> Option<Name> {
    let name = match field.split_once('@') {
        Some((local, domain)) => {
            Name::from_ascii(format!("{}.{domain}", local.replace('.', r"\.")))
        }
        None => Name::from_ascii(field),
    }
    .ok()?;

    let mut labels = name.iter();
    let local = labels.next()?;
    let domain: Vec<&[u8]> = labels.collect();

    (is_mailbox_local(local) && !domain.is_empty() && domain.iter().all(|l| is_host_label(l)))
        .then_some(name)
}
