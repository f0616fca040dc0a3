use crate::rr::{CsyncError, DsError, LocError, PriorityError, SoaContentError};

/// Why record content was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("invalid SOA content: {0}")]
    Soa(#[from] SoaContentError),

    #[error("invalid LOC content: {0}")]
    Loc(#[from] LocError),

    #[error("invalid DS content: {0}")]
    Ds(#[from] DsError),

    #[error("invalid CSYNC content: {0}")]
    Csync(#[from] CsyncError),

    #[error("invalid priority: {0}")]
    Priority(#[from] PriorityError),

    #[error("backslashes must precede all quotes (\") in TXT content")]
    Unescaped,

    #[error("unknown record type {0}")]
    UnknownType(String),
}
