use std::fmt;
use thiserror::Error;

/// Error classes shared by every crate in the workspace.
///
/// Concrete error enums stay crate-local; `kind()` on each of them maps onto
/// one of these so callers can branch on the class without matching variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Hex decode failure, truncated or oversized RLP, trailing bytes.
    MalformedInput,
    /// Builder input lacks a required key.
    MissingField,
    /// Unparseable integer or address, or a value outside its domain.
    InvalidFieldValue,
    /// Transaction type other than legacy (0) or fee-market (2).
    UnsupportedTxType,
    /// Key file unreadable, mnemonic invalid, derivation path invalid.
    KeySourceError,
    /// The signing primitive rejected the key or digest.
    Signing,
    Io,
    Config,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::MalformedInput => "malformed input",
            ErrorKind::MissingField => "missing field",
            ErrorKind::InvalidFieldValue => "invalid field value",
            ErrorKind::UnsupportedTxType => "unsupported transaction type",
            ErrorKind::KeySourceError => "key source error",
            ErrorKind::Signing => "signing error",
            ErrorKind::Io => "io error",
            ErrorKind::Config => "config error",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PrimitiveError {
    #[error("Hex decode error: {0}")]
    InvalidHex(#[from] ::hex::FromHexError),

    #[error("Integer of {0} significant bytes exceeds 256 bits")]
    IntegerOverflow(usize),

    #[error("Invalid address length: expected 20 bytes, got {0}")]
    InvalidAddressLength(usize),

    #[error("Invalid decimal integer: {0:?}")]
    InvalidDecimal(String),
}

impl PrimitiveError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PrimitiveError::InvalidHex(_) => ErrorKind::MalformedInput,
            PrimitiveError::IntegerOverflow(_)
            | PrimitiveError::InvalidAddressLength(_)
            | PrimitiveError::InvalidDecimal(_) => ErrorKind::InvalidFieldValue,
        }
    }
}
