use rawtx_primitives::{ErrorKind, PrimitiveError};
use rawtx_rlp::RlpError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("tx type is invalid or not implemented: {0}")]
    UnsupportedTxType(u8),

    #[error("type {tx_type} transaction has {found} fields, expected {expected}")]
    FieldCount {
        tx_type: u8,
        expected: &'static str,
        found: usize,
    },

    #[error("invalid value for {field}: {reason}")]
    InvalidFieldValue { field: &'static str, reason: String },

    #[error("{0}")]
    Rlp(#[from] RlpError),

    #[error("{0}")]
    Hex(#[from] PrimitiveError),
}

impl DecodeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DecodeError::MalformedInput(_) | DecodeError::FieldCount { .. } => ErrorKind::MalformedInput,
            DecodeError::UnsupportedTxType(_) => ErrorKind::UnsupportedTxType,
            DecodeError::InvalidFieldValue { .. } => ErrorKind::InvalidFieldValue,
            DecodeError::Rlp(e) => e.kind(),
            DecodeError::Hex(e) => e.kind(),
        }
    }
}
