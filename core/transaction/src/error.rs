use rawtx_primitives::{ErrorKind, PrimitiveError};
use rawtx_rlp::RlpError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TxError {
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("need all fields: nonce, gas, gasTipCap, gasFeeCap, chainID, to, amount (missing {0})")]
    MissingField(&'static str),

    #[error("invalid value for {field}: {reason}")]
    InvalidFieldValue { field: String, reason: String },

    #[error("tx type is invalid or not implemented: {0}")]
    UnsupportedTxType(u8),

    #[error("Invalid private key: {0}")]
    InvalidKey(String),

    #[error("Signing failed: {0}")]
    Signing(String),

    #[error("RLP error: {0}")]
    Rlp(#[from] RlpError),
}

impl TxError {
    pub(crate) fn invalid(field: impl Into<String>, reason: impl ToString) -> Self {
        TxError::InvalidFieldValue {
            field: field.into(),
            reason: reason.to_string(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            TxError::MalformedInput(_) => ErrorKind::MalformedInput,
            TxError::MissingField(_) => ErrorKind::MissingField,
            TxError::InvalidFieldValue { .. } => ErrorKind::InvalidFieldValue,
            TxError::UnsupportedTxType(_) => ErrorKind::UnsupportedTxType,
            TxError::InvalidKey(_) => ErrorKind::KeySourceError,
            TxError::Signing(_) => ErrorKind::Signing,
            TxError::Rlp(e) => e.kind(),
        }
    }
}

impl From<PrimitiveError> for TxError {
    fn from(e: PrimitiveError) -> Self {
        match e {
            PrimitiveError::InvalidHex(_) => TxError::MalformedInput(e.to_string()),
            other => TxError::invalid("integer", other),
        }
    }
}
