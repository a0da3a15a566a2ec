use rawtx_primitives::ErrorKind;
use rawtx_transaction::TxError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WalletError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read key file {path:?}: {source}")]
    KeyFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid key source: {0}")]
    InvalidKeySource(String),

    #[error("Invalid mnemonic: {0}")]
    InvalidMnemonic(String),

    #[error("Invalid derivation path: {0}")]
    InvalidDerivationPath(String),

    #[error("Key derivation failed: {0}")]
    Derivation(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Transaction(#[from] TxError),
}

impl WalletError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            WalletError::Io(_) => ErrorKind::Io,
            WalletError::KeyFile { .. }
            | WalletError::InvalidKeySource(_)
            | WalletError::InvalidMnemonic(_)
            | WalletError::InvalidDerivationPath(_)
            | WalletError::Derivation(_) => ErrorKind::KeySourceError,
            WalletError::Config(_) | WalletError::Json(_) => ErrorKind::Config,
            WalletError::Transaction(e) => e.kind(),
        }
    }
}

pub type Result<T> = std::result::Result<T, WalletError>;
