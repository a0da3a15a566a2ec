//! Interactive transaction builder: key sources, HD derivation and the
//! prompt session that turns `key=value` lines into signed transactions.

pub mod config;
pub mod errors;
pub mod hd;
pub mod key_source;
pub mod logging;
pub mod session;

pub use config::WalletConfig;
pub use errors::WalletError;
pub use hd::{derive_account_key, mnemonic_to_seed, DerivationPath, ExtendedKey, DEFAULT_ACCOUNT_PATH};
pub use key_source::KeySource;
pub use logging::{init_logging, LogConfig, LogFormat};
pub use session::{run_session, step, Output, SessionContext, SessionState};
