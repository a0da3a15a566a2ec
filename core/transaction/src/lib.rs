//! Transaction envelopes for the rawtx builder.
//!
//! An [`UnsignedEnvelope`] is assembled from a [`TxRequest`], hashed into its
//! signing digest, signed by a [`TxSigner`] and emitted as a
//! [`SignedTransaction`] in canonical wire form.

pub mod envelope;
pub mod erc20;
pub mod error;
pub mod request;
pub mod signature;
pub mod signed;
pub mod signer;
pub mod types;

pub use envelope::{FeeMarketTx, LegacyTx, UnsignedEnvelope};
pub use erc20::{transfer_calldata, TRANSFER_SIGNATURE};
pub use error::TxError;
pub use request::{TokenRegistry, TxRequest, DEFAULT_TOKENS};
pub use signature::{RawSignature, Signature};
pub use signed::{sign, SignedTransaction};
pub use signer::{public_key_to_address, recover_address, LocalSigner, TxSigner};
pub use types::{AccessList, AccessListItem, TxType};
