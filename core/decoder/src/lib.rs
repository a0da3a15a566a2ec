//! Schema-free transaction decoder.
//!
//! Raw bytes are walked with the RLP reader, every leaf is collected in
//! encounter order and the flat list is then interpreted by transaction type
//! for display.

pub mod classify;
pub mod dump;
pub mod error;
pub mod render;
pub mod stream;

pub use classify::{FeeMarketView, LegacyView, TxView, UintField};
pub use dump::dump;
pub use error::DecodeError;
pub use stream::{decode_hex_stream, decode_stream, DecoderConfig, StreamEvent, StreamItem, TxStream};
