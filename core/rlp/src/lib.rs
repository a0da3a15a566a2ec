//! Recursive Length Prefix codec.
//!
//! [`RlpReader`] is a cursor that classifies the next item, descends into and
//! out of lists and reports list/stream exhaustion as distinct signals, so a
//! caller can walk a buffer without knowing its schema. The writer functions
//! are the inverse and produce canonical encodings only.

pub mod error;
pub mod reader;
pub mod writer;

pub use error::RlpError;
pub use reader::{Kind, RlpReader};
pub use writer::{encode_address, encode_bytes, encode_list, encode_uint, encode_u64};

/// Largest payload that fits a single-byte length prefix.
pub const SHORT_PAYLOAD_MAX: usize = 55;
/// First prefix byte of a string item.
pub const STRING_OFFSET: u8 = 0x80;
/// First prefix byte of a list item.
pub const LIST_OFFSET: u8 = 0xc0;
/// Deepest list nesting the reader will enter.
pub const MAX_DEPTH: usize = 1024;
/// `rlp([])`
pub const EMPTY_LIST: u8 = 0xc0;
/// `rlp("")`
pub const EMPTY_STRING: u8 = 0x80;
