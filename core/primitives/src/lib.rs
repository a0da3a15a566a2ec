//! Shared building blocks for the rawtx workspace: the minimal big-endian
//! integer codec, hex and address parsing, Keccak-256 and unit formatting.

pub mod address;
pub mod encoding;
pub mod error;
pub mod hash;
pub mod uint;
pub mod units;

pub use address::{parse_address, to_checksum};
pub use error::{ErrorKind, PrimitiveError};
pub use encoding::{decode_hex, encode_hex};
pub use hash::{function_selector, keccak256};
pub use primitive_types::{H160, H256, U256};
pub use uint::{from_be_bytes, parse_decimal, to_minimal_bytes};
pub use units::{format_units, ETHER_DECIMALS, GWEI_DECIMALS};

/// 20-byte account address.
pub type Address = H160;
