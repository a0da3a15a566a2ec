//! Minimal big-endian integer codec.
//!
//! Integers on the wire carry no leading zero bytes and zero is the empty
//! byte string. Decoding accepts any byte string whose significant part fits
//! in 256 bits; leading zeros are tolerated here; canonicality is the RLP
//! reader's concern.

use crate::error::PrimitiveError;
use primitive_types::U256;

/// Encode `value` big-endian with leading zero bytes stripped.
pub fn to_minimal_bytes(value: &U256) -> Vec<u8> {
    let mut buf = [0u8; 32];
    value.to_big_endian(&mut buf);
    let skip = buf.iter().take_while(|b| **b == 0).count();
    buf[skip..].to_vec()
}

/// Decode a big-endian byte string, including the empty string as zero.
pub fn from_be_bytes(bytes: &[u8]) -> Result<U256, PrimitiveError> {
    let skip = bytes.iter().take_while(|b| **b == 0).count();
    let significant = &bytes[skip..];
    if significant.len() > 32 {
        return Err(PrimitiveError::IntegerOverflow(significant.len()));
    }
    Ok(U256::from_big_endian(significant))
}

/// Parse a base-10 integer as typed on the builder command line.
pub fn parse_decimal(s: &str) -> Result<U256, PrimitiveError> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PrimitiveError::InvalidDecimal(s.to_string()));
    }
    U256::from_dec_str(s).map_err(|_| PrimitiveError::InvalidDecimal(s.to_string()))
}
