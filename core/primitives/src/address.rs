use crate::encoding::decode_hex;
use crate::error::PrimitiveError;
use crate::hash::keccak256;
use primitive_types::H160;

/// Parse a 20-byte hex address, `0x` optional, any letter case.
pub fn parse_address(s: &str) -> Result<H160, PrimitiveError> {
    let bytes = decode_hex(s)?;
    if bytes.len() != 20 {
        return Err(PrimitiveError::InvalidAddressLength(bytes.len()));
    }
    Ok(H160::from_slice(&bytes))
}

/// EIP-55 mixed-case rendering with `0x` prefix.
pub fn to_checksum(address: &H160) -> String {
    let lower = hex::encode(address.as_bytes());
    let hash = keccak256(lower.as_bytes());
    let mut out = String::with_capacity(42);
    out.push_str("0x");
    for (i, c) in lower.chars().enumerate() {
        let byte = hash.as_bytes()[i / 2];
        let nibble = if i % 2 == 0 { byte >> 4 } else { byte & 0x0f };
        if nibble >= 8 {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
    }
    out
}
