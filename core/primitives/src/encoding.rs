use crate::error::PrimitiveError;

/// Decode hex with an optional `0x`/`0X` prefix. Odd length is an error.
pub fn decode_hex(s: &str) -> Result<Vec<u8>, PrimitiveError> {
    let trimmed = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    Ok(::hex::decode(trimmed)?)
}

/// Lowercase hex with a `0x` prefix.
pub fn encode_hex(bytes: &[u8]) -> String {
    format!("0x{}", ::hex::encode(bytes))
}
