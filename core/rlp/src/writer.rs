use crate::{LIST_OFFSET, SHORT_PAYLOAD_MAX, STRING_OFFSET};
use rawtx_primitives::{to_minimal_bytes, H160, U256};

/// Encode a byte string.
pub fn encode_bytes(bytes: &[u8]) -> Vec<u8> {
    if bytes.len() == 1 && bytes[0] < STRING_OFFSET {
        return vec![bytes[0]];
    }
    let mut out = Vec::with_capacity(bytes.len() + 9);
    write_header(&mut out, STRING_OFFSET, bytes.len());
    out.extend_from_slice(bytes);
    out
}

/// Wrap already-encoded items in a list header.
pub fn encode_list<T: AsRef<[u8]>>(items: &[T]) -> Vec<u8> {
    let payload_len: usize = items.iter().map(|item| item.as_ref().len()).sum();
    let mut out = Vec::with_capacity(payload_len + 9);
    write_header(&mut out, LIST_OFFSET, payload_len);
    for item in items {
        out.extend_from_slice(item.as_ref());
    }
    out
}

/// Encode an integer as its minimal big-endian byte string.
pub fn encode_uint(value: &U256) -> Vec<u8> {
    encode_bytes(&to_minimal_bytes(value))
}

pub fn encode_u64(value: u64) -> Vec<u8> {
    encode_uint(&U256::from(value))
}

/// Encode an optional address; `None` is the empty string.
pub fn encode_address(address: Option<&H160>) -> Vec<u8> {
    match address {
        Some(addr) => encode_bytes(addr.as_bytes()),
        None => encode_bytes(&[]),
    }
}

fn write_header(out: &mut Vec<u8>, offset: u8, len: usize) {
    if len <= SHORT_PAYLOAD_MAX {
        out.push(offset + len as u8);
        return;
    }
    let len_bytes = len.to_be_bytes();
    let skip = len_bytes.iter().take_while(|b| **b == 0).count();
    let len_bytes = &len_bytes[skip..];
    out.push(offset + SHORT_PAYLOAD_MAX as u8 + len_bytes.len() as u8);
    out.extend_from_slice(len_bytes);
}
