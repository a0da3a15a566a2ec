use rawtx_primitives::{function_selector, H160, U256};

pub const TRANSFER_SIGNATURE: &str = "transfer(address,uint256)";

/// ABI-encoded `transfer(recipient, amount)` call: selector, then both
/// arguments left-padded to 32 bytes.
pub fn transfer_calldata(recipient: &H160, amount: &U256) -> Vec<u8> {
    let mut data = Vec::with_capacity(4 + 32 + 32);
    data.extend_from_slice(&function_selector(TRANSFER_SIGNATURE));
    data.extend_from_slice(&[0u8; 12]);
    data.extend_from_slice(recipient.as_bytes());
    let mut word = [0u8; 32];
    amount.to_big_endian(&mut word);
    data.extend_from_slice(&word);
    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use rawtx_primitives::parse_address;

    #[test]
    fn test_transfer_calldata() {
        let recipient = parse_address("0x0475F0d4a405A79b58f302BD22ECbdAF35B1759e").unwrap();
        let data = transfer_calldata(&recipient, &U256::from(1_000_000_000u64));
        assert_eq!(data.len(), 68);
        assert_eq!(
            hex::encode(&data),
            "a9059cbb\
             0000000000000000000000000475f0d4a405a79b58f302bd22ecbdaf35b1759e\
             000000000000000000000000000000000000000000000000000000003b9aca00"
        );
    }
}
