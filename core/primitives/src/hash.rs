use primitive_types::H256;
use sha3::{Digest, Keccak256};

/// Keccak-256 (the pre-standard variant Ethereum uses, not SHA3-256).
pub fn keccak256(data: impl AsRef<[u8]>) -> H256 {
    let mut hasher = Keccak256::new();
    hasher.update(data.as_ref());
    H256::from_slice(&hasher.finalize())
}

/// First four bytes of the Keccak-256 of an ASCII function signature.
pub fn function_selector(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    let mut selector = [0u8; 4];
    selector.copy_from_slice(&hash.as_bytes()[..4]);
    selector
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keccak_empty() {
        assert_eq!(
            hex::encode(keccak256([]).as_bytes()),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn test_known_selectors() {
        assert_eq!(function_selector("transfer(address,uint256)"), [0xa9, 0x05, 0x9c, 0xbb]);
        assert_eq!(function_selector("hello()"), [0x19, 0xff, 0x1d, 0x21]);
    }
}
