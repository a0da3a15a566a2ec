use crate::error::TxError;
use rawtx_primitives::{H160, H256};
use rawtx_rlp::{encode_bytes, encode_list, RlpError, RlpReader};

/// Envelope variants this system builds and reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TxType {
    /// Untagged pre-EIP-2718 transaction.
    Legacy = 0,
    /// EIP-1559 dynamic fee transaction.
    FeeMarket = 2,
}

impl TxType {
    pub fn tag(self) -> u8 {
        self as u8
    }

    /// Map an envelope type tag to a supported variant.
    pub fn from_tag(tag: u8) -> Result<Self, TxError> {
        match tag {
            0 => Ok(TxType::Legacy),
            2 => Ok(TxType::FeeMarket),
            other => Err(TxError::UnsupportedTxType(other)),
        }
    }
}

impl TryFrom<u8> for TxType {
    type Error = TxError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        TxType::from_tag(tag)
    }
}

/// Access list entry for EIP-2930/1559 transactions
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AccessListItem {
    pub address: H160,
    pub storage_keys: Vec<H256>,
}

/// Ordered list of pre-declared storage accesses. Always empty when built
/// here, but decoded transactions may carry entries.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AccessList(pub Vec<AccessListItem>);

impl AccessList {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn rlp_encode(&self) -> Vec<u8> {
        let entries: Vec<Vec<u8>> = self
            .0
            .iter()
            .map(|item| {
                let keys: Vec<Vec<u8>> = item
                    .storage_keys
                    .iter()
                    .map(|key| encode_bytes(key.as_bytes()))
                    .collect();
                encode_list(&[encode_bytes(item.address.as_bytes()), encode_list(&keys)])
            })
            .collect();
        encode_list(&entries)
    }

    pub fn rlp_decode(reader: &mut RlpReader<'_>) -> Result<Self, TxError> {
        let mut items = Vec::new();
        reader.enter_list()?;
        loop {
            match reader.kind() {
                Err(RlpError::EndOfList) => break,
                Err(e) => return Err(e.into()),
                Ok(_) => {}
            }

            reader.enter_list()?;
            let address = reader.read_bytes()?;
            if address.len() != 20 {
                return Err(TxError::invalid(
                    "accessList",
                    format!("entry {} has a {}-byte address", items.len(), address.len()),
                ));
            }
            let address = H160::from_slice(address);

            let mut storage_keys = Vec::new();
            reader.enter_list()?;
            loop {
                let key = match reader.read_bytes() {
                    Ok(key) => key,
                    Err(RlpError::EndOfList) => break,
                    Err(e) => return Err(e.into()),
                };
                if key.len() != 32 {
                    return Err(TxError::invalid(
                        "accessList",
                        format!("entry {} has a {}-byte storage key", items.len(), key.len()),
                    ));
                }
                storage_keys.push(H256::from_slice(key));
            }
            reader.exit_list()?;
            reader.exit_list()?;

            items.push(AccessListItem {
                address,
                storage_keys,
            });
        }
        reader.exit_list()?;
        Ok(AccessList(items))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tx_type_tags() {
        assert_eq!(TxType::from_tag(0).unwrap(), TxType::Legacy);
        assert_eq!(TxType::from_tag(2).unwrap(), TxType::FeeMarket);
        assert_eq!(TxType::from_tag(1), Err(TxError::UnsupportedTxType(1)));
        assert_eq!(TxType::try_from(3u8), Err(TxError::UnsupportedTxType(3)));
        assert_eq!(TxType::FeeMarket.tag(), 2);
    }

    #[test]
    fn test_empty_access_list() {
        let list = AccessList::default();
        assert_eq!(list.rlp_encode(), vec![0xc0]);
        let buf = list.rlp_encode();
        let mut reader = RlpReader::new(&buf);
        assert_eq!(AccessList::rlp_decode(&mut reader).unwrap(), list);
    }

    #[test]
    fn test_access_list_roundtrip() {
        let list = AccessList(vec![
            AccessListItem {
                address: H160::repeat_byte(0xaa),
                storage_keys: vec![H256::repeat_byte(0x01), H256::repeat_byte(0x02)],
            },
            AccessListItem {
                address: H160::repeat_byte(0xbb),
                storage_keys: vec![],
            },
        ]);
        let buf = list.rlp_encode();
        let mut reader = RlpReader::new(&buf);
        assert_eq!(AccessList::rlp_decode(&mut reader).unwrap(), list);
        assert!(reader.is_exhausted());
    }

    #[test]
    fn test_access_list_rejects_short_key() {
        let bad = encode_list(&[encode_list(&[
            encode_bytes(H160::repeat_byte(0xaa).as_bytes()),
            encode_list(&[encode_bytes(&[0x01; 31])]),
        ])]);
        let mut reader = RlpReader::new(&bad);
        let err = AccessList::rlp_decode(&mut reader).unwrap_err();
        assert!(matches!(err, TxError::InvalidFieldValue { .. }));
    }
}
