//! Unsigned transaction bodies and their signing payloads.

use crate::types::{AccessList, TxType};
use rawtx_primitives::{keccak256, H160, H256, U256};
use rawtx_rlp::{encode_address, encode_bytes, encode_list, encode_u64, encode_uint};

/// Pre-EIP-2718 transaction. A zero `chain_id` signs without replay
/// protection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LegacyTx {
    pub chain_id: U256,
    pub nonce: u64,
    pub gas_price: U256,
    pub gas_limit: u64,
    pub to: Option<H160>,
    pub value: U256,
    pub data: Vec<u8>,
}

impl LegacyTx {
    /// Field encodings in wire order, without chain id or signature.
    pub fn encoded_fields(&self) -> Vec<Vec<u8>> {
        vec![
            encode_u64(self.nonce),
            encode_uint(&self.gas_price),
            encode_u64(self.gas_limit),
            encode_address(self.to.as_ref()),
            encode_uint(&self.value),
            encode_bytes(&self.data),
        ]
    }
}

/// EIP-1559 dynamic fee transaction (type 2).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FeeMarketTx {
    pub chain_id: U256,
    pub nonce: u64,
    pub max_priority_fee_per_gas: U256,
    pub max_fee_per_gas: U256,
    pub gas_limit: u64,
    pub to: Option<H160>,
    pub value: U256,
    pub data: Vec<u8>,
    pub access_list: AccessList,
}

impl FeeMarketTx {
    /// Field encodings in wire order, without the signature.
    pub fn encoded_fields(&self) -> Vec<Vec<u8>> {
        vec![
            encode_uint(&self.chain_id),
            encode_u64(self.nonce),
            encode_uint(&self.max_priority_fee_per_gas),
            encode_uint(&self.max_fee_per_gas),
            encode_u64(self.gas_limit),
            encode_address(self.to.as_ref()),
            encode_uint(&self.value),
            encode_bytes(&self.data),
            self.access_list.rlp_encode(),
        ]
    }
}

/// A transaction ready to be signed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnsignedEnvelope {
    Legacy(LegacyTx),
    FeeMarket(FeeMarketTx),
}

impl UnsignedEnvelope {
    pub fn tx_type(&self) -> TxType {
        match self {
            UnsignedEnvelope::Legacy(_) => TxType::Legacy,
            UnsignedEnvelope::FeeMarket(_) => TxType::FeeMarket,
        }
    }

    pub fn chain_id(&self) -> U256 {
        match self {
            UnsignedEnvelope::Legacy(tx) => tx.chain_id,
            UnsignedEnvelope::FeeMarket(tx) => tx.chain_id,
        }
    }

    pub fn nonce(&self) -> u64 {
        match self {
            UnsignedEnvelope::Legacy(tx) => tx.nonce,
            UnsignedEnvelope::FeeMarket(tx) => tx.nonce,
        }
    }

    pub fn to(&self) -> Option<&H160> {
        match self {
            UnsignedEnvelope::Legacy(tx) => tx.to.as_ref(),
            UnsignedEnvelope::FeeMarket(tx) => tx.to.as_ref(),
        }
    }

    pub fn value(&self) -> &U256 {
        match self {
            UnsignedEnvelope::Legacy(tx) => &tx.value,
            UnsignedEnvelope::FeeMarket(tx) => &tx.value,
        }
    }

    pub fn data(&self) -> &[u8] {
        match self {
            UnsignedEnvelope::Legacy(tx) => &tx.data,
            UnsignedEnvelope::FeeMarket(tx) => &tx.data,
        }
    }

    /// Body fields as they appear in the signed list, before `v, r, s`.
    pub fn encoded_fields(&self) -> Vec<Vec<u8>> {
        match self {
            UnsignedEnvelope::Legacy(tx) => tx.encoded_fields(),
            UnsignedEnvelope::FeeMarket(tx) => tx.encoded_fields(),
        }
    }

    /// Bytes whose Keccak-256 digest is signed.
    ///
    /// Type 2: `0x02 || rlp([chainId, nonce, tip, feeCap, gas, to, value, data, accessList])`.
    /// Legacy with a chain id appends `chainId, 0, 0` (EIP-155); without one
    /// the six body fields are signed as-is.
    pub fn signing_payload(&self) -> Vec<u8> {
        match self {
            UnsignedEnvelope::Legacy(tx) => {
                let mut fields = tx.encoded_fields();
                if !tx.chain_id.is_zero() {
                    fields.push(encode_uint(&tx.chain_id));
                    fields.push(encode_bytes(&[]));
                    fields.push(encode_bytes(&[]));
                }
                encode_list(&fields)
            }
            UnsignedEnvelope::FeeMarket(tx) => {
                let body = encode_list(&tx.encoded_fields());
                let mut out = Vec::with_capacity(body.len() + 1);
                out.push(TxType::FeeMarket.tag());
                out.extend_from_slice(&body);
                out
            }
        }
    }

    pub fn signing_hash(&self) -> H256 {
        keccak256(self.signing_payload())
    }
}

impl From<LegacyTx> for UnsignedEnvelope {
    fn from(tx: LegacyTx) -> Self {
        UnsignedEnvelope::Legacy(tx)
    }
}

impl From<FeeMarketTx> for UnsignedEnvelope {
    fn from(tx: FeeMarketTx) -> Self {
        UnsignedEnvelope::FeeMarket(tx)
    }
}
