use crate::error::TxError;
use crate::types::TxType;
use rawtx_primitives::U256;

/// Output of the signing primitive before envelope-specific `v` encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawSignature {
    pub r: [u8; 32],
    pub s: [u8; 32],
    /// 0 or 1.
    pub recovery_id: u8,
}

/// Signature fields as carried in a signed transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Signature {
    pub v: U256,
    pub r: U256,
    pub s: U256,
}

impl Signature {
    /// Encode the recovery id the way `tx_type` carries it.
    ///
    /// Type 2 stores the bare parity. Legacy stores `27 + id` without a chain
    /// id and `id + 35 + 2 * chain_id` with one.
    pub fn from_raw(raw: &RawSignature, tx_type: TxType, chain_id: &U256) -> Result<Self, TxError> {
        let id = U256::from(raw.recovery_id);
        let v = match tx_type {
            TxType::FeeMarket => Some(id),
            TxType::Legacy if chain_id.is_zero() => Some(id + 27),
            TxType::Legacy => chain_id
                .checked_mul(U256::from(2))
                .and_then(|c| c.checked_add(id + 35)),
        };
        let v = v.ok_or_else(|| TxError::invalid("chainID", "too large to encode in v"))?;
        Ok(Signature {
            v,
            r: U256::from_big_endian(&raw.r),
            s: U256::from_big_endian(&raw.s),
        })
    }

    /// Inverse of [`Signature::from_raw`].
    pub fn to_raw(&self, tx_type: TxType, chain_id: &U256) -> Result<RawSignature, TxError> {
        let id = match tx_type {
            TxType::FeeMarket => Some(self.v),
            TxType::Legacy if chain_id.is_zero() => self.v.checked_sub(U256::from(27)),
            TxType::Legacy => chain_id
                .checked_mul(U256::from(2))
                .and_then(|c| c.checked_add(U256::from(35)))
                .and_then(|base| self.v.checked_sub(base)),
        };
        let recovery_id = match id {
            Some(id) if id <= U256::one() => id.low_u32() as u8,
            _ => return Err(TxError::invalid("v", format!("{} is not a valid recovery value", self.v))),
        };

        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        self.r.to_big_endian(&mut r);
        self.s.to_big_endian(&mut s);
        Ok(RawSignature { r, s, recovery_id })
    }

    /// Chain id implied by a legacy `v`; zero for pre-EIP-155 values.
    pub fn legacy_chain_id(v: &U256) -> Result<U256, TxError> {
        if *v == U256::from(27) || *v == U256::from(28) {
            return Ok(U256::zero());
        }
        if *v < U256::from(35) {
            return Err(TxError::invalid("v", format!("{} is not a valid legacy value", v)));
        }
        Ok((*v - 35) / 2)
    }
}
