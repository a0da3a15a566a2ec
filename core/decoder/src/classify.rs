use crate::error::DecodeError;
use rawtx_primitives::{from_be_bytes, U256};
use rawtx_transaction::{TxError, TxType};

/// Integer leaf kept alongside its raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UintField {
    pub raw: Vec<u8>,
    pub value: U256,
}

impl UintField {
    fn parse(field: &'static str, raw: Vec<u8>) -> Result<Self, DecodeError> {
        let value = from_be_bytes(&raw).map_err(|e| DecodeError::InvalidFieldValue {
            field,
            reason: e.to_string(),
        })?;
        Ok(Self { raw, value })
    }
}

/// Legacy transaction: `[nonce, gasPrice, gasLimit, to, value, data, v, r, s]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyView {
    pub nonce: UintField,
    pub gas_price: UintField,
    pub gas_limit: UintField,
    pub to: Vec<u8>,
    pub value: UintField,
    pub data: Vec<u8>,
    pub v: UintField,
    pub r: UintField,
    pub s: UintField,
}

/// Type-2 transaction. The access list is kept as its flattened leaves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeMarketView {
    pub chain_id: UintField,
    pub nonce: UintField,
    pub max_priority_fee_per_gas: UintField,
    pub max_fee_per_gas: UintField,
    pub gas_limit: UintField,
    pub destination: Vec<u8>,
    pub amount: UintField,
    pub data: Vec<u8>,
    pub access_list: Vec<Vec<u8>>,
    pub y_parity: UintField,
    pub r: UintField,
    pub s: UintField,
}

/// Named interpretation of one decoded transaction's leaves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxView {
    Legacy(LegacyView),
    FeeMarket(FeeMarketView),
}

const LEGACY_FIELDS: usize = 9;
const FEE_MARKET_MIN_FIELDS: usize = 12;

impl TxView {
    /// Interpret flattened leaves positionally according to `tx_type`.
    pub fn classify(tx_type: u8, fields: Vec<Vec<u8>>) -> Result<Self, DecodeError> {
        let tx_type = TxType::from_tag(tx_type).map_err(|e| match e {
            TxError::UnsupportedTxType(tag) => DecodeError::UnsupportedTxType(tag),
            other => DecodeError::MalformedInput(other.to_string()),
        })?;

        match tx_type {
            TxType::Legacy => {
                if fields.len() != LEGACY_FIELDS {
                    return Err(DecodeError::FieldCount {
                        tx_type: tx_type.tag(),
                        expected: "exactly 9",
                        found: fields.len(),
                    });
                }
                let mut it = fields.into_iter();
                let mut next = || it.next().unwrap_or_default();
                Ok(TxView::Legacy(LegacyView {
                    nonce: UintField::parse("nonce", next())?,
                    gas_price: UintField::parse("gasPrice", next())?,
                    gas_limit: UintField::parse("gasLimit", next())?,
                    to: next(),
                    value: UintField::parse("value", next())?,
                    data: next(),
                    v: UintField::parse("v", next())?,
                    r: UintField::parse("r", next())?,
                    s: UintField::parse("s", next())?,
                }))
            }
            TxType::FeeMarket => {
                if fields.len() < FEE_MARKET_MIN_FIELDS {
                    return Err(DecodeError::FieldCount {
                        tx_type: tx_type.tag(),
                        expected: "at least 12",
                        found: fields.len(),
                    });
                }
                let mut fields = fields;
                let signature = fields.split_off(fields.len() - 3);
                let access_list = fields.split_off(8);

                let mut body = fields.into_iter();
                let mut next = || body.next().unwrap_or_default();
                let chain_id = UintField::parse("chainID", next())?;
                let nonce = UintField::parse("nonce", next())?;
                let max_priority_fee_per_gas = UintField::parse("gasTipCap", next())?;
                let max_fee_per_gas = UintField::parse("gasFeeCap", next())?;
                let gas_limit = UintField::parse("gasLimit", next())?;
                let destination = next();
                let amount = UintField::parse("amount", next())?;
                let data = next();

                let mut sig = signature.into_iter();
                let mut next = || sig.next().unwrap_or_default();
                Ok(TxView::FeeMarket(FeeMarketView {
                    chain_id,
                    nonce,
                    max_priority_fee_per_gas,
                    max_fee_per_gas,
                    gas_limit,
                    destination,
                    amount,
                    data,
                    access_list,
                    y_parity: UintField::parse("yParity", next())?,
                    r: UintField::parse("r", next())?,
                    s: UintField::parse("s", next())?,
                }))
            }
        }
    }

    pub fn tx_type(&self) -> TxType {
        match self {
            TxView::Legacy(_) => TxType::Legacy,
            TxView::FeeMarket(_) => TxType::FeeMarket,
        }
    }

    pub fn nonce(&self) -> &U256 {
        match self {
            TxView::Legacy(tx) => &tx.nonce.value,
            TxView::FeeMarket(tx) => &tx.nonce.value,
        }
    }
}
