//! Builder input: the `key=value` line grammar and its conversion into an
//! unsigned envelope.

use crate::envelope::{FeeMarketTx, LegacyTx, UnsignedEnvelope};
use crate::erc20::transfer_calldata;
use crate::error::TxError;
use crate::types::AccessList;
use rawtx_primitives::{decode_hex, function_selector, parse_address, parse_decimal, H160, U256};
use std::collections::BTreeMap;
use std::str::FromStr;
use tracing::debug;

/// Well-known ERC-20 contracts addressable by symbol.
pub const DEFAULT_TOKENS: [(&str, &str); 4] = [
    ("dai", "0x6b175474e89094c44da98b954eedeac495271d0f"),
    ("rdai", "0xad6d458402f60fd3bd25163575031acdce07538d"),
    ("usdc", "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48"),
    ("usdt", "0xdac17f958d2ee523a2206206994597c13d831ec7"),
];

/// Symbol to contract address table used by the `token` key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRegistry {
    tokens: BTreeMap<String, H160>,
}

impl TokenRegistry {
    pub fn empty() -> Self {
        Self {
            tokens: BTreeMap::new(),
        }
    }

    /// Build from textual `(symbol, address)` pairs.
    pub fn from_entries<I, K, V>(entries: I) -> Result<Self, TxError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let mut registry = Self::empty();
        for (symbol, address) in entries {
            let symbol = symbol.into();
            let address = parse_address(address.as_ref())
                .map_err(|e| TxError::invalid(format!("token {}", symbol), e))?;
            registry.insert(symbol, address);
        }
        Ok(registry)
    }

    pub fn insert(&mut self, symbol: impl Into<String>, address: H160) {
        self.tokens.insert(symbol.into(), address);
    }

    pub fn get(&self, symbol: &str) -> Option<&H160> {
        self.tokens.get(symbol)
    }

    /// A known symbol or a literal address.
    pub fn resolve(&self, token: &str) -> Result<H160, TxError> {
        if let Some(address) = self.tokens.get(token) {
            return Ok(*address);
        }
        parse_address(token).map_err(|e| TxError::invalid("token", e))
    }
}

impl Default for TokenRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        for (symbol, address) in DEFAULT_TOKENS {
            if let Ok(address) = parse_address(address) {
                registry.insert(symbol, address);
            }
        }
        registry
    }
}

/// Parsed builder line. Every field is optional until `build_unsigned`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TxRequest {
    pub nonce: Option<u64>,
    pub gas: Option<u64>,
    pub gas_price: Option<U256>,
    pub gas_tip_cap: Option<U256>,
    pub gas_fee_cap: Option<U256>,
    pub chain_id: Option<U256>,
    pub to: Option<H160>,
    pub amount: Option<U256>,
    pub data: Option<Vec<u8>>,
    pub function: Option<String>,
    pub token: Option<String>,
}

impl TxRequest {
    /// Parse space separated `key=value` tokens. Unknown keys are ignored.
    pub fn parse(line: &str) -> Result<Self, TxError> {
        let mut request = TxRequest::default();
        for token in line.split(' ').filter(|t| !t.is_empty()) {
            let mut parts = token.split('=');
            let (key, value) = match (parts.next(), parts.next(), parts.next()) {
                (Some(key), Some(value), None) => (key, value),
                _ => {
                    return Err(TxError::MalformedInput(format!(
                        "{:?}: use format key=value",
                        token
                    )))
                }
            };

            match key {
                "nonce" => request.nonce = Some(parse_u64(key, value)?),
                "gas" => request.gas = Some(parse_u64(key, value)?),
                "gasPrice" => request.gas_price = Some(parse_uint(key, value)?),
                "gasTipCap" => request.gas_tip_cap = Some(parse_uint(key, value)?),
                "gasFeeCap" => request.gas_fee_cap = Some(parse_uint(key, value)?),
                "chainID" => request.chain_id = Some(parse_uint(key, value)?),
                "amount" => request.amount = Some(parse_uint(key, value)?),
                "to" => {
                    request.to = Some(parse_address(value).map_err(|e| TxError::invalid(key, e))?)
                }
                "data" => request.data = Some(decode_hex(value).map_err(|e| TxError::invalid(key, e))?),
                "fn" => request.function = Some(value.to_string()),
                "token" => request.token = Some(value.to_string()),
                other => debug!(key = other, "Ignoring unknown key"),
            }
        }
        Ok(request)
    }

    /// Validate required keys and assemble the envelope. `gasPrice` selects
    /// a legacy transaction, otherwise a type-2 one is built.
    pub fn build_unsigned(&self, tokens: &TokenRegistry) -> Result<UnsignedEnvelope, TxError> {
        let gas_limit = match self.gas {
            Some(gas) if gas > 0 => gas,
            _ => return Err(TxError::MissingField("gas")),
        };
        let nonce = self.nonce.unwrap_or(0);

        if let Some(gas_price) = self.gas_price {
            if self.gas_tip_cap.is_some() || self.gas_fee_cap.is_some() {
                return Err(TxError::invalid(
                    "gasPrice",
                    "cannot be combined with gasTipCap or gasFeeCap",
                ));
            }
            let to = self.to.ok_or(TxError::MissingField("to"))?;
            let amount = self.amount.ok_or(TxError::MissingField("amount"))?;
            let (to, value, data) = self.payload(tokens, to, amount)?;
            return Ok(LegacyTx {
                chain_id: self.chain_id.unwrap_or_default(),
                nonce,
                gas_price,
                gas_limit,
                to: Some(to),
                value,
                data,
            }
            .into());
        }

        let max_priority_fee_per_gas = self.gas_tip_cap.ok_or(TxError::MissingField("gasTipCap"))?;
        let max_fee_per_gas = self.gas_fee_cap.ok_or(TxError::MissingField("gasFeeCap"))?;
        let chain_id = self.chain_id.ok_or(TxError::MissingField("chainID"))?;
        let to = self.to.ok_or(TxError::MissingField("to"))?;
        let amount = self.amount.ok_or(TxError::MissingField("amount"))?;
        let (to, value, data) = self.payload(tokens, to, amount)?;

        Ok(FeeMarketTx {
            chain_id,
            nonce,
            max_priority_fee_per_gas,
            max_fee_per_gas,
            gas_limit,
            to: Some(to),
            value,
            data,
            access_list: AccessList::default(),
        }
        .into())
    }

    /// Destination, value and calldata after applying `token`, `fn` and `data`.
    fn payload(&self, tokens: &TokenRegistry, to: H160, amount: U256) -> Result<(H160, U256, Vec<u8>), TxError> {
        match (&self.token, &self.function, &self.data) {
            (_, Some(_), Some(_)) | (Some(_), Some(_), _) => Err(TxError::invalid(
                "fn",
                "cannot be combined with data or token",
            )),
            (Some(_), None, Some(_)) => Err(TxError::invalid("token", "cannot be combined with data")),
            (Some(token), None, None) => {
                let contract = tokens.resolve(token)?;
                debug!(token = %token, contract = %hex::encode(contract), "Encoding ERC-20 transfer");
                Ok((contract, U256::zero(), transfer_calldata(&to, &amount)))
            }
            (None, Some(signature), None) => Ok((to, amount, function_selector(signature).to_vec())),
            (None, None, data) => Ok((to, amount, data.clone().unwrap_or_default())),
        }
    }
}

impl FromStr for TxRequest {
    type Err = TxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TxRequest::parse(s)
    }
}

fn parse_uint(key: &str, value: &str) -> Result<U256, TxError> {
    parse_decimal(value).map_err(|e| TxError::invalid(key, e))
}

fn parse_u64(key: &str, value: &str) -> Result<u64, TxError> {
    let parsed = parse_uint(key, value)?;
    if parsed > U256::from(u64::MAX) {
        return Err(TxError::invalid(key, "exceeds 64 bits"));
    }
    Ok(parsed.low_u64())
}
