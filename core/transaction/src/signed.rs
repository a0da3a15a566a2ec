//! Signed envelopes: serialization, hashing, strict decoding and sender recovery.

use crate::envelope::{FeeMarketTx, LegacyTx, UnsignedEnvelope};
use crate::error::TxError;
use crate::signature::Signature;
use crate::signer::{recover_address, TxSigner};
use crate::types::{AccessList, TxType};
use rawtx_primitives::{keccak256, H160, H256, U256};
use rawtx_rlp::{encode_list, encode_uint, RlpError, RlpReader, LIST_OFFSET, STRING_OFFSET};
use tracing::debug;

/// An envelope together with its signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    envelope: UnsignedEnvelope,
    signature: Signature,
}

impl SignedTransaction {
    pub fn new(envelope: UnsignedEnvelope, signature: Signature) -> Self {
        Self {
            envelope,
            signature,
        }
    }

    pub fn envelope(&self) -> &UnsignedEnvelope {
        &self.envelope
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub fn tx_type(&self) -> TxType {
        self.envelope.tx_type()
    }

    /// Network encoding: `rlp(fields ++ [v, r, s])`, prefixed by the type tag
    /// for typed envelopes.
    pub fn serialize(&self) -> Vec<u8> {
        let mut fields = self.envelope.encoded_fields();
        fields.push(encode_uint(&self.signature.v));
        fields.push(encode_uint(&self.signature.r));
        fields.push(encode_uint(&self.signature.s));
        let body = encode_list(&fields);

        match self.tx_type() {
            TxType::Legacy => body,
            tx_type => {
                let mut out = Vec::with_capacity(body.len() + 1);
                out.push(tx_type.tag());
                out.extend_from_slice(&body);
                out
            }
        }
    }

    /// Keccak-256 of the network encoding.
    pub fn hash(&self) -> H256 {
        keccak256(self.serialize())
    }

    /// Address whose key produced the signature.
    pub fn recover_sender(&self) -> Result<H160, TxError> {
        let raw = self
            .signature
            .to_raw(self.tx_type(), &self.envelope.chain_id())?;
        recover_address(&self.envelope.signing_hash(), &raw)
    }

    /// Decode a legacy or type-2 network encoding, field by field.
    ///
    /// Unlike the generic dump this rejects wrong field counts, non-canonical
    /// integers, malformed addresses and trailing bytes.
    pub fn decode(bytes: &[u8]) -> Result<Self, TxError> {
        let first = *bytes
            .first()
            .ok_or_else(|| TxError::MalformedInput("empty transaction".to_string()))?;

        if first >= LIST_OFFSET {
            return decode_legacy(bytes);
        }
        if first >= STRING_OFFSET {
            return Err(TxError::MalformedInput(
                "transaction is neither a list nor a typed envelope".to_string(),
            ));
        }
        match TxType::from_tag(first)? {
            TxType::FeeMarket => decode_fee_market(&bytes[1..]),
            TxType::Legacy => Err(TxError::UnsupportedTxType(first)),
        }
    }
}

/// Sign `envelope` with `signer`, encoding `v` for the envelope's type.
pub fn sign<S: TxSigner + ?Sized>(envelope: UnsignedEnvelope, signer: &S) -> Result<SignedTransaction, TxError> {
    let hash = envelope.signing_hash();
    debug!(
        tx_type = ?envelope.tx_type(),
        signing_hash = %hex::encode(hash),
        signer = %hex::encode(signer.address()),
        "Signing transaction"
    );
    let raw = signer.sign_hash(&hash)?;
    let signature = Signature::from_raw(&raw, envelope.tx_type(), &envelope.chain_id())?;
    Ok(SignedTransaction::new(envelope, signature))
}

struct Fields<'a, 'b> {
    reader: &'b mut RlpReader<'a>,
}

impl<'a, 'b> Fields<'a, 'b> {
    fn missing(name: &str) -> impl FnOnce(RlpError) -> TxError + '_ {
        move |e| match e {
            RlpError::EndOfList => TxError::MalformedInput(format!("transaction ends before {}", name)),
            other => other.into(),
        }
    }

    fn uint(&mut self, name: &str) -> Result<U256, TxError> {
        self.reader.read_uint().map_err(Self::missing(name))
    }

    fn u64(&mut self, name: &str) -> Result<u64, TxError> {
        let value = self.uint(name)?;
        if value > U256::from(u64::MAX) {
            return Err(TxError::invalid(name, "exceeds 64 bits"));
        }
        Ok(value.low_u64())
    }

    fn to(&mut self) -> Result<Option<H160>, TxError> {
        let bytes = self.reader.read_bytes().map_err(Self::missing("to"))?;
        match bytes.len() {
            0 => Ok(None),
            20 => Ok(Some(H160::from_slice(bytes))),
            n => Err(TxError::invalid("to", format!("expected 20 bytes, got {}", n))),
        }
    }

    fn data(&mut self) -> Result<Vec<u8>, TxError> {
        Ok(self.reader.read_bytes().map_err(Self::missing("data"))?.to_vec())
    }

    fn signature(&mut self) -> Result<Signature, TxError> {
        Ok(Signature {
            v: self.uint("v")?,
            r: self.uint("r")?,
            s: self.uint("s")?,
        })
    }

    fn finish(self) -> Result<(), TxError> {
        match self.reader.kind() {
            Err(RlpError::EndOfList) => {}
            Ok(_) => {
                return Err(TxError::MalformedInput(
                    "transaction has extra fields".to_string(),
                ))
            }
            Err(e) => return Err(e.into()),
        }
        self.reader.exit_list()?;
        match self.reader.kind() {
            Err(RlpError::EndOfStream) => Ok(()),
            Ok(_) => Err(TxError::MalformedInput(format!(
                "{} trailing bytes after transaction",
                self.reader.remaining().len()
            ))),
            Err(e) => Err(e.into()),
        }
    }
}

fn decode_legacy(bytes: &[u8]) -> Result<SignedTransaction, TxError> {
    let mut reader = RlpReader::new(bytes);
    reader.enter_list()?;
    let mut fields = Fields {
        reader: &mut reader,
    };

    let mut tx = LegacyTx {
        nonce: fields.u64("nonce")?,
        gas_price: fields.uint("gasPrice")?,
        gas_limit: fields.u64("gas")?,
        to: fields.to()?,
        value: fields.uint("value")?,
        data: fields.data()?,
        chain_id: U256::zero(),
    };
    let signature = fields.signature()?;
    fields.finish()?;

    tx.chain_id = Signature::legacy_chain_id(&signature.v)?;
    Ok(SignedTransaction::new(tx.into(), signature))
}

fn decode_fee_market(bytes: &[u8]) -> Result<SignedTransaction, TxError> {
    let mut reader = RlpReader::new(bytes);
    reader.enter_list()?;
    let mut fields = Fields {
        reader: &mut reader,
    };

    let chain_id = fields.uint("chainID")?;
    let nonce = fields.u64("nonce")?;
    let max_priority_fee_per_gas = fields.uint("gasTipCap")?;
    let max_fee_per_gas = fields.uint("gasFeeCap")?;
    let gas_limit = fields.u64("gas")?;
    let to = fields.to()?;
    let value = fields.uint("value")?;
    let data = fields.data()?;
    let access_list = AccessList::rlp_decode(fields.reader).map_err(|e| match e {
        TxError::Rlp(RlpError::EndOfList) => {
            TxError::MalformedInput("transaction ends before accessList".to_string())
        }
        other => other,
    })?;
    let signature = fields.signature()?;
    if signature.v > U256::one() {
        return Err(TxError::invalid("yParity", format!("must be 0 or 1, got {}", signature.v)));
    }
    fields.finish()?;

    let tx = FeeMarketTx {
        chain_id,
        nonce,
        max_priority_fee_per_gas,
        max_fee_per_gas,
        gas_limit,
        to,
        value,
        data,
        access_list,
    };
    Ok(SignedTransaction::new(tx.into(), signature))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signer::LocalSigner;

    fn eip155_tx() -> LegacyTx {
        LegacyTx {
            chain_id: U256::one(),
            nonce: 9,
            gas_price: U256::from(20_000_000_000u64),
            gas_limit: 21_000,
            to: Some(H160::repeat_byte(0x35)),
            value: U256::exp10(18),
            data: vec![],
        }
    }

    #[test]
    fn test_eip155_reference_signature() {
        let signer = LocalSigner::from_bytes(&[0x46; 32]).unwrap();
        let signed = sign(eip155_tx().into(), &signer).unwrap();
        assert_eq!(signed.signature().v, U256::from(37));
        assert_eq!(
            hex::encode(signed.serialize()),
            "f86c098504a817c800825208943535353535353535353535353535353535353535880de0b6b3a76400008025a028ef61340bd939bc2195fe537567866003e1a15d3c71ff63e1590620aa636276a067cbe9d8997f761aecb703304b3800ccf555c9f3dc64214b297fb1966a3b6d83"
        );
        assert_eq!(signed.recover_sender().unwrap(), signer.address());
    }

    #[test]
    fn test_decode_rejects_empty_and_bad_prefix() {
        assert!(matches!(
            SignedTransaction::decode(&[]),
            Err(TxError::MalformedInput(_))
        ));
        assert!(matches!(
            SignedTransaction::decode(&[0x83, 0x01, 0x02, 0x03]),
            Err(TxError::MalformedInput(_))
        ));
        assert_eq!(
            SignedTransaction::decode(&[0x01, 0xc0]),
            Err(TxError::UnsupportedTxType(1))
        );
        assert_eq!(
            SignedTransaction::decode(&[0x00, 0xc0]),
            Err(TxError::UnsupportedTxType(0))
        );
    }

    #[test]
    fn test_decode_rejects_trailing_bytes() {
        let signer = LocalSigner::from_bytes(&[0x46; 32]).unwrap();
        let mut bytes = sign(eip155_tx().into(), &signer).unwrap().serialize();
        bytes.push(0x80);
        let err = SignedTransaction::decode(&bytes).unwrap_err();
        assert!(matches!(err, TxError::MalformedInput(msg) if msg.contains("trailing")));
    }

    #[test]
    fn test_decode_rejects_short_list() {
        // legacy list holding only a nonce
        let err = SignedTransaction::decode(&[0xc1, 0x09]).unwrap_err();
        assert!(matches!(err, TxError::MalformedInput(msg) if msg.contains("gasPrice")));
    }

    #[test]
    fn test_decode_rejects_y_parity_above_one() {
        let signer = LocalSigner::from_bytes(&[0x46; 32]).unwrap();
        let tx = FeeMarketTx {
            chain_id: U256::one(),
            nonce: 0,
            max_priority_fee_per_gas: U256::from(1_000_000_000u64),
            max_fee_per_gas: U256::from(15_000_000_000u64),
            gas_limit: 21_000,
            to: Some(H160::repeat_byte(0x35)),
            value: U256::one(),
            data: vec![],
            access_list: AccessList::default(),
        };
        let good = sign(tx.into(), &signer).unwrap();
        assert_eq!(SignedTransaction::decode(&good.serialize()).unwrap(), good);

        let bad = SignedTransaction::new(
            good.envelope().clone(),
            Signature {
                v: U256::from(5),
                ..*good.signature()
            },
        );
        let err = SignedTransaction::decode(&bad.serialize()).unwrap_err();
        assert!(matches!(err, TxError::InvalidFieldValue { ref field, .. } if field == "yParity"));
        assert_eq!(err.kind(), rawtx_primitives::ErrorKind::InvalidFieldValue);
    }

    #[test]
    fn test_legacy_without_chain_id() {
        let signer = LocalSigner::from_bytes(&[0x46; 32]).unwrap();
        let tx = LegacyTx {
            chain_id: U256::zero(),
            ..eip155_tx()
        };
        let signed = sign(tx.into(), &signer).unwrap();
        let v = signed.signature().v;
        assert!(v == U256::from(27) || v == U256::from(28));

        let decoded = SignedTransaction::decode(&signed.serialize()).unwrap();
        assert_eq!(decoded, signed);
        assert_eq!(decoded.recover_sender().unwrap(), signer.address());
    }
}
