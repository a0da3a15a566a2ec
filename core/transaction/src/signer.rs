use crate::error::TxError;
use crate::signature::RawSignature;
use rawtx_primitives::{decode_hex, keccak256, H160, H256};
use secp256k1::ecdsa::{RecoverableSignature, RecoveryId};
use secp256k1::{All, Message, PublicKey, Secp256k1, SecretKey};
use std::fmt;

/// Anything that can produce recoverable secp256k1 signatures over a digest.
pub trait TxSigner {
    /// Address controlled by this signer.
    fn address(&self) -> H160;

    /// Sign a 32-byte digest. Must be deterministic (RFC 6979).
    fn sign_hash(&self, hash: &H256) -> Result<RawSignature, TxError>;
}

/// In-memory secp256k1 private key.
#[derive(Clone)]
pub struct LocalSigner {
    secp: Secp256k1<All>,
    secret: SecretKey,
    address: H160,
}

impl LocalSigner {
    pub fn from_secret_key(secret: SecretKey) -> Self {
        let secp = Secp256k1::new();
        let public = PublicKey::from_secret_key(&secp, &secret);
        let address = public_key_to_address(&public);
        Self {
            secp,
            secret,
            address,
        }
    }

    /// Build from a 32-byte big-endian scalar.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TxError> {
        let secret = SecretKey::from_slice(bytes).map_err(|e| TxError::InvalidKey(e.to_string()))?;
        Ok(Self::from_secret_key(secret))
    }

    /// Build from hex text, with or without `0x`. Surrounding whitespace is ignored.
    pub fn from_hex(s: &str) -> Result<Self, TxError> {
        let bytes = decode_hex(s.trim()).map_err(|e| TxError::InvalidKey(e.to_string()))?;
        if bytes.len() != 32 {
            return Err(TxError::InvalidKey(format!(
                "expected 32 bytes, got {}",
                bytes.len()
            )));
        }
        Self::from_bytes(&bytes)
    }

    pub fn secret_bytes(&self) -> [u8; 32] {
        self.secret.secret_bytes()
    }

    pub fn public_key(&self) -> PublicKey {
        PublicKey::from_secret_key(&self.secp, &self.secret)
    }
}

impl fmt::Debug for LocalSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalSigner")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

impl TxSigner for LocalSigner {
    fn address(&self) -> H160 {
        self.address
    }

    fn sign_hash(&self, hash: &H256) -> Result<RawSignature, TxError> {
        let message = Message::from_slice(hash.as_bytes()).map_err(|e| TxError::Signing(e.to_string()))?;
        let signature = self.secp.sign_ecdsa_recoverable(&message, &self.secret);
        let (recovery_id, compact) = signature.serialize_compact();

        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&compact[..32]);
        s.copy_from_slice(&compact[32..]);
        Ok(RawSignature {
            r,
            s,
            recovery_id: recovery_id.to_i32() as u8,
        })
    }
}

/// Last 20 bytes of Keccak-256 over the uncompressed key without its `0x04` prefix.
pub fn public_key_to_address(public: &PublicKey) -> H160 {
    let uncompressed = public.serialize_uncompressed();
    let hash = keccak256(&uncompressed[1..]);
    H160::from_slice(&hash.as_bytes()[12..])
}

/// Recover the signing address from a digest and signature.
pub fn recover_address(hash: &H256, signature: &RawSignature) -> Result<H160, TxError> {
    let secp = Secp256k1::verification_only();
    let recovery_id =
        RecoveryId::from_i32(signature.recovery_id as i32).map_err(|e| TxError::invalid("v", e))?;

    let mut compact = [0u8; 64];
    compact[..32].copy_from_slice(&signature.r);
    compact[32..].copy_from_slice(&signature.s);
    let recoverable = RecoverableSignature::from_compact(&compact, recovery_id)
        .map_err(|e| TxError::invalid("signature", e))?;

    let message = Message::from_slice(hash.as_bytes()).map_err(|e| TxError::Signing(e.to_string()))?;
    let public = secp
        .recover_ecdsa(&message, &recoverable)
        .map_err(|e| TxError::invalid("signature", e))?;
    Ok(public_key_to_address(&public))
}
