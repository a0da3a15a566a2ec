//! BIP-32 secp256k1 derivation from a BIP-39 mnemonic.

use crate::errors::{Result, WalletError};
use bip39::{Language, Mnemonic};
use hmac::{Hmac, Mac};
use secp256k1::{All, PublicKey, Scalar, Secp256k1, SecretKey};
use sha2::Sha512;
use std::fmt;
use std::str::FromStr;

type HmacSha512 = Hmac<Sha512>;

pub const HARDENED_OFFSET: u32 = 0x8000_0000;
const MASTER_KEY: &[u8] = b"Bitcoin seed";

/// `m/44'/60'/0'/0`, to which the account index is appended.
pub const DEFAULT_ACCOUNT_PATH: &str = "m/44'/60'/0'/0";

/// Sequence of child indices; hardened ones carry [`HARDENED_OFFSET`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivationPath(Vec<u32>);

impl DerivationPath {
    pub fn indices(&self) -> &[u32] {
        &self.0
    }

    /// Append a non-hardened child index.
    pub fn child(&self, index: u32) -> Result<Self> {
        if index >= HARDENED_OFFSET {
            return Err(WalletError::InvalidDerivationPath(format!(
                "index {} is out of range",
                index
            )));
        }
        let mut indices = self.0.clone();
        indices.push(index);
        Ok(DerivationPath(indices))
    }
}

impl FromStr for DerivationPath {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.trim().split('/');
        if parts.next() != Some("m") {
            return Err(WalletError::InvalidDerivationPath(format!(
                "{:?} must start with m/",
                s
            )));
        }

        let mut indices = Vec::new();
        for part in parts {
            let (digits, hardened) = match part.strip_suffix('\'').or_else(|| part.strip_suffix('h')) {
                Some(digits) => (digits, true),
                None => (part, false),
            };
            let index: u32 = digits
                .parse()
                .ok()
                .filter(|i| *i < HARDENED_OFFSET)
                .ok_or_else(|| WalletError::InvalidDerivationPath(format!("bad component {:?}", part)))?;
            indices.push(if hardened { index | HARDENED_OFFSET } else { index });
        }
        Ok(DerivationPath(indices))
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m")?;
        for index in &self.0 {
            if index & HARDENED_OFFSET != 0 {
                write!(f, "/{}'", index & !HARDENED_OFFSET)?;
            } else {
                write!(f, "/{}", index)?;
            }
        }
        Ok(())
    }
}

/// Private key plus chain code at one node of the tree.
#[derive(Clone)]
pub struct ExtendedKey {
    secret: SecretKey,
    chain_code: [u8; 32],
}

impl ExtendedKey {
    pub fn master(seed: &[u8]) -> Result<Self> {
        let (secret, chain_code) = hmac_split(MASTER_KEY, &[seed])?;
        let secret = SecretKey::from_slice(&secret).map_err(|e| WalletError::Derivation(e.to_string()))?;
        Ok(Self { secret, chain_code })
    }

    pub fn derive_child(&self, secp: &Secp256k1<All>, index: u32) -> Result<Self> {
        let index_bytes = index.to_be_bytes();
        let (tweak, chain_code) = if index >= HARDENED_OFFSET {
            hmac_split(
                &self.chain_code,
                &[&[0u8][..], &self.secret.secret_bytes()[..], &index_bytes[..]],
            )?
        } else {
            let public = PublicKey::from_secret_key(secp, &self.secret);
            hmac_split(&self.chain_code, &[&public.serialize()[..], &index_bytes[..]])?
        };

        let tweak = Scalar::from_be_bytes(tweak)
            .map_err(|_| WalletError::Derivation(format!("child {} is out of range", index)))?;
        let secret = self
            .secret
            .add_tweak(&tweak)
            .map_err(|e| WalletError::Derivation(e.to_string()))?;
        Ok(Self { secret, chain_code })
    }

    pub fn derive_path(seed: &[u8], path: &DerivationPath) -> Result<Self> {
        let secp = Secp256k1::new();
        path.indices()
            .iter()
            .try_fold(Self::master(seed)?, |key, index| key.derive_child(&secp, *index))
    }

    pub fn secret_key(&self) -> &SecretKey {
        &self.secret
    }
}

fn hmac_split(key: &[u8], parts: &[&[u8]]) -> Result<([u8; 32], [u8; 32])> {
    let mut mac = <HmacSha512 as Mac>::new_from_slice(key)
        .map_err(|e| WalletError::Derivation(format!("HMAC initialization failed: {}", e)))?;
    for part in parts {
        mac.update(part);
    }
    let result = mac.finalize().into_bytes();

    let mut left = [0u8; 32];
    let mut right = [0u8; 32];
    left.copy_from_slice(&result[..32]);
    right.copy_from_slice(&result[32..]);
    Ok((left, right))
}

/// BIP-39 seed of an English mnemonic with an empty passphrase.
pub fn mnemonic_to_seed(phrase: &str) -> Result<[u8; 64]> {
    let mnemonic = Mnemonic::parse_in_normalized(Language::English, phrase.trim())
        .map_err(|e| WalletError::InvalidMnemonic(e.to_string()))?;
    Ok(mnemonic.to_seed(""))
}

/// Private key at `path/index` for `phrase`.
pub fn derive_account_key(phrase: &str, path: &DerivationPath, index: u32) -> Result<SecretKey> {
    let seed = mnemonic_to_seed(phrase)?;
    let key = ExtendedKey::derive_path(&seed, &path.child(index)?)?;
    Ok(*key.secret_key())
}
