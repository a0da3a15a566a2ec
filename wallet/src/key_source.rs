//! Key source lines: `p/<hex>`, `f/<path>` and `m/<mnemonic>[/<index>]`.

use crate::config::WalletConfig;
use crate::errors::{Result, WalletError};
use crate::hd::derive_account_key;
use rawtx_primitives::to_checksum;
use rawtx_transaction::{LocalSigner, TxSigner};
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::info;

#[derive(Clone, PartialEq, Eq)]
pub enum KeySource {
    /// Hex private key, with or without `0x`.
    PrivateKey(String),
    /// File holding a hex private key.
    KeyFile(PathBuf),
    Mnemonic { phrase: String, index: u32 },
}

impl KeySource {
    pub fn kind(&self) -> &'static str {
        match self {
            KeySource::PrivateKey(_) => "private-key",
            KeySource::KeyFile(_) => "key-file",
            KeySource::Mnemonic { .. } => "mnemonic",
        }
    }

    /// Derivation index for mnemonic sources.
    pub fn index(&self) -> Option<u32> {
        match self {
            KeySource::Mnemonic { index, .. } => Some(*index),
            _ => None,
        }
    }

    pub fn resolve(&self, config: &WalletConfig) -> Result<LocalSigner> {
        let signer = match self {
            KeySource::PrivateKey(key) => LocalSigner::from_hex(key)?,
            KeySource::KeyFile(path) => {
                let contents = fs::read_to_string(path).map_err(|source| WalletError::KeyFile {
                    path: path.clone(),
                    source,
                })?;
                LocalSigner::from_hex(&contents)?
            }
            KeySource::Mnemonic { phrase, index } => {
                let path = config.account_path()?;
                LocalSigner::from_secret_key(derive_account_key(phrase, &path, *index)?)
            }
        };

        info!(
            source = self.kind(),
            address = %to_checksum(&signer.address()),
            "Opened wallet"
        );
        Ok(signer)
    }
}

impl FromStr for KeySource {
    type Err = WalletError;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        if let Some(key) = line.strip_prefix("p/") {
            return Ok(KeySource::PrivateKey(key.to_string()));
        }
        if let Some(path) = line.strip_prefix("f/") {
            if path.is_empty() {
                return Err(WalletError::InvalidKeySource("f/ needs a file path".to_string()));
            }
            return Ok(KeySource::KeyFile(PathBuf::from(path)));
        }
        if let Some(rest) = line.strip_prefix("m/") {
            let mut parts = rest.split('/');
            let phrase = parts.next().unwrap_or_default().trim().to_string();
            let index = match parts.next() {
                None => 0,
                Some(index) => index.trim().parse().map_err(|_| {
                    WalletError::InvalidKeySource(format!("bad derivation index {:?}", index))
                })?,
            };
            if parts.next().is_some() {
                return Err(WalletError::InvalidKeySource(
                    "use m/<mnemonic>/<index>".to_string(),
                ));
            }
            return Ok(KeySource::Mnemonic { phrase, index });
        }
        Err(WalletError::InvalidKeySource(
            "expected p/<key>, f/<path> or m/<mnemonic>[/<index>]".to_string(),
        ))
    }
}

impl fmt::Debug for KeySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeySource::PrivateKey(_) => f.write_str("PrivateKey(<redacted>)"),
            KeySource::KeyFile(path) => f.debug_tuple("KeyFile").field(path).finish(),
            KeySource::Mnemonic { index, .. } => f
                .debug_struct("Mnemonic")
                .field("phrase", &"<redacted>")
                .field("index", index)
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rawtx_primitives::ErrorKind;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const KEY: &str = "9d542624d9ef903daa81bfc3ba224ac15f3b55cd2bc5b09779b258d9fa753296";
    const MNEMONIC: &str =
        "sound company scorpion ceiling museum edge keen diary bargain lake duty rapid";

    fn open(line: &str) -> Result<String> {
        let source: KeySource = line.parse()?;
        let signer = source.resolve(&WalletConfig::default())?;
        Ok(to_checksum(&signer.address()))
    }

    #[test]
    fn test_parse_sources() {
        assert_eq!(
            "p/0xabc".parse::<KeySource>().unwrap(),
            KeySource::PrivateKey("0xabc".to_string())
        );
        assert_eq!(
            "f//tmp/key".parse::<KeySource>().unwrap(),
            KeySource::KeyFile(PathBuf::from("/tmp/key"))
        );
        let source: KeySource = format!("m/{}/10", MNEMONIC).parse().unwrap();
        assert_eq!(source.index(), Some(10));
        assert_eq!("m/a b c".parse::<KeySource>().unwrap().index(), Some(0));
    }

    #[test]
    fn test_parse_rejects() {
        for line in ["", "x/abc", "f/", "m/words/ten", "m/words/1/2", "m/words/-1"] {
            let err = line.parse::<KeySource>().unwrap_err();
            assert_eq!(err.kind(), ErrorKind::KeySourceError, "{:?}", line);
        }
    }

    #[test]
    fn test_private_key_source() {
        assert_eq!(
            open(&format!("p/{}", KEY)).unwrap(),
            "0xfd94748666E47A0a1E6baE17eC72429390C66348"
        );
        assert_eq!(
            open(&format!("p/0x{}", KEY)).unwrap(),
            "0xfd94748666E47A0a1E6baE17eC72429390C66348"
        );
    }

    #[test]
    fn test_key_file_source() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", KEY).unwrap();
        let line = format!("f/{}", file.path().display());
        assert_eq!(open(&line).unwrap(), "0xfd94748666E47A0a1E6baE17eC72429390C66348");

        let err = open("f//definitely/not/here").unwrap_err();
        assert!(matches!(err, WalletError::KeyFile { .. }));
        assert_eq!(err.kind(), ErrorKind::KeySourceError);
    }

    #[test]
    fn test_mnemonic_source() {
        assert_eq!(
            open(&format!("m/{}", MNEMONIC)).unwrap(),
            "0x0475F0d4a405A79b58f302BD22ECbdAF35B1759e"
        );
        assert_eq!(
            open(&format!("m/{}/10", MNEMONIC)).unwrap(),
            "0x81aD3882bF1DCBeFe6dEF162a51670a6993BF85f"
        );
    }

    #[test]
    fn test_bad_keys_are_key_source_errors() {
        for line in ["p/1234", "p/zz", "m/not a valid mnemonic at all"] {
            let err = open(line).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::KeySourceError, "{}", line);
        }
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let source: KeySource = format!("p/{}", KEY).parse().unwrap();
        assert!(!format!("{:?}", source).contains(KEY));
        let source: KeySource = format!("m/{}/3", MNEMONIC).parse().unwrap();
        assert!(!format!("{:?}", source).contains("scorpion"));
    }
}
