use crate::errors::{Result, WalletError};
use crate::hd::{DerivationPath, DEFAULT_ACCOUNT_PATH};
use rawtx_transaction::{TokenRegistry, DEFAULT_TOKENS};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalletConfig {
    /// Account path for `m/` key sources; the index is appended to it.
    pub derivation_path: String,
    /// Token symbol to contract address.
    pub tokens: BTreeMap<String, String>,
    /// Print derived private keys when a wallet is opened.
    pub show_derived_keys: bool,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            derivation_path: DEFAULT_ACCOUNT_PATH.to_string(),
            tokens: DEFAULT_TOKENS
                .iter()
                .map(|(symbol, address)| (symbol.to_string(), address.to_string()))
                .collect(),
            show_derived_keys: false,
        }
    }
}

impl WalletConfig {
    /// Load from `path`, or from the default location when `None`.
    ///
    /// A missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = Self::resolve_path(path)?;
        if !path.exists() {
            debug!(path = %path.display(), "No wallet config, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .map_err(|e| WalletError::Config(format!("Failed to read {:?}: {}", path, e)))?;
        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| WalletError::Config(format!("Failed to parse {:?}: {}", path, e)))?;
        // Surface bad entries at load time rather than on first use.
        config.account_path()?;
        config.token_registry()?;

        info!(path = %path.display(), "Loaded wallet config");
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Write the default config, refusing to replace an existing file
    /// unless `force` is set. Returns the path written.
    pub fn init(path: Option<&Path>, force: bool) -> Result<PathBuf> {
        let path = Self::resolve_path(path)?;
        if path.exists() && !force {
            return Err(WalletError::Config(format!(
                "Config already exists at {:?}. Use --force to overwrite",
                path
            )));
        }
        Self::default().save(&path)?;
        info!(path = %path.display(), "Wrote default wallet config");
        Ok(path)
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".rawtx").join("wallet.json"))
    }

    fn resolve_path(path: Option<&Path>) -> Result<PathBuf> {
        path.map(PathBuf::from)
            .or_else(Self::default_path)
            .ok_or_else(|| WalletError::Config("Unable to determine config path".to_string()))
    }

    pub fn token_registry(&self) -> Result<TokenRegistry> {
        TokenRegistry::from_entries(self.tokens.iter().map(|(k, v)| (k.clone(), v)))
            .map_err(|e| WalletError::Config(e.to_string()))
    }

    pub fn account_path(&self) -> Result<DerivationPath> {
        self.derivation_path
            .parse()
            .map_err(|e: WalletError| WalletError::Config(e.to_string()))
    }
}
