//! Interactive builder session.
//!
//! The session alternates between waiting for a key source and waiting for
//! operation lines. [`step`] is the transition function; [`run_session`]
//! drives it over a line reader and renders prompts and results.

use crate::config::WalletConfig;
use crate::errors::Result;
use crate::key_source::KeySource;
use colored::Colorize;
use rawtx_primitives::{to_checksum, H160, H256};
use rawtx_transaction::{sign, LocalSigner, TokenRegistry, TxRequest, TxSigner};
use std::io::{BufRead, Write};
use tracing::{info, warn};

pub const KEY_SOURCE_PROMPT: &str = "% Create your wallet:\n> ";
pub const OPERATION_PROMPT: &str =
    "% Operation:\n(nonce, gas, gasTipCap, gasFeeCap, chainID, to, amount, token)\n> ";

const RESTART: &str = "restart";

#[derive(Debug)]
pub enum SessionState {
    AwaitingKeySource,
    AwaitingOperation(LocalSigner),
}

impl SessionState {
    pub fn prompt(&self) -> &'static str {
        match self {
            SessionState::AwaitingKeySource => KEY_SOURCE_PROMPT,
            SessionState::AwaitingOperation(_) => OPERATION_PROMPT,
        }
    }
}

/// Result of feeding one line to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    Restarted,
    WalletOpened {
        address: H160,
        /// Mnemonic index when it is not 0.
        index: Option<u32>,
        /// Set only when the config asks for derived keys.
        private_key: Option<[u8; 32]>,
    },
    /// Blank operation line.
    Reprompt,
    Signed { raw: Vec<u8>, hash: H256 },
    Failed(String),
}

pub struct SessionContext {
    pub config: WalletConfig,
    pub tokens: TokenRegistry,
}

impl SessionContext {
    pub fn new(config: WalletConfig) -> Result<Self> {
        let tokens = config.token_registry()?;
        Ok(Self { config, tokens })
    }
}

pub fn step(state: SessionState, line: &str, ctx: &SessionContext) -> (SessionState, Output) {
    let line = line.trim();
    if line == RESTART {
        return (SessionState::AwaitingKeySource, Output::Restarted);
    }

    match state {
        SessionState::AwaitingKeySource => match open_wallet(line, ctx) {
            Ok((signer, output)) => (SessionState::AwaitingOperation(signer), output),
            Err(e) => (SessionState::AwaitingKeySource, Output::Failed(e.to_string())),
        },
        SessionState::AwaitingOperation(signer) => {
            if line.is_empty() {
                return (SessionState::AwaitingOperation(signer), Output::Reprompt);
            }
            let output = match build_and_sign(line, &signer, &ctx.tokens) {
                Ok(output) => output,
                Err(e) => {
                    warn!(error = %e, "Rejected operation");
                    Output::Failed(e.to_string())
                }
            };
            (SessionState::AwaitingOperation(signer), output)
        }
    }
}

fn open_wallet(line: &str, ctx: &SessionContext) -> Result<(LocalSigner, Output)> {
    let source: KeySource = line.parse()?;
    let signer = source.resolve(&ctx.config)?;

    let index = source.index().filter(|index| *index != 0);
    let private_key = match source {
        KeySource::Mnemonic { .. } if ctx.config.show_derived_keys => Some(signer.secret_bytes()),
        _ => None,
    };
    let output = Output::WalletOpened {
        address: signer.address(),
        index,
        private_key,
    };
    Ok((signer, output))
}

fn build_and_sign(line: &str, signer: &LocalSigner, tokens: &TokenRegistry) -> Result<Output> {
    let envelope = TxRequest::parse(line)?.build_unsigned(tokens)?;
    let signed = sign(envelope, signer)?;
    let hash = signed.hash();
    info!(hash = %hex::encode(hash.as_bytes()), tx_type = ?signed.tx_type(), "Signed transaction");
    Ok(Output::Signed {
        raw: signed.serialize(),
        hash,
    })
}

/// Text printed for `output`, not including the next prompt.
pub fn render(output: &Output) -> String {
    match output {
        Output::Restarted | Output::Reprompt => String::new(),
        Output::WalletOpened {
            address,
            index,
            private_key,
        } => {
            let mut text = String::new();
            if let Some(index) = index {
                text.push_str(&format!("Index: {}", index));
                if let Some(key) = private_key {
                    text.push_str(&format!("  Private key: 0x{}", hex::encode(key)));
                }
                text.push('\n');
            } else if let Some(key) = private_key {
                text.push_str(&format!("Private key: 0x{}\n", hex::encode(key)));
            }
            text.push_str(&format!("{} {}\n", "Opened Wallet:".green(), to_checksum(address)));
            text
        }
        Output::Signed { raw, .. } => format!("\n0x{}\n\n", hex::encode(raw)),
        Output::Failed(message) => format!("{} {}\n", "err:".red(), message),
    }
}

/// Run the prompt loop until `input` is exhausted.
///
/// `key_source` is treated as the first line of input when given.
pub fn run_session<R: BufRead, W: Write>(
    input: R,
    out: &mut W,
    ctx: &SessionContext,
    key_source: Option<&str>,
) -> Result<()> {
    let mut state = SessionState::AwaitingKeySource;
    if let Some(line) = key_source {
        state = feed(state, line, out, ctx)?;
    } else {
        write!(out, "{}", state.prompt())?;
    }
    out.flush()?;

    for line in input.lines() {
        state = feed(state, &line?, out, ctx)?;
        out.flush()?;
    }
    Ok(())
}

fn feed<W: Write>(
    state: SessionState,
    line: &str,
    out: &mut W,
    ctx: &SessionContext,
) -> Result<SessionState> {
    let (next, output) = step(state, line, ctx);
    write!(out, "{}", render(&output))?;
    match output {
        Output::Reprompt => write!(out, "> ")?,
        _ => write!(out, "{}", next.prompt())?,
    }
    Ok(next)
}
