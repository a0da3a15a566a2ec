//! `deraw`: decode raw transaction hex into readable fields.

use anyhow::{Context, Result};
use clap::Parser;
use rawtx_decoder::{DecoderConfig, StreamEvent, TxStream};
use rawtx_primitives::{decode_hex, to_checksum};
use rawtx_transaction::SignedTransaction;
use std::io::Write;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(
    name = "deraw",
    version,
    about = "Decodes a raw transaction and prints it in readable form",
    long_about = None
)]
pub struct Args {
    /// Hex of the raw transaction, with or without 0x
    #[arg(long)]
    pub raw: String,

    /// Print RLP parts while they are decoded
    #[arg(long)]
    pub verbose: bool,

    /// Also decode into a typed transaction and recover its sender
    #[arg(long)]
    pub strict: bool,

    /// Log verbosity (-v warn, -vv info, -vvv debug, -vvvv trace)
    #[arg(short = 'v', action = clap::ArgAction::Count)]
    pub log_level: u8,
}

impl Args {
    pub fn log_filter(&self) -> &'static str {
        match self.log_level {
            0 => "error",
            1 => "warn",
            2 => "info",
            3 => "debug",
            _ => "trace",
        }
    }
}

/// Decode `args.raw` and write the dump to `out`.
///
/// Output written before an error is left in place.
pub fn run<W: Write>(args: &Args, out: &mut W) -> Result<()> {
    let bytes = decode_hex(args.raw.trim()).context("raw tx is not valid hex")?;
    let config = DecoderConfig {
        verbose: args.verbose,
    };

    let mut count = 0usize;
    for item in TxStream::new(&bytes, config) {
        let item = item?;
        write!(out, "{}", item.trace)?;
        match item.event {
            StreamEvent::TypeTag(tag) => debug!(tag, "Type tag"),
            StreamEvent::Transaction(view) => {
                count += 1;
                write!(out, "{}", view)?;
            }
        }
    }
    info!(transactions = count, "Decoded stream");

    if args.strict {
        let tx = SignedTransaction::decode(&bytes).context("strict decode failed")?;
        writeln!(out, "{:#?}", tx)?;
        writeln!(out, " hash\t\t\t\t= 0x{}", hex::encode(tx.hash().as_bytes()))?;
        let sender = tx.recover_sender().context("sender recovery failed")?;
        writeln!(out, " sender\t\t\t\t= {}", to_checksum(&sender))?;
    }

    Ok(())
}
