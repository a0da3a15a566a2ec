use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use rawtx_wallet::{init_logging, run_session, LogConfig, SessionContext, WalletConfig};
use std::io::{self, IsTerminal};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "wallet",
    version,
    about = "Build and sign Ethereum transactions from key=value lines",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file path
    #[arg(short, long, global = true, env = "WALLET_CONFIG")]
    config: Option<PathBuf>,

    /// Key source (p/<hex>, f/<path> or m/<mnemonic>[/<index>]) used instead of the first prompt
    #[arg(short, long)]
    key: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the default configuration
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&LogConfig::from_env())?;
    if !io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    match cli.command {
        Some(Commands::Init { force }) => {
            let path = WalletConfig::init(cli.config.as_deref(), force)?;
            println!("{} {}", "Wrote config to".green(), path.display());
        }
        None => {
            let config = WalletConfig::load(cli.config.as_deref())?;
            let ctx = SessionContext::new(config)?;
            let stdin = io::stdin();
            let mut stdout = io::stdout();
            run_session(stdin.lock(), &mut stdout, &ctx, cli.key.as_deref())?;
        }
    }

    Ok(())
}
