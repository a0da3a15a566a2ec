//! Logging setup for the wallet binary.
//!
//! Logs always go to stderr; stdout carries the session transcript.
//!
//! Environment variables:
//! - `RUST_LOG`: filter, e.g. `warn,rawtx_transaction=debug`
//! - `LOG_FORMAT`: `pretty` or `compact`
//! - `LOG_ANSI`: `true` or `false`

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "warn";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    /// Single line per event
    Compact,
}

impl LogFormat {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "compact" => LogFormat::Compact,
            _ => LogFormat::Pretty,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// `EnvFilter` directives.
    pub filter: String,
    pub format: LogFormat,
    pub ansi_colors: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_FILTER.to_string(),
            format: LogFormat::Compact,
            ansi_colors: true,
        }
    }
}

impl LogConfig {
    pub fn from_env() -> Self {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(rust_log) = var("RUST_LOG").filter(|f| !f.trim().is_empty()) {
            config.filter = rust_log;
        }
        if let Some(format) = var("LOG_FORMAT") {
            config.format = LogFormat::parse(&format);
        }
        if let Some(ansi) = var("LOG_ANSI") {
            config.ansi_colors = ansi.trim().eq_ignore_ascii_case("true");
        }

        config
    }

    fn build_filter(&self) -> EnvFilter {
        EnvFilter::new(&self.filter)
    }
}

pub fn init_logging(config: &LogConfig) -> anyhow::Result<()> {
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(config.ansi_colors)
        .with_target(true);

    let registry = tracing_subscriber::registry().with(config.build_filter());
    let result = match config.format {
        LogFormat::Pretty => registry.with(layer.pretty()).try_init(),
        LogFormat::Compact => registry.with(layer.compact()).try_init(),
    };
    result.map_err(|e| anyhow::anyhow!("Failed to init logging: {}", e))
}
