//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// Explicit run configuration (C7, ambient): built once in `main` from CLI
// flags with environment-variable fallback (`dotenv`-loaded), then threaded
// down into the binary's run function. Nothing in the core reads `std::env`
// directly.
//--------------------------------------------------------------------------------------------------

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use dotenv::dotenv;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Json,
    Pretty,
}

/// Batch-run configuration: where to read commands from, where to write the
/// two output documents, and how to configure logging. Constructed once in
/// `main` and never consulted again — the engine itself holds no global state.
#[derive(Debug, Parser, Clone)]
#[command(name = "limit-match-engine", about = "Batch-mode limit order matching engine")]
pub struct Config {
    /// Path to the input JSON array of order commands.
    #[arg(long, env = "ENGINE_INPUT")]
    pub input: PathBuf,

    /// Path to write the resulting order-book document.
    #[arg(long, env = "ENGINE_BOOK_OUT")]
    pub book_out: PathBuf,

    /// Path to write the resulting trades document.
    #[arg(long, env = "ENGINE_TRADES_OUT")]
    pub trades_out: PathBuf,

    /// Logging level.
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_level: LogLevel,

    /// Logging output format.
    #[arg(long, env = "ENGINE_LOG_FORMAT", default_value = "pretty")]
    pub log_format: LogFormat,
}

impl Config {
    /// Loads a `.env` file if present (CLI flags always take precedence over
    /// anything it sets), then parses CLI args and environment fallbacks.
    pub fn from_env() -> Config {
        dotenv().ok();
        Config::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_required_paths_and_defaults_log_settings() {
        let config = Config::parse_from([
            "limit-match-engine",
            "--input",
            "in.json",
            "--book-out",
            "book.json",
            "--trades-out",
            "trades.json",
        ]);
        assert_eq!(config.input, PathBuf::from("in.json"));
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_accepts_explicit_log_level_and_format() {
        let config = Config::parse_from([
            "limit-match-engine",
            "--input",
            "in.json",
            "--book-out",
            "book.json",
            "--trades-out",
            "trades.json",
            "--log-level",
            "debug",
            "--log-format",
            "json",
        ]);
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.log_level.as_filter(), "debug");
    }
}
