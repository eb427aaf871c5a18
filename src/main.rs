//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// CLI entry point (C7): parses startup configuration, initializes structured
// logging, reads the input command document, runs one batch to completion,
// and writes the two output documents. Exit code 0 on success, non-zero on
// any uncaught error.
//--------------------------------------------------------------------------------------------------

use limit_match_engine::config::{Config, LogFormat};
use limit_match_engine::io::{read_commands, write_book_document, write_trades_document};
use limit_match_engine::service::OrderBookService;

fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_new(config.log_level.as_filter())
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);
    match config.log_format {
        LogFormat::Json => subscriber.json().init(),
        LogFormat::Pretty => subscriber.init(),
    }
}

fn run(config: Config) -> anyhow::Result<()> {
    let commands = read_commands(&config.input)?;
    tracing::info!(count = commands.len(), "loaded order commands");

    let mut service = OrderBookService::new();
    service.process_all(commands)?;

    write_book_document(&config.book_out, service.books())?;
    write_trades_document(&config.trades_out, service.trades())?;
    tracing::info!(
        trades = service.trades().len(),
        pairs = service.books().len(),
        "batch run complete"
    );

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    init_logging(&config);
    run(config)
}
