use tracing::Span;
use tracing_subscriber::EnvFilter;
use crate::config::LoggingConfig;
use crate::error::{Error, Result};
use crate::types::ids::PairSymbol;
use crate::types::side::Side;

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| Error::ConfigError(e.to_string()))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    let installed = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    installed.map_err(|e| Error::ConfigError(e.to_string()))
}

pub fn trace_order_sizing(symbol: &PairSymbol, side: Side) -> Span {
    tracing::info_span!(
        "order_sizing",
        symbol = %symbol,
        side = ?side,
    )
}

pub fn trace_book_refresh(symbol: &PairSymbol) -> Span {
    tracing::debug_span!(
        "book_refresh",
        symbol = %symbol,
    )
}
