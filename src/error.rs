use thiserror::Error;
use crate::types::balance::Balance;
use crate::types::ids::{PairSymbol, TokenId};
use crate::types::price::Price;
use crate::types::quantity::Quantity;
use rust_decimal::Decimal;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // Configuration / registry errors
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Pair not found: {0}")]
    PairNotFound(PairSymbol),

    #[error("No active pair set")]
    NoActivePairSet,

    // Account errors
    #[error("Invalid balance for {token}: {balance}")]
    InvalidBalance {
        token: TokenId,
        balance: Decimal,
    },

    // Boundary errors
    #[error("Invalid numeric format for {field}: {value:?}")]
    InvalidNumericFormat {
        field: String,
        value: String,
    },

    #[error("Serialization error: {0}")]
    SerializationError(String),

    // Order book errors
    #[error("Insufficient liquidity: requested={requested}, available={available}")]
    InsufficientLiquidity {
        requested: Decimal,
        available: Decimal,
    },

    #[error("Crossed book: best_bid={best_bid}, best_ask={best_ask}")]
    CrossedBook {
        best_bid: Price,
        best_ask: Price,
    },

    // Sizing errors
    #[error("Below minimum size: quantity={quantity}, min={min}")]
    BelowMinimumSize {
        quantity: Quantity,
        min: Quantity,
    },

    #[error("Exceeds max notional: notional={notional}, max={max}")]
    ExceedsMaxNotional {
        notional: Balance,
        max: Balance,
    },

    #[error("Insufficient balance: required={required}, available={available}")]
    InsufficientBalance {
        required: Balance,
        available: Balance,
    },

    // Arithmetic errors
    #[error("Overflow in {operation}")]
    Overflow { operation: &'static str },

    #[error("Division by zero")]
    DivisionByZero,

    // System errors
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl Error {
    /// Stable code for the boundary envelope and metric labels.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::InvalidConfig(_) => "invalid_config",
            Error::PairNotFound(_) => "pair_not_found",
            Error::NoActivePairSet => "no_active_pair_set",
            Error::InvalidBalance { .. } => "invalid_balance",
            Error::InvalidNumericFormat { .. } => "invalid_numeric_format",
            Error::SerializationError(_) => "serialization_error",
            Error::InsufficientLiquidity { .. } => "insufficient_liquidity",
            Error::CrossedBook { .. } => "crossed_book",
            Error::BelowMinimumSize { .. } => "below_minimum_size",
            Error::ExceedsMaxNotional { .. } => "exceeds_max_notional",
            Error::InsufficientBalance { .. } => "insufficient_balance",
            Error::Overflow { .. } => "overflow",
            Error::DivisionByZero => "division_by_zero",
            Error::ConfigError(_) => "config_error",
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::SerializationError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
