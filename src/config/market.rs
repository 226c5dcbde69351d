use serde::{Deserialize, Serialize};
use crate::config::fees::FeeSchedule;
use crate::error::{Error, Result};
use crate::types::balance::Balance;
use crate::types::ids::{PairSymbol, TokenId};
use crate::types::numeric::MAX_PRECISION;
use crate::types::quantity::Quantity;
use crate::types::ratio::Ratio;
use crate::types::side::Side;

/// Per-pair trading configuration, keyed by `symbol`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct PairConfig {
    pub symbol: PairSymbol,
    pub collateral_long_token: TokenId,
    pub collateral_short_token: TokenId,
    pub leverage: Ratio,
    pub max_notional: Balance,
    pub min_quantity_base: Quantity,
    pub margin_ratio: Ratio,
    pub taker_fee: Ratio,
    pub maker_fee: Ratio,
    pub base_token_precision: u32,
}

impl PairConfig {
    pub fn fees(&self) -> FeeSchedule {
        FeeSchedule {
            maker_fee_rate: self.maker_fee,
            taker_fee_rate: self.taker_fee,
        }
    }

    /// Collateral used when an order names no pay token.
    pub fn collateral_for(&self, side: Side) -> &TokenId {
        match side {
            Side::Buy => &self.collateral_long_token,
            Side::Sell => &self.collateral_short_token,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.symbol.is_empty() {
            return Err(Error::InvalidConfig("pair symbol must not be empty".to_string()));
        }
        if self.collateral_long_token.is_empty() || self.collateral_short_token.is_empty() {
            return Err(Error::InvalidConfig(format!(
                "{}: collateral tokens must not be empty",
                self.symbol
            )));
        }

        Self::validate_leverage(self.leverage, self.max_notional)?;

        if !self.min_quantity_base.is_positive() {
            return Err(Error::InvalidConfig(format!(
                "{}: min base quantity must be positive, got {}",
                self.symbol, self.min_quantity_base
            )));
        }
        if !self.margin_ratio.is_fraction() {
            return Err(Error::InvalidConfig(format!(
                "{}: margin ratio must be in (0, 1], got {}",
                self.symbol, self.margin_ratio
            )));
        }
        if self.base_token_precision > MAX_PRECISION {
            return Err(Error::InvalidConfig(format!(
                "{}: base precision must be at most {}, got {}",
                self.symbol, MAX_PRECISION, self.base_token_precision
            )));
        }

        self.fees().validate()
    }

    /// Bounds shared by registration and leverage changes.
    pub fn validate_leverage(leverage: Ratio, max_notional: Balance) -> Result<()> {
        if leverage < Ratio::one() {
            return Err(Error::InvalidConfig(format!("leverage must be at least 1, got {}", leverage)));
        }
        if !max_notional.is_positive() {
            return Err(Error::InvalidConfig(format!(
                "max notional must be positive, got {}",
                max_notional
            )));
        }
        Ok(())
    }
}
