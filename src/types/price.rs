use crate::error::{Error, Result};
use crate::types::numeric::{checked_div, checked_mul, define_decimal_type};
use rust_decimal::Decimal;

define_decimal_type!(
    /// Quote units per one base unit.
    Price
);

impl Price {
    /// Bucket floor used when grouping book levels: `floor(price / step) * step`.
    pub fn floor_to(&self, step: Price) -> Result<Price> {
        if !step.is_positive() {
            return Err(Error::InvalidConfig(format!("grouping size must be positive, got {}", step)));
        }
        let buckets = checked_div("price grouping", self.0, step.0)?.floor();
        Ok(Price(buckets * step.0))
    }

    /// Relative distance from `reference`, in percent.
    pub fn percent_from(&self, reference: Price) -> Result<Decimal> {
        let diff = self.0 - reference.0;
        checked_mul("slippage", checked_div("slippage", diff, reference.0)?, Decimal::ONE_HUNDRED)
    }
}
