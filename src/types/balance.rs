use crate::error::Result;
use crate::types::numeric::{checked_div, checked_mul, define_decimal_type};
use crate::types::price::Price;
use crate::types::quantity::Quantity;
use crate::types::ratio::Ratio;

define_decimal_type!(
    /// Amount of a quote or collateral token: balances, notionals, fees, margins.
    Balance
);

impl Balance {
    pub fn checked_scale(self, ratio: Ratio) -> Result<Balance> {
        checked_mul("balance scaling", self.0, ratio.as_decimal()).map(Balance)
    }

    pub fn checked_div_ratio(self, ratio: Ratio) -> Result<Balance> {
        checked_div("balance division", self.0, ratio.as_decimal()).map(Balance)
    }

    /// Base quantity this amount buys at `price`.
    pub fn checked_div_price(self, price: Price) -> Result<Quantity> {
        checked_div("quantity from notional", self.0, price.as_decimal()).map(Quantity::new)
    }
}
