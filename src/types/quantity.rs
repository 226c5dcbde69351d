use crate::error::Result;
use crate::types::balance::Balance;
use crate::types::numeric::{checked_mul, define_decimal_type};
use crate::types::price::Price;

define_decimal_type!(
    /// Amount of the base token.
    Quantity
);

impl Quantity {
    /// Notional value at `price`, failing instead of overflowing.
    pub fn notional_at(&self, price: Price) -> Result<Balance> {
        checked_mul("notional", self.0, price.as_decimal()).map(Balance::new)
    }
}
