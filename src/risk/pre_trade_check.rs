use crate::config::market::PairConfig;
use crate::error::{Error, Result};
use crate::types::balance::Balance;
use crate::types::quantity::Quantity;

/// Bounds every sized order has to satisfy before it is returned.
pub struct PreTradeCheck<'a> {
    pair: &'a PairConfig,
}

impl<'a> PreTradeCheck<'a> {
    pub fn new(pair: &'a PairConfig) -> Self {
        PreTradeCheck { pair }
    }

    pub fn check_min_size(&self, quantity: Quantity) -> Result<()> {
        if quantity < self.pair.min_quantity_base {
            return Err(Error::BelowMinimumSize {
                quantity,
                min: self.pair.min_quantity_base,
            });
        }
        Ok(())
    }

    /// Notional equal to the maximum is accepted.
    pub fn check_max_notional(&self, notional: Balance) -> Result<()> {
        if notional > self.pair.max_notional {
            return Err(Error::ExceedsMaxNotional {
                notional,
                max: self.pair.max_notional,
            });
        }
        Ok(())
    }

    /// Returns what is left of `balance` after margin and fee.
    pub fn check_balance(&self, margin: Balance, fee: Balance, balance: Balance) -> Result<Balance> {
        let required = margin.checked_add(fee)?;
        if required > balance {
            return Err(Error::InsufficientBalance {
                required,
                available: balance,
            });
        }
        Ok(balance - required)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::market::tests::btc_usd;
    use rust_decimal_macros::dec;

    #[test]
    fn min_size_boundary() {
        let pair = btc_usd();
        let check = PreTradeCheck::new(&pair);
        assert!(check.check_min_size(Quantity::new(dec!(0.001))).is_ok());
        assert_eq!(
            check.check_min_size(Quantity::new(dec!(0.000))).unwrap_err(),
            Error::BelowMinimumSize {
                quantity: Quantity::zero(),
                min: Quantity::new(dec!(0.001)),
            }
        );
    }

    #[test]
    fn max_notional_boundary_is_inclusive() {
        let pair = btc_usd();
        let check = PreTradeCheck::new(&pair);
        assert!(check.check_max_notional(Balance::new(dec!(100000))).is_ok());
        assert_eq!(
            check.check_max_notional(Balance::new(dec!(100000.01))).unwrap_err().kind(),
            "exceeds_max_notional"
        );
    }

    #[test]
    fn balance_must_cover_margin_and_fee() {
        let pair = btc_usd();
        let check = PreTradeCheck::new(&pair);
        let left = check.check_balance(Balance::new(dec!(1000)), Balance::new(dec!(10)), Balance::new(dec!(1010))).unwrap();
        assert_eq!(left, Balance::zero());

        assert_eq!(
            check.check_balance(Balance::new(dec!(1000)), Balance::new(dec!(10)), Balance::new(dec!(1009.99))).unwrap_err(),
            Error::InsufficientBalance {
                required: Balance::new(dec!(1010)),
                available: Balance::new(dec!(1009.99)),
            }
        );
    }
}
