use crate::config::market::PairConfig;
use crate::error::Result;
use crate::types::balance::Balance;
use crate::types::numeric::checked_div;
use crate::types::price::Price;
use crate::types::quantity::Quantity;
use crate::types::ratio::Ratio;
use crate::types::side::Side;

pub struct MarginCalculator {
    leverage: Ratio,
    margin_ratio: Ratio,
}

impl MarginCalculator {
    pub fn new(leverage: Ratio, margin_ratio: Ratio) -> Self {
        MarginCalculator { leverage, margin_ratio }
    }

    pub fn for_pair(pair: &PairConfig) -> Self {
        Self::new(pair.leverage, pair.margin_ratio)
    }

    /// Collateral needed to open `notional` at the pair leverage.
    pub fn calculate_initial_margin(&self, notional: Balance) -> Result<Balance> {
        notional.checked_div_ratio(self.leverage)
    }

    pub fn calculate_maintenance_margin(&self, initial_margin: Balance) -> Result<Balance> {
        initial_margin.checked_scale(self.margin_ratio)
    }

    /// Position notional a margin amount can carry.
    pub fn leveraged_notional(&self, margin: Balance) -> Result<Balance> {
        margin.checked_scale(self.leverage)
    }

    /// Price at which equity falls to the maintenance requirement.
    pub fn calculate_liquidation_price(
        &self,
        side: Side,
        entry_price: Price,
        quantity: Quantity,
        initial_margin: Balance,
        maintenance_margin: Balance,
    ) -> Result<Price> {
        let cushion = initial_margin - maintenance_margin;
        let buffer = Price::new(checked_div("liquidation buffer", cushion.as_decimal(), quantity.as_decimal())?);
        match side {
            Side::Buy => Ok(entry_price - buffer),
            Side::Sell => entry_price.checked_add(buffer),
        }
    }

    /// Largest base quantity allowed by max notional and, when there is a
    /// balance, by what that balance can fund after fees.
    pub fn calculate_max_quantity(
        &self,
        max_notional: Balance,
        balance: Balance,
        fee_rate: Ratio,
        price: Price,
        precision: u32,
    ) -> Result<Quantity> {
        let by_notional = max_notional.checked_div_price(price)?;
        let max_balance = balance.checked_scale(fee_rate.complement())?;

        let max_quantity = if max_balance.is_positive() {
            let by_balance = self.leveraged_notional(max_balance)?.checked_div_price(price)?;
            by_notional.min(by_balance)
        } else {
            by_notional
        };

        Ok(max_quantity.round_down(precision))
    }
}
