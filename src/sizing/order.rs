use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use crate::error::Result;
use crate::types::balance::Balance;
use crate::types::ids::{PairSymbol, TokenId};
use crate::types::price::Price;
use crate::types::quantity::Quantity;
use crate::types::ratio::Ratio;
use crate::types::side::{Liquidity, OrderType, Side};

/// A fully sized order, ready for submission by the execution layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputedOrder {
    pub symbol: PairSymbol,
    pub side: Side,
    pub order_type: OrderType,
    pub pay_token: TokenId,
    pub pay_amount: Balance,

    /// Rounded down to the pair's base precision.
    pub quantity: Quantity,
    /// Limit price, or the average fill price for market orders.
    pub price: Price,
    pub notional: Balance,

    pub liquidity: Liquidity,
    pub fee_rate: Ratio,
    pub fee: Balance,

    pub required_margin: Balance,
    pub maintenance_margin: Balance,
    pub liquidation_price: Price,
    pub slippage_pct: Decimal,

    pub min_quantity_base: Quantity,
    pub max_quantity_base: Quantity,
    pub min_quantity_quote: Balance,
    pub max_quantity_quote: Balance,

    /// Pay token balance read for this computation.
    pub balance: Balance,
    pub available_after: Balance,
}

impl ComputedOrder {
    /// Margin plus fee, the amount the balance has to cover.
    pub fn total_cost(&self) -> Result<Balance> {
        self.required_margin.checked_add(self.fee)
    }
}
