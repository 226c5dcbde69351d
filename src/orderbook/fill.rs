use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use crate::error::{Error, Result};
use crate::orderbook::book::OrderBookSnapshot;
use crate::types::balance::Balance;
use crate::types::numeric::{checked_add, checked_div, checked_mul};
use crate::types::price::Price;
use crate::types::quantity::Quantity;
use crate::types::side::{BookSide, Side};

/// How much a market fill has to cover.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FillTarget {
    Base(Quantity),
    Quote(Balance),
}

impl FillTarget {
    pub fn amount(&self) -> Decimal {
        match self {
            FillTarget::Base(quantity) => quantity.as_decimal(),
            FillTarget::Quote(notional) => notional.as_decimal(),
        }
    }
}

/// Outcome of walking the book without touching it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillEstimate {
    pub average_price: Price,
    pub base_filled: Quantity,
    pub quote_filled: Balance,
    pub best_price: Price,
    /// Distance of the average price from the best price, in percent.
    pub slippage_pct: Decimal,
    pub levels_consumed: usize,
}

impl OrderBookSnapshot {
    /// Walk the side a taker on `side` consumes until `target` is covered.
    pub fn estimate_fill(&self, side: Side, target: FillTarget) -> Result<FillEstimate> {
        let requested = target.amount();
        if requested <= Decimal::ZERO {
            return Err(Error::InvalidConfig(format!("fill amount must be positive, got {}", requested)));
        }

        self.ensure_uncrossed()?;

        let book_side = BookSide::consumed_by(side);
        let best_price = self.best_price(book_side).ok_or(Error::InsufficientLiquidity {
            requested,
            available: Decimal::ZERO,
        })?;

        let mut remaining = requested;
        let mut total_base = Decimal::ZERO;
        let mut total_quote = Decimal::ZERO;
        let mut levels_consumed = 0;

        for level in self.levels(book_side) {
            let price = level.price.as_decimal();
            let size = level.size.as_decimal();
            let level_quote = checked_mul("level notional", size, price)?;
            let level_amount = match target {
                FillTarget::Base(_) => size,
                FillTarget::Quote(_) => level_quote,
            };
            levels_consumed += 1;

            if remaining >= level_amount {
                remaining -= level_amount;
                total_base = checked_add("fill base", total_base, size)?;
                total_quote = checked_add("fill quote", total_quote, level_quote)?;
            } else {
                let partial_base = match target {
                    FillTarget::Base(_) => remaining,
                    FillTarget::Quote(_) => checked_div("partial fill", remaining, price)?,
                };
                total_base = checked_add("fill base", total_base, partial_base)?;
                total_quote = checked_add("fill quote", total_quote, checked_mul("partial notional", partial_base, price)?)?;
                remaining = Decimal::ZERO;
            }

            if remaining.is_zero() {
                break;
            }
        }

        if !remaining.is_zero() {
            return Err(Error::InsufficientLiquidity {
                requested,
                available: requested - remaining,
            });
        }

        let average_price = Price::new(checked_div("average price", total_quote, total_base)?);
        let slippage_pct = match side {
            Side::Buy => average_price.percent_from(best_price)?,
            Side::Sell => -average_price.percent_from(best_price)?,
        };

        Ok(FillEstimate {
            average_price,
            base_filled: Quantity::new(total_base),
            quote_filled: Balance::new(total_quote),
            best_price,
            slippage_pct,
            levels_consumed,
        })
    }
}
