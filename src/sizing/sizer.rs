use rust_decimal::Decimal;
use crate::config::market::PairConfig;
use crate::error::{Error, Result};
use crate::interfaces::balance_provider::BalanceProvider;
use crate::orderbook::book::OrderBookSnapshot;
use crate::orderbook::fill::FillTarget;
use crate::risk::margin::MarginCalculator;
use crate::risk::pre_trade_check::PreTradeCheck;
use crate::sizing::intent::OrderIntent;
use crate::sizing::order::ComputedOrder;
use crate::types::price::Price;
use crate::types::quantity::Quantity;
use crate::types::side::{Liquidity, Side};

/// Turns an intent into a concrete order against one consistent view of
/// pair, book and balances. Never mutates any of them.
#[derive(Clone, Copy, Debug, Default)]
pub struct OrderSizer;

impl OrderSizer {
    pub fn new() -> Self {
        OrderSizer
    }

    pub fn compute(
        &self,
        pair: &PairConfig,
        book: &OrderBookSnapshot,
        balances: &dyn BalanceProvider,
        intent: &OrderIntent,
    ) -> Result<ComputedOrder> {
        let side = intent.side();
        let pay_token = intent.pay_token_for(pair);
        let balance = balances.balance_of(&pay_token);
        let resolved = intent.resolve(pair.leverage, balance)?;

        // Step 1: fill price
        let (price, liquidity, slippage_pct) = match intent.limit_price {
            Some(limit) => (limit, Self::limit_liquidity(book, side, limit), Decimal::ZERO),
            None => {
                if resolved.target.amount().is_zero() {
                    return Err(Error::BelowMinimumSize {
                        quantity: Quantity::zero(),
                        min: pair.min_quantity_base,
                    });
                }
                let fill = book.estimate_fill(side, resolved.target)?;
                (fill.average_price, Liquidity::Taker, fill.slippage_pct)
            }
        };

        // Step 2-3: base quantity, never rounded up
        let quantity = match resolved.target {
            FillTarget::Base(quantity) => quantity,
            FillTarget::Quote(notional) => notional.checked_div_price(price)?,
        }
        .round_down(pair.base_token_precision);

        let checks = PreTradeCheck::new(pair);
        checks.check_min_size(quantity)?;

        let notional = quantity.notional_at(price)?;
        checks.check_max_notional(notional)?;

        let fee_rate = pair.fees().rate_for(liquidity);
        let fee = notional.checked_scale(fee_rate)?;

        let margin = MarginCalculator::for_pair(pair);
        let required_margin = margin.calculate_initial_margin(notional)?;
        let available_after = checks.check_balance(required_margin, fee, balance)?;

        let maintenance_margin = margin.calculate_maintenance_margin(required_margin)?;
        let liquidation_price = margin.calculate_liquidation_price(
            side,
            price,
            quantity,
            required_margin,
            maintenance_margin,
        )?;
        let max_quantity_base = margin.calculate_max_quantity(
            pair.max_notional,
            balance,
            fee_rate,
            price,
            pair.base_token_precision,
        )?;

        Ok(ComputedOrder {
            symbol: pair.symbol.clone(),
            side,
            order_type: intent.order_type(),
            pay_token,
            pay_amount: resolved.pay_amount,
            quantity,
            price,
            notional,
            liquidity,
            fee_rate,
            fee,
            required_margin,
            maintenance_margin,
            liquidation_price,
            slippage_pct,
            min_quantity_base: pair.min_quantity_base,
            max_quantity_base,
            min_quantity_quote: pair
                .min_quantity_base
                .notional_at(price)?
                .round_down(pair.base_token_precision),
            max_quantity_quote: pair.max_notional,
            balance,
            available_after,
        })
    }

    /// A limit order that would execute against resting liquidity on
    /// submission pays the taker rate.
    fn limit_liquidity(book: &OrderBookSnapshot, side: Side, limit: Price) -> Liquidity {
        let crosses = match side {
            Side::Buy => book.best_ask().is_some_and(|ask| limit >= ask),
            Side::Sell => book.best_bid().is_some_and(|bid| limit <= bid),
        };
        if crosses { Liquidity::Taker } else { Liquidity::Maker }
    }
}
