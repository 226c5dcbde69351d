use order_compute::config::market::PairConfig;
use order_compute::core::OrderComputeEngine;
use order_compute::error::Error;
use order_compute::orderbook::BookLevel;
use order_compute::sizing::OrderIntent;
use order_compute::types::{Balance, PairSymbol, Price, Quantity, Ratio, TokenId};
use proptest::prelude::*;
use rust_decimal::Decimal;

fn decimal(mantissa: i64, scale: u32) -> Decimal {
    Decimal::new(mantissa, scale)
}

fn pair_strategy() -> impl Strategy<Value = PairConfig> {
    (
        1i64..=125,
        1i64..1_000_000_000,
        1i64..1_000,
        1i64..=1_000,
        0i64..1_000,
        0i64..1_000,
        0u32..=8,
    )
        .prop_map(|(leverage, max_notional, min_qty, margin_ratio, taker, maker, precision)| PairConfig {
            symbol: PairSymbol::from("TEST-USD"),
            collateral_long_token: TokenId::from("USD"),
            collateral_short_token: TokenId::from("TEST"),
            leverage: Ratio::new(Decimal::from(leverage)),
            max_notional: Balance::new(Decimal::from(max_notional)),
            min_quantity_base: Quantity::new(decimal(min_qty, 3)),
            margin_ratio: Ratio::new(decimal(margin_ratio, 3)),
            taker_fee: Ratio::new(decimal(taker, 4)),
            maker_fee: Ratio::new(decimal(maker, 4)),
            base_token_precision: precision,
        })
}

/// Pair with no maker fee and room for any notional, so only the property
/// under test can fail a sizing call.
fn roomy_pair() -> PairConfig {
    PairConfig {
        symbol: PairSymbol::from("TEST-USD"),
        collateral_long_token: TokenId::from("USD"),
        collateral_short_token: TokenId::from("USD"),
        leverage: Ratio::new(Decimal::from(10)),
        max_notional: Balance::new(Decimal::from(1_000_000_000_000i64)),
        min_quantity_base: Quantity::new(decimal(1, 3)),
        margin_ratio: Ratio::new(decimal(3, 2)),
        taker_fee: Ratio::new(decimal(1, 3)),
        maker_fee: Ratio::zero(),
        base_token_precision: 3,
    }
}

fn engine_for(pair: PairConfig, balance: Decimal) -> OrderComputeEngine {
    let engine = OrderComputeEngine::new();
    engine.register_and_activate(pair).unwrap();
    engine
        .replace_active_book(
            vec![BookLevel::new(Price::new(Decimal::from(1000)), Quantity::new(Decimal::from(1_000_000)))],
            vec![BookLevel::new(Price::new(Decimal::from(999)), Quantity::new(Decimal::from(1_000_000)))],
        )
        .unwrap();
    engine.update_balance(TokenId::from("USD"), Balance::new(balance)).unwrap();
    engine
}

proptest! {
    #[test]
    fn registered_pair_round_trips(pair in pair_strategy()) {
        let engine = OrderComputeEngine::new();
        engine.register_or_update_pair(pair.clone()).unwrap();
        engine.set_active_pair(&pair.symbol).unwrap();
        prop_assert_eq!(engine.get_active_pair().unwrap(), pair);
    }

    #[test]
    fn change_leverage_preserves_other_fields(
        pair in pair_strategy(),
        leverage in 1i64..=200,
        max_notional in 1i64..1_000_000_000,
    ) {
        let engine = OrderComputeEngine::new();
        engine.register_and_activate(pair.clone()).unwrap();

        let updated = engine
            .change_leverage(&pair.symbol, Ratio::new(Decimal::from(leverage)), Balance::new(Decimal::from(max_notional)))
            .unwrap();

        let mut expected = pair;
        expected.leverage = Ratio::new(Decimal::from(leverage));
        expected.max_notional = Balance::new(Decimal::from(max_notional));
        prop_assert_eq!(updated, expected);
    }

    #[test]
    fn base_quantity_is_taken_without_leverage(mantissa in 1i64..100_000_000, scale in 0u32..=6) {
        let engine = engine_for(roomy_pair(), Decimal::from(1_000_000_000_000i64));
        let requested = decimal(mantissa, scale);
        let rounded = Quantity::new(requested).round_down(3);
        let intent = OrderIntent::new(Decimal::ZERO, true)
            .in_base()
            .with_quantity(requested)
            .with_limit_price(Price::new(Decimal::from(500)));

        match engine.compute_open_order(&intent) {
            Ok(order) => prop_assert_eq!(order.quantity, rounded),
            Err(err) => {
                prop_assert!(rounded < Quantity::new(decimal(1, 3)));
                prop_assert_eq!(err.kind(), "below_minimum_size");
            }
        }
    }

    #[test]
    fn percentage_pays_fraction_of_balance(permille in 1i64..=1_000, balance in 1_000i64..1_000_000) {
        let balance = Decimal::from(balance);
        let fraction = decimal(permille, 3);
        let engine = engine_for(roomy_pair(), balance);
        let intent = OrderIntent::new(fraction, true)
            .as_percentage()
            .with_limit_price(Price::new(Decimal::from(500)));

        let order = engine.compute_open_order(&intent).unwrap();
        prop_assert_eq!(order.pay_amount, Balance::new(fraction * balance));
        prop_assert!(order.required_margin <= order.pay_amount);
    }

    #[test]
    fn max_notional_is_inclusive(price in 1i64..10_000, quantity in 1i64..1_000) {
        let notional = Decimal::from(price * quantity);
        let mut pair = roomy_pair();
        pair.max_notional = Balance::new(notional);

        let engine = engine_for(pair.clone(), Decimal::from(1_000_000_000i64));
        let intent = OrderIntent::new(Decimal::ZERO, true)
            .in_base()
            .with_quantity(Decimal::from(quantity))
            .with_limit_price(Price::new(Decimal::from(price)));
        prop_assert_eq!(engine.compute_open_order(&intent).unwrap().notional, Balance::new(notional));

        engine
            .change_leverage(&pair.symbol, pair.leverage, Balance::new(notional - decimal(1, 2)))
            .unwrap();
        prop_assert_eq!(engine.compute_open_order(&intent).unwrap_err().kind(), "exceeds_max_notional");
    }

    #[test]
    fn market_orders_refuse_crossed_books(bid in 1i64..100_000, overlap in 0i64..1_000, is_buy in any::<bool>()) {
        let engine = engine_for(roomy_pair(), Decimal::from(1_000_000_000i64));
        let ask = (bid - overlap).max(1);
        engine
            .replace_active_book(
                vec![BookLevel::new(Price::new(Decimal::from(ask)), Quantity::new(Decimal::from(10)))],
                vec![BookLevel::new(Price::new(Decimal::from(bid)), Quantity::new(Decimal::from(10)))],
            )
            .unwrap();

        let err = engine.compute_open_order(&OrderIntent::new(Decimal::ONE, is_buy).in_base()).unwrap_err();
        let is_crossed_book = matches!(err, Error::CrossedBook { .. });
        prop_assert!(is_crossed_book);
    }
}
