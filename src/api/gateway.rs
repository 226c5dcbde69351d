use std::sync::Arc;
use serde_json::json;
use crate::api::requests::{parse_levels, ComputeOrderRequest, NewPairRequest, PriceLevelText, Request, Response};
use crate::config::market::PairConfig;
use crate::core::engine::OrderComputeEngine;
use crate::error::{Error, Result};
use crate::orderbook::book::{BookLevel, DepthView};
use crate::orderbook::fill::{FillEstimate, FillTarget};
use crate::sizing::order::ComputedOrder;
use crate::types::balance::Balance;
use crate::types::ids::{PairSymbol, TokenId};
use crate::types::price::Price;
use crate::types::quantity::Quantity;
use crate::types::ratio::Ratio;
use crate::types::side::{BookSide, Side};

/// Text-in, typed-out surface over the engine. Every numeric argument
/// arrives as decimal text and is parsed before the engine sees it.
#[derive(Clone)]
pub struct Gateway {
    engine: Arc<OrderComputeEngine>,
}

impl Gateway {
    pub fn new(engine: Arc<OrderComputeEngine>) -> Self {
        Gateway { engine }
    }

    pub fn engine(&self) -> &Arc<OrderComputeEngine> {
        &self.engine
    }

    /// Replace the active pair's book.
    pub fn initialize_orders(&self, asks: &[PriceLevelText], bids: &[PriceLevelText]) -> Result<()> {
        let asks = parse_levels("ask", asks)?;
        let bids = parse_levels("bid", bids)?;
        self.engine.replace_active_book(asks, bids)?;
        Ok(())
    }

    pub fn update_orders(&self, side: BookSide, levels: &[PriceLevelText]) -> Result<()> {
        let levels = parse_levels("level", levels)?;
        self.engine.apply_active_book_updates(side, levels)?;
        Ok(())
    }

    /// Register (or replace) a pair and make it the active one.
    pub fn new_pair_order_compute(&self, request: &NewPairRequest) -> Result<()> {
        self.engine.register_and_activate(request.parse()?)
    }

    pub fn change_leverage(&self, leverage: &str, max_notional: &str) -> Result<()> {
        let leverage = Ratio::parse("leverage", leverage)?;
        let max_notional = Balance::parse("max_notional", max_notional)?;
        self.engine.change_active_leverage(leverage, max_notional)?;
        Ok(())
    }

    pub fn get_active_pair(&self) -> Result<PairConfig> {
        self.engine.get_active_pair()
    }

    pub fn change_active_pair(&self, symbol: &str) -> Result<()> {
        self.engine.set_active_pair(&PairSymbol::from(symbol.trim()))
    }

    pub fn check_pair_exists(&self, symbol: &str) -> bool {
        self.engine.pair_exists(symbol.trim())
    }

    pub fn update_balance(&self, token: &str, balance: &str) -> Result<()> {
        let token = TokenId::from(token.trim());
        if token.is_empty() {
            return Err(Error::InvalidConfig("token must not be empty".to_string()));
        }
        self.engine.update_balance(token, Balance::parse("balance", balance)?)
    }

    pub fn compute_open_order(&self, request: &ComputeOrderRequest) -> Result<ComputedOrder> {
        self.engine.compute_open_order(&request.parse()?)
    }

    pub fn get_order_book_manager(&self) -> Result<DepthView> {
        Ok(self.engine.active_book()?.view())
    }

    pub fn group_prices(&self, grouping: &str) -> Result<(Vec<BookLevel>, Vec<BookLevel>)> {
        self.engine.group_active_book(Price::parse("grouping", grouping)?)
    }

    pub fn estimate_fill(&self, is_buy: bool, amount: &str, is_quote: bool) -> Result<FillEstimate> {
        let target = if is_quote {
            FillTarget::Quote(Balance::parse("amount", amount)?)
        } else {
            FillTarget::Base(Quantity::parse("amount", amount)?)
        };
        self.engine.estimate_fill(Side::from_is_buy(is_buy), target)
    }

    pub fn handle(&self, request: Request) -> Result<Response> {
        match request {
            Request::InitializeOrders { asks, bids } => {
                self.initialize_orders(&asks, &bids).map(|_| Response::Ack)
            }
            Request::UpdateOrders { side, levels } => {
                self.update_orders(side, &levels).map(|_| Response::Ack)
            }
            Request::NewPairOrderCompute(request) => {
                self.new_pair_order_compute(&request).map(|_| Response::Ack)
            }
            Request::ChangeLeverage { leverage, max_notional } => {
                self.change_leverage(&leverage, &max_notional).map(|_| Response::Ack)
            }
            Request::GetActivePair => self.get_active_pair().map(Response::Pair),
            Request::ChangeActivePair { symbol } => {
                self.change_active_pair(&symbol).map(|_| Response::Ack)
            }
            Request::CheckPairExists { symbol } => Ok(Response::Bool(self.check_pair_exists(&symbol))),
            Request::UpdateBalance { token, balance } => {
                self.update_balance(&token, &balance).map(|_| Response::Ack)
            }
            Request::ComputeOpenOrder(request) => self.compute_open_order(&request).map(Response::Order),
            Request::GetOrderBookManager => self.get_order_book_manager().map(Response::Book),
            Request::GroupPrices { grouping } => {
                self.group_prices(&grouping).map(|(asks, bids)| Response::Grouped { asks, bids })
            }
            Request::EstimateFill { is_buy, amount, is_quote } => {
                self.estimate_fill(is_buy, &amount, is_quote).map(Response::Fill)
            }
        }
    }

    /// Decode one JSON request, run it, and encode the envelope. Never fails:
    /// errors come back as `{"ok":false,"error":{...}}`.
    pub fn handle_json(&self, line: &str) -> String {
        let outcome = serde_json::from_str::<Request>(line)
            .map_err(Error::from)
            .and_then(|request| self.handle(request))
            .and_then(|response| serde_json::to_value(response).map_err(Error::from));

        let envelope = match outcome {
            Ok(result) => json!({ "ok": true, "result": result }),
            Err(err) => {
                tracing::debug!(kind = err.kind(), error = %err, "Request failed");
                json!({
                    "ok": false,
                    "error": { "kind": err.kind(), "message": err.to_string() },
                })
            }
        };
        envelope.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::Value;

    fn btc_request() -> NewPairRequest {
        NewPairRequest {
            symbol: "BTC-USD".to_string(),
            collateral_long_token: "USD".to_string(),
            collateral_short_token: "USD".to_string(),
            leverage: "10".to_string(),
            max_notional: "100000".to_string(),
            min_quantity_base: "0.001".to_string(),
            margin_ratio: "0.03".to_string(),
            taker_fee: "0.001".to_string(),
            maker_fee: "0.0005".to_string(),
            base_token_precision: 3,
        }
    }

    fn text(price: &str, size: &str) -> PriceLevelText {
        (price.to_string(), size.to_string())
    }

    fn gateway() -> Gateway {
        Gateway::new(Arc::new(OrderComputeEngine::new()))
    }

    #[test]
    fn new_pair_becomes_active() {
        let gateway = gateway();
        assert!(!gateway.check_pair_exists("BTC-USD"));
        gateway.new_pair_order_compute(&btc_request()).unwrap();
        assert!(gateway.check_pair_exists("BTC-USD"));
        assert_eq!(gateway.get_active_pair().unwrap().leverage, Ratio::new(dec!(10)));
    }

    #[test]
    fn book_operations_need_an_active_pair() {
        let gateway = gateway();
        assert_eq!(
            gateway.initialize_orders(&[text("1", "1")], &[]).unwrap_err(),
            Error::NoActivePairSet
        );
        assert_eq!(gateway.get_order_book_manager().unwrap_err(), Error::NoActivePairSet);
        assert_eq!(gateway.change_leverage("5", "1000").unwrap_err(), Error::NoActivePairSet);
    }

    #[test]
    fn bad_text_is_rejected_before_state_changes() {
        let gateway = gateway();
        gateway.new_pair_order_compute(&btc_request()).unwrap();

        assert_eq!(gateway.change_leverage("ten", "1000").unwrap_err().kind(), "invalid_numeric_format");
        assert_eq!(gateway.get_active_pair().unwrap().leverage, Ratio::new(dec!(10)));

        gateway.initialize_orders(&[text("50000", "1")], &[]).unwrap();
        assert!(gateway.initialize_orders(&[text("50001", "x")], &[]).is_err());
        assert_eq!(gateway.get_order_book_manager().unwrap().asks[0].price, Price::new(dec!(50000)));
    }

    #[test]
    fn incremental_updates_hit_the_active_book() {
        let gateway = gateway();
        gateway.new_pair_order_compute(&btc_request()).unwrap();
        gateway.initialize_orders(&[text("50000", "1")], &[text("49900", "1")]).unwrap();
        gateway.update_orders(BookSide::Asks, &[text("50000", "0"), text("50050", "2")]).unwrap();

        let view = gateway.get_order_book_manager().unwrap();
        assert_eq!(view.asks, vec![BookLevel::new(Price::new(dec!(50050)), Quantity::new(dec!(2)))]);
        assert_eq!(view.sequence, 2);
    }

    #[test]
    fn repeated_price_with_maximal_size_keeps_last_level() {
        let gateway = gateway();
        gateway.new_pair_order_compute(&btc_request()).unwrap();
        gateway
            .initialize_orders(&[text("50000", "79228162514264337593543950335"), text("50000", "1")], &[])
            .unwrap();

        let view = gateway.get_order_book_manager().unwrap();
        assert_eq!(view.asks, vec![BookLevel::new(Price::new(dec!(50000)), Quantity::new(dec!(1)))]);
        assert_eq!(gateway.group_prices("100").unwrap().0, view.asks);
    }

    #[test]
    fn json_envelope_reports_success_and_errors() {
        let gateway = gateway();

        let reply: Value = serde_json::from_str(&gateway.handle_json(r#"{"op":"get_active_pair"}"#)).unwrap();
        assert_eq!(reply["ok"], false);
        assert_eq!(reply["error"]["kind"], "no_active_pair_set");

        let reply: Value = serde_json::from_str(&gateway.handle_json("not json")).unwrap();
        assert_eq!(reply["error"]["kind"], "serialization_error");

        let reply: Value = serde_json::from_str(&gateway.handle_json(r#"{"op":"check_pair_exists","symbol":"BTC-USD"}"#)).unwrap();
        assert_eq!(reply["ok"], true);
        assert_eq!(reply["result"]["type"], "bool");
        assert_eq!(reply["result"]["data"], false);
    }
}
