use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use crate::config::market::PairConfig;
use crate::error::Result;
use crate::orderbook::book::{BookLevel, DepthView};
use crate::orderbook::fill::FillEstimate;
use crate::sizing::intent::OrderIntent;
use crate::sizing::order::ComputedOrder;
use crate::types::balance::Balance;
use crate::types::ids::{PairSymbol, TokenId};
use crate::types::numeric::parse_optional_decimal;
use crate::types::price::Price;
use crate::types::quantity::Quantity;
use crate::types::ratio::Ratio;
use crate::types::side::BookSide;

/// `(price, size)` as decimal text.
pub type PriceLevelText = (String, String);

pub fn parse_levels(field: &str, levels: &[PriceLevelText]) -> Result<Vec<BookLevel>> {
    levels
        .iter()
        .map(|(price, size)| {
            Ok(BookLevel::new(
                Price::parse(&format!("{} price", field), price)?,
                Quantity::parse(&format!("{} size", field), size)?,
            ))
        })
        .collect()
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct NewPairRequest {
    pub symbol: String,
    pub collateral_long_token: String,
    pub collateral_short_token: String,
    pub leverage: String,
    pub max_notional: String,
    pub min_quantity_base: String,
    pub margin_ratio: String,
    pub taker_fee: String,
    pub maker_fee: String,
    pub base_token_precision: u32,
}

impl NewPairRequest {
    /// Parse every numeric field. Range checks happen on registration.
    pub fn parse(&self) -> Result<PairConfig> {
        Ok(PairConfig {
            symbol: PairSymbol::from(self.symbol.trim()),
            collateral_long_token: TokenId::from(self.collateral_long_token.trim()),
            collateral_short_token: TokenId::from(self.collateral_short_token.trim()),
            leverage: Ratio::parse("leverage", &self.leverage)?,
            max_notional: Balance::parse("max_notional", &self.max_notional)?,
            min_quantity_base: Quantity::parse("min_quantity_base", &self.min_quantity_base)?,
            margin_ratio: Ratio::parse("margin_ratio", &self.margin_ratio)?,
            taker_fee: Ratio::parse("taker_fee", &self.taker_fee)?,
            maker_fee: Ratio::parse("maker_fee", &self.maker_fee)?,
            base_token_precision: self.base_token_precision,
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ComputeOrderRequest {
    #[serde(default)]
    pub pay_token: String,
    #[serde(default)]
    pub pay_amount: String,
    /// Empty for a market order.
    #[serde(default)]
    pub limit_price: String,
    /// Empty or zero when sizing from `pay_amount`.
    #[serde(default)]
    pub quantity: String,
    pub is_quote: bool,
    pub is_buy: bool,
    #[serde(default)]
    pub use_percentage: bool,
}

impl ComputeOrderRequest {
    pub fn parse(&self) -> Result<OrderIntent> {
        let pay_token = match self.pay_token.trim() {
            "" => None,
            token => Some(TokenId::from(token)),
        };
        let pay_amount = parse_optional_decimal("pay_amount", Some(self.pay_amount.as_str()))?
            .unwrap_or(Decimal::ZERO);
        let limit_price = parse_optional_decimal("limit_price", Some(self.limit_price.as_str()))?
            .map(Price::new);
        let quantity = parse_optional_decimal("quantity", Some(self.quantity.as_str()))?
            .filter(|quantity| !quantity.is_zero());

        Ok(OrderIntent {
            pay_token,
            pay_amount,
            limit_price,
            quantity,
            is_quote: self.is_quote,
            is_buy: self.is_buy,
            use_percentage: self.use_percentage,
        })
    }
}

/// One boundary call, as received over the wire.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
    InitializeOrders {
        asks: Vec<PriceLevelText>,
        bids: Vec<PriceLevelText>,
    },
    UpdateOrders {
        side: BookSide,
        levels: Vec<PriceLevelText>,
    },
    NewPairOrderCompute(NewPairRequest),
    ChangeLeverage {
        leverage: String,
        max_notional: String,
    },
    GetActivePair,
    ChangeActivePair {
        symbol: String,
    },
    CheckPairExists {
        symbol: String,
    },
    UpdateBalance {
        token: String,
        balance: String,
    },
    ComputeOpenOrder(ComputeOrderRequest),
    GetOrderBookManager,
    GroupPrices {
        grouping: String,
    },
    EstimateFill {
        is_buy: bool,
        amount: String,
        is_quote: bool,
    },
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum Response {
    Ack,
    Bool(bool),
    Pair(PairConfig),
    Order(ComputedOrder),
    Book(DepthView),
    Grouped {
        asks: Vec<BookLevel>,
        bids: Vec<BookLevel>,
    },
    Fill(FillEstimate),
}
