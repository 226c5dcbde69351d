use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use crate::config::market::PairConfig;
use crate::error::{Error, Result};
use crate::orderbook::fill::FillTarget;
use crate::types::balance::Balance;
use crate::types::ids::TokenId;
use crate::types::price::Price;
use crate::types::quantity::Quantity;
use crate::types::ratio::Ratio;
use crate::types::side::{OrderType, Side};

/// What the trader asked for, before any sizing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderIntent {
    /// Falls back to the pair's collateral for the side when absent.
    pub pay_token: Option<TokenId>,
    pub pay_amount: Decimal,
    /// Absent means a market order against the book.
    pub limit_price: Option<Price>,
    /// When positive, takes precedence over `pay_amount`.
    pub quantity: Option<Decimal>,
    pub is_quote: bool,
    pub is_buy: bool,
    /// `pay_amount` is a fraction of the pay token balance.
    pub use_percentage: bool,
}

/// Amount the intent resolves to, plus the pay amount that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedAmount {
    pub target: FillTarget,
    pub pay_amount: Balance,
}

impl OrderIntent {
    /// Market order paying `pay_amount` quote units of collateral.
    pub fn new(pay_amount: Decimal, is_buy: bool) -> Self {
        OrderIntent {
            pay_token: None,
            pay_amount,
            limit_price: None,
            quantity: None,
            is_quote: true,
            is_buy,
            use_percentage: false,
        }
    }

    pub fn with_pay_token(mut self, token: impl Into<TokenId>) -> Self {
        self.pay_token = Some(token.into());
        self
    }

    pub fn with_limit_price(mut self, price: Price) -> Self {
        self.limit_price = Some(price);
        self
    }

    pub fn with_quantity(mut self, quantity: Decimal) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn in_base(mut self) -> Self {
        self.is_quote = false;
        self
    }

    pub fn as_percentage(mut self) -> Self {
        self.use_percentage = true;
        self
    }

    pub fn side(&self) -> Side {
        Side::from_is_buy(self.is_buy)
    }

    pub fn order_type(&self) -> OrderType {
        match self.limit_price {
            Some(_) => OrderType::Limit,
            None => OrderType::Market,
        }
    }

    pub fn pay_token_for(&self, pair: &PairConfig) -> TokenId {
        match &self.pay_token {
            Some(token) if !token.is_empty() => token.clone(),
            _ => pair.collateral_for(self.side()).clone(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.pay_amount < Decimal::ZERO {
            return Err(Error::InvalidConfig(format!("pay amount must not be negative, got {}", self.pay_amount)));
        }
        if let Some(quantity) = self.quantity {
            if quantity < Decimal::ZERO {
                return Err(Error::InvalidConfig(format!("quantity must not be negative, got {}", quantity)));
            }
        }
        if let Some(price) = self.limit_price {
            if !price.is_positive() {
                return Err(Error::InvalidConfig(format!("limit price must be positive, got {}", price)));
            }
        }
        Ok(())
    }

    /// Turn the intent into a base or quote amount to size against.
    ///
    /// An explicit quantity is used as-is: base units, or the position notional
    /// when `is_quote`. A pay amount in quote units funds margin, so it is
    /// multiplied by `leverage`. A pay amount in base units is taken directly.
    /// A fraction of an empty balance resolves to a zero target, which the
    /// sizer rejects as below the minimum size.
    pub fn resolve(&self, leverage: Ratio, balance: Balance) -> Result<ResolvedAmount> {
        self.validate()?;

        if let Some(quantity) = self.quantity.filter(|q| *q > Decimal::ZERO) {
            if !self.use_percentage {
                let target = if self.is_quote {
                    FillTarget::Quote(Balance::new(quantity))
                } else {
                    FillTarget::Base(Quantity::new(quantity))
                };
                return Ok(ResolvedAmount {
                    target,
                    pay_amount: Balance::new(self.pay_amount),
                });
            }
        }

        let pay_amount = if self.use_percentage {
            let fraction = Ratio::new(self.pay_amount);
            if !fraction.is_fraction() {
                return Err(Error::InvalidConfig(format!(
                    "balance fraction must be in (0, 1], got {}",
                    fraction
                )));
            }
            balance.checked_scale(fraction)?
        } else if self.pay_amount > Decimal::ZERO {
            Balance::new(self.pay_amount)
        } else {
            return Err(Error::InvalidConfig("order needs a positive pay amount or quantity".to_string()));
        };

        let target = if self.is_quote {
            FillTarget::Quote(pay_amount.checked_scale(leverage)?)
        } else {
            FillTarget::Base(Quantity::new(pay_amount.as_decimal()))
        };

        Ok(ResolvedAmount { target, pay_amount })
    }
}
