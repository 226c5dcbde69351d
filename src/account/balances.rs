use std::collections::HashMap;
use crate::error::{Error, Result};
use crate::interfaces::balance_provider::BalanceProvider;
use crate::types::balance::Balance;
use crate::types::ids::TokenId;

/// Trader balances per token. Unknown tokens read as zero.
#[derive(Debug, Default)]
pub struct AccountState {
    balances: HashMap<TokenId, Balance>,
}

impl AccountState {
    pub fn new() -> Self {
        AccountState {
            balances: HashMap::new(),
        }
    }

    /// Absolute overwrite, not a delta. Returns the previous balance.
    pub fn update_balance(&mut self, token: TokenId, balance: Balance) -> Result<Balance> {
        if balance.is_negative() {
            return Err(Error::InvalidBalance {
                token,
                balance: balance.as_decimal(),
            });
        }

        Ok(self.balances.insert(token, balance).unwrap_or_default())
    }

    pub fn tokens(&self) -> Vec<TokenId> {
        let mut tokens: Vec<TokenId> = self.balances.keys().cloned().collect();
        tokens.sort();
        tokens
    }
}

impl BalanceProvider for AccountState {
    fn balance_of(&self, token: &TokenId) -> Balance {
        self.balances.get(token).copied().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn unknown_tokens_read_as_zero() {
        let account = AccountState::new();
        assert_eq!(account.balance_of(&TokenId::from("USD")), Balance::zero());
    }

    #[test]
    fn update_overwrites_instead_of_adding() {
        let mut account = AccountState::new();
        let usd = TokenId::from("USD");

        assert_eq!(account.update_balance(usd.clone(), Balance::new(dec!(100))).unwrap(), Balance::zero());
        assert_eq!(account.update_balance(usd.clone(), Balance::new(dec!(40))).unwrap(), Balance::new(dec!(100)));
        assert_eq!(account.balance_of(&usd), Balance::new(dec!(40)));
    }

    #[test]
    fn negative_balance_is_rejected_and_prior_value_kept() {
        let mut account = AccountState::new();
        let usd = TokenId::from("USD");
        account.update_balance(usd.clone(), Balance::new(dec!(10))).unwrap();

        let err = account.update_balance(usd.clone(), Balance::new(dec!(-5))).unwrap_err();
        assert_eq!(err, Error::InvalidBalance { token: usd.clone(), balance: dec!(-5) });
        assert_eq!(account.balance_of(&usd), Balance::new(dec!(10)));
    }

    #[test]
    fn zero_is_a_valid_balance() {
        let mut account = AccountState::new();
        let usd = TokenId::from("USD");
        assert!(account.update_balance(usd.clone(), Balance::zero()).is_ok());
        assert_eq!(account.tokens(), vec![usd]);
    }
}
