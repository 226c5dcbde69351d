use crate::types::balance::Balance;
use crate::types::ids::TokenId;

/// Read side of account state, as seen by the sizing engine.
#[cfg_attr(test, mockall::automock)]
pub trait BalanceProvider {
    /// Zero for tokens never reported.
    fn balance_of(&self, token: &TokenId) -> Balance;
}
