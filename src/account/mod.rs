pub mod balances;

pub use balances::AccountState;
