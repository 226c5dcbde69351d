pub mod balance;
pub mod ids;
pub mod numeric;
pub mod price;
pub mod quantity;
pub mod ratio;
pub mod side;

pub use balance::Balance;
pub use ids::{PairSymbol, TokenId};
pub use price::Price;
pub use quantity::Quantity;
pub use ratio::Ratio;
pub use side::{BookSide, Liquidity, OrderType, Side};
