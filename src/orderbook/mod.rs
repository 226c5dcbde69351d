pub mod book;
pub mod fill;
pub mod store;

pub use book::{BookLevel, DepthView, OrderBookSnapshot};
pub use fill::{FillEstimate, FillTarget};
pub use store::OrderBookStore;
