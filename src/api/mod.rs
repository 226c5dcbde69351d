pub mod gateway;
pub mod requests;

pub use gateway::Gateway;
pub use requests::{ComputeOrderRequest, NewPairRequest, PriceLevelText, Request, Response};
