pub mod intent;
pub mod order;
pub mod sizer;

pub use intent::{OrderIntent, ResolvedAmount};
pub use order::ComputedOrder;
pub use sizer::OrderSizer;
