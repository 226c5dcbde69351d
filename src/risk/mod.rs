pub mod margin;
pub mod pre_trade_check;
