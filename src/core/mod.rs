pub mod engine;

pub use engine::OrderComputeEngine;
