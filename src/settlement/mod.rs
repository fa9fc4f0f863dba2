//! Settlement engine: fair share, net balances and the transfers that clear them

pub mod engine;

pub use engine::*;
