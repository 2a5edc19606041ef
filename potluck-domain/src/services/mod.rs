pub mod settlement_calculator;
pub mod settlement_context;

pub use settlement_calculator::SettlementCalculator;
pub use settlement_context::{RoundingMode, SettlementContext, SettlementContextError};
