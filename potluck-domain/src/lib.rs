#![warn(clippy::uninlined_format_args)]

pub mod model;
pub mod services;

pub use model::{
    Ledger, LedgerError, MAX_SCALE, MemberBalances, Money, Participant, Settlement, Transfer,
    split_evenly,
};
pub use services::{RoundingMode, SettlementCalculator, SettlementContext, SettlementContextError};
