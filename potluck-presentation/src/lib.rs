#![warn(clippy::uninlined_format_args)]

pub mod bill_split_presenter;
pub mod text_table;

pub use bill_split_presenter::{BillSplitPresenter, locale_for};
