#![warn(clippy::uninlined_format_args)]

pub mod bill_split;
pub mod error;
pub mod ledger_builder;
pub mod model;
pub mod ports;

pub use bill_split::{BillSplit, BillSplitRow, BillSplitService, BillSplitTotals, PaymentRequest};
pub use error::{LedgerBuildError, NotifyError, PaymentRequestError};
pub use ledger_builder::{EventLedger, LedgerBuilder, ParticipantScope};
pub use model::{
    Event, EventType, InvitationStatus, Invitee, Language, Need, NeedStatus, ReminderChannel,
};
pub use ports::PaymentRequestNotifier;
