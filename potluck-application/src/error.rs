use crate::model::EventType;
use potluck_domain::LedgerError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerBuildError {
    #[error("{0:?} events do not track costs")]
    CostsNotTracked(EventType),
    #[error("costs of event '{event_id}' add up to more than can be represented")]
    AmountOverflow { event_id: String },
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaymentRequestError {
    #[error("no email or phone on file for '{person}'")]
    MissingContact { person: String },
    #[error("failed to deliver payment request to '{person}': {source}")]
    Delivery {
        person: String,
        #[source]
        source: NotifyError,
    },
}

/// Failure reported by a [`PaymentRequestNotifier`](crate::PaymentRequestNotifier).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct NotifyError(pub String);
