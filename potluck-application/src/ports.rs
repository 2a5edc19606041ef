use crate::{bill_split::PaymentRequest, error::NotifyError};

/// Outbound delivery of payment requests (email, SMS, ...).
pub trait PaymentRequestNotifier: Send + Sync {
    fn send(&self, request: &PaymentRequest<'_>) -> Result<(), NotifyError>;
}
