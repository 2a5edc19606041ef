use crate::{
    error::{LedgerBuildError, PaymentRequestError},
    ledger_builder::LedgerBuilder,
    model::{Event, Language},
    ports::PaymentRequestNotifier,
};
use potluck_domain::{Money, SettlementCalculator, Transfer};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BillSplitRow<'e> {
    pub person: &'e str,
    pub paid: Money,
    pub owes: Money,
    pub balance: Money,
    pub contact: Option<&'e str>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BillSplitTotals {
    pub paid: Money,
    pub owes: Money,
    pub balance: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BillSplit<'e> {
    pub event_name: &'e str,
    pub language: Language,
    /// Decimal places amounts are settled at.
    pub scale: u32,
    pub rows: Vec<BillSplitRow<'e>>,
    pub totals: BillSplitTotals,
    pub transfers: Vec<Transfer<'e>>,
    pub unattributed: Money,
}

impl<'e> BillSplit<'e> {
    pub fn row(&self, person: &str) -> Option<&BillSplitRow<'e>> {
        self.rows.iter().find(|row| row.person == person)
    }
}

/// A drafted "please pay" message for one transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaymentRequest<'e> {
    pub event_name: &'e str,
    pub debtor: &'e str,
    pub debtor_contact: &'e str,
    pub creditor: &'e str,
    pub creditor_contact: Option<&'e str>,
    pub host_name: &'e str,
    pub host_contact: Option<&'e str>,
    pub amount: Money,
    pub language: Language,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct BillSplitService {
    builder: LedgerBuilder,
    calculator: SettlementCalculator,
}

impl BillSplitService {
    pub fn new(builder: LedgerBuilder, calculator: SettlementCalculator) -> Self {
        Self {
            builder,
            calculator,
        }
    }

    pub fn compute<'e>(&self, event: &'e Event) -> Result<BillSplit<'e>, LedgerBuildError> {
        let built = self.builder.build(event)?;
        let participants = built.ledger.participants();

        let rows: Vec<BillSplitRow<'e>> = participants
            .iter()
            .zip(&built.contacts)
            .map(|(participant, &contact)| BillSplitRow {
                person: participant.identity,
                paid: participant.paid,
                owes: participant.owed,
                balance: participant.balance(),
                contact,
            })
            .collect();

        let totals = rows
            .iter()
            .fold(BillSplitTotals::default(), |mut totals, row| {
                totals.paid += row.paid;
                totals.owes += row.owes;
                totals.balance += row.balance;
                totals
            });

        let transfers = built.ledger.settle(&self.calculator).transfers;

        Ok(BillSplit {
            event_name: event.name.as_str(),
            language: event.language,
            scale: self.calculator.context().scale(),
            rows,
            totals,
            transfers,
            unattributed: built.unattributed,
        })
    }

    /// Drafts one request per transfer and hands each to `notifier`.
    ///
    /// Every debtor must have a contact; nothing is sent otherwise.
    pub fn request_payments<'e>(
        &self,
        event: &'e Event,
        split: &BillSplit<'e>,
        notifier: &dyn PaymentRequestNotifier,
    ) -> Result<Vec<PaymentRequest<'e>>, PaymentRequestError> {
        let requests = split
            .transfers
            .iter()
            .map(|transfer| {
                let contact_of = |person: &str| split.row(person).and_then(|row| row.contact);
                let debtor_contact = contact_of(transfer.from).ok_or_else(|| {
                    PaymentRequestError::MissingContact {
                        person: transfer.from.to_string(),
                    }
                })?;
                Ok(PaymentRequest {
                    event_name: split.event_name,
                    debtor: transfer.from,
                    debtor_contact,
                    creditor: transfer.to,
                    creditor_contact: contact_of(transfer.to),
                    host_name: event.host_name.as_str(),
                    host_contact: event.host_contact.as_deref(),
                    amount: transfer.amount,
                    language: split.language,
                })
            })
            .collect::<Result<Vec<_>, PaymentRequestError>>()?;

        for request in &requests {
            if let Err(source) = notifier.send(request) {
                tracing::error!(
                    event_id = %event.id,
                    debtor = request.debtor,
                    creditor = request.creditor,
                    amount = %request.amount,
                    error = %source,
                    "Failed to deliver payment request"
                );
                return Err(PaymentRequestError::Delivery {
                    person: request.debtor.to_string(),
                    source,
                });
            }
            tracing::info!(
                event_id = %event.id,
                debtor = request.debtor,
                creditor = request.creditor,
                amount = %request.amount,
                "Payment request sent"
            );
        }

        Ok(requests)
    }
}
