use crate::{
    model::{MemberBalances, Money, Participant, Settlement, Transfer},
    services::SettlementContext,
};

/// Greedy debt-settlement service.
///
/// Debtors are matched largest debt first against creditors largest credit
/// first. The result zeroes every balance but is not guaranteed to use the
/// fewest possible transfers.
#[derive(Clone, Copy, Debug, Default)]
pub struct SettlementCalculator {
    context: SettlementContext,
}

impl SettlementCalculator {
    pub fn new(context: SettlementContext) -> Self {
        Self { context }
    }

    pub fn context(&self) -> SettlementContext {
        self.context
    }

    /// Transfers that settle `participants`, in emission order.
    pub fn calculate<'a>(&self, participants: &[Participant<'a>]) -> Vec<Transfer<'a>> {
        self.settle(participants).transfers
    }

    /// Calculate settlement for `participants`
    ///
    /// The input is never mutated; matching runs on a working copy of the
    /// quantized balances.
    ///
    /// # Returns
    /// Balances after applying every transfer (residuals within tolerance stay
    /// visible) and the transfer list
    pub fn settle<'a>(&self, participants: &[Participant<'a>]) -> Settlement<'a> {
        let mut working_balances = MemberBalances::with_capacity(participants.len());
        for participant in participants {
            // Repeated identities are merged so no one ends up paying themselves.
            *working_balances
                .entry(participant.identity)
                .or_insert(Money::ZERO) += self.context.quantize(participant.balance());
        }

        let mut debtors: Vec<(&'a str, Money)> = Vec::new();
        let mut creditors: Vec<(&'a str, Money)> = Vec::new();
        for (&identity, &balance) in &working_balances {
            if self.context.is_negligible(balance) {
                continue;
            }
            if balance.is_negative() {
                debtors.push((identity, balance));
            } else {
                creditors.push((identity, balance));
            }
        }

        // Stable sorts: equal balances keep ledger order.
        debtors.sort_by(|(_, a), (_, b)| a.cmp(b));
        creditors.sort_by(|(_, a), (_, b)| b.cmp(a));

        let debtor_count = debtors.len();
        let creditor_count = creditors.len();
        let mut transfers = Vec::with_capacity(debtor_count + creditor_count);

        for (debtor, balance) in debtors {
            let mut remaining = -balance;

            for (creditor, credit) in creditors.iter_mut() {
                if !credit.is_positive() {
                    continue;
                }

                let amount = remaining.min(*credit);
                if amount.is_positive() {
                    *credit -= amount;
                    remaining -= amount;
                    transfers.push(Transfer {
                        from: debtor,
                        to: *creditor,
                        amount,
                    });
                }
                if !remaining.is_positive() {
                    break;
                }
            }
        }

        let mut new_balances = working_balances;
        for transfer in &transfers {
            if let Some(balance) = new_balances.get_mut(transfer.from) {
                *balance += transfer.amount;
            }
            if let Some(balance) = new_balances.get_mut(transfer.to) {
                *balance -= transfer.amount;
            }
        }

        let residual: Money = new_balances.values().map(|balance| balance.abs()).sum();
        let unsettled = new_balances
            .values()
            .filter(|balance| !self.context.is_negligible(**balance))
            .count();

        tracing::debug!(
            participant_count = participants.len(),
            debtor_count,
            creditor_count,
            transfer_count = transfers.len(),
            scale = self.context.scale(),
            tolerance = %self.context.tolerance(),
            residual = %residual,
            "Settlement calculated"
        );

        if unsettled > 0 {
            tracing::warn!(
                unsettled,
                residual = %residual,
                tolerance = %self.context.tolerance(),
                "Ledger does not sum to zero; some balances remain after settlement"
            );
        }

        Settlement {
            new_balances,
            transfers,
        }
    }
}
