use std::collections::HashMap;

use potluck_domain::{Money, Participant, SettlementCalculator, Transfer, split_evenly};
use proptest::prelude::*;

const NAMES: [&str; 8] = ["Host", "A", "B", "C", "D", "E", "F", "G"];

/// Builds a zero-sum ledger: paid amounts in cents, total split evenly.
fn ledger(paid_cents: &[i64]) -> Vec<Participant<'static>> {
    let paid: Vec<Money> = paid_cents.iter().map(|&c| Money::new(c, 2)).collect();
    let total: Money = paid.iter().sum();
    let owed = split_evenly(total, paid.len(), 2);

    paid.into_iter()
        .zip(owed)
        .enumerate()
        .map(|(idx, (paid, owed))| Participant::new(NAMES[idx], paid, owed))
        .collect()
}

fn net_flows<'a>(transfers: &[Transfer<'a>]) -> HashMap<&'a str, (Money, Money)> {
    let mut flows: HashMap<&str, (Money, Money)> = HashMap::new();
    for transfer in transfers {
        flows.entry(transfer.from).or_default().0 += transfer.amount;
        flows.entry(transfer.to).or_default().1 += transfer.amount;
    }
    flows
}

proptest! {
    #[test]
    fn balances_are_conserved(paid_cents in prop::collection::vec(0i64..=50_000, 1..=8)) {
        let participants = ledger(&paid_cents);
        let transfers = SettlementCalculator::default().calculate(&participants);
        let flows = net_flows(&transfers);

        for participant in &participants {
            let (sent, received) = flows
                .get(participant.identity)
                .copied()
                .unwrap_or_default();
            let balance = participant.balance();
            if balance.is_negative() {
                prop_assert_eq!(sent, -balance);
                prop_assert!(received.is_zero());
            } else {
                prop_assert_eq!(received, balance);
                prop_assert!(sent.is_zero());
            }
        }
    }

    #[test]
    fn total_transferred_matches_positive_balances(
        paid_cents in prop::collection::vec(0i64..=50_000, 1..=8),
    ) {
        let participants = ledger(&paid_cents);
        let settlement = SettlementCalculator::default().settle(&participants);

        let credit: Money = participants
            .iter()
            .map(Participant::balance)
            .filter(|balance| balance.is_positive())
            .sum();
        prop_assert_eq!(settlement.transferred_total(), credit);
        prop_assert!(settlement.new_balances.values().all(|b| b.is_zero()));
    }

    #[test]
    fn transfers_are_positive_and_never_self_directed(
        paid_cents in prop::collection::vec(0i64..=50_000, 0..=8),
    ) {
        let participants = ledger(&paid_cents);
        let transfers = SettlementCalculator::default().calculate(&participants);

        for transfer in &transfers {
            prop_assert!(transfer.amount.is_positive());
            prop_assert_ne!(transfer.from, transfer.to);
        }
        // Each transfer zeroes at least one debtor or creditor.
        prop_assert!(transfers.len() < participants.len().max(1));
    }

    #[test]
    fn settled_ledgers_produce_no_transfers(
        amounts in prop::collection::vec(0i64..=50_000, 0..=8),
    ) {
        let participants: Vec<Participant<'static>> = amounts
            .iter()
            .enumerate()
            .map(|(idx, &cents)| {
                Participant::new(NAMES[idx], Money::new(cents, 2), Money::new(cents, 2))
            })
            .collect();

        prop_assert!(SettlementCalculator::default().calculate(&participants).is_empty());
    }

    #[test]
    fn imbalanced_ledgers_do_not_fail(
        paid_cents in prop::collection::vec(0i64..=50_000, 1..=8),
        owed_cents in prop::collection::vec(0i64..=50_000, 8),
    ) {
        let participants: Vec<Participant<'static>> = paid_cents
            .iter()
            .zip(&owed_cents)
            .enumerate()
            .map(|(idx, (&paid, &owed))| {
                Participant::new(NAMES[idx], Money::new(paid, 2), Money::new(owed, 2))
            })
            .collect();

        let settlement = SettlementCalculator::default().settle(&participants);
        for transfer in &settlement.transfers {
            prop_assert!(transfer.amount.is_positive());
            prop_assert_ne!(transfer.from, transfer.to);
        }
        // Whatever is left over sits entirely on one side of zero.
        let has_debt = settlement.new_balances.values().any(|b| b.is_negative());
        let has_credit = settlement.new_balances.values().any(|b| b.is_positive());
        prop_assert!(!(has_debt && has_credit));
    }
}
