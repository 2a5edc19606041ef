use crate::{
    error::LedgerBuildError,
    model::{Event, InvitationStatus},
};
use potluck_domain::{Ledger, Money, Participant, split_evenly};

/// Which invitees take part in the split. The host always does.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ParticipantScope {
    #[default]
    AllInvitees,
    AcceptedOnly,
}

impl ParticipantScope {
    pub fn includes(self, status: InvitationStatus) -> bool {
        match self {
            ParticipantScope::AllInvitees => true,
            ParticipantScope::AcceptedOnly => status == InvitationStatus::Accepted,
        }
    }
}

/// Ledger for one event plus the bookkeeping the ledger itself doesn't carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventLedger<'e> {
    pub ledger: Ledger<'e>,
    /// Contact per participant, in ledger order.
    pub contacts: Vec<Option<&'e str>>,
    /// Sum of costs attributed to a participant; split evenly across the ledger.
    pub total_cost: Money,
    /// Costs on needs nobody in the ledger has claimed.
    pub unattributed: Money,
}

/// Turns an event record into a settlement ledger.
#[derive(Clone, Copy, Debug)]
pub struct LedgerBuilder {
    scope: ParticipantScope,
    scale: u32,
}

impl LedgerBuilder {
    pub fn new(scope: ParticipantScope, scale: u32) -> Self {
        Self { scope, scale }
    }

    /// Host first, then invitees in order. A need counts toward whoever
    /// claimed it; claims by the creator's auth id belong to the host.
    pub fn build<'e>(&self, event: &'e Event) -> Result<EventLedger<'e>, LedgerBuildError> {
        if !event.event_type.tracks_costs() {
            return Err(LedgerBuildError::CostsNotTracked(event.event_type));
        }

        let mut seats: Vec<(&'e str, Option<&'e str>)> =
            Vec::with_capacity(event.invitees.len() + 1);
        seats.push((event.host_name.as_str(), event.host_contact.as_deref()));
        seats.extend(
            event
                .invitees
                .iter()
                .filter(|invitee| self.scope.includes(invitee.invitation))
                .map(|invitee| (invitee.name.as_str(), Some(invitee.email_or_phone.as_str()))),
        );

        let overflow = || LedgerBuildError::AmountOverflow {
            event_id: event.id.clone(),
        };
        let mut paid = vec![Money::ZERO; seats.len()];
        let mut unattributed = Money::ZERO;

        for need in &event.needs {
            let Some(cost) = need.cost else {
                continue;
            };
            let claimant = need.claimed_by.as_deref();
            let seat = claimant.and_then(|claimant| {
                if claimant == event.creator {
                    Some(0)
                } else {
                    seats.iter().position(|(name, _)| *name == claimant)
                }
            });

            match seat {
                Some(idx) => paid[idx] = paid[idx].checked_add(cost).ok_or_else(overflow)?,
                None => {
                    tracing::warn!(
                        event_id = %event.id,
                        need_id = %need.id,
                        item = %need.item,
                        claimed_by = ?claimant,
                        cost = %cost,
                        "Need cost is not attributed to any participant"
                    );
                    unattributed = unattributed.checked_add(cost).ok_or_else(overflow)?;
                }
            }
        }

        let total_cost = paid
            .iter()
            .try_fold(Money::ZERO, |total, &amount| total.checked_add(amount))
            .ok_or_else(overflow)?;
        let owed = split_evenly(total_cost, seats.len(), self.scale);

        let participants = seats
            .iter()
            .zip(paid)
            .zip(owed)
            .map(|((&(identity, _), paid), owed)| Participant::new(identity, paid, owed))
            .collect();
        let ledger = Ledger::try_new(participants)?;
        let contacts = seats.into_iter().map(|(_, contact)| contact).collect();

        tracing::debug!(
            event_id = %event.id,
            participant_count = ledger.len(),
            total_cost = %total_cost,
            unattributed = %unattributed,
            scope = ?self.scope,
            "Event ledger built"
        );

        Ok(EventLedger {
            ledger,
            contacts,
            total_cost,
            unattributed,
        })
    }
}

impl Default for LedgerBuilder {
    fn default() -> Self {
        Self::new(ParticipantScope::default(), 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EventType, Invitee, Language, Need, NeedStatus};
    use potluck_domain::LedgerError;
    use rstest::{fixture, rstest};

    fn invitee(name: &str, invitation: InvitationStatus) -> Invitee {
        Invitee {
            name: name.to_string(),
            email_or_phone: format!("{}@example.com", name.to_lowercase()),
            invitation,
            reminder_preference: None,
        }
    }

    fn need(id: &str, cost: Option<i64>, claimed_by: Option<&str>) -> Need {
        Need {
            id: id.to_string(),
            item: format!("item-{id}"),
            cost: cost.map(Money::from_i64),
            status: if claimed_by.is_some() {
                NeedStatus::Claimed
            } else {
                NeedStatus::Open
            },
            claimed_by: claimed_by.map(str::to_string),
        }
    }

    #[fixture]
    fn dinner() -> Event {
        Event {
            id: "evt-1".to_string(),
            name: "Dinner".to_string(),
            description: None,
            event_type: EventType::Eatery,
            creator: "auth0|host".to_string(),
            host_name: "Host".to_string(),
            host_contact: Some("host@example.com".to_string()),
            invitees: vec![
                invitee("Alice", InvitationStatus::Accepted),
                invitee("Bob", InvitationStatus::Rejected),
            ],
            needs: vec![
                need("1", Some(20), Some("auth0|host")),
                need("2", Some(10), Some("Host")),
                need("3", None, Some("Alice")),
            ],
            language: Language::En,
        }
    }

    #[rstest]
    fn host_claims_by_auth_id_and_name(dinner: Event) {
        let built = LedgerBuilder::default().build(&dinner).expect("ledger");

        let participants = built.ledger.participants();
        assert_eq!(
            participants,
            &[
                Participant::new("Host", Money::from_i64(30), Money::from_i64(10)),
                Participant::new("Alice", Money::ZERO, Money::from_i64(10)),
                Participant::new("Bob", Money::ZERO, Money::from_i64(10)),
            ]
        );
        assert_eq!(built.total_cost, Money::from_i64(30));
        assert!(built.unattributed.is_zero());
        assert_eq!(
            built.contacts,
            vec![
                Some("host@example.com"),
                Some("alice@example.com"),
                Some("bob@example.com"),
            ]
        );
    }

    #[rstest]
    fn accepted_only_scope_drops_other_invitees(dinner: Event) {
        let builder = LedgerBuilder::new(ParticipantScope::AcceptedOnly, 2);
        let built = builder.build(&dinner).expect("ledger");

        let identities: Vec<&str> = built
            .ledger
            .participants()
            .iter()
            .map(|p| p.identity)
            .collect();
        assert_eq!(identities, vec!["Host", "Alice"]);
        assert_eq!(built.ledger.participants()[0].owed, Money::from_i64(15));
    }

    #[rstest]
    fn unknown_claimants_are_unattributed(mut dinner: Event) {
        dinner.needs.push(need("4", Some(7), Some("Mallory")));
        dinner.needs.push(need("5", Some(5), None));

        let built = LedgerBuilder::default().build(&dinner).expect("ledger");

        assert_eq!(built.unattributed, Money::from_i64(12));
        assert_eq!(built.total_cost, Money::from_i64(30));
        assert!(built.ledger.imbalance().is_zero());
    }

    #[rstest]
    fn uneven_total_spreads_cents(mut dinner: Event) {
        dinner.needs = vec![need("1", Some(100), Some("Alice"))];

        let built = LedgerBuilder::default().build(&dinner).expect("ledger");

        let owed: Vec<Money> = built.ledger.participants().iter().map(|p| p.owed).collect();
        assert_eq!(
            owed,
            vec![Money::new(3334, 2), Money::new(3333, 2), Money::new(3333, 2)]
        );
        assert!(built.ledger.imbalance().is_zero());
    }

    #[rstest]
    fn business_meetings_have_no_bill(mut dinner: Event) {
        dinner.event_type = EventType::Bizmeet;

        assert_eq!(
            LedgerBuilder::default().build(&dinner),
            Err(LedgerBuildError::CostsNotTracked(EventType::Bizmeet))
        );
    }

    #[rstest]
    fn invitee_sharing_host_name_is_rejected(mut dinner: Event) {
        dinner.invitees.push(invitee("Host", InvitationStatus::Sent));

        assert_eq!(
            LedgerBuilder::default().build(&dinner),
            Err(LedgerBuildError::Ledger(LedgerError::DuplicateIdentity {
                identity: "Host".to_string()
            }))
        );
    }

    #[rstest]
    #[case::one_claimant(["Alice", "Alice"])]
    #[case::across_claimants(["Alice", "Host"])]
    #[case::unclaimed(["Mallory", "Mallory"])]
    fn oversized_costs_are_rejected(mut dinner: Event, #[case] claimants: [&str; 2]) {
        let huge: Money = "79228162514264337593543950335".parse().expect("max decimal");
        dinner.needs = claimants
            .iter()
            .enumerate()
            .map(|(idx, &claimant)| Need {
                cost: Some(huge),
                ..need(&idx.to_string(), None, Some(claimant))
            })
            .collect();

        assert_eq!(
            LedgerBuilder::default().build(&dinner),
            Err(LedgerBuildError::AmountOverflow {
                event_id: "evt-1".to_string()
            })
        );
    }

    #[rstest]
    fn no_needs_means_nothing_owed(mut dinner: Event) {
        dinner.needs.clear();

        let built = LedgerBuilder::default().build(&dinner).expect("ledger");

        assert!(built.ledger.participants().iter().all(|p| p.balance().is_zero()));
    }
}
