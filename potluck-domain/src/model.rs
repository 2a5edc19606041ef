use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
    str::FromStr,
};

use fxhash::FxHashSet;
use indexmap::IndexMap;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::services::SettlementCalculator;

/// Largest decimal scale accepted for money arithmetic.
pub const MAX_SCALE: u32 = 22;

/// Balance table keyed by participant identity, in ledger order.
pub type MemberBalances<'a> = IndexMap<&'a str, Money>;

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// `Money::new(1050, 2)` is `10.50`.
    ///
    /// # Panics
    /// When `scale` exceeds [`MAX_SCALE`].
    pub fn new(num: i64, scale: u32) -> Self {
        assert!(
            scale <= MAX_SCALE,
            "scale {scale} exceeds the maximum of {MAX_SCALE}"
        );
        Self(Decimal::new(num, scale))
    }

    pub fn from_i64(value: i64) -> Self {
        Self(Decimal::from(value))
    }

    pub fn from_decimal(value: Decimal) -> Self {
        Self(value)
    }

    pub fn as_decimal(self) -> Decimal {
        self.0
    }

    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    pub fn is_positive(self) -> bool {
        self.0 > Decimal::ZERO
    }

    pub fn is_negative(self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// `None` when the sum does not fit in a decimal.
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Self)
    }

    /// Rounds to `scale` places; amounts already at or below that scale are
    /// returned unchanged.
    pub fn round_dp(self, scale: u32, strategy: RoundingStrategy) -> Self {
        Self(self.0.round_dp_with_strategy(scale, strategy))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim()).map(Self)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// One party in an event's cost-sharing ledger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Participant<'a> {
    pub identity: &'a str,
    pub paid: Money,
    pub owed: Money,
}

impl<'a> Participant<'a> {
    pub fn new(identity: &'a str, paid: Money, owed: Money) -> Self {
        Self {
            identity,
            paid,
            owed,
        }
    }

    /// Positive when the participant is owed money, negative when they owe.
    pub fn balance(&self) -> Money {
        self.paid - self.owed
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Transfer<'a> {
    pub from: &'a str,
    pub to: &'a str,
    pub amount: Money,
}

#[derive(Debug, PartialEq)]
pub struct Settlement<'a> {
    pub new_balances: MemberBalances<'a>,
    pub transfers: Vec<Transfer<'a>>,
}

impl Settlement<'_> {
    pub fn transferred_total(&self) -> Money {
        self.transfers.iter().map(|transfer| transfer.amount).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("participant #{index} has an empty identity")]
    EmptyIdentity { index: usize },
    #[error("participant '{identity}' appears more than once")]
    DuplicateIdentity { identity: String },
    #[error("participant '{identity}' has a negative paid amount ({amount})")]
    NegativePaid { identity: String, amount: Money },
    #[error("participant '{identity}' has a negative owed amount ({amount})")]
    NegativeOwed { identity: String, amount: Money },
}

/// Participants validated at the boundary: non-empty unique identities and
/// non-negative amounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ledger<'a> {
    participants: Vec<Participant<'a>>,
}

impl<'a> Ledger<'a> {
    pub fn try_new(participants: Vec<Participant<'a>>) -> Result<Self, LedgerError> {
        let mut seen = FxHashSet::default();

        for (index, participant) in participants.iter().enumerate() {
            let identity = participant.identity;
            if identity.trim().is_empty() {
                return Err(LedgerError::EmptyIdentity { index });
            }
            if !seen.insert(identity) {
                return Err(LedgerError::DuplicateIdentity {
                    identity: identity.to_string(),
                });
            }
            if participant.paid.is_negative() {
                return Err(LedgerError::NegativePaid {
                    identity: identity.to_string(),
                    amount: participant.paid,
                });
            }
            if participant.owed.is_negative() {
                return Err(LedgerError::NegativeOwed {
                    identity: identity.to_string(),
                    amount: participant.owed,
                });
            }
        }

        Ok(Self { participants })
    }

    pub fn participants(&self) -> &[Participant<'a>] {
        &self.participants
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn total_paid(&self) -> Money {
        self.participants.iter().map(|p| p.paid).sum()
    }

    pub fn total_owed(&self) -> Money {
        self.participants.iter().map(|p| p.owed).sum()
    }

    /// `total_paid - total_owed`; zero for a consistent ledger.
    pub fn imbalance(&self) -> Money {
        self.total_paid() - self.total_owed()
    }

    pub fn balances(&self) -> MemberBalances<'a> {
        self.participants
            .iter()
            .map(|p| (p.identity, p.balance()))
            .collect()
    }

    pub fn settle(&self, calculator: &SettlementCalculator) -> Settlement<'a> {
        calculator.settle(&self.participants)
    }
}

/// Splits `total` into `count` shares at `scale` decimal places (capped at
/// [`MAX_SCALE`]).
///
/// Shares sum exactly to `total`. Whole atomic units left over after the even
/// division go one each to the leading shares, so earlier participants pay at
/// most one unit more than later ones.
pub fn split_evenly(total: Money, count: usize, scale: u32) -> Vec<Money> {
    if count == 0 {
        return Vec::new();
    }

    let scale = scale.min(MAX_SCALE);
    let unit = Decimal::new(1, scale);
    let divisor = Decimal::from(count as u64);
    let base = (total.0 / divisor).round_dp_with_strategy(scale, RoundingStrategy::ToZero);
    let mut remainder = total.0 - base * divisor;

    let mut shares = vec![Money(base); count];
    for share in shares.iter_mut() {
        if remainder.abs() < unit {
            break;
        }
        let step = if remainder.is_sign_negative() {
            -unit
        } else {
            unit
        };
        share.0 += step;
        remainder -= step;
    }
    // Sub-unit dust only appears when `total` itself is finer than `scale`.
    if let Some(first) = shares.first_mut() {
        first.0 += remainder;
    }

    shares
}
