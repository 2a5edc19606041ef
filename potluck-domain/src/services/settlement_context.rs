//! Numeric configuration for settlement: the atomic unit balances are
//! quantized to, how midpoints round, and how close to zero a balance must be
//! to count as settled.

use crate::model::{MAX_SCALE, Money};
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Rounding mode for balance quantization.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RoundingMode {
    /// Round half away from zero (e.g., 0.005 -> 0.01, -0.005 -> -0.01).
    #[default]
    HalfUp,
    /// Round half to nearest even number (banker's rounding).
    /// Reduces bias in repeated rounding operations.
    HalfEven,
}

impl RoundingMode {
    fn strategy(self) -> RoundingStrategy {
        match self {
            RoundingMode::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            RoundingMode::HalfEven => RoundingStrategy::MidpointNearestEven,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SettlementContextError {
    #[error("scale {scale} is not supported (max {max_supported})")]
    UnsupportedScale { scale: u32, max_supported: u32 },
    #[error("tolerance must not be negative (found {0})")]
    NegativeTolerance(Money),
}

/// Context for settlement arithmetic.
///
/// # Example
/// ```
/// use potluck_domain::{Money, RoundingMode, SettlementContext};
///
/// let ctx = SettlementContext::cents();
/// assert_eq!(ctx.scale(), 2);
/// assert_eq!(ctx.rounding_mode(), RoundingMode::HalfUp);
/// assert_eq!(ctx.quantize(Money::new(10005, 3)), Money::new(1001, 2));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SettlementContext {
    scale: u32,
    rounding_mode: RoundingMode,
    tolerance: Money,
}

impl SettlementContext {
    /// Validated constructor.
    pub fn new(
        scale: u32,
        rounding_mode: RoundingMode,
        tolerance: Money,
    ) -> Result<Self, SettlementContextError> {
        check_scale(scale)?;
        if tolerance.is_negative() {
            return Err(SettlementContextError::NegativeTolerance(tolerance));
        }
        Ok(Self {
            scale,
            rounding_mode,
            tolerance,
        })
    }

    /// Context with the default tolerance of half an atomic unit.
    pub fn with_scale(
        scale: u32,
        rounding_mode: RoundingMode,
    ) -> Result<Self, SettlementContextError> {
        // The tolerance is derived from the scale, so reject it up front.
        check_scale(scale)?;
        Self::new(scale, rounding_mode, half_unit(scale))
    }

    /// Two decimal places, half-up, half-a-cent tolerance.
    pub fn cents() -> Self {
        Self {
            scale: 2,
            rounding_mode: RoundingMode::HalfUp,
            tolerance: half_unit(2),
        }
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    pub fn rounding_mode(&self) -> RoundingMode {
        self.rounding_mode
    }

    pub fn tolerance(&self) -> Money {
        self.tolerance
    }

    /// Smallest representable amount, e.g. `0.01` at scale 2.
    pub fn atomic_unit(&self) -> Money {
        Money::new(1, self.scale)
    }

    pub fn quantize(&self, amount: Money) -> Money {
        amount.round_dp(self.scale, self.rounding_mode.strategy())
    }

    /// Whether `amount` is close enough to zero to count as settled.
    pub fn is_negligible(&self, amount: Money) -> bool {
        amount.abs() <= self.tolerance
    }
}

impl Default for SettlementContext {
    fn default() -> Self {
        Self::cents()
    }
}

fn check_scale(scale: u32) -> Result<(), SettlementContextError> {
    if scale > MAX_SCALE {
        return Err(SettlementContextError::UnsupportedScale {
            scale,
            max_supported: MAX_SCALE,
        });
    }
    Ok(())
}

fn half_unit(scale: u32) -> Money {
    Money::from_decimal(Decimal::new(5, scale + 1))
}
