//! Buyer Protection
//!
//! A tiered percentage surcharge added to protect buyers, looked up per item
//! by price range (e.g. up to £100 pays 5%). Tiers are matched in table
//! order, like weight bands. An item whose price matches no tier contributes
//! exactly zero fee — a policy choice, not an error.

use decimal_percentage::Percentage;
use num_traits::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::items::BasketItem;

/// Errors specific to protection fee calculations.
#[derive(Debug, Error)]
pub enum ProtectionFeeError {
    /// Percentage application overflowed or was not representable.
    #[error("percentage application overflowed or was not representable")]
    PercentConversion,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// A price range mapped to a protection fee percentage.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtectionTier<'a> {
    min_price: Money<'a, Currency>,
    max_price: Money<'a, Currency>,
    rate: Percentage,
}

impl<'a> ProtectionTier<'a> {
    /// Create a tier covering `min_price..=max_price` at the given rate.
    ///
    /// The rate is a fraction: `Percentage::from(0.05)` is 5%.
    #[must_use]
    pub fn new(min_price: Money<'a, Currency>, max_price: Money<'a, Currency>, rate: Percentage) -> Self {
        ProtectionTier {
            min_price,
            max_price,
            rate,
        }
    }

    /// Lower bound of the tier, inclusive.
    #[must_use]
    pub fn min_price(&self) -> &Money<'a, Currency> {
        &self.min_price
    }

    /// Upper bound of the tier, inclusive.
    #[must_use]
    pub fn max_price(&self) -> &Money<'a, Currency> {
        &self.max_price
    }

    /// The fee rate as a fraction.
    #[must_use]
    pub fn rate(&self) -> Percentage {
        self.rate
    }

    /// Whether the price falls inside the tier, inclusive on both ends.
    #[must_use]
    pub fn covers(&self, price: &Money<'_, Currency>) -> bool {
        self.min_price.to_minor_units() <= price.to_minor_units()
            && price.to_minor_units() <= self.max_price.to_minor_units()
    }
}

/// Find the tier covering `price`, first match in table order.
#[must_use]
pub fn resolve_tier<'a, 'b>(
    tiers: &'b [ProtectionTier<'a>],
    price: &Money<'_, Currency>,
) -> Option<&'b ProtectionTier<'a>> {
    tiers.iter().find(|tier| tier.covers(price))
}

/// The protection fee for a single basket row.
///
/// The per-unit fee is the effective price times the tier rate, rounded to
/// minor units (midpoint away from zero), then multiplied by the row's
/// quantity. A price with no matching tier contributes zero.
///
/// # Errors
///
/// Returns a [`ProtectionFeeError`] if the percentage application cannot be
/// safely represented in minor units.
pub fn protection_fee<'a>(
    tiers: &[ProtectionTier<'_>],
    item: &BasketItem<'a>,
) -> Result<Money<'a, Currency>, ProtectionFeeError> {
    let unit_price = item.listing().effective_price();

    let Some(tier) = resolve_tier(tiers, unit_price) else {
        return Ok(Money::from_minor(0, unit_price.currency()));
    };

    let unit_fee = percent_of_minor(tier.rate(), unit_price.to_minor_units())?;

    Ok(Money::from_minor(
        unit_fee * i64::from(item.quantity()),
        unit_price.currency(),
    ))
}

/// The total protection fee across a list of basket rows.
///
/// # Errors
///
/// Returns a [`ProtectionFeeError`] if a fee cannot be calculated or the
/// rows' fees cannot be summed.
pub fn total_protection_fee<'a>(
    tiers: &[ProtectionTier<'_>],
    items: &[BasketItem<'a>],
    currency: &'static Currency,
) -> Result<Money<'a, Currency>, ProtectionFeeError> {
    items
        .iter()
        .try_fold(Money::from_minor(0, currency), |acc, item| {
            let fee = protection_fee(tiers, item)?;

            acc.add(fee).map_err(ProtectionFeeError::Money)
        })
}

/// Apply a fractional percentage to a minor unit amount, rounding to the
/// nearest minor unit, midpoint away from zero.
fn percent_of_minor(percent: Percentage, minor: i64) -> Result<i64, ProtectionFeeError> {
    let Some(minor) = Decimal::from_i64(minor) else {
        unreachable!("always returns `Some` for every `i64`")
    };

    let applied = percent * minor;
    let rounded = applied.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

    rounded.to_i64().ok_or(ProtectionFeeError::PercentConversion)
}
