//! Weight Bands
//!
//! A band maps a weight range to a fixed shipping price for one provider.
//! Admin-seeded tables are expected to be non-overlapping and to cover the
//! provider's supported range, but nothing enforces that at write time, so
//! resolution follows a deterministic first-match-in-table-order rule.

use rusty_money::{Money, iso::Currency};

use crate::{shipping::ProviderKey, weight::Weight};

/// A weight range mapped to a fixed shipping price for a given provider.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightBand<'a> {
    provider: ProviderKey,
    min_weight: Weight,
    max_weight: Weight,
    price: Money<'a, Currency>,
}

impl<'a> WeightBand<'a> {
    /// Create a new band covering `min_weight..=max_weight`.
    #[must_use]
    pub fn new(
        provider: ProviderKey,
        min_weight: Weight,
        max_weight: Weight,
        price: Money<'a, Currency>,
    ) -> Self {
        WeightBand {
            provider,
            min_weight,
            max_weight,
            price,
        }
    }

    /// The provider this band belongs to.
    #[must_use]
    pub fn provider(&self) -> ProviderKey {
        self.provider
    }

    /// Lower bound of the band, inclusive.
    #[must_use]
    pub fn min_weight(&self) -> Weight {
        self.min_weight
    }

    /// Upper bound of the band, inclusive.
    #[must_use]
    pub fn max_weight(&self) -> Weight {
        self.max_weight
    }

    /// The shipping price for parcels inside the band.
    #[must_use]
    pub fn price(&self) -> &Money<'a, Currency> {
        &self.price
    }

    /// Whether the weight falls inside the band, inclusive on both ends.
    #[must_use]
    pub fn covers(&self, weight: Weight) -> bool {
        self.min_weight <= weight && weight <= self.max_weight
    }
}

/// Find the band pricing `weight` for `provider`.
///
/// Bands are scanned in table order and the first match wins. When two bands
/// overlap, table order decides the price; the rule keeps resolution
/// deterministic without validating the seeded data.
///
/// Returns `None` when no band covers the weight (the parcel is heavier than
/// every band, the provider has no bands, or the provider is unknown).
/// Callers treat `None` as "no valid shipping option for this weight", never
/// as an error.
pub fn resolve_band<'a, 'b>(
    bands: &'b [WeightBand<'a>],
    provider: ProviderKey,
    weight: Weight,
) -> Option<&'b WeightBand<'a>> {
    bands
        .iter()
        .find(|band| band.provider() == provider && band.covers(weight))
}
