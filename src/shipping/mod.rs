//! Shipping
//!
//! Providers and their weight-band rate cards, as seeded by marketplace
//! admins. The checkout flow only ever reads these tables.

use std::time::Duration;

use slotmap::new_key_type;

pub mod bands;
pub mod options;

new_key_type! {
    /// Shipping Provider Key
    pub struct ProviderKey;
}

const SECONDS_PER_DAY: u64 = 86_400;

/// Estimated delivery window in days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryEstimate {
    min_days: u16,
    max_days: u16,
}

impl DeliveryEstimate {
    /// Create a new estimate spanning `min_days..=max_days`.
    #[must_use]
    pub fn new(min_days: u16, max_days: u16) -> Self {
        DeliveryEstimate { min_days, max_days }
    }

    /// Earliest expected delivery, in days.
    #[must_use]
    pub fn min_days(&self) -> u16 {
        self.min_days
    }

    /// Latest expected delivery, in days.
    #[must_use]
    pub fn max_days(&self) -> u16 {
        self.max_days
    }

    /// The window bounds as [`Duration`]s, for display.
    #[must_use]
    pub fn window(&self) -> (Duration, Duration) {
        (
            Duration::from_secs(u64::from(self.min_days) * SECONDS_PER_DAY),
            Duration::from_secs(u64::from(self.max_days) * SECONDS_PER_DAY),
        )
    }
}

/// A shipping provider.
#[derive(Debug, Clone)]
pub struct ShippingProvider {
    /// Service name shown to buyers
    pub name: String,

    /// Carrier fulfilling the service
    pub carrier: String,

    /// Inactive providers are never offered at checkout
    pub is_active: bool,

    /// Whether the provider ships to international destinations
    pub is_international: bool,

    /// Estimated delivery window
    pub estimated_days: DeliveryEstimate,
}
