//! Gavel prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    basket::{Basket, BasketError},
    checkout::{CheckoutStage, CheckoutState, Destination},
    fixtures::{Fixture, FixtureError},
    items::{
        BasketItem, Listing,
        groups::{SellerGroup, SellerGroups},
    },
    pricing::{TotalPriceError, total_price},
    protection::{ProtectionFeeError, ProtectionTier, protection_fee, resolve_tier, total_protection_fee},
    sellers::{Seller, SellerDirectory, SellerKey, SellerRef},
    shipping::{
        DeliveryEstimate, ProviderKey, ShippingProvider,
        bands::{WeightBand, resolve_band},
        options::{
            RateTable, SellerOptions, ShippingAvailability, ShippingOption, resolve_options,
        },
    },
    summary::{OrderSummary, SellerShippingLine, SummaryError, compute_summary},
    weight::Weight,
};
