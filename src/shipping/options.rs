//! Shipping Options
//!
//! The options offerable to a buyer for one seller's parcel: the subset of
//! that seller's assigned providers whose band lookup for the parcel's total
//! weight resolves. A seller with no offerable option blocks checkout for
//! its rows only, with a reason the UI can distinguish from "destination not
//! yet selected".

use rusty_money::{Money, iso::Currency};
use slotmap::SlotMap;
use smallvec::SmallVec;

use crate::{
    checkout::Destination,
    items::groups::SellerGroups,
    sellers::{SellerDirectory, SellerKey},
    shipping::{
        ProviderKey, ShippingProvider,
        bands::{WeightBand, resolve_band},
    },
    weight::Weight,
};

/// The admin-seeded provider and band tables, as fetched for checkout.
///
/// Bands keep their insertion order; [`RateTable::resolve`] is first match in
/// that order.
#[derive(Debug, Default)]
pub struct RateTable<'a> {
    providers: SlotMap<ProviderKey, ShippingProvider>,
    bands: Vec<WeightBand<'a>>,
}

impl<'a> RateTable<'a> {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider.
    pub fn insert_provider(&mut self, provider: ShippingProvider) -> ProviderKey {
        self.providers.insert(provider)
    }

    /// Append a band. Table order is resolution order.
    pub fn push_band(&mut self, band: WeightBand<'a>) {
        self.bands.push(band);
    }

    /// Look up a provider by key.
    #[must_use]
    pub fn provider(&self, key: ProviderKey) -> Option<&ShippingProvider> {
        self.providers.get(key)
    }

    /// The full band table, unfiltered.
    #[must_use]
    pub fn bands(&self) -> &[WeightBand<'a>] {
        &self.bands
    }

    /// Resolve the band pricing `weight` for `provider`.
    #[must_use]
    pub fn resolve(&self, provider: ProviderKey, weight: Weight) -> Option<&WeightBand<'a>> {
        resolve_band(&self.bands, provider, weight)
    }
}

/// Why a seller's parcel has no offerable shipping options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShippingAvailability {
    /// At least one option is offerable.
    Available,

    /// No provider band covers the parcel's total weight; the buyer is told
    /// to contact the seller.
    NoBandForWeight,

    /// The rate tables could not be fetched. Checkout degrades to "shipping
    /// options unavailable" rather than failing.
    RatesUnavailable,
}

/// A single offerable option for one seller's parcel.
#[derive(Debug, Clone, PartialEq)]
pub struct ShippingOption<'a> {
    provider: ProviderKey,
    price: Money<'a, Currency>,
}

impl<'a> ShippingOption<'a> {
    /// Create a new option.
    #[must_use]
    pub fn new(provider: ProviderKey, price: Money<'a, Currency>) -> Self {
        ShippingOption { provider, price }
    }

    /// The provider offering the option.
    #[must_use]
    pub fn provider(&self) -> ProviderKey {
        self.provider
    }

    /// The resolved band price for the parcel.
    #[must_use]
    pub fn price(&self) -> &Money<'a, Currency> {
        &self.price
    }
}

/// The options resolved for one seller's parcel.
#[derive(Debug, Clone, PartialEq)]
pub struct SellerOptions<'a> {
    seller: SellerKey,
    total_weight: Weight,
    options: SmallVec<[ShippingOption<'a>; 4]>,
    availability: ShippingAvailability,
}

impl<'a> SellerOptions<'a> {
    /// The seller the options belong to.
    #[must_use]
    pub fn seller(&self) -> SellerKey {
        self.seller
    }

    /// The parcel weight the options were resolved for.
    #[must_use]
    pub fn total_weight(&self) -> Weight {
        self.total_weight
    }

    /// The offerable options, in the seller's provider order.
    #[must_use]
    pub fn options(&self) -> &[ShippingOption<'a>] {
        &self.options
    }

    /// Look up the option for a specific provider.
    #[must_use]
    pub fn option_for(&self, provider: ProviderKey) -> Option<&ShippingOption<'a>> {
        self.options
            .iter()
            .find(|option| option.provider() == provider)
    }

    /// Why the options list is empty, when it is.
    #[must_use]
    pub fn availability(&self) -> ShippingAvailability {
        self.availability
    }

    /// Whether the seller has at least one offerable option.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.availability == ShippingAvailability::Available
    }
}

/// Resolve shipping options for every seller group in the basket.
///
/// `rates` is `None` when the rate tables could not be fetched; every seller
/// then degrades to [`ShippingAvailability::RatesUnavailable`] instead of
/// erroring.
///
/// A provider is considered for a seller when it is assigned to the seller,
/// active, and — once a destination is chosen — allowed to ship there
/// (international destinations require international providers). Before a
/// destination is chosen the options are a domestic preview; the checkout
/// gate stays closed either way until one is selected.
#[must_use]
pub fn resolve_options<'a>(
    groups: &SellerGroups<'_>,
    directory: &SellerDirectory,
    rates: Option<&RateTable<'a>>,
    destination: Option<&Destination>,
) -> Vec<SellerOptions<'a>> {
    groups
        .iter()
        .map(|group| {
            let Some(rates) = rates else {
                return SellerOptions {
                    seller: group.seller(),
                    total_weight: group.total_weight(),
                    options: SmallVec::new(),
                    availability: ShippingAvailability::RatesUnavailable,
                };
            };

            let options = seller_options(group.seller(), group.total_weight(), directory, rates, destination);

            let availability = if options.is_empty() {
                ShippingAvailability::NoBandForWeight
            } else {
                ShippingAvailability::Available
            };

            SellerOptions {
                seller: group.seller(),
                total_weight: group.total_weight(),
                options,
                availability,
            }
        })
        .collect()
}

fn seller_options<'a>(
    seller: SellerKey,
    total_weight: Weight,
    directory: &SellerDirectory,
    rates: &RateTable<'a>,
    destination: Option<&Destination>,
) -> SmallVec<[ShippingOption<'a>; 4]> {
    let Some(meta) = directory.get(seller) else {
        return SmallVec::new();
    };

    meta.providers
        .iter()
        .filter(|&&key| {
            rates
                .provider(key)
                .is_some_and(|provider| provider_ships(provider, destination))
        })
        .filter_map(|&key| {
            rates
                .resolve(key, total_weight)
                .map(|band| ShippingOption::new(key, *band.price()))
        })
        .collect()
}

fn provider_ships(provider: &ShippingProvider, destination: Option<&Destination>) -> bool {
    if !provider.is_active {
        return false;
    }

    match destination {
        Some(destination) if destination.is_international() => provider.is_international,
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso::GBP};
    use smallvec::smallvec;

    use crate::{
        basket::Basket,
        checkout::Destination,
        items::{BasketItem, Listing},
        sellers::{Seller, SellerRef},
        shipping::DeliveryEstimate,
    };

    use super::*;

    fn provider(name: &str, active: bool, international: bool) -> ShippingProvider {
        ShippingProvider {
            name: name.to_string(),
            carrier: "Royal Mail".to_string(),
            is_active: active,
            is_international: international,
            estimated_days: DeliveryEstimate::new(2, 4),
        }
    }

    struct Setup<'a> {
        directory: SellerDirectory,
        rates: RateTable<'a>,
        seller: SellerKey,
        tracked: ProviderKey,
        economy: ProviderKey,
    }

    fn setup() -> Setup<'static> {
        let mut rates = RateTable::new();

        let tracked = rates.insert_provider(provider("Tracked 48", true, false));
        let economy = rates.insert_provider(provider("International Economy", true, true));

        // Tracked covers up to 2kg, Economy up to 1kg.
        rates.push_band(WeightBand::new(
            tracked,
            Weight::from_grams(0),
            Weight::from_grams(2000),
            Money::from_minor(495, GBP),
        ));
        rates.push_band(WeightBand::new(
            economy,
            Weight::from_grams(0),
            Weight::from_grams(1000),
            Money::from_minor(295, GBP),
        ));

        let mut directory = SellerDirectory::new();
        let seller = directory.insert(
            "s-rosie",
            Seller {
                name: "Rosie's Vintage".to_string(),
                providers: smallvec![tracked, economy],
            },
        );

        Setup {
            directory,
            rates,
            seller,
            tracked,
            economy,
        }
    }

    fn groups_for<'a>(seller: SellerKey, weight_g: i64) -> SellerGroups<'a> {
        let item = BasketItem::with_seller(
            seller,
            SellerRef::Id("s-rosie".to_string()),
            Listing::new(
                "Denim jacket",
                Money::from_minor(5000, GBP),
                Weight::from_grams(weight_g),
            ),
            1,
        );

        let basket = match Basket::with_items([item], GBP) {
            Ok(basket) => basket,
            Err(err) => panic!("basket construction failed: {err}"),
        };

        SellerGroups::from(&basket)
    }

    #[test]
    fn offers_every_provider_with_a_covering_band() {
        let setup = setup();
        let groups = groups_for(setup.seller, 800);

        let resolved = resolve_options(&groups, &setup.directory, Some(&setup.rates), None);

        let Some(options) = resolved.first() else {
            panic!("expected options for the only seller");
        };

        assert!(options.is_available());
        assert_eq!(options.options().len(), 2);
        assert_eq!(
            options.option_for(setup.tracked).map(|o| o.price().to_minor_units()),
            Some(495)
        );
        assert_eq!(
            options.option_for(setup.economy).map(|o| o.price().to_minor_units()),
            Some(295)
        );
    }

    #[test]
    fn heavy_parcel_narrows_the_options() {
        let setup = setup();
        let groups = groups_for(setup.seller, 1500);

        let resolved = resolve_options(&groups, &setup.directory, Some(&setup.rates), None);

        let Some(options) = resolved.first() else {
            panic!("expected options for the only seller");
        };

        // Economy caps at 1kg, so only Tracked remains.
        assert_eq!(options.options().len(), 1);
        assert_eq!(
            options.options().first().map(ShippingOption::provider),
            Some(setup.tracked)
        );
    }

    #[test]
    fn overweight_parcel_has_no_band_for_weight() {
        let setup = setup();
        let groups = groups_for(setup.seller, 50_000);

        let resolved = resolve_options(&groups, &setup.directory, Some(&setup.rates), None);

        let Some(options) = resolved.first() else {
            panic!("expected an entry for the only seller");
        };

        assert!(!options.is_available());
        assert_eq!(options.availability(), ShippingAvailability::NoBandForWeight);
        assert!(options.options().is_empty());
    }

    #[test]
    fn missing_rate_table_degrades_to_unavailable() {
        let setup = setup();
        let groups = groups_for(setup.seller, 800);

        let resolved = resolve_options(&groups, &setup.directory, None, None);

        let Some(options) = resolved.first() else {
            panic!("expected an entry for the only seller");
        };

        assert_eq!(
            options.availability(),
            ShippingAvailability::RatesUnavailable,
            "fetch failure must degrade, not error"
        );
    }

    #[test]
    fn international_destination_requires_international_providers() {
        let setup = setup();
        let groups = groups_for(setup.seller, 800);
        let destination = Destination::international("FR");

        let resolved =
            resolve_options(&groups, &setup.directory, Some(&setup.rates), Some(&destination));

        let Some(options) = resolved.first() else {
            panic!("expected options for the only seller");
        };

        assert_eq!(options.options().len(), 1);
        assert_eq!(
            options.options().first().map(ShippingOption::provider),
            Some(setup.economy)
        );
    }

    #[test]
    fn inactive_providers_are_never_offered() {
        let mut rates = RateTable::new();
        let retired = rates.insert_provider(provider("Retired Service", false, false));

        rates.push_band(WeightBand::new(
            retired,
            Weight::from_grams(0),
            Weight::from_grams(2000),
            Money::from_minor(195, GBP),
        ));

        let mut directory = SellerDirectory::new();
        let seller = directory.insert(
            "s-rosie",
            Seller {
                name: "Rosie's Vintage".to_string(),
                providers: smallvec![retired],
            },
        );

        let groups = groups_for(seller, 800);
        let resolved = resolve_options(&groups, &directory, Some(&rates), None);

        let Some(options) = resolved.first() else {
            panic!("expected an entry for the only seller");
        };

        assert!(options.options().is_empty());
    }
}
