//! Fixtures
//!
//! YAML-seeded checkout tables: providers with their weight bands, sellers
//! with their provider assignments, buyer protection tiers, and a basket.
//! These stand in for the admin-seeded tables a deployment reads at
//! checkout time.

use std::{fs, path::PathBuf, str::FromStr};

use decimal_percentage::Percentage;
use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use rusty_money::{Money, iso};
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    basket::{Basket, BasketError},
    fixtures::{
        baskets::BasketFixture,
        providers::ProvidersFixture,
        sellers::SellersFixture,
        tiers::TiersFixture,
    },
    items::{BasketItem, Listing},
    protection::ProtectionTier,
    sellers::{Seller, SellerDirectory},
    shipping::{DeliveryEstimate, ProviderKey, ShippingProvider, bands::WeightBand, options::RateTable},
    weight::Weight,
};

pub mod baskets;
pub mod providers;
pub mod sellers;
pub mod tiers;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Invalid percentage format
    #[error("Invalid percentage format: {0}")]
    InvalidPercentage(String),

    /// Invalid weight format
    #[error("Invalid weight format: {0}")]
    InvalidWeight(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Provider not found
    #[error("Provider not found: {0}")]
    ProviderNotFound(String),

    /// Currency mismatch between fixture prices
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// No prices loaded yet
    #[error("No prices loaded yet; currency unknown")]
    NoCurrency,

    /// Basket creation error
    #[error("Failed to create basket: {0}")]
    Basket(#[from] BasketError),
}

/// Fixture
#[derive(Debug)]
pub struct Fixture<'a> {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Seller lookup tables built from the sellers file
    directory: SellerDirectory,

    /// Provider and band tables built from the providers file
    rates: RateTable<'a>,

    /// Protection tiers in table order
    tiers: Vec<ProtectionTier<'a>>,

    /// Pre-built basket rows, seller references already resolved
    items: Vec<BasketItem<'a>>,

    /// String key -> provider key mappings for lookups
    provider_keys: FxHashMap<String, ProviderKey>,

    /// Currency for the fixture set
    currency: Option<&'static iso::Currency>,
}

impl Default for Fixture<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Fixture<'a> {
    /// Create a new empty fixture with default base path
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            directory: SellerDirectory::new(),
            rates: RateTable::new(),
            tiers: Vec::new(),
            items: Vec::new(),
            provider_keys: FxHashMap::default(),
            currency: None,
        }
    }

    /// Load a complete fixture set by name: providers, sellers, tiers and a
    /// basket that all share the set name.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the four files cannot be read or parsed.
    pub fn from_set(set: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture.load_providers(set)?;
        fixture.load_sellers(set)?;
        fixture.load_tiers(set)?;
        fixture.load_basket(set)?;

        Ok(fixture)
    }

    /// Load providers and their weight bands from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or if there are
    /// currency mismatches.
    pub fn load_providers(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("providers").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: ProvidersFixture = serde_norway::from_str(&contents)?;

        for (key, provider_fixture) in fixture.providers {
            let (min_days, max_days) = provider_fixture.estimated_days;

            let provider_key = self.rates.insert_provider(ShippingProvider {
                name: provider_fixture.name,
                carrier: provider_fixture.carrier,
                is_active: provider_fixture.active,
                is_international: provider_fixture.international,
                estimated_days: DeliveryEstimate::new(min_days, max_days),
            });

            for band in provider_fixture.bands {
                let (minor, currency) = self.parse_price(&band.price)?;

                self.rates.push_band(WeightBand::new(
                    provider_key,
                    parse_weight(&band.min)?,
                    parse_weight(&band.max)?,
                    Money::from_minor(minor, currency),
                ));
            }

            self.provider_keys.insert(key, provider_key);
        }

        Ok(self)
    }

    /// Load sellers from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or if a seller
    /// references a provider that was not loaded.
    pub fn load_sellers(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("sellers").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: SellersFixture = serde_norway::from_str(&contents)?;

        for (id, seller_fixture) in fixture.sellers {
            let mut providers = SmallVec::new();

            for provider_key_str in &seller_fixture.providers {
                let provider_key = self
                    .provider_keys
                    .get(provider_key_str)
                    .ok_or_else(|| FixtureError::ProviderNotFound(provider_key_str.clone()))?;

                providers.push(*provider_key);
            }

            self.directory.insert(
                id,
                Seller {
                    name: seller_fixture.name,
                    providers,
                },
            );
        }

        Ok(self)
    }

    /// Load protection tiers from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or if there are
    /// currency mismatches.
    pub fn load_tiers(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("tiers").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: TiersFixture = serde_norway::from_str(&contents)?;

        for tier in fixture.tiers {
            let (min_minor, currency) = self.parse_price(&tier.min_price)?;
            let (max_minor, _currency) = self.parse_price(&tier.max_price)?;

            self.tiers.push(ProtectionTier::new(
                Money::from_minor(min_minor, currency),
                Money::from_minor(max_minor, currency),
                parse_percent(&tier.rate)?,
            ));
        }

        Ok(self)
    }

    /// Load basket rows from a YAML fixture file, resolving each row's
    /// seller reference against the directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or if there are
    /// currency mismatches. An unresolvable seller reference is not an
    /// error — the row is kept and blocks checkout downstream.
    pub fn load_basket(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("baskets").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: BasketFixture = serde_norway::from_str(&contents)?;

        for item in fixture.items {
            let (price_minor, currency) = self.parse_price(&item.price)?;

            let mut listing = Listing::new(
                item.name,
                Money::from_minor(price_minor, currency),
                parse_weight(&item.weight)?,
            );

            if let Some(raw) = &item.discounted_price {
                let (discount_minor, discount_currency) = self.parse_price(raw)?;

                listing =
                    listing.with_discount(Money::from_minor(discount_minor, discount_currency));
            }

            if !item.in_stock {
                listing = listing.out_of_stock();
            }

            self.items.push(BasketItem::resolve(
                item.seller.into(),
                listing,
                item.quantity,
                &self.directory,
            ));
        }

        Ok(self)
    }

    /// Create a basket from the loaded rows.
    ///
    /// # Errors
    ///
    /// Returns an error if no prices were loaded (currency unknown) or if
    /// basket construction fails.
    pub fn basket(&self) -> Result<Basket<'a>, FixtureError> {
        let currency = self.currency.ok_or(FixtureError::NoCurrency)?;

        Ok(Basket::with_items(self.items.clone(), currency)?)
    }

    /// The provider and band tables.
    #[must_use]
    pub fn rates(&self) -> &RateTable<'a> {
        &self.rates
    }

    /// The seller directory.
    #[must_use]
    pub fn directory(&self) -> &SellerDirectory {
        &self.directory
    }

    /// The protection tiers, in table order.
    #[must_use]
    pub fn tiers(&self) -> &[ProtectionTier<'a>] {
        &self.tiers
    }

    /// Look up a provider key by its fixture string key.
    #[must_use]
    pub fn provider_key(&self, key: &str) -> Option<ProviderKey> {
        self.provider_keys.get(key).copied()
    }

    /// The currency of the fixture set, if any prices were loaded.
    #[must_use]
    pub fn currency(&self) -> Option<&'static iso::Currency> {
        self.currency
    }

    /// Parse a price string, validating currency consistency across the set.
    fn parse_price(&mut self, raw: &str) -> Result<(i64, &'static iso::Currency), FixtureError> {
        let (minor, currency) = parse_price(raw)?;

        if let Some(existing) = self.currency {
            if existing != currency {
                return Err(FixtureError::CurrencyMismatch(
                    existing.iso_alpha_code.to_string(),
                    currency.iso_alpha_code.to_string(),
                ));
            }
        } else {
            self.currency = Some(currency);
        }

        Ok((minor, currency))
    }
}

/// Parse a price string like `"£4.95"` or `"GBP 4.95"` into minor units and
/// a currency.
///
/// # Errors
///
/// Returns an error if the currency cannot be recognised or the amount is
/// not a valid decimal in whole minor units.
pub fn parse_price(raw: &str) -> Result<(i64, &'static iso::Currency), FixtureError> {
    let raw = raw.trim();

    let (currency, number) = if let Some(rest) = raw.strip_prefix('£') {
        (iso::GBP, rest)
    } else if let Some(rest) = raw.strip_prefix('$') {
        (iso::USD, rest)
    } else if let Some(rest) = raw.strip_prefix('€') {
        (iso::EUR, rest)
    } else if let Some((code, rest)) = raw.split_once(' ') {
        let currency =
            iso::find(code).ok_or_else(|| FixtureError::UnknownCurrency(code.to_string()))?;

        (currency, rest)
    } else {
        return Err(FixtureError::InvalidPrice(raw.to_string()));
    };

    let amount = Decimal::from_str(number.trim())
        .map_err(|_err| FixtureError::InvalidPrice(raw.to_string()))?;

    let minor = amount * Decimal::ONE_HUNDRED;

    if !minor.fract().is_zero() {
        return Err(FixtureError::InvalidPrice(raw.to_string()));
    }

    let minor = minor
        .to_i64()
        .ok_or_else(|| FixtureError::InvalidPrice(raw.to_string()))?;

    Ok((minor, currency))
}

/// Parse a percentage string like `"5%"` into a fractional [`Percentage`].
///
/// # Errors
///
/// Returns an error if the string is not a decimal followed by `%`.
pub fn parse_percent(raw: &str) -> Result<Percentage, FixtureError> {
    let trimmed = raw.trim();

    let points = trimmed
        .strip_suffix('%')
        .and_then(|points| Decimal::from_str(points.trim()).ok())
        .ok_or_else(|| FixtureError::InvalidPercentage(raw.to_string()))?;

    Ok(Percentage::from(points / Decimal::ONE_HUNDRED))
}

/// Parse a weight string like `"1.5kg"` or `"500g"`.
///
/// # Errors
///
/// Returns an error if the string is not a decimal followed by `kg` or a
/// whole number followed by `g`.
pub fn parse_weight(raw: &str) -> Result<Weight, FixtureError> {
    let trimmed = raw.trim();

    if let Some(kilograms) = trimmed.strip_suffix("kg") {
        let kilograms = Decimal::from_str(kilograms.trim())
            .map_err(|_err| FixtureError::InvalidWeight(raw.to_string()))?;

        return Ok(Weight::from_kilograms(kilograms));
    }

    if let Some(grams) = trimmed.strip_suffix('g') {
        let grams = i64::from_str(grams.trim())
            .map_err(|_err| FixtureError::InvalidWeight(raw.to_string()))?;

        return Ok(Weight::from_grams(grams));
    }

    Err(FixtureError::InvalidWeight(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rusty_money::iso::GBP;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parse_price_with_symbol() -> TestResult {
        let (minor, currency) = parse_price("£4.95")?;

        assert_eq!(minor, 495);
        assert_eq!(currency, GBP);

        Ok(())
    }

    #[test]
    fn parse_price_with_iso_code() -> TestResult {
        let (minor, currency) = parse_price("GBP 12.00")?;

        assert_eq!(minor, 1200);
        assert_eq!(currency, GBP);

        Ok(())
    }

    #[test]
    fn parse_price_rejects_sub_minor_precision() {
        let result = parse_price("£4.955");

        assert!(matches!(result, Err(FixtureError::InvalidPrice(_))));
    }

    #[test]
    fn parse_price_rejects_unknown_currency() {
        let result = parse_price("ZZZ 4.95");

        assert!(matches!(result, Err(FixtureError::UnknownCurrency(_))));
    }

    #[test]
    fn parse_percent_is_fractional() -> TestResult {
        let rate = parse_percent("5%")?;

        assert_eq!(rate, Percentage::from(Decimal::new(5, 2)));

        Ok(())
    }

    #[test]
    fn parse_percent_rejects_missing_suffix() {
        assert!(matches!(
            parse_percent("5"),
            Err(FixtureError::InvalidPercentage(_))
        ));
    }

    #[test]
    fn parse_weight_kilograms_and_grams() -> TestResult {
        assert_eq!(parse_weight("1.5kg")?, Weight::from_grams(1500));
        assert_eq!(parse_weight("500g")?, Weight::from_grams(500));

        Ok(())
    }

    #[test]
    fn parse_weight_rejects_unknown_unit() {
        assert!(matches!(
            parse_weight("3 stone"),
            Err(FixtureError::InvalidWeight(_))
        ));
    }

    #[test]
    fn load_set_from_temp_dir() -> TestResult {
        let dir = tempfile::tempdir()?;

        for (sub, contents) in [
            (
                "providers",
                "providers:\n  post:\n    name: \"Post\"\n    carrier: \"Carrier\"\n    estimated_days: [1, 2]\n    bands:\n      - min: \"0g\"\n        max: \"2kg\"\n        price: \"£4.95\"\n",
            ),
            (
                "sellers",
                "sellers:\n  s-1:\n    name: \"Shop One\"\n    providers: [post]\n",
            ),
            (
                "tiers",
                "tiers:\n  - min_price: \"£0.00\"\n    max_price: \"£100.00\"\n    rate: \"5%\"\n",
            ),
            (
                "baskets",
                "items:\n  - seller: { id: s-1 }\n    name: \"Mug\"\n    price: \"£10.00\"\n    weight: \"300g\"\n",
            ),
        ] {
            let sub_dir = dir.path().join(sub);

            fs::create_dir_all(&sub_dir)?;
            fs::write(sub_dir.join("unit.yml"), contents)?;
        }

        let mut fixture = Fixture::with_base_path(dir.path());

        fixture
            .load_providers("unit")?
            .load_sellers("unit")?
            .load_tiers("unit")?
            .load_basket("unit")?;

        let basket = fixture.basket()?;

        assert_eq!(basket.len(), 1);
        assert_eq!(fixture.currency(), Some(GBP));
        assert_eq!(fixture.tiers().len(), 1);
        assert!(fixture.provider_key("post").is_some());
        assert!(!basket.has_unresolved_sellers());

        Ok(())
    }

    #[test]
    fn missing_provider_reference_errors() -> TestResult {
        let dir = tempfile::tempdir()?;
        let sellers_dir = dir.path().join("sellers");

        fs::create_dir_all(&sellers_dir)?;
        fs::write(
            sellers_dir.join("unit.yml"),
            "sellers:\n  s-1:\n    name: \"Shop One\"\n    providers: [ghost]\n",
        )?;

        let mut fixture = Fixture::with_base_path(dir.path());
        let result = fixture.load_sellers("unit");

        assert!(matches!(result, Err(FixtureError::ProviderNotFound(_))));

        Ok(())
    }

    #[test]
    fn mixed_currencies_error() -> TestResult {
        let dir = tempfile::tempdir()?;
        let tiers_dir = dir.path().join("tiers");

        fs::create_dir_all(&tiers_dir)?;
        fs::write(
            tiers_dir.join("unit.yml"),
            "tiers:\n  - min_price: \"£0.00\"\n    max_price: \"$100.00\"\n    rate: \"5%\"\n",
        )?;

        let mut fixture = Fixture::with_base_path(dir.path());
        let result = fixture.load_tiers("unit");

        assert!(matches!(result, Err(FixtureError::CurrencyMismatch(_, _))));

        Ok(())
    }
}
