//! Seller Fixtures

use rustc_hash::FxHashMap;
use serde::Deserialize;

/// Wrapper for sellers in YAML
#[derive(Debug, Deserialize)]
pub struct SellersFixture {
    /// Map of stable seller id -> seller fixture
    pub sellers: FxHashMap<String, SellerFixture>,
}

/// Seller fixture from YAML
#[derive(Debug, Deserialize)]
pub struct SellerFixture {
    /// Shop name shown to buyers
    pub name: String,

    /// Provider keys this seller ships with, in the seller's order
    #[serde(default)]
    pub providers: Vec<String>,
}
