//! Protection Tier Fixtures

use serde::Deserialize;

/// Wrapper for protection tiers in YAML
#[derive(Debug, Deserialize)]
pub struct TiersFixture {
    /// Tiers in table order; resolution is first match
    pub tiers: Vec<TierFixture>,
}

/// Protection tier fixture from YAML
#[derive(Debug, Deserialize)]
pub struct TierFixture {
    /// Lower price bound, inclusive (e.g. `"£0.00"`)
    pub min_price: String,

    /// Upper price bound, inclusive (e.g. `"£100.00"`)
    pub max_price: String,

    /// Fee rate in percent points (e.g. `"5%"`)
    pub rate: String,
}
