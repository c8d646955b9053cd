//! Provider Fixtures

use rustc_hash::FxHashMap;
use serde::Deserialize;

/// Wrapper for providers in YAML
#[derive(Debug, Deserialize)]
pub struct ProvidersFixture {
    /// Map of provider key -> provider fixture
    pub providers: FxHashMap<String, ProviderFixture>,
}

/// Provider fixture from YAML
#[derive(Debug, Deserialize)]
pub struct ProviderFixture {
    /// Service name shown to buyers
    pub name: String,

    /// Carrier fulfilling the service
    pub carrier: String,

    /// Inactive providers are seeded but never offered
    #[serde(default = "default_active")]
    pub active: bool,

    /// Whether the provider ships internationally
    #[serde(default)]
    pub international: bool,

    /// Estimated delivery window in days, `[min, max]`
    pub estimated_days: (u16, u16),

    /// Weight bands in table order; resolution is first match
    #[serde(default)]
    pub bands: Vec<BandFixture>,
}

/// Weight band fixture from YAML
#[derive(Debug, Deserialize)]
pub struct BandFixture {
    /// Lower bound, inclusive (e.g. `"0g"`)
    pub min: String,

    /// Upper bound, inclusive (e.g. `"2kg"`)
    pub max: String,

    /// Band price (e.g. `"£4.95"`)
    pub price: String,
}

fn default_active() -> bool {
    true
}
