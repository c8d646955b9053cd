//! Basket Fixtures

use serde::Deserialize;

use crate::sellers::SellerRef;

/// Wrapper for a basket in YAML
#[derive(Debug, Deserialize)]
pub struct BasketFixture {
    /// Basket rows in insertion order
    pub items: Vec<ItemFixture>,
}

/// Basket row fixture from YAML
#[derive(Debug, Deserialize)]
pub struct ItemFixture {
    /// Seller reference: `{ id: ... }` or, for legacy rows, `{ name: ... }`
    pub seller: SellerRefFixture,

    /// Listing name
    pub name: String,

    /// Base price (e.g. `"£50.00"`)
    pub price: String,

    /// Discounted price, if the listing is on sale
    #[serde(default)]
    pub discounted_price: Option<String>,

    /// Unit weight (e.g. `"1.5kg"` or `"500g"`)
    pub weight: String,

    /// Whether the listing is in stock
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,

    /// Units this row represents
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

/// Seller reference fixture from YAML
#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SellerRefFixture {
    /// Stable seller identifier
    Id(String),

    /// Legacy shop-name reference
    Name(String),
}

impl From<SellerRefFixture> for SellerRef {
    fn from(fixture: SellerRefFixture) -> Self {
        match fixture {
            SellerRefFixture::Id(id) => SellerRef::Id(id),
            SellerRefFixture::Name(name) => SellerRef::Name(name),
        }
    }
}

fn default_in_stock() -> bool {
    true
}

fn default_quantity() -> u32 {
    1
}
