//! Sellers
//!
//! Shipping is priced and selected per seller, not per basket, so every
//! basket row carries a reference to the seller fulfilling it. Older rows
//! reference sellers by shop name rather than by stable identifier; both
//! forms resolve through the [`SellerDirectory`], exactly once, when the
//! basket is loaded.

use std::fmt;

use rustc_hash::FxHashMap;
use slotmap::{SlotMap, new_key_type};
use smallvec::SmallVec;

use crate::shipping::ProviderKey;

new_key_type! {
    /// Seller Key
    pub struct SellerKey;
}

/// A seller fulfilling basket items.
#[derive(Debug, Clone)]
pub struct Seller {
    /// Shop name shown to buyers
    pub name: String,

    /// Providers this seller ships with, in the seller's configured order
    pub providers: SmallVec<[ProviderKey; 4]>,
}

/// A basket row's reference to its seller.
///
/// Newer rows carry the seller's stable identifier; legacy rows carry the
/// shop name. A reference that resolves to no directory entry excludes the
/// row from shipping aggregation and blocks checkout for it, rather than
/// being dropped or merged into the wrong seller's parcel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SellerRef {
    /// Stable seller identifier
    Id(String),

    /// Legacy shop-name reference
    Name(String),
}

impl SellerRef {
    /// The raw reference string, for messages about unresolvable sellers.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            SellerRef::Id(id) => id,
            SellerRef::Name(name) => name,
        }
    }
}

impl fmt::Display for SellerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Seller lookup tables keyed by stable identifier and by shop name.
#[derive(Debug, Default)]
pub struct SellerDirectory {
    sellers: SlotMap<SellerKey, Seller>,
    by_id: FxHashMap<String, SellerKey>,
    by_name: FxHashMap<String, SellerKey>,
}

impl SellerDirectory {
    /// Create an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a seller under its stable identifier and its shop name.
    pub fn insert(&mut self, id: impl Into<String>, seller: Seller) -> SellerKey {
        let name = seller.name.clone();
        let key = self.sellers.insert(seller);

        self.by_id.insert(id.into(), key);
        self.by_name.insert(name, key);

        key
    }

    /// Resolve a basket row's seller reference to a directory key.
    #[must_use]
    pub fn resolve(&self, reference: &SellerRef) -> Option<SellerKey> {
        match reference {
            SellerRef::Id(id) => self.by_id.get(id).copied(),
            SellerRef::Name(name) => self.by_name.get(name).copied(),
        }
    }

    /// Look up a seller by key.
    #[must_use]
    pub fn get(&self, key: SellerKey) -> Option<&Seller> {
        self.sellers.get(key)
    }

    /// Number of registered sellers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sellers.len()
    }

    /// Whether the directory has no sellers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sellers.is_empty()
    }
}
