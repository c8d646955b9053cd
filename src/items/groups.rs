//! Seller Groups
//!
//! Shipping is priced per seller, so basket rows are grouped by the seller
//! fulfilling them before any rate resolution happens. Rows whose seller
//! reference did not resolve are collected separately; they never merge into
//! another seller's parcel.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::{basket::Basket, items::BasketItem, sellers::SellerKey, weight::Weight};

/// One seller's share of the basket.
#[derive(Debug)]
pub struct SellerGroup<'a> {
    seller: SellerKey,
    items: SmallVec<[BasketItem<'a>; 10]>,
    total_weight: Weight,
}

impl<'a> SellerGroup<'a> {
    fn new(seller: SellerKey) -> Self {
        SellerGroup {
            seller,
            items: SmallVec::new(),
            total_weight: Weight::default(),
        }
    }

    fn push(&mut self, item: BasketItem<'a>) {
        self.total_weight = self.total_weight + item.line_weight();
        self.items.push(item);
    }

    /// The seller fulfilling this group.
    #[must_use]
    pub fn seller(&self) -> SellerKey {
        self.seller
    }

    /// Iterate over the rows in the group.
    pub fn iter(&self) -> impl Iterator<Item = &BasketItem<'a>> {
        self.items.iter()
    }

    /// Number of rows in the group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the group has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total parcel weight for the group: Σ unit weight × quantity.
    #[must_use]
    pub fn total_weight(&self) -> Weight {
        self.total_weight
    }
}

/// Basket rows grouped by resolved seller.
///
/// Groups appear in first-appearance order of their seller in the basket.
/// Per-seller totals are sums, so they are invariant under basket row
/// reordering.
#[derive(Debug)]
pub struct SellerGroups<'a> {
    groups: Vec<SellerGroup<'a>>,
    index: FxHashMap<SellerKey, usize>,
    unresolved: SmallVec<[usize; 4]>,
}

impl<'a> SellerGroups<'a> {
    /// Look up the group for a seller.
    #[must_use]
    pub fn get(&self, seller: SellerKey) -> Option<&SellerGroup<'a>> {
        self.index.get(&seller).and_then(|idx| self.groups.get(*idx))
    }

    /// Iterate over the groups in first-appearance order.
    pub fn iter(&self) -> impl Iterator<Item = &SellerGroup<'a>> {
        self.groups.iter()
    }

    /// Sellers represented in the basket, in first-appearance order.
    pub fn sellers(&self) -> impl Iterator<Item = SellerKey> + '_ {
        self.groups.iter().map(SellerGroup::seller)
    }

    /// Number of distinct sellers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether no rows grouped under any seller.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Basket indexes of rows excluded because their seller reference did
    /// not resolve.
    #[must_use]
    pub fn unresolved_rows(&self) -> &[usize] {
        &self.unresolved
    }

    /// Whether any row was excluded as unresolvable.
    #[must_use]
    pub fn has_unresolved(&self) -> bool {
        !self.unresolved.is_empty()
    }
}

impl<'a> From<&Basket<'a>> for SellerGroups<'a> {
    fn from(basket: &Basket<'a>) -> Self {
        let mut groups: Vec<SellerGroup<'a>> = Vec::new();
        let mut index = FxHashMap::default();
        let mut unresolved = SmallVec::new();

        for (row_idx, item) in basket.iter().enumerate() {
            let Some(seller) = item.seller() else {
                unresolved.push(row_idx);
                continue;
            };

            let group_idx = *index.entry(seller).or_insert_with(|| {
                groups.push(SellerGroup::new(seller));
                groups.len() - 1
            });

            if let Some(group) = groups.get_mut(group_idx) {
                group.push(item.clone());
            }
        }

        SellerGroups {
            groups,
            index,
            unresolved,
        }
    }
}
