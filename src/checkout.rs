//! Checkout
//!
//! The per-session checkout state: the buyer's shipping destination and the
//! per-seller shipping selections, plus the gate derived from them.
//!
//! The gate moves `NoDestination → DestinationSelected → {MissingOptions |
//! AllOptionsSelected}`; only `AllOptionsSelected` permits checkout. None of
//! this is persisted — it is re-derived from the basket and selections on
//! every change.

use rustc_hash::FxHashMap;

use crate::{
    items::groups::SellerGroups,
    sellers::SellerKey,
    shipping::{ProviderKey, options::SellerOptions},
};

/// The buyer's chosen shipping destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    country: String,
    international: bool,
}

impl Destination {
    /// A destination inside the marketplace's home country.
    pub fn domestic(country: impl Into<String>) -> Self {
        Destination {
            country: country.into(),
            international: false,
        }
    }

    /// A destination outside the marketplace's home country.
    pub fn international(country: impl Into<String>) -> Self {
        Destination {
            country: country.into(),
            international: true,
        }
    }

    /// The destination country code.
    #[must_use]
    pub fn country(&self) -> &str {
        &self.country
    }

    /// Whether the destination requires international shipping.
    #[must_use]
    pub fn is_international(&self) -> bool {
        self.international
    }
}

/// Where the buyer is in the checkout gating flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutStage {
    /// No shipping destination chosen yet.
    NoDestination,

    /// Destination chosen; no seller needs a selection (empty basket).
    DestinationSelected,

    /// At least one seller still lacks a valid shipping selection, or has no
    /// offerable option at all.
    MissingOptions,

    /// Every seller in the basket has a valid selection. Checkout may
    /// proceed from this stage only.
    AllOptionsSelected,
}

/// The buyer's destination and per-seller shipping selections.
#[derive(Debug, Default)]
pub struct CheckoutState {
    destination: Option<Destination>,
    selections: FxHashMap<SellerKey, ProviderKey>,
}

impl CheckoutState {
    /// A fresh checkout with no destination and no selections.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The chosen destination, if any.
    #[must_use]
    pub fn destination(&self) -> Option<&Destination> {
        self.destination.as_ref()
    }

    /// Choose or change the destination.
    ///
    /// Selections are kept; ones invalidated by the change (a provider that
    /// no longer ships to the destination) are dropped on the next
    /// [`CheckoutState::sync`].
    pub fn set_destination(&mut self, destination: Destination) {
        self.destination = Some(destination);
    }

    /// Select a shipping option for one seller.
    pub fn select(&mut self, seller: SellerKey, provider: ProviderKey) {
        self.selections.insert(seller, provider);
    }

    /// The selected provider for a seller, if one was chosen.
    #[must_use]
    pub fn selection(&self, seller: SellerKey) -> Option<ProviderKey> {
        self.selections.get(&seller).copied()
    }

    /// Number of sellers with a selection.
    #[must_use]
    pub fn selection_count(&self) -> usize {
        self.selections.len()
    }

    /// Drop selections that no longer apply.
    ///
    /// A selection is stale when its seller no longer has rows in the basket,
    /// or when its provider is no longer among the seller's offerable options
    /// (the parcel weight or destination changed). Call after every basket or
    /// destination change, with freshly resolved options.
    pub fn sync(&mut self, groups: &SellerGroups<'_>, options: &[SellerOptions<'_>]) {
        self.selections.retain(|&seller, &mut provider| {
            groups.get(seller).is_some()
                && options
                    .iter()
                    .find(|entry| entry.seller() == seller)
                    .is_some_and(|entry| entry.option_for(provider).is_some())
        });
    }

    /// Derive the gating stage from the current basket and options.
    #[must_use]
    pub fn stage(&self, groups: &SellerGroups<'_>, options: &[SellerOptions<'_>]) -> CheckoutStage {
        if self.destination.is_none() {
            return CheckoutStage::NoDestination;
        }

        if groups.is_empty() && !groups.has_unresolved() {
            return CheckoutStage::DestinationSelected;
        }

        // A row with an unresolvable seller can never gain a selection, so
        // it holds the gate at MissingOptions.
        if groups.has_unresolved() {
            return CheckoutStage::MissingOptions;
        }

        let all_selected = groups.sellers().all(|seller| {
            self.selection(seller).is_some_and(|provider| {
                options
                    .iter()
                    .find(|entry| entry.seller() == seller)
                    .is_some_and(|entry| entry.option_for(provider).is_some())
            })
        });

        if all_selected {
            CheckoutStage::AllOptionsSelected
        } else {
            CheckoutStage::MissingOptions
        }
    }
}
