//! Basket

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{
    items::BasketItem,
    pricing::{TotalPriceError, total_price},
};

/// Errors related to basket construction or totals.
#[derive(Debug, Error)]
pub enum BasketError {
    /// An item's currency differs from the basket currency (index, item currency, basket currency).
    #[error("Item {0} has currency {1}, but basket has currency {2}")]
    CurrencyMismatch(usize, &'static str, &'static str),

    /// An item was not found in the basket.
    #[error("Item {0} not found")]
    ItemNotFound(usize),
}

/// Basket
#[derive(Debug)]
pub struct Basket<'a> {
    items: Vec<BasketItem<'a>>,
    currency: &'static Currency,
}

impl<'a> Basket<'a> {
    /// Create a new empty basket in the given currency.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Basket {
            items: Vec::new(),
            currency,
        }
    }

    /// Create a new basket with the given rows.
    ///
    /// Every row's base and discounted price must be in the basket currency;
    /// no conversion is applied at this stage.
    ///
    /// # Errors
    ///
    /// Returns a `BasketError` if there was a currency mismatch error.
    pub fn with_items(
        items: impl Into<Vec<BasketItem<'a>>>,
        currency: &'static Currency,
    ) -> Result<Self, BasketError> {
        let items = items.into();

        items.iter().enumerate().try_for_each(|(i, item)| {
            let listing = item.listing();
            let prices = [Some(listing.price()), listing.discounted_price()];

            for price in prices.into_iter().flatten() {
                if price.currency() != currency {
                    return Err(BasketError::CurrencyMismatch(
                        i,
                        price.currency().iso_alpha_code,
                        currency.iso_alpha_code,
                    ));
                }
            }

            Ok(())
        })?;

        Ok(Basket { items, currency })
    }

    /// Calculate the subtotal of the basket.
    ///
    /// # Errors
    ///
    /// Returns a `TotalPriceError` if there was a money arithmetic or currency mismatch error.
    pub fn subtotal(&'a self) -> Result<Money<'a, Currency>, TotalPriceError> {
        if self.is_empty() {
            return Ok(Money::from_minor(0, self.currency));
        }

        total_price(&self.items)
    }

    /// Get a row from the basket.
    ///
    /// # Errors
    ///
    /// Returns a `BasketError::ItemNotFound` if the row is not found.
    pub fn get_item(&'a self, item: usize) -> Result<&'a BasketItem<'a>, BasketError> {
        self.items.get(item).ok_or(BasketError::ItemNotFound(item))
    }

    /// Iterate over the rows in the basket.
    pub fn iter(&self) -> impl Iterator<Item = &BasketItem<'a>> {
        self.items.iter()
    }

    /// The rows in the basket, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[BasketItem<'a>] {
        &self.items
    }

    /// Get the number of rows in the basket.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the basket is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the currency of the basket.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Whether any row's listing is out of stock.
    #[must_use]
    pub fn has_out_of_stock(&self) -> bool {
        self.items.iter().any(|item| !item.listing().is_in_stock())
    }

    /// Rows whose seller reference failed to resolve, with their indexes.
    pub fn unresolved_rows(&self) -> impl Iterator<Item = (usize, &BasketItem<'a>)> {
        self.items
            .iter()
            .enumerate()
            .filter(|(_idx, item)| item.seller().is_none())
    }

    /// Whether any row's seller reference failed to resolve.
    #[must_use]
    pub fn has_unresolved_sellers(&self) -> bool {
        self.items.iter().any(|item| item.seller().is_none())
    }
}
