//! Pricing

use rusty_money::{Money, MoneyError, iso};
use thiserror::Error;

use crate::items::BasketItem;

/// Errors that can occur while calculating total price.
#[derive(Debug, Error, PartialEq)]
pub enum TotalPriceError {
    /// No items were provided, so currency could not be determined.
    #[error("no items provided; cannot determine currency")]
    NoItems,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Calculates the total effective price of a list of basket rows.
///
/// Each row contributes its discounted price when one is present, and its
/// base price otherwise, multiplied by the row's quantity.
///
/// # Errors
///
/// - [`TotalPriceError::NoItems`]: No items were provided, so currency could not be determined.
/// - [`TotalPriceError::Money`]: Wrapped money arithmetic or currency mismatch error.
pub fn total_price<'a>(
    items: &[BasketItem<'a>],
) -> Result<Money<'a, iso::Currency>, TotalPriceError> {
    let first = items.first().ok_or(TotalPriceError::NoItems)?;

    let total = items.iter().try_fold(
        Money::from_minor(0, first.listing().effective_price().currency()),
        |acc, item| acc.add(item.line_price()),
    )?;

    Ok(total)
}
