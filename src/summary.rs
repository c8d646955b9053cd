//! Order Summary
//!
//! The derived totals for a basket at checkout: subtotal, per-seller
//! shipping, buyer protection fee and the checkout gate. Nothing here is
//! persisted — the summary is a pure function of the basket, the resolved
//! options and the buyer's selections, and is recomputed on every change.

use std::io;

use rusty_money::{Money, MoneyError, iso::Currency};
use smallvec::SmallVec;
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{Alignment, Color, Style, Theme, object::{Columns, Rows}},
};
use thiserror::Error;

use crate::{
    basket::Basket,
    checkout::{CheckoutStage, CheckoutState},
    items::groups::{SellerGroup, SellerGroups},
    pricing::TotalPriceError,
    protection::{ProtectionFeeError, ProtectionTier, total_protection_fee},
    sellers::{SellerDirectory, SellerKey},
    shipping::options::{SellerOptions, ShippingAvailability},
    weight::Weight,
};

/// Errors that can occur when computing or printing an order summary.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// Error calculating total price from basket rows.
    #[error(transparent)]
    TotalPrice(#[from] TotalPriceError),

    /// Error calculating the buyer protection fee.
    #[error(transparent)]
    ProtectionFee(#[from] ProtectionFeeError),

    /// Wrapper for money errors.
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// IO error
    #[error("IO error")]
    IO,
}

/// One seller's shipping line in the summary.
#[derive(Debug, Clone, PartialEq)]
pub struct SellerShippingLine<'a> {
    seller: SellerKey,
    rows: usize,
    total_weight: Weight,
    price: Option<Money<'a, Currency>>,
    availability: ShippingAvailability,
}

impl<'a> SellerShippingLine<'a> {
    /// The seller the line belongs to.
    #[must_use]
    pub fn seller(&self) -> SellerKey {
        self.seller
    }

    /// Number of basket rows in the seller's parcel.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Total parcel weight.
    #[must_use]
    pub fn total_weight(&self) -> Weight {
        self.total_weight
    }

    /// The selected option's price, once the buyer has selected one.
    #[must_use]
    pub fn price(&self) -> Option<&Money<'a, Currency>> {
        self.price.as_ref()
    }

    /// Availability of options for the parcel.
    #[must_use]
    pub fn availability(&self) -> ShippingAvailability {
        self.availability
    }
}

/// The derived order summary.
#[derive(Debug, Clone)]
pub struct OrderSummary<'a> {
    subtotal: Money<'a, Currency>,
    total_shipping: Money<'a, Currency>,
    protection_fee: Money<'a, Currency>,
    total: Money<'a, Currency>,
    shipping_lines: SmallVec<[SellerShippingLine<'a>; 4]>,
    stage: CheckoutStage,
    can_checkout: bool,
    currency: &'static Currency,
}

impl<'a> OrderSummary<'a> {
    /// Total effective price of the basket rows.
    #[must_use]
    pub fn subtotal(&self) -> Money<'a, Currency> {
        self.subtotal
    }

    /// Sum of the selected options' prices. Sellers without a selection
    /// contribute zero (and keep the gate closed).
    #[must_use]
    pub fn total_shipping(&self) -> Money<'a, Currency> {
        self.total_shipping
    }

    /// Total buyer protection fee across the basket.
    #[must_use]
    pub fn protection_fee(&self) -> Money<'a, Currency> {
        self.protection_fee
    }

    /// Subtotal + shipping + protection fee, in the basket currency.
    #[must_use]
    pub fn total(&self) -> Money<'a, Currency> {
        self.total
    }

    /// Per-seller shipping lines, in first-appearance order.
    #[must_use]
    pub fn shipping_lines(&self) -> &[SellerShippingLine<'a>] {
        &self.shipping_lines
    }

    /// The checkout gating stage the summary was computed under.
    #[must_use]
    pub fn stage(&self) -> CheckoutStage {
        self.stage
    }

    /// Whether checkout may proceed.
    #[must_use]
    pub fn can_checkout(&self) -> bool {
        self.can_checkout
    }

    /// Currency used for all monetary values.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Prints the summary to the console.
    ///
    /// # Errors
    ///
    /// Returns an error if the summary cannot be printed.
    pub fn write_to(
        &self,
        mut out: impl io::Write,
        directory: &SellerDirectory,
    ) -> Result<(), SummaryError> {
        let mut builder = Builder::default();

        builder.push_record(["Seller", "Rows", "Parcel", "Shipping"]);

        for line in &self.shipping_lines {
            let seller_name = directory
                .get(line.seller())
                .map_or("<unknown>", |seller| seller.name.as_str());

            builder.push_record([
                seller_name.to_string(),
                line.rows().to_string(),
                line.total_weight().to_string(),
                shipping_cell(line),
            ]);
        }

        write_summary_table(&mut out, builder)?;
        self.write_totals(&mut out)
    }

    fn write_totals(&self, out: &mut impl io::Write) -> Result<(), SummaryError> {
        let rows = [
            ("Subtotal:", format!("{}", self.subtotal)),
            ("Shipping:", format!("{}", self.total_shipping)),
            ("Buyer protection:", format!("{}", self.protection_fee)),
        ];

        let label_width = "Buyer protection:".len();
        let value_width = rows
            .iter()
            .map(|(_label, value)| value.len())
            .max()
            .unwrap_or(0);

        for (label, value) in &rows {
            writeln!(out, " {label:<label_width$} {value:>value_width$}")
                .map_err(|_err| SummaryError::IO)?;
        }

        writeln!(
            out,
            " \x1b[1m{:<label_width$} {:>value_width$}\x1b[0m",
            "Total:", self.total
        )
        .map_err(|_err| SummaryError::IO)?;

        writeln!(out, "\n {}", stage_message(self.stage)).map_err(|_err| SummaryError::IO)
    }
}

fn shipping_cell(line: &SellerShippingLine<'_>) -> String {
    if let Some(price) = line.price() {
        return format!("{price}");
    }

    match line.availability() {
        ShippingAvailability::Available => "select an option".to_string(),
        ShippingAvailability::NoBandForWeight => "no option for this weight".to_string(),
        ShippingAvailability::RatesUnavailable => "rates unavailable".to_string(),
    }
}

fn stage_message(stage: CheckoutStage) -> &'static str {
    match stage {
        CheckoutStage::NoDestination => "Select a shipping destination to continue.",
        CheckoutStage::DestinationSelected => "Your basket is empty.",
        CheckoutStage::MissingOptions => "Select a shipping option for every seller to continue.",
        CheckoutStage::AllOptionsSelected => "Ready to checkout.",
    }
}

fn write_summary_table(out: &mut impl io::Write, builder: Builder) -> Result<(), SummaryError> {
    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());
    let separator = HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤'));

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(1, separator);

    table.with(theme);
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(1..4), Alignment::right());

    writeln!(out, "\n{table}").map_err(|_err| SummaryError::IO)
}

/// Compute the order summary for the current basket and checkout state.
///
/// Pure and idempotent: identical inputs produce identical output, and the
/// function has no side effects, so it is safe to call on every render.
///
/// # Errors
///
/// Returns a [`SummaryError`] if the subtotal, protection fee or a money
/// sum cannot be calculated. Missing shipping options are never an error —
/// they surface as a closed gate.
pub fn compute_summary<'a>(
    basket: &'a Basket<'a>,
    groups: &SellerGroups<'a>,
    options: &[SellerOptions<'a>],
    state: &CheckoutState,
    tiers: &[ProtectionTier<'_>],
) -> Result<OrderSummary<'a>, SummaryError> {
    let currency = basket.currency();
    let subtotal = basket.subtotal()?;
    let protection_fee = total_protection_fee(tiers, basket.items(), currency)?;

    let mut total_shipping = Money::from_minor(0, currency);
    let mut shipping_lines = SmallVec::new();

    for entry in options {
        let price = state
            .selection(entry.seller())
            .and_then(|provider| entry.option_for(provider))
            .map(|option| *option.price());

        if let Some(price) = price {
            total_shipping = total_shipping.add(price)?;
        }

        shipping_lines.push(SellerShippingLine {
            seller: entry.seller(),
            rows: groups.get(entry.seller()).map_or(0, SellerGroup::len),
            total_weight: entry.total_weight(),
            price,
            availability: entry.availability(),
        });
    }

    let stage = state.stage(groups, options);

    let can_checkout = stage == CheckoutStage::AllOptionsSelected
        && !basket.is_empty()
        && !basket.has_out_of_stock();

    let total = subtotal.add(total_shipping)?.add(protection_fee)?;

    Ok(OrderSummary {
        subtotal,
        total_shipping,
        protection_fee,
        total,
        shipping_lines,
        stage,
        can_checkout,
        currency,
    })
}
