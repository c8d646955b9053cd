//! Items

use rusty_money::{Money, iso::Currency};

use crate::{
    sellers::{SellerDirectory, SellerKey, SellerRef},
    weight::Weight,
};

pub mod groups;

/// Listing details carried on a basket row.
#[derive(Clone, Debug, PartialEq)]
pub struct Listing<'a> {
    name: String,
    price: Money<'a, Currency>,
    discounted_price: Option<Money<'a, Currency>>,
    weight: Weight,
    in_stock: bool,
}

impl<'a> Listing<'a> {
    /// Creates a new in-stock listing with no discount.
    pub fn new(name: impl Into<String>, price: Money<'a, Currency>, weight: Weight) -> Self {
        Listing {
            name: name.into(),
            price,
            discounted_price: None,
            weight,
            in_stock: true,
        }
    }

    /// Sets a discounted price on the listing.
    #[must_use]
    pub fn with_discount(mut self, discounted_price: Money<'a, Currency>) -> Self {
        self.discounted_price = Some(discounted_price);
        self
    }

    /// Marks the listing as out of stock.
    #[must_use]
    pub fn out_of_stock(mut self) -> Self {
        self.in_stock = false;
        self
    }

    /// Returns the product name of the listing.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the base price of the listing.
    #[must_use]
    pub fn price(&self) -> &Money<'a, Currency> {
        &self.price
    }

    /// Returns the discounted price, if the listing has one.
    #[must_use]
    pub fn discounted_price(&self) -> Option<&Money<'a, Currency>> {
        self.discounted_price.as_ref()
    }

    /// The price the buyer pays per unit: the discounted price when present,
    /// the base price otherwise.
    #[must_use]
    pub fn effective_price(&self) -> &Money<'a, Currency> {
        self.discounted_price.as_ref().unwrap_or(&self.price)
    }

    /// Returns the unit weight of the listing.
    #[must_use]
    pub fn weight(&self) -> Weight {
        self.weight
    }

    /// Whether the listing is in stock.
    #[must_use]
    pub fn is_in_stock(&self) -> bool {
        self.in_stock
    }
}

/// A basket row: a listing, the seller fulfilling it, and a unit count.
#[derive(Clone, Debug, PartialEq)]
pub struct BasketItem<'a> {
    seller: Option<SellerKey>,
    seller_ref: SellerRef,
    listing: Listing<'a>,
    quantity: u32,
}

impl<'a> BasketItem<'a> {
    /// Creates a row, resolving the seller reference against the directory.
    ///
    /// Resolution happens exactly once, here. A row whose reference does not
    /// resolve keeps `seller() == None`; it is excluded from shipping
    /// aggregation and blocks checkout for the row, rather than being
    /// dropped.
    pub fn resolve(
        reference: SellerRef,
        listing: Listing<'a>,
        quantity: u32,
        directory: &SellerDirectory,
    ) -> Self {
        BasketItem {
            seller: directory.resolve(&reference),
            seller_ref: reference,
            listing,
            quantity,
        }
    }

    /// Creates a row whose seller key is already known.
    pub fn with_seller(
        seller: SellerKey,
        reference: SellerRef,
        listing: Listing<'a>,
        quantity: u32,
    ) -> Self {
        BasketItem {
            seller: Some(seller),
            seller_ref: reference,
            listing,
            quantity,
        }
    }

    /// The resolved seller, or `None` for an unresolvable reference.
    #[must_use]
    pub fn seller(&self) -> Option<SellerKey> {
        self.seller
    }

    /// The original seller reference carried on the row.
    #[must_use]
    pub fn seller_ref(&self) -> &SellerRef {
        &self.seller_ref
    }

    /// Returns the listing on the row.
    #[must_use]
    pub fn listing(&self) -> &Listing<'a> {
        &self.listing
    }

    /// Number of units the row represents.
    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Total price for the row: effective unit price × quantity.
    #[must_use]
    pub fn line_price(&self) -> Money<'a, Currency> {
        let unit = self.listing.effective_price();

        Money::from_minor(
            unit.to_minor_units() * i64::from(self.quantity),
            unit.currency(),
        )
    }

    /// Total weight for the row: unit weight × quantity.
    #[must_use]
    pub fn line_weight(&self) -> Weight {
        self.listing.weight().times(self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::GBP;
    use smallvec::smallvec;

    use crate::sellers::Seller;

    use super::*;

    fn test_directory() -> (SellerDirectory, SellerKey) {
        let mut directory = SellerDirectory::new();

        let key = directory.insert(
            "s-rosie",
            Seller {
                name: "Rosie's Vintage".to_string(),
                providers: smallvec![],
            },
        );

        (directory, key)
    }

    #[test]
    fn effective_price_prefers_discount() {
        let listing = Listing::new("Denim jacket", Money::from_minor(5000, GBP), Weight::from_grams(800))
            .with_discount(Money::from_minor(4000, GBP));

        assert_eq!(listing.effective_price(), &Money::from_minor(4000, GBP));
    }

    #[test]
    fn effective_price_falls_back_to_base_price() {
        let listing = Listing::new("Denim jacket", Money::from_minor(5000, GBP), Weight::from_grams(800));

        assert_eq!(listing.effective_price(), &Money::from_minor(5000, GBP));
    }

    #[test]
    fn resolve_links_row_to_seller() {
        let (directory, key) = test_directory();

        let item = BasketItem::resolve(
            SellerRef::Id("s-rosie".to_string()),
            Listing::new("Denim jacket", Money::from_minor(5000, GBP), Weight::from_grams(800)),
            1,
            &directory,
        );

        assert_eq!(item.seller(), Some(key));
    }

    #[test]
    fn resolve_keeps_unresolvable_reference() {
        let (directory, _key) = test_directory();

        let item = BasketItem::resolve(
            SellerRef::Name("Closed Shop".to_string()),
            Listing::new("Denim jacket", Money::from_minor(5000, GBP), Weight::from_grams(800)),
            1,
            &directory,
        );

        assert_eq!(item.seller(), None);
        assert_eq!(item.seller_ref().as_str(), "Closed Shop");
    }

    #[test]
    fn line_price_respects_quantity_and_discount() {
        let (directory, _key) = test_directory();

        let item = BasketItem::resolve(
            SellerRef::Id("s-rosie".to_string()),
            Listing::new("Denim jacket", Money::from_minor(5000, GBP), Weight::from_grams(800))
                .with_discount(Money::from_minor(4000, GBP)),
            3,
            &directory,
        );

        assert_eq!(item.line_price(), Money::from_minor(12_000, GBP));
    }

    #[test]
    fn line_weight_respects_quantity() {
        let (directory, _key) = test_directory();

        let item = BasketItem::resolve(
            SellerRef::Id("s-rosie".to_string()),
            Listing::new("Denim jacket", Money::from_minor(5000, GBP), Weight::from_grams(800)),
            2,
            &directory,
        );

        assert_eq!(item.line_weight(), Weight::from_grams(1600));
    }

    #[test]
    fn out_of_stock_listing() {
        let listing = Listing::new("Denim jacket", Money::from_minor(5000, GBP), Weight::from_grams(800))
            .out_of_stock();

        assert!(!listing.is_in_stock());
    }
}
