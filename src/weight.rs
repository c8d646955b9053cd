//! Weights

use std::{
    fmt,
    iter::Sum,
    ops::{Add, Deref},
};

use rust_decimal::Decimal;

/// A parcel weight in kilograms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Weight {
    kilograms: Decimal,
}

impl Weight {
    /// Creates a weight from a decimal number of kilograms.
    #[must_use]
    pub fn from_kilograms(kilograms: Decimal) -> Self {
        Weight { kilograms }
    }

    /// Creates a weight from whole grams.
    #[must_use]
    pub fn from_grams(grams: i64) -> Self {
        Weight {
            kilograms: Decimal::new(grams, 3),
        }
    }

    /// Returns the weight in kilograms.
    #[must_use]
    pub fn kilograms(&self) -> Decimal {
        self.kilograms
    }

    /// Scales the weight by a unit count.
    ///
    /// A basket row may represent more than one unit of the same listing.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Weight {
            kilograms: self.kilograms * Decimal::from(quantity),
        }
    }
}

impl Deref for Weight {
    type Target = Decimal;

    fn deref(&self) -> &Self::Target {
        &self.kilograms
    }
}

impl Add for Weight {
    type Output = Weight;

    fn add(self, rhs: Weight) -> Self::Output {
        Weight {
            kilograms: self.kilograms + rhs.kilograms,
        }
    }
}

impl Sum for Weight {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Weight::default(), Add::add)
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}kg", self.kilograms.normalize())
    }
}
