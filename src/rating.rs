use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

use std::{fmt::Display, str::FromStr};

/// Represents a product rating.
///
/// The value is stored as an exact decimal, so `4.55` read from a file is
/// `4.55`, not the nearest binary floating-point number. The [`Display`]
/// implementation always formats it to 2 decimal places.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Ord, PartialOrd)]
pub struct Rating(Decimal);

impl Rating {
    /// Number of fractional digits kept by [`Rating::rounded`].
    pub const SCALE: u32 = 2;

    #[must_use]
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Rounds to [`Rating::SCALE`] fractional digits, with halves rounded
    /// away from zero.
    ///
    /// # Examples
    ///
    /// ```
    /// # use std::str::FromStr;
    /// # use ratings::Rating;
    /// let rating = Rating::from_str("4.125").unwrap();
    /// assert_eq!(rating.rounded(), Rating::from_str("4.13").unwrap());
    /// ```
    #[must_use]
    pub fn rounded(self) -> Self {
        Self(
            self.0
                .round_dp_with_strategy(Self::SCALE, RoundingStrategy::MidpointAwayFromZero),
        )
    }
}

impl Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = format!("{:.2}", self.0);
        f.pad(&text)
    }
}

/// Parses plain decimal text such as `4.9`, with scientific notation (`4.9e0`)
/// accepted as a fallback. Surrounding whitespace is ignored.
///
/// Values must fit a 96-bit decimal: at most 28 fractional digits and a
/// magnitude below about `7.9e28`. Exponents outside that range, such as
/// `1e30` or `1e-30`, are rejected.
impl FromStr for Rating {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        match Decimal::from_str(s) {
            Ok(value) => Ok(Self(value)),
            Err(err) => Decimal::from_scientific(s).map(Self).map_err(|_| err),
        }
    }
}

/// The sum of a brand's ratings no longer fits a [`Rating`].
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[error("sum of ratings is out of range")]
pub struct Overflow;

/// Running sum and count of the ratings seen for one brand.
#[derive(Clone, Copy, Debug, Default)]
pub struct Average {
    sum: Rating,
    count: usize,
}

impl Average {
    /// Adds `rating` to the running sum.
    ///
    /// # Errors
    ///
    /// Returns [`Overflow`] if the sum would go out of range, leaving the
    /// average unchanged.
    pub fn push(&mut self, rating: Rating) -> Result<(), Overflow> {
        self.sum = Rating(self.sum.0.checked_add(rating.0).ok_or(Overflow)?);
        self.count += 1;
        Ok(())
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Returns the mean rating, rounded with [`Rating::rounded`], or `None`
    /// if nothing has been pushed.
    #[must_use]
    pub fn mean(&self) -> Option<Rating> {
        if self.count == 0 {
            return None;
        }
        Some(Rating(self.sum.0 / Decimal::from(self.count)).rounded())
    }
}
