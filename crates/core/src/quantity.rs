//! Positive item quantities.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// A strictly positive count of units.
///
/// Used for deltas (how many to add) and for the form input of the manual
/// "add item" path. Stored quantities can be derived from it but a persisted
/// record never carries zero.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Quantity(u32);

impl Quantity {
    pub const ONE: Quantity = Quantity(1);

    pub fn new(value: u32) -> DomainResult<Self> {
        if value == 0 {
            return Err(DomainError::validation("quantity must be a positive integer"));
        }
        Ok(Self(value))
    }

    /// Parse user-typed input such as `"3"`.
    ///
    /// Non-numeric, fractional, zero and negative inputs are rejected rather
    /// than coerced.
    pub fn parse(input: &str) -> DomainResult<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("quantity is required"));
        }
        let value: i64 = trimmed.parse().map_err(|_| {
            DomainError::validation(format!("quantity must be a whole number, got '{trimmed}'"))
        })?;
        if value <= 0 {
            return Err(DomainError::validation("quantity must be a positive integer"));
        }
        let value = u32::try_from(value)
            .map_err(|_| DomainError::validation("quantity is too large"))?;
        Self::new(value)
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl core::fmt::Display for Quantity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl TryFrom<u32> for Quantity {
    type Error = DomainError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for u32 {
    fn from(value: Quantity) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn zero_is_rejected() {
        assert!(Quantity::new(0).is_err());
        assert_eq!(Quantity::new(4).unwrap().get(), 4);
    }

    #[test]
    fn parse_rejects_non_numeric_input() {
        for bad in ["", "  ", "abc", "2.5", "3 eggs", "-1", "0"] {
            match Quantity::parse(bad) {
                Err(DomainError::Validation(_)) => {}
                other => panic!("expected validation error for {bad:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn parse_rejects_overflow() {
        assert!(Quantity::parse("99999999999").is_err());
    }

    #[test]
    fn parse_accepts_padded_digits() {
        assert_eq!(Quantity::parse(" 12 ").unwrap().get(), 12);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: every positive integer typed as text parses back to itself.
        #[test]
        fn positive_integers_parse(n in 1u32..=u32::MAX) {
            prop_assert_eq!(Quantity::parse(&n.to_string()).unwrap().get(), n);
        }

        /// Property: non-positive integers never produce a quantity.
        #[test]
        fn non_positive_integers_are_rejected(n in i64::MIN..=0i64) {
            prop_assert!(Quantity::parse(&n.to_string()).is_err());
        }
    }
}
