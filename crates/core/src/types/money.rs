//! Integer money in minor currency units.
//!
//! Amounts are entered as decimal dollars (`"12.50"`) and stored as whole
//! cents in an `INT` column, so all arithmetic on the way in goes through
//! [`rust_decimal::Decimal`] rather than floating point.

use core::fmt;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Errors that can occur when converting a decimal amount to [`Cents`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    /// The amount is below zero.
    #[error("amount cannot be negative")]
    Negative,
    /// The amount does not fit the storage column.
    #[error("amount must be at most {max}")]
    TooLarge {
        /// Largest accepted amount, formatted as dollars.
        max: String,
    },
}

/// An amount of money in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cents(i32);

impl Cents {
    /// Largest storable amount (`INT` column).
    pub const MAX: Self = Self(i32::MAX);

    /// Wrap a raw cent value.
    #[must_use]
    pub const fn from_cents(cents: i32) -> Self {
        Self(cents)
    }

    /// Get the raw cent value.
    #[must_use]
    pub const fn as_i32(&self) -> i32 {
        self.0
    }

    /// Convert a decimal dollar amount to cents.
    ///
    /// The amount is multiplied by 100 and rounded half away from zero, so
    /// `12.505` becomes `1251` and `0.004` becomes `0`.
    ///
    /// # Errors
    ///
    /// Returns [`AmountError::Negative`] for amounts below zero and
    /// [`AmountError::TooLarge`] when the result does not fit in an `i32`.
    pub fn from_decimal(amount: Decimal) -> Result<Self, AmountError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(AmountError::Negative);
        }

        let too_large = || AmountError::TooLarge {
            max: Self::MAX.to_string(),
        };

        amount
            .checked_mul(Decimal::ONE_HUNDRED)
            .map(|c| c.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
            .and_then(|c| c.to_i32())
            .map(Self)
            .ok_or_else(too_large)
    }

    /// The amount as decimal dollars.
    #[must_use]
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(i64::from(self.0), 2)
    }
}

/// Formats as US dollars with thousands separators, e.g. `$1,234.56`.
impl fmt::Display for Cents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = i64::from(self.0).unsigned_abs();
        let dollars = (abs / 100).to_string();
        let cents = abs % 100;

        let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
        for (i, ch) in dollars.chars().enumerate() {
            if i > 0 && (dollars.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        write!(f, "{sign}${grouped}.{cents:02}")
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Cents {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <i32 as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <i32 as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Cents {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        Ok(Self(<i32 as sqlx::Decode<sqlx::Postgres>>::decode(value)?))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Cents {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <i32 as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn cents(s: &str) -> Result<Cents, AmountError> {
        Cents::from_decimal(Decimal::from_str(s).unwrap())
    }

    #[test]
    fn test_from_decimal_exact() {
        assert_eq!(cents("12.50").unwrap().as_i32(), 1250);
        assert_eq!(cents("0").unwrap().as_i32(), 0);
        assert_eq!(cents("157.95").unwrap().as_i32(), 15795);
    }

    #[test]
    fn test_from_decimal_rounds_half_away_from_zero() {
        assert_eq!(cents("12.505").unwrap().as_i32(), 1251);
        assert_eq!(cents("12.504").unwrap().as_i32(), 1250);
        assert_eq!(cents("0.004").unwrap().as_i32(), 0);
    }

    #[test]
    fn test_from_decimal_negative_zero_is_zero() {
        assert_eq!(cents("-0.00").unwrap().as_i32(), 0);
    }

    #[test]
    fn test_from_decimal_rejects_negative() {
        assert_eq!(cents("-1"), Err(AmountError::Negative));
    }

    #[test]
    fn test_from_decimal_rejects_overflow() {
        assert!(cents("21474836.47").is_ok());
        assert!(matches!(cents("21474836.48"), Err(AmountError::TooLarge { .. })));
    }

    #[test]
    fn test_display_groups_thousands() {
        assert_eq!(Cents::from_cents(1250).to_string(), "$12.50");
        assert_eq!(Cents::from_cents(5).to_string(), "$0.05");
        assert_eq!(Cents::from_cents(123_456).to_string(), "$1,234.56");
        assert_eq!(Cents::from_cents(100_000_000).to_string(), "$1,000,000.00");
        assert_eq!(Cents::from_cents(-250).to_string(), "-$2.50");
    }

    #[test]
    fn test_to_decimal() {
        assert_eq!(Cents::from_cents(1250).to_decimal(), Decimal::from_str("12.50").unwrap());
    }
}
