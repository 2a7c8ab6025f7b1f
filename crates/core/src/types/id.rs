//! Type-safe customer identifier.
//!
//! Customer IDs are assigned by the database (`BIGSERIAL`). The value `0` is
//! reserved to mean "not yet assigned": a save payload carrying it creates a
//! new record, and by-id lookups treat it as a record that cannot exist.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when parsing a [`CustomerId`] from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CustomerIdError {
    /// The input is not a base-10 integer that fits in 64 bits.
    #[error("customer id is not an integer: {0:?}")]
    Malformed(String),
    /// The input parsed, but identifiers are never negative.
    #[error("customer id must not be negative: {0}")]
    Negative(i64),
}

/// Identifier of a customer record.
///
/// Serializes as a bare JSON integer.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct CustomerId(i64);

impl CustomerId {
    /// The "no id yet" sentinel.
    pub const UNASSIGNED: Self = Self(0);

    /// Create a new ID from an i64 value.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the underlying i64 value.
    #[must_use]
    pub const fn as_i64(&self) -> i64 {
        self.0
    }

    /// Whether this id is the zero sentinel.
    #[must_use]
    pub const fn is_unassigned(&self) -> bool {
        self.0 == 0
    }

    /// Whether this id could never refer to a stored record.
    #[must_use]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }
}

impl FromStr for CustomerId {
    type Err = CustomerIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s
            .parse::<i64>()
            .map_err(|_| CustomerIdError::Malformed(s.to_owned()))?;
        if id < 0 {
            return Err(CustomerIdError::Negative(id));
        }
        Ok(Self(id))
    }
}

impl ::core::fmt::Display for CustomerId {
    fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for CustomerId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<CustomerId> for i64 {
    fn from(id: CustomerId) -> Self {
        id.0
    }
}

#[cfg(feature = "postgres")]
impl ::sqlx::Type<::sqlx::Postgres> for CustomerId {
    fn type_info() -> ::sqlx::postgres::PgTypeInfo {
        <i64 as ::sqlx::Type<::sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &::sqlx::postgres::PgTypeInfo) -> bool {
        <i64 as ::sqlx::Type<::sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> ::sqlx::Decode<'r, ::sqlx::Postgres> for CustomerId {
    fn decode(
        value: ::sqlx::postgres::PgValueRef<'r>,
    ) -> ::core::result::Result<Self, ::sqlx::error::BoxDynError> {
        let id = <i64 as ::sqlx::Decode<::sqlx::Postgres>>::decode(value)?;
        Ok(Self(id))
    }
}

#[cfg(feature = "postgres")]
impl ::sqlx::Encode<'_, ::sqlx::Postgres> for CustomerId {
    fn encode_by_ref(
        &self,
        buf: &mut ::sqlx::postgres::PgArgumentBuffer,
    ) -> ::std::result::Result<::sqlx::encode::IsNull, ::sqlx::error::BoxDynError> {
        <i64 as ::sqlx::Encode<::sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_positive() {
        let id: CustomerId = "42".parse().unwrap();
        assert_eq!(id.as_i64(), 42);
        assert!(!id.is_unassigned());
    }

    #[test]
    fn test_parse_zero_is_unassigned() {
        let id: CustomerId = "0".parse().unwrap();
        assert_eq!(id, CustomerId::UNASSIGNED);
        assert!(id.is_unassigned());
    }

    #[test]
    fn test_parse_negative_rejected() {
        let err = "-7".parse::<CustomerId>().unwrap_err();
        assert_eq!(err, CustomerIdError::Negative(-7));
    }

    #[test]
    fn test_parse_malformed_rejected() {
        for input in ["", "abc", "1.5", "12abc", " 3", "99999999999999999999"] {
            let err = input.parse::<CustomerId>().unwrap_err();
            assert!(
                matches!(err, CustomerIdError::Malformed(_)),
                "expected malformed for {input:?}"
            );
        }
    }

    #[test]
    fn test_display_matches_inner_value() {
        assert_eq!(CustomerId::new(17).to_string(), "17");
    }

    #[test]
    fn test_default_is_unassigned() {
        assert!(CustomerId::default().is_unassigned());
    }
}
