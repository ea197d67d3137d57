//! Newtype IDs for type-safe entity references.
//!
//! Every table in the dashboard keys its rows by UUID. The `define_id!` macro
//! wraps a [`Uuid`] per entity so a customer ID can never be passed where an
//! invoice ID is expected.

pub use uuid::Uuid;

/// Macro to define a UUID-backed ID wrapper.
///
/// Creates a newtype wrapper around [`Uuid`] with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`
/// - `new()`, `generate()`, `as_uuid()`
/// - `FromStr` (accepts any textual UUID form, case-insensitive)
/// - `sqlx` `Type`, `Encode`, and `Decode` implementations (with `postgres` feature)
///
/// # Example
///
/// ```rust
/// # use invoice_dashboard_core::define_id;
/// define_id!(AccountId);
///
/// let id: AccountId = "410544b2-4001-4271-9855-fec4b6a6442a".parse().unwrap();
/// assert_eq!(id.to_string(), "410544b2-4001-4271-9855-fec4b6a6442a");
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name($crate::types::id::Uuid);

        impl $name {
            /// Wrap an existing UUID.
            #[must_use]
            pub const fn new(id: $crate::types::id::Uuid) -> Self {
                Self(id)
            }

            /// Generate a fresh random (v4) ID.
            #[must_use]
            pub fn generate() -> Self {
                Self($crate::types::id::Uuid::new_v4())
            }

            /// Get the underlying UUID.
            #[must_use]
            pub const fn as_uuid(&self) -> $crate::types::id::Uuid {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = $crate::types::id::IdParseError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                $crate::types::id::Uuid::parse_str(s.trim())
                    .map(Self)
                    .map_err(|_| $crate::types::id::IdParseError(s.to_owned()))
            }
        }

        impl From<$crate::types::id::Uuid> for $name {
            fn from(id: $crate::types::id::Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for $crate::types::id::Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        #[cfg(feature = "postgres")]
        impl ::sqlx::Type<::sqlx::Postgres> for $name {
            fn type_info() -> ::sqlx::postgres::PgTypeInfo {
                <$crate::types::id::Uuid as ::sqlx::Type<::sqlx::Postgres>>::type_info()
            }

            fn compatible(ty: &::sqlx::postgres::PgTypeInfo) -> bool {
                <$crate::types::id::Uuid as ::sqlx::Type<::sqlx::Postgres>>::compatible(ty)
            }
        }

        #[cfg(feature = "postgres")]
        impl<'r> ::sqlx::Decode<'r, ::sqlx::Postgres> for $name {
            fn decode(
                value: ::sqlx::postgres::PgValueRef<'r>,
            ) -> ::core::result::Result<Self, ::sqlx::error::BoxDynError> {
                let id =
                    <$crate::types::id::Uuid as ::sqlx::Decode<::sqlx::Postgres>>::decode(value)?;
                Ok(Self(id))
            }
        }

        #[cfg(feature = "postgres")]
        impl ::sqlx::Encode<'_, ::sqlx::Postgres> for $name {
            fn encode_by_ref(
                &self,
                buf: &mut ::sqlx::postgres::PgArgumentBuffer,
            ) -> ::std::result::Result<::sqlx::encode::IsNull, ::sqlx::error::BoxDynError> {
                <$crate::types::id::Uuid as ::sqlx::Encode<::sqlx::Postgres>>::encode_by_ref(
                    &self.0, buf,
                )
            }
        }
    };
}

/// Error returned when a string is not a valid UUID.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid id: {0:?}")]
pub struct IdParseError(pub String);

define_id!(UserId);
define_id!(CustomerId);
define_id!(InvoiceId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lowercase_and_uppercase() {
        let lower: CustomerId = "cc27c14a-0acf-4f4a-a6c9-d45682c144b9".parse().unwrap();
        let upper: CustomerId = "CC27C14A-0ACF-4F4A-A6C9-D45682C144B9".parse().unwrap();
        assert_eq!(lower, upper);
        assert_eq!(upper.to_string(), "cc27c14a-0acf-4f4a-a6c9-d45682c144b9");
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let id: InvoiceId = "  410544b2-4001-4271-9855-fec4b6a6442a\n".parse().unwrap();
        assert_eq!(id.to_string(), "410544b2-4001-4271-9855-fec4b6a6442a");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = "c1".parse::<CustomerId>().unwrap_err();
        assert_eq!(err, IdParseError("c1".to_owned()));
    }

    #[test]
    fn test_generate_is_unique() {
        assert_ne!(InvoiceId::generate(), InvoiceId::generate());
    }

    #[test]
    fn test_serde_is_transparent() {
        let id: UserId = "410544b2-4001-4271-9855-fec4b6a6442a".parse().unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"410544b2-4001-4271-9855-fec4b6a6442a\"");
        let back: UserId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
