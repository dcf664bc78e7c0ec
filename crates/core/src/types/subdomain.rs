//! Store subdomain type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Subdomain`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SubdomainError {
    /// The input string is empty.
    #[error("subdomain cannot be empty")]
    Empty,
    /// The input string is too long for a DNS label.
    #[error("subdomain must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains a character outside `[a-z0-9-]`.
    #[error("subdomain contains invalid character {0:?}")]
    InvalidCharacter(char),
    /// The input starts or ends with a hyphen.
    #[error("subdomain cannot start or end with a hyphen")]
    EdgeHyphen,
}

/// A store's routing key.
///
/// Subdomains are globally unique across stores and are the only key used to
/// route a request host to a store.
///
/// ## Constraints
///
/// - Length: 1-63 characters (a single DNS label)
/// - Lowercase ASCII letters, digits and `-` only
/// - Must not start or end with `-`
///
/// Input is lowercased before validation, so `Toys` parses as `toys`.
///
/// ## Examples
///
/// ```
/// use orbit_core::Subdomain;
///
/// assert!(Subdomain::parse("toys").is_ok());
/// assert!(Subdomain::parse("beauty-store-1").is_ok());
///
/// assert!(Subdomain::parse("").is_err());
/// assert!(Subdomain::parse("-toys").is_err());
/// assert!(Subdomain::parse("toys.shop").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Subdomain(String);

impl Subdomain {
    /// Maximum length of a DNS label.
    pub const MAX_LENGTH: usize = 63;

    /// Parse a `Subdomain` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, longer than 63 characters,
    /// contains characters outside `[a-z0-9-]` (after lowercasing), or
    /// starts or ends with a hyphen.
    pub fn parse(s: &str) -> Result<Self, SubdomainError> {
        if s.is_empty() {
            return Err(SubdomainError::Empty);
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(SubdomainError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        let lower = s.to_ascii_lowercase();

        if let Some(c) = lower
            .chars()
            .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-'))
        {
            return Err(SubdomainError::InvalidCharacter(c));
        }

        if lower.starts_with('-') || lower.ends_with('-') {
            return Err(SubdomainError::EdgeHyphen);
        }

        Ok(Self(lower))
    }

    /// Returns the subdomain as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Subdomain` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Subdomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Subdomain {
    type Err = SubdomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Subdomain {
    type Error = SubdomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Subdomain> for String {
    fn from(value: Subdomain) -> Self {
        value.0
    }
}

impl AsRef<str> for Subdomain {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// SQLx support (with postgres feature)
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Subdomain {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Subdomain {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        // The column carries a CHECK constraint matching `parse`
        Ok(Self(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Subdomain {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_subdomains() {
        assert!(Subdomain::parse("toys").is_ok());
        assert!(Subdomain::parse("beauty-store-1").is_ok());
        assert!(Subdomain::parse("a").is_ok());
        assert!(Subdomain::parse("42").is_ok());
        assert!(Subdomain::parse(&"a".repeat(63)).is_ok());
    }

    #[test]
    fn test_parse_lowercases() {
        let sub = Subdomain::parse("Toys").unwrap();
        assert_eq!(sub.as_str(), "toys");
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(Subdomain::parse(""), Err(SubdomainError::Empty));
    }

    #[test]
    fn test_parse_too_long() {
        assert!(matches!(
            Subdomain::parse(&"a".repeat(64)),
            Err(SubdomainError::TooLong { max: 63 })
        ));
    }

    #[test]
    fn test_parse_invalid_characters() {
        assert_eq!(
            Subdomain::parse("toys.shop"),
            Err(SubdomainError::InvalidCharacter('.'))
        );
        assert_eq!(
            Subdomain::parse("toy_store"),
            Err(SubdomainError::InvalidCharacter('_'))
        );
        assert!(Subdomain::parse("tøys").is_err());
    }

    #[test]
    fn test_parse_edge_hyphen() {
        assert_eq!(Subdomain::parse("-toys"), Err(SubdomainError::EdgeHyphen));
        assert_eq!(Subdomain::parse("toys-"), Err(SubdomainError::EdgeHyphen));
    }

    #[test]
    fn test_serde_validates() {
        let sub: Subdomain = serde_json::from_str("\"Food\"").unwrap();
        assert_eq!(sub.as_str(), "food");
        assert_eq!(serde_json::to_string(&sub).unwrap(), "\"food\"");

        assert!(serde_json::from_str::<Subdomain>("\"bad name\"").is_err());
    }
}
