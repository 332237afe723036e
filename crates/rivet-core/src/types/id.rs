//! Two-part standard identifier.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{MetaError, MetaResult};

/// An identifier made of a scheme and a value, rendered as `scheme~value`.
///
/// The scheme names the naming system (for example a vendor reference-data
/// universe) and the value is the identifier within that scheme. Neither
/// part may be empty or contain the `~` separator.
///
/// # Example
///
/// ```rust
/// use rivet_core::types::StandardId;
///
/// let id = StandardId::of("MarkitRedCode", "3H98A7").unwrap();
/// assert_eq!(id.to_string(), "MarkitRedCode~3H98A7");
/// assert_eq!(StandardId::parse("MarkitRedCode~3H98A7").unwrap(), id);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StandardId {
    scheme: String,
    value: String,
}

impl StandardId {
    /// Creates an identifier from a scheme and a value.
    ///
    /// # Errors
    ///
    /// Returns `MetaError::ValidationFailed` if either part is empty or
    /// contains the `~` separator.
    pub fn of(scheme: impl Into<String>, value: impl Into<String>) -> MetaResult<Self> {
        let scheme = scheme.into();
        let value = value.into();
        if scheme.is_empty() || scheme.contains('~') {
            return Err(MetaError::validation_failed(
                "scheme",
                "must be non-empty and must not contain '~'",
            ));
        }
        if value.is_empty() || value.contains('~') {
            return Err(MetaError::validation_failed(
                "value",
                "must be non-empty and must not contain '~'",
            ));
        }
        Ok(Self { scheme, value })
    }

    /// Parses an identifier from its `scheme~value` form.
    ///
    /// # Errors
    ///
    /// Returns `MetaError::ParseError` if the text is not of the form
    /// `scheme~value`.
    pub fn parse(text: &str) -> MetaResult<Self> {
        let Some((scheme, value)) = text.split_once('~') else {
            return Err(MetaError::parse_error(
                "standardId",
                text,
                "expected 'scheme~value'",
            ));
        };
        Self::of(scheme, value)
            .map_err(|_| MetaError::parse_error("standardId", text, "empty scheme or value"))
    }

    /// Returns the scheme part.
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Returns the value part.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for StandardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}~{}", self.scheme, self.value)
    }
}

impl FromStr for StandardId {
    type Err = MetaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_of_and_display() {
        let id = StandardId::of("Ticker", "AAPL").unwrap();
        assert_eq!(id.scheme(), "Ticker");
        assert_eq!(id.value(), "AAPL");
        assert_eq!(id.to_string(), "Ticker~AAPL");
    }

    #[test]
    fn test_rejects_separator_in_parts() {
        assert!(StandardId::of("Tick~er", "AAPL").is_err());
        assert!(StandardId::of("Ticker", "AA~PL").is_err());
        assert!(StandardId::of("", "AAPL").is_err());
        assert!(StandardId::of("Ticker", "").is_err());
    }

    #[test]
    fn test_parse_round_trip() {
        let id = StandardId::parse("Ticker~AAPL").unwrap();
        assert_eq!(StandardId::parse(&id.to_string()).unwrap(), id);
    }

    #[test]
    fn test_parse_rejects_missing_separator() {
        assert!(StandardId::parse("TickerAAPL").is_err());
        assert!(StandardId::parse("~").is_err());
    }
}
