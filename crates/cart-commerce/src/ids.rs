//! Product identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CartError;

/// Identifier of a product, the unique key of a line item within the cart.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create a new ID from a string without validation.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Create an ID, rejecting blank input.
    pub fn parse(id: impl Into<String>) -> Result<Self, CartError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(CartError::InvalidInput("product id is empty".to_string()));
        }
        Ok(Self(id))
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the ID is blank.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ProductId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let id = ProductId::new("p1");
        assert_eq!(id.as_str(), "p1");
        assert_eq!(id.to_string(), "p1");
    }

    #[test]
    fn test_parse_rejects_blank() {
        assert!(ProductId::parse("p1").is_ok());
        assert!(matches!(
            ProductId::parse(""),
            Err(CartError::InvalidInput(_))
        ));
        assert!(ProductId::parse("   ").is_err());
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let json = serde_json::to_string(&ProductId::new("p1")).unwrap();
        assert_eq!(json, "\"p1\"");
    }
}
