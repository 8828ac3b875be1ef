//! Cart error types.

use thiserror::Error;

/// Errors that can occur in cart operations.
#[derive(Error, Debug)]
pub enum CartError {
    /// Input rejected at the add boundary (empty id, unparsable price).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Index-based update or remove outside the cart.
    #[error("Index {index} out of range for cart with {len} item(s)")]
    OutOfRange { index: usize, len: usize },

    /// Item not in cart.
    #[error("Item not in cart: {0}")]
    ItemNotInCart(String),

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in cart calculation")]
    Overflow,

    /// Persisting the cart failed.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl CartError {
    /// Short machine-readable name of the error kind, used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            CartError::InvalidInput(_) => "invalid_input",
            CartError::OutOfRange { .. } => "out_of_range",
            CartError::ItemNotInCart(_) => "item_not_in_cart",
            CartError::Overflow => "overflow",
            CartError::Storage(_) => "storage",
        }
    }
}

#[cfg(feature = "storage")]
impl From<cart_cache::CacheError> for CartError {
    fn from(e: cart_cache::CacheError) -> Self {
        CartError::Storage(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(CartError::InvalidInput("x".into()).kind(), "invalid_input");
        assert_eq!(CartError::OutOfRange { index: 2, len: 1 }.kind(), "out_of_range");
        assert_eq!(CartError::ItemNotInCart("p1".into()).kind(), "item_not_in_cart");
        assert_eq!(CartError::Overflow.kind(), "overflow");
        assert_eq!(CartError::Storage("full".into()).kind(), "storage");
    }

    #[cfg(feature = "storage")]
    #[test]
    fn test_cache_errors_become_storage() {
        let err: CartError = cart_cache::CacheError::StoreError("quota".to_string()).into();
        assert!(matches!(err, CartError::Storage(ref msg) if msg.contains("quota")));
    }
}
