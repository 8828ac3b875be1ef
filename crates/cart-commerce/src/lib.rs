//! Cart domain types and state management for the storefront cart widget.
//!
//! - **Money**: whole Rupiah amounts with the fixed `"Rp 1.234.567"` format
//! - **Cart**: ordered, id-unique line items with add / update / remove
//! - **CartStore**: owns the cart, persists it after every mutation and
//!   notifies listeners so the page can re-render
//! - **CartView**: the render model consumed by display code
//!
//! # Example
//!
//! ```rust,ignore
//! use cart_commerce::prelude::*;
//! use cart_cache::MemoryStore;
//! use cart_observability::StructuredLogger;
//!
//! let logger = StructuredLogger::new("cart-store");
//! let storage = KvCartStorage::new(MemoryStore::new(), logger.clone());
//! let mut store = CartStore::open(storage, logger);
//!
//! store.subscribe(|cart: &Cart| println!("{} item(s)", cart.count()));
//! store.add_item(ProductId::parse("p1")?, "Shirt", Money::parse("50000")?, "/img/shirt.jpg")?;
//!
//! assert_eq!(store.total().display(), "Rp 50.000");
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;

pub use error::CartError;
pub use ids::ProductId;
pub use money::Money;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CartError;
    pub use crate::ids::ProductId;
    pub use crate::money::Money;

    pub use crate::cart::{
        Cart, CartListener, CartRow, CartStorage, CartStore, CartSummary, CartView, LineItem,
        LoadRepair, QuantityChange,
    };

    #[cfg(feature = "storage")]
    pub use crate::cart::{KvCartStorage, DEFAULT_CART_KEY};
}
