//! Shopping cart module.
//!
//! Contains the cart and line item types, the state-owning store, the
//! render model and key-value persistence.

mod cart;
#[cfg(feature = "storage")]
mod storage;
mod store;
mod view;

pub use cart::{Cart, LineItem, LoadRepair, QuantityChange};
#[cfg(feature = "storage")]
pub use storage::{KvCartStorage, DEFAULT_CART_KEY};
pub use store::{CartListener, CartStorage, CartStore};
pub use view::{CartRow, CartSummary, CartView};
