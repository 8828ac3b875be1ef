//! Cart and line item types.

use crate::error::CartError;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A line item in the cart.
///
/// Field names on the wire match what the storefront page keeps in local
/// storage: `{"id", "name", "price", "image", "quantity"}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LineItem {
    /// Product being purchased; unique within the cart.
    pub id: ProductId,
    /// Product name (denormalized for display).
    pub name: String,
    /// Unit price.
    #[serde(rename = "price")]
    pub unit_price: Money,
    /// Product image location.
    #[serde(rename = "image")]
    pub image_url: String,
    /// Quantity, always positive while the item is in the cart.
    pub quantity: i64,
}

impl LineItem {
    /// Create a new line item with quantity 1.
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        unit_price: Money,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            unit_price,
            image_url: image_url.into(),
            quantity: 1,
        }
    }

    /// Unit price times quantity, or None on overflow.
    pub fn try_total(&self) -> Option<Money> {
        self.unit_price.try_multiply(self.quantity)
    }
}

/// Outcome of a quantity change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuantityChange {
    /// The item is still in the cart with this quantity.
    Updated { quantity: i64 },
    /// The quantity dropped to zero or below and the item was removed.
    Removed(LineItem),
}

/// A problem found and repaired while restoring a stored cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadRepair {
    /// An entry did not have the line item shape.
    Unreadable { position: usize, reason: String },
    /// An entry had a blank product id.
    BlankId { position: usize },
    /// An entry had a non-positive quantity.
    NonPositiveQuantity { id: ProductId, quantity: i64 },
    /// An entry had a negative price.
    NegativePrice { id: ProductId, price: i64 },
    /// A later entry repeated an id and was merged into the first.
    DuplicateMerged { id: ProductId },
    /// Keeping the entry would make the total overflow.
    Overflow { id: ProductId },
}

impl fmt::Display for LoadRepair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadRepair::Unreadable { position, reason } => {
                write!(f, "dropped unreadable entry {}: {}", position, reason)
            }
            LoadRepair::BlankId { position } => {
                write!(f, "dropped entry {} with blank id", position)
            }
            LoadRepair::NonPositiveQuantity { id, quantity } => {
                write!(f, "dropped {} with quantity {}", id, quantity)
            }
            LoadRepair::NegativePrice { id, price } => {
                write!(f, "dropped {} with negative price {}", id, price)
            }
            LoadRepair::DuplicateMerged { id } => write!(f, "merged duplicate entry {}", id),
            LoadRepair::Overflow { id } => write!(f, "dropped {}: total would overflow", id),
        }
    }
}

/// A shopping cart: an ordered, id-unique sequence of line items.
///
/// Insertion order is display order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a cart from stored JSON entries, repairing what violates the
    /// cart invariants.
    pub fn restore(entries: Vec<serde_json::Value>) -> (Self, Vec<LoadRepair>) {
        let mut cart = Cart::new();
        let mut repairs = Vec::new();

        for (position, entry) in entries.into_iter().enumerate() {
            let item: LineItem = match serde_json::from_value(entry) {
                Ok(item) => item,
                Err(e) => {
                    repairs.push(LoadRepair::Unreadable {
                        position,
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            if item.id.is_blank() {
                repairs.push(LoadRepair::BlankId { position });
                continue;
            }
            if item.quantity <= 0 {
                repairs.push(LoadRepair::NonPositiveQuantity {
                    id: item.id,
                    quantity: item.quantity,
                });
                continue;
            }
            if item.unit_price.is_negative() {
                repairs.push(LoadRepair::NegativePrice {
                    price: item.unit_price.amount(),
                    id: item.id,
                });
                continue;
            }

            match cart.position(&item.id) {
                Some(index) => {
                    let previous = cart.items[index].quantity;
                    cart.items[index].quantity = previous.saturating_add(item.quantity);
                    if !cart.is_representable() {
                        cart.items[index].quantity = previous;
                        repairs.push(LoadRepair::Overflow { id: item.id });
                    } else {
                        repairs.push(LoadRepair::DuplicateMerged { id: item.id });
                    }
                }
                None => {
                    let id = item.id.clone();
                    cart.items.push(item);
                    if !cart.is_representable() {
                        cart.items.pop();
                        repairs.push(LoadRepair::Overflow { id });
                    }
                }
            }
        }

        (cart, repairs)
    }

    /// Add one unit of a product.
    ///
    /// An existing line item with the same id gets its quantity incremented;
    /// otherwise a new item with quantity 1 is appended. Returns the index
    /// of the affected item.
    pub fn add_item(
        &mut self,
        id: ProductId,
        name: impl Into<String>,
        unit_price: Money,
        image_url: impl Into<String>,
    ) -> Result<usize, CartError> {
        if id.is_blank() {
            return Err(CartError::InvalidInput("product id is empty".to_string()));
        }
        if unit_price.is_negative() {
            return Err(CartError::InvalidInput(format!(
                "negative price for {}: {}",
                id,
                unit_price.amount()
            )));
        }

        if let Some(index) = self.position(&id) {
            let previous = self.items[index].quantity;
            self.items[index].quantity = previous.checked_add(1).ok_or(CartError::Overflow)?;
            if !self.is_representable() {
                self.items[index].quantity = previous;
                return Err(CartError::Overflow);
            }
            return Ok(index);
        }

        self.items.push(LineItem::new(id, name, unit_price, image_url));
        if !self.is_representable() {
            self.items.pop();
            return Err(CartError::Overflow);
        }
        Ok(self.items.len() - 1)
    }

    /// Add `delta` to the quantity of the item at `index`.
    ///
    /// A resulting quantity of zero or less removes the item, shifting later
    /// indices down by one.
    pub fn update_quantity(&mut self, index: usize, delta: i64) -> Result<QuantityChange, CartError> {
        let len = self.items.len();
        let item = self
            .items
            .get_mut(index)
            .ok_or(CartError::OutOfRange { index, len })?;

        let previous = item.quantity;
        let quantity = previous.checked_add(delta).ok_or(CartError::Overflow)?;
        if quantity <= 0 {
            return Ok(QuantityChange::Removed(self.items.remove(index)));
        }

        item.quantity = quantity;
        if !self.is_representable() {
            self.items[index].quantity = previous;
            return Err(CartError::Overflow);
        }
        Ok(QuantityChange::Updated { quantity })
    }

    /// Add `delta` to the quantity of the item with `id`.
    pub fn update_quantity_by_id(
        &mut self,
        id: &ProductId,
        delta: i64,
    ) -> Result<QuantityChange, CartError> {
        let index = self
            .position(id)
            .ok_or_else(|| CartError::ItemNotInCart(id.to_string()))?;
        self.update_quantity(index, delta)
    }

    /// Remove the item at `index` unconditionally.
    pub fn remove_item(&mut self, index: usize) -> Result<LineItem, CartError> {
        if index >= self.items.len() {
            return Err(CartError::OutOfRange {
                index,
                len: self.items.len(),
            });
        }
        Ok(self.items.remove(index))
    }

    /// Remove the item with `id`.
    pub fn remove_item_by_id(&mut self, id: &ProductId) -> Result<LineItem, CartError> {
        let index = self
            .position(id)
            .ok_or_else(|| CartError::ItemNotInCart(id.to_string()))?;
        self.remove_item(index)
    }

    /// Clear all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of unit price times quantity over all items.
    pub fn total(&self) -> Money {
        // Every mutation keeps the total representable.
        self.try_total().unwrap_or(Money::new(i64::MAX))
    }

    /// Get total item count (sum of quantities).
    pub fn count(&self) -> i64 {
        self.try_count().unwrap_or(i64::MAX)
    }

    fn try_total(&self) -> Option<Money> {
        self.items.iter().try_fold(Money::zero(), |acc, item| {
            acc.try_add(&item.try_total()?)
        })
    }

    fn try_count(&self) -> Option<i64> {
        self.items
            .iter()
            .try_fold(0i64, |acc, item| acc.checked_add(item.quantity))
    }

    fn is_representable(&self) -> bool {
        self.try_total().is_some() && self.try_count().is_some()
    }

    /// Position of the item with `id`.
    pub fn position(&self, id: &ProductId) -> Option<usize> {
        self.items.iter().position(|i| &i.id == id)
    }

    /// Items in display order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Get an item by index.
    pub fn get(&self, index: usize) -> Option<&LineItem> {
        self.items.get(index)
    }

    /// Get an item by ID.
    pub fn get_by_id(&self, id: &ProductId) -> Option<&LineItem> {
        self.items.iter().find(|i| &i.id == id)
    }

    /// Number of distinct items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
