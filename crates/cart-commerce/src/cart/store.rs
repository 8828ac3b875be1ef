//! Cart state owner: mutations, persistence and change notification.

use cart_observability::{LogBuilder, StructuredLogger};

use crate::cart::{Cart, CartView, LineItem, QuantityChange};
use crate::error::CartError;
use crate::ids::ProductId;
use crate::money::Money;

/// Persistent home of the cart.
pub trait CartStorage {
    /// Load the stored cart. Missing or unreadable data yields an empty cart.
    fn load(&self) -> Cart;

    /// Replace the stored cart.
    fn save(&self, cart: &Cart) -> Result<(), CartError>;
}

impl<S: CartStorage + ?Sized> CartStorage for &S {
    fn load(&self) -> Cart {
        (**self).load()
    }

    fn save(&self, cart: &Cart) -> Result<(), CartError> {
        (**self).save(cart)
    }
}

/// Receives the cart after every mutation.
pub trait CartListener {
    /// Called with the current cart once a mutation has been applied.
    fn cart_changed(&mut self, cart: &Cart);
}

impl<F: FnMut(&Cart)> CartListener for F {
    fn cart_changed(&mut self, cart: &Cart) {
        self(cart)
    }
}

/// Owns the cart, persists it after every mutation and notifies listeners.
///
/// All operations run synchronously to completion; the store is meant to
/// be driven from a single event loop.
pub struct CartStore<S> {
    cart: Cart,
    storage: S,
    listeners: Vec<Box<dyn CartListener>>,
    logger: StructuredLogger,
}

impl<S: CartStorage> CartStore<S> {
    /// Load the cart from `storage`.
    pub fn open(storage: S, logger: StructuredLogger) -> Self {
        let cart = storage.load();
        logger
            .debug_builder("cart loaded")
            .field_i64("items", cart.len() as i64)
            .field_i64("count", cart.count())
            .emit();
        Self {
            cart,
            storage,
            listeners: Vec::new(),
            logger,
        }
    }

    /// Register a listener called after every mutation.
    pub fn subscribe(&mut self, listener: impl CartListener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Call every listener with the current cart without mutating it.
    pub fn refresh(&mut self) {
        for listener in &mut self.listeners {
            listener.cart_changed(&self.cart);
        }
    }

    /// Add one unit of a product; see [`Cart::add_item`].
    pub fn add_item(
        &mut self,
        id: ProductId,
        name: impl Into<String>,
        unit_price: Money,
        image_url: impl Into<String>,
    ) -> Result<usize, CartError> {
        let index = self.cart.add_item(id, name, unit_price, image_url)?;
        if let Some(item) = self.cart.get(index) {
            self.logger
                .debug_builder("item added")
                .field("id", item.id.as_str())
                .field_i64("index", index as i64)
                .field_i64("quantity", item.quantity)
                .emit();
        }
        self.commit()?;
        Ok(index)
    }

    /// Change the quantity of the item at `index`; see [`Cart::update_quantity`].
    pub fn update_quantity(&mut self, index: usize, delta: i64) -> Result<QuantityChange, CartError> {
        let change = self.cart.update_quantity(index, delta)?;
        self.log_change(Locator::Index(index), delta, &change);
        self.commit()?;
        Ok(change)
    }

    /// Change the quantity of the item with `id`; see [`Cart::update_quantity_by_id`].
    pub fn update_quantity_by_id(
        &mut self,
        id: &ProductId,
        delta: i64,
    ) -> Result<QuantityChange, CartError> {
        let change = self.cart.update_quantity_by_id(id, delta)?;
        self.log_change(Locator::Id(id), delta, &change);
        self.commit()?;
        Ok(change)
    }

    /// Remove the item at `index`.
    pub fn remove_item(&mut self, index: usize) -> Result<LineItem, CartError> {
        let item = self.cart.remove_item(index)?;
        self.log_removed(Locator::Index(index), &item);
        self.commit()?;
        Ok(item)
    }

    /// Remove the item with `id`.
    pub fn remove_item_by_id(&mut self, id: &ProductId) -> Result<LineItem, CartError> {
        let item = self.cart.remove_item_by_id(id)?;
        self.log_removed(Locator::Id(id), &item);
        self.commit()?;
        Ok(item)
    }

    /// Empty the cart unconditionally.
    pub fn checkout(&mut self) -> Result<(), CartError> {
        let count = self.cart.count();
        self.cart.clear();
        self.logger
            .info_builder("cart checked out")
            .field_i64("count", count)
            .emit();
        self.commit()
    }

    /// Sum of unit price times quantity.
    pub fn total(&self) -> Money {
        self.cart.total()
    }

    /// Sum of quantities.
    pub fn count(&self) -> i64 {
        self.cart.count()
    }

    /// The current cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Items in display order.
    pub fn items(&self) -> &[LineItem] {
        self.cart.items()
    }

    /// Get an item by index.
    pub fn get(&self, index: usize) -> Option<&LineItem> {
        self.cart.get(index)
    }

    /// Get an item by ID.
    pub fn get_by_id(&self, id: &ProductId) -> Option<&LineItem> {
        self.cart.get_by_id(id)
    }

    /// Number of distinct items.
    pub fn len(&self) -> usize {
        self.cart.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Render model of the current cart.
    pub fn view(&self) -> CartView {
        CartView::from_cart(&self.cart)
    }

    /// The storage backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn log_change(&self, at: Locator<'_>, delta: i64, change: &QuantityChange) {
        match change {
            QuantityChange::Updated { quantity } => at
                .tag(self.logger.debug_builder("quantity updated"))
                .field_i64("delta", delta)
                .field_i64("quantity", *quantity)
                .emit(),
            QuantityChange::Removed(item) => at
                .tag(self.logger.debug_builder("item removed"))
                .field("id", item.id.as_str())
                .field_i64("delta", delta)
                .emit(),
        }
    }

    fn log_removed(&self, at: Locator<'_>, item: &LineItem) {
        at.tag(self.logger.debug_builder("item removed"))
            .field("id", item.id.as_str())
            .emit();
    }

    /// Persist, then notify. A failed save keeps the in-memory change and
    /// still notifies so the display matches the cart.
    fn commit(&mut self) -> Result<(), CartError> {
        let saved = self.storage.save(&self.cart);
        if let Err(e) = &saved {
            self.logger
                .error_builder("failed to persist cart")
                .field("error", e.to_string())
                .emit();
        }
        self.refresh();
        saved
    }
}

/// How an operation addressed its item, for log fields.
#[derive(Clone, Copy)]
enum Locator<'a> {
    Index(usize),
    Id(&'a ProductId),
}

impl Locator<'_> {
    fn tag<'b>(self, entry: LogBuilder<'b>) -> LogBuilder<'b> {
        match self {
            Locator::Index(index) => entry.field_i64("index", index as i64),
            Locator::Id(id) => entry.field("id", id.as_str()),
        }
    }
}
