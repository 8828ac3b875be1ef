//! Event controller wiring the cart store to the page.

use std::cell::{Ref, RefCell};
use std::rc::Rc;
use std::time::Instant;

use cart_cache::KeyValueStore;
use cart_commerce::cart::{Cart, CartStorage, CartStore, CartView, KvCartStorage};
use cart_commerce::{CartError, ProductId};
use cart_observability::StructuredLogger;

use crate::config::CartConfig;
use crate::dataset::ProductDataset;
use crate::feedback::{AddFeedback, ButtonId};
use crate::render::{Notifier, RenderTarget};

/// A discrete user interaction on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// An add-to-cart control was clicked.
    Add {
        button: ButtonId,
        label: String,
        dataset: ProductDataset,
    },
    /// `+` on the row rendered at `index`.
    Increment { index: usize },
    /// `-` on the row rendered at `index`.
    Decrement { index: usize },
    /// Remove on the row rendered at `index`.
    Remove { index: usize },
    /// `+` on the row for `id`.
    IncrementId { id: ProductId },
    /// `-` on the row for `id`.
    DecrementId { id: ProductId },
    /// Remove on the row for `id`.
    RemoveId { id: ProductId },
    /// The checkout control was clicked.
    Checkout,
}

impl UiEvent {
    fn name(&self) -> &'static str {
        match self {
            UiEvent::Add { .. } => "add",
            UiEvent::Increment { .. } | UiEvent::IncrementId { .. } => "increment",
            UiEvent::Decrement { .. } | UiEvent::DecrementId { .. } => "decrement",
            UiEvent::Remove { .. } | UiEvent::RemoveId { .. } => "remove",
            UiEvent::Checkout => "checkout",
        }
    }
}

/// Widget persisting through the store named in the configuration.
pub type ConfiguredWidget<R, N> = CartWidget<KvCartStorage<Box<dyn KeyValueStore>>, R, N>;

/// The cart widget of a storefront page.
///
/// Owns the [`CartStore`]; the render target is redrawn through a store
/// listener after every mutation.
pub struct CartWidget<S, R, N> {
    store: CartStore<S>,
    target: Rc<RefCell<R>>,
    notifier: N,
    feedback: AddFeedback,
    checkout_message: String,
    logger: StructuredLogger,
}

impl<S, R, N> CartWidget<S, R, N>
where
    S: CartStorage,
    R: RenderTarget + 'static,
    N: Notifier,
{
    /// Load the cart, subscribe the render target and draw it once.
    pub fn new(
        storage: S,
        target: R,
        notifier: N,
        config: &CartConfig,
        logger: StructuredLogger,
    ) -> Self {
        let mut store = CartStore::open(storage, logger.for_component("cart-store"));
        let target = Rc::new(RefCell::new(target));

        let listener_target = Rc::clone(&target);
        store.subscribe(move |cart: &Cart| {
            listener_target
                .borrow_mut()
                .render(&CartView::from_cart(cart));
        });
        store.refresh();

        Self {
            store,
            target,
            notifier,
            feedback: AddFeedback::new(config.feedback.duration(), config.feedback.added_label.clone()),
            checkout_message: config.messages.checkout.clone(),
            logger,
        }
    }

    /// Handle one event to completion.
    ///
    /// Due acknowledgments are reverted first, so an add from a button is
    /// accepted again once its acknowledgment has elapsed.
    ///
    /// Failures are local to the event: they are logged and returned, and
    /// the cart is left as it was unless a save failed after the change.
    pub fn handle(&mut self, event: UiEvent, now: Instant) -> Result<(), CartError> {
        self.tick(now);
        let name = event.name();
        let result = self.dispatch(event, now);
        if let Err(e) = &result {
            self.logger
                .warn_builder("cart event rejected")
                .field("event", name)
                .field("kind", e.kind())
                .field("error", e.to_string())
                .emit();
        }
        result
    }

    fn dispatch(&mut self, event: UiEvent, now: Instant) -> Result<(), CartError> {
        match event {
            UiEvent::Add {
                button,
                label,
                dataset,
            } => {
                // The button is disabled while it shows the acknowledgment.
                if self.feedback.is_active(&button) {
                    self.logger
                        .debug_builder("add ignored, button disabled")
                        .field("button", button.as_str())
                        .emit();
                    return Ok(());
                }
                let input = dataset.parse()?;
                let result = self.store.add_item(
                    input.id,
                    input.name,
                    input.unit_price,
                    input.image_url,
                );
                // The item is in the cart even when persisting failed.
                if matches!(result, Ok(_) | Err(CartError::Storage(_))) {
                    let state = self.feedback.start(button.clone(), &label, now);
                    self.target.borrow_mut().set_button(&button, &state);
                }
                result.map(|_| ())
            }
            UiEvent::Increment { index } => self.store.update_quantity(index, 1).map(|_| ()),
            UiEvent::Decrement { index } => self.store.update_quantity(index, -1).map(|_| ()),
            UiEvent::Remove { index } => self.store.remove_item(index).map(|_| ()),
            UiEvent::IncrementId { id } => self.store.update_quantity_by_id(&id, 1).map(|_| ()),
            UiEvent::DecrementId { id } => self.store.update_quantity_by_id(&id, -1).map(|_| ()),
            UiEvent::RemoveId { id } => self.store.remove_item_by_id(&id).map(|_| ()),
            UiEvent::Checkout => {
                self.notifier.notify(&self.checkout_message);
                self.store.checkout()
            }
        }
    }

    /// Revert acknowledgments that are due at `now`.
    pub fn tick(&mut self, now: Instant) {
        let mut target = self.target.borrow_mut();
        for (button, state) in self.feedback.expire(now) {
            target.set_button(&button, &state);
        }
    }

    /// When the next [`tick`](Self::tick) has something to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.feedback.next_deadline()
    }

    /// The cart store.
    pub fn store(&self) -> &CartStore<S> {
        &self.store
    }

    /// The render target.
    pub fn target(&self) -> Ref<'_, R> {
        self.target.borrow()
    }

    /// The notifier.
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Add-to-cart acknowledgment state.
    pub fn feedback(&self) -> &AddFeedback {
        &self.feedback
    }
}

impl<R, N> ConfiguredWidget<R, N>
where
    R: RenderTarget + 'static,
    N: Notifier,
{
    /// Build a widget from configuration: logger, store backend and key.
    pub fn from_config(config: &CartConfig, target: R, notifier: N) -> anyhow::Result<Self> {
        let logger = config.logger();
        let store = config.open_store()?;
        let storage = KvCartStorage::with_key(
            store,
            config.storage.key.clone(),
            logger.for_component("cart-storage"),
        );
        Ok(Self::new(storage, target, notifier, config, logger))
    }
}
