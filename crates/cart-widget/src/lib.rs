//! Storefront page glue for the shopping cart widget.
//!
//! The page dispatches [`UiEvent`]s (add, `+`, `-`, remove, checkout) to a
//! [`CartWidget`], which drives the [`CartStore`](cart_commerce::cart::CartStore),
//! redraws a [`RenderTarget`] after every change, raises the checkout
//! confirmation through a [`Notifier`] and runs the transient "Added!"
//! acknowledgment on add buttons.
//!
//! # Example
//!
//! ```rust,ignore
//! use cart_widget::prelude::*;
//! use std::time::Instant;
//!
//! let config = CartConfig::load("cart.toml")?;
//! let renderer = HtmlRenderer::new(config.messages.empty_cart.clone());
//! let mut widget = ConfiguredWidget::from_config(&config, renderer, |msg: &str| eprintln!("{msg}"))?;
//!
//! widget.handle(
//!     UiEvent::Add {
//!         button: ButtonId::new("add-p1"),
//!         label: "Add to Cart".to_string(),
//!         dataset: ProductDataset::new("p1", "Shirt", "50000", "/img/shirt.jpg"),
//!     },
//!     Instant::now(),
//! )?;
//! ```

mod config;
mod dataset;
mod feedback;
mod render;
mod widget;

pub use config::{CartConfig, FeedbackConfig, LoggingConfig, MessagesConfig, StorageConfig};
pub use dataset::{ProductDataset, ProductInput};
pub use feedback::{AddFeedback, ButtonId, ButtonState};
pub use render::{render_items, HtmlRenderer, Notifier, RenderTarget};
pub use widget::{CartWidget, ConfiguredWidget, UiEvent};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        ButtonId, ButtonState, CartConfig, CartWidget, ConfiguredWidget, HtmlRenderer, Notifier,
        ProductDataset, RenderTarget, UiEvent,
    };
}
