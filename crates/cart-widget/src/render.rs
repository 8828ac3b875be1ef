//! Render targets for the cart region.

use std::collections::BTreeMap;

use cart_commerce::cart::{CartRow, CartView};

use crate::feedback::{ButtonId, ButtonState};

/// A display surface the widget repopulates after every mutation.
pub trait RenderTarget {
    /// Redraw the cart region.
    fn render(&mut self, view: &CartView);

    /// Change the label and enabled state of a control.
    fn set_button(&mut self, button: &ButtonId, state: &ButtonState);
}

/// User-visible, blocking confirmation (an alert dialog on the page).
pub trait Notifier {
    fn notify(&mut self, message: &str);
}

impl<F: FnMut(&str)> Notifier for F {
    fn notify(&mut self, message: &str) {
        self(message)
    }
}

/// Renders the cart region as HTML fragments.
///
/// Mirrors the page markup: the items container, the total amount and the
/// header count badge are kept as separate fragments, the way the page
/// fills three distinct elements.
#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    empty_message: String,
    items_html: String,
    total_text: String,
    count_text: String,
    buttons: BTreeMap<ButtonId, ButtonState>,
    renders: usize,
}

impl HtmlRenderer {
    /// Create a renderer showing `empty_message` for an empty cart.
    pub fn new(empty_message: impl Into<String>) -> Self {
        Self {
            empty_message: empty_message.into(),
            items_html: String::new(),
            total_text: String::new(),
            count_text: String::new(),
            buttons: BTreeMap::new(),
            renders: 0,
        }
    }

    /// Contents of the items container.
    pub fn items_html(&self) -> &str {
        &self.items_html
    }

    /// Text of the total amount element.
    pub fn total_text(&self) -> &str {
        &self.total_text
    }

    /// Text of the count badge.
    pub fn count_text(&self) -> &str {
        &self.count_text
    }

    /// Last state set for a control.
    pub fn button(&self, button: &ButtonId) -> Option<&ButtonState> {
        self.buttons.get(button)
    }

    /// How many times the region was redrawn.
    pub fn render_count(&self) -> usize {
        self.renders
    }

    /// The header count badge.
    pub fn count_badge_html(&self) -> String {
        format!(r#"<span class="cart-count">{}</span>"#, self.count_text)
    }

    /// The whole cart section, for server-side rendering.
    pub fn section_html(&self) -> String {
        format!(
            r#"<section class="cart" data-section="cart">
    <div id="cart-items">
        {}
    </div>
    <div class="cart-total">
        <span>Total</span>
        <span id="cart-total-amount">{}</span>
    </div>
    <button class="checkout-btn">Checkout</button>
</section>"#,
            self.items_html, self.total_text
        )
    }
}

impl RenderTarget for HtmlRenderer {
    fn render(&mut self, view: &CartView) {
        self.items_html = render_items(view, &self.empty_message);
        self.total_text = view.summary.total_display.clone();
        self.count_text = view.summary.count.to_string();
        self.renders += 1;
    }

    fn set_button(&mut self, button: &ButtonId, state: &ButtonState) {
        self.buttons.insert(button.clone(), state.clone());
    }
}

/// Render the items container: one row per item, or the empty placeholder.
pub fn render_items(view: &CartView, empty_message: &str) -> String {
    if view.is_empty() {
        return format!(
            r#"<p class="empty-cart-message">{}</p>"#,
            html_escape(empty_message)
        );
    }

    view.rows.iter().map(render_row).collect()
}

fn render_row(row: &CartRow) -> String {
    let id = html_escape(row.id.as_str());
    format!(
        r#"<div class="cart-item" data-product-id="{id}">
    <div class="cart-item-image">
        <img src="{src}" alt="{alt}">
    </div>
    <div class="cart-item-details">
        <h4 class="cart-item-name">{name}</h4>
        <p class="cart-item-price">{price}</p>
        <div class="quantity-controls">
            <button class="minus-btn" data-index="{index}" data-product-id="{id}">-</button>
            <input type="number" class="quantity-input" value="{quantity}" readonly>
            <button class="plus-btn" data-index="{index}" data-product-id="{id}">+</button>
        </div>
    </div>
    <button class="remove-item-btn" data-index="{index}" data-product-id="{id}">Remove</button>
</div>"#,
        id = id,
        src = html_escape(&row.image_url),
        alt = html_escape(&row.image_alt),
        name = html_escape(&row.name),
        price = row.price_display,
        index = row.index,
        quantity = row.quantity,
    )
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
