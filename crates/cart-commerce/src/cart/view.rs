//! Render model of the cart.

use crate::cart::Cart;
use crate::ids::ProductId;
use crate::money::Money;
use serde::Serialize;

/// One displayed cart row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartRow {
    /// Position in the cart at render time.
    pub index: usize,
    /// Stable product id.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Image source.
    pub image_url: String,
    /// Image alt text.
    pub image_alt: String,
    /// Formatted unit price.
    pub price_display: String,
    /// Quantity.
    pub quantity: i64,
    /// Formatted unit price times quantity.
    pub line_total_display: String,
}

/// Totals shown under the rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartSummary {
    /// Formatted cart total.
    pub total_display: String,
    /// Sum of quantities.
    pub count: i64,
}

/// Everything a render target needs to display the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartView {
    /// One row per item in display order; empty for an empty cart.
    pub rows: Vec<CartRow>,
    /// Total and count.
    pub summary: CartSummary,
}

impl CartView {
    /// Build the view of `cart`.
    pub fn from_cart(cart: &Cart) -> Self {
        let rows = cart
            .items()
            .iter()
            .enumerate()
            .map(|(index, item)| CartRow {
                index,
                id: item.id.clone(),
                name: item.name.clone(),
                image_url: item.image_url.clone(),
                image_alt: item.name.clone(),
                price_display: item.unit_price.display(),
                quantity: item.quantity,
                line_total_display: item
                    .try_total()
                    .unwrap_or(Money::new(i64::MAX))
                    .display(),
            })
            .collect();

        Self {
            rows,
            summary: CartSummary {
                total_display: cart.total().display(),
                count: cart.count(),
            },
        }
    }

    /// Whether the empty placeholder should be shown.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_view() {
        let view = CartView::from_cart(&Cart::new());
        assert!(view.is_empty());
        assert_eq!(view.summary.total_display, "Rp 0");
        assert_eq!(view.summary.count, 0);
    }

    #[test]
    fn test_rows() {
        let mut cart = Cart::new();
        cart.add_item(ProductId::new("p1"), "Shirt", Money::new(50000), "shirt.jpg")
            .unwrap();
        cart.add_item(ProductId::new("p2"), "Batik", Money::new(1250000), "batik.jpg")
            .unwrap();
        cart.add_item(ProductId::new("p1"), "Shirt", Money::new(50000), "shirt.jpg")
            .unwrap();

        let view = CartView::from_cart(&cart);
        assert_eq!(view.rows.len(), 2);

        let shirt = &view.rows[0];
        assert_eq!(shirt.index, 0);
        assert_eq!(shirt.image_alt, "Shirt");
        assert_eq!(shirt.price_display, "Rp 50.000");
        assert_eq!(shirt.quantity, 2);
        assert_eq!(shirt.line_total_display, "Rp 100.000");

        assert_eq!(view.rows[1].index, 1);
        assert_eq!(view.rows[1].price_display, "Rp 1.250.000");
        assert_eq!(view.summary.total_display, "Rp 1.350.000");
        assert_eq!(view.summary.count, 3);
    }
}
