//! Product data attached to add-to-cart controls.

use cart_commerce::{CartError, Money, ProductId};
use serde::{Deserialize, Serialize};

/// Raw attributes carried by an add-to-cart control.
///
/// `price` stays text until [`ProductDataset::parse`] so that bad markup is
/// rejected at the add boundary instead of leaking into totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDataset {
    /// `data-id`.
    pub id: String,
    /// `data-name`.
    pub name: String,
    /// `data-price`, unparsed.
    pub price: String,
    /// Source of the product card image.
    pub image: String,
}

/// A validated product ready to be added to the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductInput {
    pub id: ProductId,
    pub name: String,
    pub unit_price: Money,
    pub image_url: String,
}

impl ProductDataset {
    /// Create a dataset from its parts.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: impl Into<String>,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price: price.into(),
            image: image.into(),
        }
    }

    /// Collect a dataset from element attributes (`data-id`, `data-name`,
    /// `data-price`) plus the card's image source.
    pub fn from_attributes<'a>(
        attributes: impl IntoIterator<Item = (&'a str, &'a str)>,
        image: impl Into<String>,
    ) -> Result<Self, CartError> {
        let mut id = None;
        let mut name = None;
        let mut price = None;
        for (key, value) in attributes {
            match key {
                "data-id" => id = Some(value.to_string()),
                "data-name" => name = Some(value.to_string()),
                "data-price" => price = Some(value.to_string()),
                _ => {}
            }
        }

        let missing = |attr: &str| CartError::InvalidInput(format!("missing {} attribute", attr));
        Ok(Self {
            id: id.ok_or_else(|| missing("data-id"))?,
            name: name.ok_or_else(|| missing("data-name"))?,
            price: price.ok_or_else(|| missing("data-price"))?,
            image: image.into(),
        })
    }

    /// Validate the dataset.
    pub fn parse(&self) -> Result<ProductInput, CartError> {
        Ok(ProductInput {
            id: ProductId::parse(self.id.clone())?,
            name: self.name.clone(),
            unit_price: Money::parse(&self.price)?,
            image_url: self.image.clone(),
        })
    }
}
