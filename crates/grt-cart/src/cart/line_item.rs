//! Line item type.

use crate::error::CartError;
use crate::ids::{LineKey, ProductId};
use serde::{Deserialize, Serialize};

/// One product line in the cart.
///
/// Field order is the persisted field order; keep it stable so equal carts
/// serialize to equal bytes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    /// Product identity.
    pub id: ProductId,
    /// Display name. Not part of identity.
    pub name: String,
    /// Unit price, currency-agnostic.
    pub price: f64,
    /// Display image reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Quantity, at least 1 while in a cart.
    pub quantity: i64,
    /// Size variant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    /// Color variant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl LineItem {
    /// Create a line with no image and no variant.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: f64, quantity: i64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            image: None,
            quantity,
            size: None,
            color: None,
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// The merge identity of this line.
    pub fn key(&self) -> LineKey {
        LineKey {
            id: self.id.clone(),
            size: self.size.clone(),
            color: self.color.clone(),
        }
    }

    /// Check whether this line has the given identity.
    pub fn matches(&self, key: &LineKey) -> bool {
        self.id == key.id && self.size == key.size && self.color == key.color
    }

    /// Reject lines the cart may not hold: quantity below 1, or a price
    /// that is negative, NaN or infinite.
    pub fn validate(&self) -> Result<(), CartError> {
        if self.quantity <= 0 {
            return Err(CartError::InvalidQuantity(self.quantity));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(CartError::InvalidPrice(self.price));
        }
        Ok(())
    }

    /// `price * quantity`.
    pub fn line_total(&self) -> f64 {
        self.price * self.quantity as f64
    }
}
