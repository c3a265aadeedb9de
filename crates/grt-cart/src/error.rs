//! Cart error types.

use thiserror::Error;

/// Errors that can occur in cart operations.
///
/// Every variant is raised before the cart is touched; a returned error
/// means the state is exactly what it was before the call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CartError {
    /// Quantity on add was zero or negative.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Unit price was negative or not a finite number.
    #[error("Invalid price: {0}")]
    InvalidPrice(f64),

    /// Two lines share the same product and variant.
    #[error("Duplicate cart line: {0}")]
    DuplicateLine(String),

    /// Arithmetic overflow while accumulating a quantity.
    #[error("Arithmetic overflow in quantity calculation")]
    Overflow,

    /// Checkout requested for an empty cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Order summary rules are out of range.
    #[error("Invalid pricing rules: {0}")]
    InvalidPricingRules(String),
}

impl CartError {
    /// Whether the caller supplied malformed input.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            CartError::InvalidQuantity(_)
                | CartError::InvalidPrice(_)
                | CartError::DuplicateLine(_)
                | CartError::Overflow
        )
    }
}
