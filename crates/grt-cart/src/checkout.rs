//! Hand-off of cart contents to an external checkout flow.
//!
//! The cart never calls into checkout. It produces a frozen
//! [`CheckoutHandoff`] that the flow takes by value.

use serde::{Deserialize, Serialize};

use crate::cart::{CartState, CartTotals, LineItem, OrderSummary, PricingRules};
use crate::error::CartError;

/// Immutable cart figures for the payment step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckoutHandoff {
    /// Lines in cart order.
    pub lines: Vec<LineItem>,
    /// Item and price totals.
    pub totals: CartTotals,
    /// Subtotal, shipping, tax and grand total.
    pub summary: OrderSummary,
}

impl CheckoutHandoff {
    /// Freeze `state` for checkout. An empty cart cannot be checked out.
    pub fn from_state(state: &CartState, rules: &PricingRules) -> Result<Self, CartError> {
        if state.is_empty() {
            return Err(CartError::EmptyCart);
        }
        Ok(Self {
            lines: state.lines().to_vec(),
            totals: CartTotals::of(state),
            summary: OrderSummary::compute(state, rules),
        })
    }

    /// Amount the payment step should charge.
    pub fn amount_due(&self) -> f64 {
        self.summary.total
    }
}
