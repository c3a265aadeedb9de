//! Cart totals and order summary calculations.
//!
//! Everything here is derived from a [`CartState`] on every call; nothing
//! is cached, so totals cannot drift from the lines they describe.

use crate::cart::CartState;
use crate::error::CartError;
use serde::{Deserialize, Serialize};

/// Sum of quantities over all lines.
///
/// Exact: [`CartState`] refuses any mutation that would push this past
/// `i64::MAX`.
pub fn total_item_count(state: &CartState) -> i64 {
    state.total_quantity()
}

/// Sum of `price * quantity` over all lines. Unrounded.
pub fn total_price(state: &CartState) -> f64 {
    state.iter().map(|line| line.line_total()).sum()
}

/// Aggregate figures for a cart snapshot.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CartTotals {
    /// Sum of quantities.
    pub item_count: i64,
    /// Number of distinct lines.
    pub line_count: usize,
    /// Sum of line totals.
    pub total_price: f64,
}

impl CartTotals {
    /// Compute totals for `state`.
    pub fn of(state: &CartState) -> Self {
        Self {
            item_count: total_item_count(state),
            line_count: state.len(),
            total_price: total_price(state),
        }
    }
}

/// Shipping and tax rules applied on top of the cart subtotal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PricingRules {
    /// Subtotals strictly above this ship free.
    pub free_shipping_threshold: f64,
    /// Flat shipping fee below the threshold.
    pub shipping_fee: f64,
    /// Tax as a fraction of the subtotal, e.g. `0.18`.
    pub tax_rate: f64,
}

impl Default for PricingRules {
    fn default() -> Self {
        Self {
            free_shipping_threshold: 1000.0,
            shipping_fee: 150.0,
            tax_rate: 0.18,
        }
    }
}

impl PricingRules {
    /// Check every amount is finite and non-negative and the tax rate is a
    /// fraction.
    pub fn validate(&self) -> Result<(), CartError> {
        let amounts = [
            ("free_shipping_threshold", self.free_shipping_threshold),
            ("shipping_fee", self.shipping_fee),
            ("tax_rate", self.tax_rate),
        ];
        for (name, value) in amounts {
            if !value.is_finite() || value < 0.0 {
                return Err(CartError::InvalidPricingRules(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        if self.tax_rate > 1.0 {
            return Err(CartError::InvalidPricingRules(format!(
                "tax_rate must be at most 1.0, got {}",
                self.tax_rate
            )));
        }
        Ok(())
    }

    /// Shipping owed on `subtotal`. An empty cart ships nothing.
    pub fn shipping_for(&self, subtotal: f64, is_empty: bool) -> f64 {
        if is_empty || subtotal > self.free_shipping_threshold {
            0.0
        } else {
            self.shipping_fee
        }
    }
}

/// Order summary shown before checkout.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct OrderSummary {
    /// Sum of quantities.
    pub item_count: i64,
    /// Sum of line totals.
    pub subtotal: f64,
    /// Shipping charge.
    pub shipping: f64,
    /// Tax on the subtotal.
    pub tax: f64,
    /// `subtotal + shipping + tax`.
    pub total: f64,
}

impl OrderSummary {
    /// Summarize `state` under `rules`.
    pub fn compute(state: &CartState, rules: &PricingRules) -> Self {
        let subtotal = total_price(state);
        let shipping = rules.shipping_for(subtotal, state.is_empty());
        let tax = subtotal * rules.tax_rate;
        Self {
            item_count: total_item_count(state),
            subtotal,
            shipping,
            tax,
            total: subtotal + shipping + tax,
        }
    }

    /// Check if shipping was waived.
    pub fn ships_free(&self) -> bool {
        self.shipping == 0.0
    }
}
