//! Shopping cart module.
//!
//! Contains the line item model, the ordered cart state, the shared store
//! and totals/summary calculations.

mod line_item;
mod pricing;
mod state;
mod store;

pub use line_item::LineItem;
pub use pricing::{total_item_count, total_price, CartTotals, OrderSummary, PricingRules};
pub use state::CartState;
pub use store::{Applied, CartHandle, CartStore, PersistWarning};
