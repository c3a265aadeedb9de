//! Persisted shopping-cart state for the GRT storefront.
//!
//! This crate provides the cart core shared by every UI surface:
//!
//! - **Model**: [`LineItem`], keyed by product id plus size and color
//! - **Store**: [`CartStore`] with merge-on-add, remove, set-quantity, clear
//! - **Persistence**: [`CartPersistence`] with a key-value implementation
//! - **Totals**: item count, total price, order summary, checkout hand-off
//!
//! # Example
//!
//! ```rust,ignore
//! use grt_cart::prelude::*;
//! use grt_cache::{Cache, FileStore};
//!
//! let persistence = KvCartPersistence::new(Cache::new(FileStore::open(".grt")?));
//! let cart = CartStore::open(persistence).into_handle();
//!
//! cart.add_or_merge_line(LineItem::new(1, "Bulb", 249.0, 2))?;
//! cart.add_or_merge_line(LineItem::new(1, "Bulb", 249.0, 3))?;
//!
//! assert_eq!(cart.total_item_count(), 5);
//! assert_eq!(cart.total_price(), 1245.0);
//! ```

pub mod cart;
pub mod checkout;
pub mod error;
pub mod ids;
pub mod persistence;

pub use cart::{
    Applied, CartHandle, CartState, CartStore, CartTotals, LineItem, OrderSummary,
    PersistWarning, PricingRules,
};
pub use checkout::CheckoutHandoff;
pub use error::CartError;
pub use ids::{LineKey, ProductId};
pub use persistence::{CartPersistence, KvCartPersistence, DEFAULT_STORAGE_KEY};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::cart::{
        total_item_count, total_price, Applied, CartHandle, CartState, CartStore, CartTotals,
        LineItem, OrderSummary, PersistWarning, PricingRules,
    };
    pub use crate::checkout::CheckoutHandoff;
    pub use crate::error::CartError;
    pub use crate::ids::{LineKey, ProductId};
    pub use crate::persistence::{CartPersistence, KvCartPersistence, DEFAULT_STORAGE_KEY};
}
