//! The shared cart store.
//!
//! [`CartStore`] owns the live [`CartState`]. Every mutation runs as one
//! critical section: validate, compute the next state on a copy, persist,
//! swap it in and publish it to subscribers. Callers only ever get clones.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use grt_cache::{Cache, MemoryStore};
use thiserror::Error;
use tokio::sync::watch;

use crate::cart::{CartState, CartTotals, LineItem, OrderSummary, PricingRules};
use crate::checkout::CheckoutHandoff;
use crate::error::CartError;
use crate::ids::{LineKey, ProductId};
use crate::persistence::{CartPersistence, KvCartPersistence};

/// Shared handle given to every consumer of the cart.
pub type CartHandle = Arc<CartStore>;

/// A mutation was applied in memory but could not be saved.
///
/// The in-memory cart stays authoritative for the rest of the session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cart change not saved: {message}")]
pub struct PersistWarning {
    pub message: String,
}

/// Result of an applied mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct Applied {
    /// Cart contents after the mutation.
    pub state: CartState,
    /// Set when the new contents could not be persisted.
    pub warning: Option<PersistWarning>,
}

impl Applied {
    /// Check if the new state reached storage.
    pub fn is_durable(&self) -> bool {
        self.warning.is_none()
    }

    pub fn into_state(self) -> CartState {
        self.state
    }
}

/// The single authority allowed to change the cart.
pub struct CartStore {
    state: Mutex<CartState>,
    persistence: Box<dyn CartPersistence>,
    rules: PricingRules,
    updates: watch::Sender<CartState>,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("state", &*self.lock())
            .field("rules", &self.rules)
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// Open a store, hydrating it from `persistence`.
    ///
    /// This is the only place `load` is called.
    pub fn open(persistence: impl CartPersistence + 'static) -> Self {
        let initial = persistence.load();
        tracing::info!(
            lines = initial.len(),
            items = crate::cart::total_item_count(&initial),
            "cart store opened"
        );
        let (updates, _) = watch::channel(initial.clone());
        Self {
            state: Mutex::new(initial),
            persistence: Box::new(persistence),
            rules: PricingRules::default(),
            updates,
        }
    }

    /// A store backed by an in-process [`MemoryStore`].
    pub fn in_memory() -> Self {
        Self::open(KvCartPersistence::new(Cache::new(MemoryStore::new())))
    }

    /// Replace the shipping/tax rules used by [`summary`](Self::summary).
    pub fn with_pricing(mut self, rules: PricingRules) -> Result<Self, CartError> {
        rules.validate()?;
        self.rules = rules;
        Ok(self)
    }

    /// Wrap in a shareable handle.
    pub fn into_handle(self) -> CartHandle {
        Arc::new(self)
    }

    pub fn pricing(&self) -> &PricingRules {
        &self.rules
    }

    /// Add a line, merging quantities into an existing line with the same
    /// product and variant.
    pub fn add_or_merge_line(&self, candidate: LineItem) -> Result<Applied, CartError> {
        let key = candidate.key();
        let quantity = candidate.quantity;
        let applied = self.apply("add", |state| state.add_or_merge(candidate));
        match &applied {
            Ok(_) => tracing::debug!(line = %key, quantity, "added to cart"),
            Err(e) => tracing::debug!(line = %key, error = %e, "rejected cart line"),
        }
        applied
    }

    /// Alias of [`add_or_merge_line`](Self::add_or_merge_line).
    pub fn add_item(&self, candidate: LineItem) -> Result<Applied, CartError> {
        self.add_or_merge_line(candidate)
    }

    /// Remove the line with exactly this key. Absent keys are a no-op.
    pub fn remove_line(&self, key: impl Into<LineKey>) -> Applied {
        let key = key.into();
        self.apply_infallible("remove", |state| {
            if state.remove(&key) {
                tracing::debug!(line = %key, "removed from cart");
            }
        })
    }

    /// Remove every variant of a product.
    pub fn remove_product(&self, id: impl Into<ProductId>) -> Applied {
        let id = id.into();
        self.apply_infallible("remove_product", |state| {
            let removed = state.remove_product(&id);
            if removed > 0 {
                tracing::debug!(product = %id, removed, "removed product from cart");
            }
        })
    }

    /// Set the quantity of the line with exactly this key.
    ///
    /// `quantity <= 0` removes the line. Absent keys are a no-op. Fails
    /// with [`CartError::Overflow`] if the cart total would exceed `i64`.
    pub fn set_quantity(
        &self,
        key: impl Into<LineKey>,
        quantity: i64,
    ) -> Result<Applied, CartError> {
        let key = key.into();
        self.apply("set_quantity", |state| {
            if state.set_quantity(&key, quantity)? {
                tracing::debug!(line = %key, quantity, "set cart quantity");
            }
            Ok(())
        })
    }

    /// Empty the cart.
    pub fn clear(&self) -> Applied {
        self.apply_infallible("clear", |state| state.clear())
    }

    /// Copy of the current contents. Does not touch storage.
    pub fn snapshot(&self) -> CartState {
        self.lock().clone()
    }

    pub fn totals(&self) -> CartTotals {
        CartTotals::of(&self.lock())
    }

    pub fn total_item_count(&self) -> i64 {
        crate::cart::total_item_count(&self.lock())
    }

    pub fn total_price(&self) -> f64 {
        crate::cart::total_price(&self.lock())
    }

    /// Order summary under the store's pricing rules.
    pub fn summary(&self) -> OrderSummary {
        OrderSummary::compute(&self.lock(), &self.rules)
    }

    /// Freeze the current cart for an external checkout flow.
    pub fn checkout(&self) -> Result<CheckoutHandoff, CartError> {
        CheckoutHandoff::from_state(&self.lock(), &self.rules)
    }

    /// Receive every state change after this call.
    ///
    /// The receiver starts at the current state; `has_changed` turns true
    /// when a mutation alters the cart. No-op mutations are not published.
    pub fn subscribe(&self) -> watch::Receiver<CartState> {
        self.updates.subscribe()
    }

    fn apply_infallible<F>(&self, op: &'static str, f: F) -> Applied
    where
        F: FnOnce(&mut CartState),
    {
        let mut guard = self.lock();
        let mut next = guard.clone();
        f(&mut next);
        self.commit(op, &mut guard, next)
    }

    fn apply<F>(&self, op: &'static str, f: F) -> Result<Applied, CartError>
    where
        F: FnOnce(&mut CartState) -> Result<(), CartError>,
    {
        let mut guard = self.lock();
        let mut next = guard.clone();
        f(&mut next)?;
        Ok(self.commit(op, &mut guard, next))
    }

    fn commit(
        &self,
        op: &'static str,
        current: &mut MutexGuard<'_, CartState>,
        next: CartState,
    ) -> Applied {
        let warning = match self.persistence.save(&next) {
            Ok(()) => None,
            Err(e) => {
                tracing::warn!(operation = op, error = %e, "cart saved in memory only");
                Some(PersistWarning {
                    message: e.to_string(),
                })
            }
        };

        **current = next.clone();
        self.updates.send_if_modified(|published| {
            if *published == next {
                false
            } else {
                *published = next.clone();
                true
            }
        });

        Applied {
            state: next,
            warning,
        }
    }

    fn lock(&self) -> MutexGuard<'_, CartState> {
        // Mutations are computed on a copy and swapped in whole, so a
        // poisoned lock still guards a valid cart.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
