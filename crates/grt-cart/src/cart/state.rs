//! The ordered line collection and its mutation algorithm.

use crate::cart::LineItem;
use crate::error::CartError;
use crate::ids::{LineKey, ProductId};
use serde::{Deserialize, Deserializer, Serialize};

/// Ordered cart contents.
///
/// Invariants: no two lines share a [`LineKey`], every line has
/// `quantity >= 1` and a finite non-negative price, and the quantities sum
/// to at most `i64::MAX`. Lines keep insertion
/// order. Serializes as a bare JSON array of lines; deserializing checks
/// the invariants and fails on a payload that breaks them.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(transparent)]
pub struct CartState {
    lines: Vec<LineItem>,
}

impl CartState {
    /// An empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a state from decoded lines, checking every invariant.
    pub fn from_lines(lines: Vec<LineItem>) -> Result<Self, CartError> {
        for (i, line) in lines.iter().enumerate() {
            line.validate()?;
            let key = line.key();
            if lines[..i].iter().any(|earlier| earlier.matches(&key)) {
                return Err(CartError::DuplicateLine(key.to_string()));
            }
        }
        lines
            .iter()
            .try_fold(0i64, |acc, line| acc.checked_add(line.quantity))
            .ok_or(CartError::Overflow)?;
        Ok(Self { lines })
    }

    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<LineItem> {
        self.lines
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LineItem> {
        self.lines.iter()
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of quantities over all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Find a line by exact key.
    pub fn get(&self, key: &LineKey) -> Option<&LineItem> {
        self.lines.iter().find(|l| l.matches(key))
    }

    /// Add `candidate`, merging into an existing line with the same key.
    ///
    /// On merge only the quantity changes; the existing line's name, price
    /// and image are kept. New keys are appended. Validation and overflow
    /// checks run before anything is written; the cart-wide quantity must
    /// stay within `i64`.
    pub fn add_or_merge(&mut self, candidate: LineItem) -> Result<(), CartError> {
        candidate.validate()?;
        self.total_quantity()
            .checked_add(candidate.quantity)
            .ok_or(CartError::Overflow)?;

        let key = candidate.key();
        match self.lines.iter_mut().find(|l| l.matches(&key)) {
            Some(existing) => existing.quantity += candidate.quantity,
            None => self.lines.push(candidate),
        }
        Ok(())
    }

    /// Remove the line with this exact key. Returns whether one was removed.
    pub fn remove(&mut self, key: &LineKey) -> bool {
        let len_before = self.lines.len();
        self.lines.retain(|l| !l.matches(key));
        self.lines.len() < len_before
    }

    /// Remove every variant line of a product. Returns how many were removed.
    pub fn remove_product(&mut self, id: &ProductId) -> usize {
        let len_before = self.lines.len();
        self.lines.retain(|l| &l.id != id);
        len_before - self.lines.len()
    }

    /// Set an absolute quantity; `quantity <= 0` removes the line.
    /// Returns whether a line matched.
    pub fn set_quantity(&mut self, key: &LineKey, quantity: i64) -> Result<bool, CartError> {
        if quantity <= 0 {
            return Ok(self.remove(key));
        }
        let total = self.total_quantity();
        let Some(line) = self.lines.iter_mut().find(|l| l.matches(key)) else {
            return Ok(false);
        };
        (total - line.quantity)
            .checked_add(quantity)
            .ok_or(CartError::Overflow)?;
        line.quantity = quantity;
        Ok(true)
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

impl<'de> Deserialize<'de> for CartState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let lines = Vec::<LineItem>::deserialize(deserializer)?;
        CartState::from_lines(lines).map_err(serde::de::Error::custom)
    }
}

impl<'a> IntoIterator for &'a CartState {
    type Item = &'a LineItem;
    type IntoIter = std::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}
