use serde::{Deserialize, Serialize};

use super::item::Item;

/// One line of the order cart: a snapshot of the item at the moment it
/// was first added, plus a quantity.
///
/// Only `id`, `name` and `price` are copied out of the catalog item —
/// editing or deleting the item afterwards does not reach into a cart
/// that already holds it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Id of the catalog item this line was created from
    pub item_id: String,

    /// Item name at add time
    pub name: String,

    /// Unit price at add time
    pub price: f64,

    /// Number of units (always ≥ 1; a line at 0 is removed instead)
    pub qty: u32,
}

impl CartLine {
    /// Line subtotal: unit price × quantity.
    #[must_use]
    pub fn subtotal(&self) -> f64 {
        self.price * f64::from(self.qty)
    }
}

/// The in-progress order for one selling session.
///
/// Lines keep their insertion order; there is at most one line per
/// distinct item id. The cart is never persisted — it is cleared by a
/// successful checkout or an explicit reset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of `item`. An existing line for the same item id is
    /// incremented; otherwise a new line is appended at the end.
    pub fn add(&mut self, item: &Item) {
        match self.lines.iter_mut().find(|l| l.item_id == item.id) {
            Some(line) => line.qty += 1,
            None => self.lines.push(CartLine {
                item_id: item.id.clone(),
                name: item.name.clone(),
                price: item.price,
                qty: 1,
            }),
        }
    }

    /// Remove one unit of the item with `item_id`. A line at quantity 1
    /// is deleted entirely; an absent id is a no-op.
    pub fn remove(&mut self, item_id: &str) {
        let Some(idx) = self.lines.iter().position(|l| l.item_id == item_id) else {
            return;
        };
        if self.lines[idx].qty > 1 {
            self.lines[idx].qty -= 1;
        } else {
            self.lines.remove(idx);
        }
    }

    /// Sum of all line subtotals. 0 for an empty cart.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    /// Current lines, in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of distinct lines (not units).
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Quantity currently carried for an item id (0 if absent).
    #[must_use]
    pub fn quantity_of(&self, item_id: &str) -> u32 {
        self.lines
            .iter()
            .find(|l| l.item_id == item_id)
            .map_or(0, |l| l.qty)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Drop every line, returning the cart to its empty state.
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}
