//! # Cart Aggregate
//!
//! The in-memory cart: an ordered list of [`CartLine`] with pure mutations.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Mutations                                       │
//! │                                                                         │
//! │  Engine Call               Cart Change                                  │
//! │  ───────────               ───────────                                  │
//! │  add(product)         ───► existing name: quantity += 1                 │
//! │                            new name:      push line with quantity 1    │
//! │                                                                         │
//! │  remove_one(name)     ───► quantity > 1:  quantity -= 1                 │
//! │                            quantity == 1: line removed                  │
//! │                                                                         │
//! │  remove_line(name)    ───► line removed regardless of quantity          │
//! │                                                                         │
//! │  set_quantity(n, q)   ───► q <= 0: line removed, else quantity = q      │
//! │                                                                         │
//! │  clear()              ───► all lines removed                            │
//! │                                                                         │
//! │  State machine: Empty ⇄ HasItems (Empty is initial and re-enterable)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Insertion order is preserved; it affects display, never pricing.
//! Notifications and persistence are layered on by carrito-engine — this
//! type stays pure.

use chrono::{DateTime, Utc};

use crate::money::Money;
use crate::types::{CartLine, Product};

// =============================================================================
// Mutation Outcomes
// =============================================================================

/// Result of [`Cart::remove_one`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// No line with that name existed; nothing changed.
    NotFound,
    /// The quantity was decremented; carries the new quantity.
    Reduced(i64),
    /// The quantity was 1, so the line was removed entirely.
    Removed,
}

/// Result of [`Cart::set_quantity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOutcome {
    /// No line with that name existed; nothing changed.
    NotFound,
    /// The quantity was set to the given positive value.
    Set(i64),
    /// The requested quantity was <= 0, so the line was removed.
    Removed,
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - Lines are unique by `name` (adding an existing product increments it)
/// - Every line has `quantity >= 1`
/// - `raw_total()` equals the sum of `unit_price × quantity` over all lines
#[derive(Debug, Clone)]
pub struct Cart {
    lines: Vec<CartLine>,
    /// When the cart was created or last cleared. In-memory only.
    created_at: DateTime<Utc>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            lines: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Restores a cart from a persisted line list.
    ///
    /// Defensive about bad payloads: lines with non-positive quantities must
    /// not exist, so they are dropped on the way in.
    pub fn from_lines(lines: Vec<CartLine>) -> Self {
        Cart {
            lines: lines.into_iter().filter(|l| l.quantity >= 1).collect(),
            created_at: Utc::now(),
        }
    }

    /// Adds a product to the cart, aggregating by name.
    ///
    /// ## Behavior
    /// - Product already in cart: its quantity increases by 1
    /// - Otherwise: a new line with quantity 1 is appended
    ///
    /// ## Returns
    /// The resulting quantity for that product's line.
    pub fn add(&mut self, product: &Product) -> i64 {
        if let Some(line) = self.lines.iter_mut().find(|l| l.name == product.name) {
            line.quantity += 1;
            return line.quantity;
        }

        self.lines.push(CartLine::from_product(product));
        1
    }

    /// Removes one unit of a product.
    ///
    /// ## Behavior
    /// - Name absent: no-op
    /// - Quantity > 1: decrement by one
    /// - Quantity == 1: remove the line (quantity 0 must not exist)
    pub fn remove_one(&mut self, name: &str) -> RemoveOutcome {
        let Some(idx) = self.lines.iter().position(|l| l.name == name) else {
            return RemoveOutcome::NotFound;
        };

        if self.lines[idx].quantity > 1 {
            self.lines[idx].quantity -= 1;
            RemoveOutcome::Reduced(self.lines[idx].quantity)
        } else {
            self.lines.remove(idx);
            RemoveOutcome::Removed
        }
    }

    /// Removes a line entirely, regardless of quantity.
    ///
    /// Returns the removed line, or `None` if the name was absent.
    pub fn remove_line(&mut self, name: &str) -> Option<CartLine> {
        let idx = self.lines.iter().position(|l| l.name == name)?;
        Some(self.lines.remove(idx))
    }

    /// Sets a line's quantity to an absolute value.
    ///
    /// ## Behavior
    /// - Name absent: no-op
    /// - `quantity <= 0`: the line is removed
    /// - Otherwise: the quantity is set exactly (not a delta)
    pub fn set_quantity(&mut self, name: &str, quantity: i64) -> SetOutcome {
        let Some(idx) = self.lines.iter().position(|l| l.name == name) else {
            return SetOutcome::NotFound;
        };

        if quantity <= 0 {
            self.lines.remove(idx);
            SetOutcome::Removed
        } else {
            self.lines[idx].quantity = quantity;
            SetOutcome::Set(quantity)
        }
    }

    /// Clears all lines and starts a fresh session timestamp.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.created_at = Utc::now();
    }

    /// Current lines, in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Sum of all line quantities, for badge counts.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// The raw total: sum of `unit_price × quantity` over all lines,
    /// before discount, shipping, and tax.
    pub fn raw_total(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// When the cart was created or last cleared.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn shirt() -> Product {
        Product::new("Shirt", Money::from_pesos(15_000))
    }

    fn shoes() -> Product {
        Product::new("Shoes", Money::from_pesos(30_000))
    }

    #[test]
    fn test_add_aggregates_by_name() {
        let mut cart = Cart::new();

        assert_eq!(cart.add(&shirt()), 1);
        assert_eq!(cart.total_quantity(), 1);
        assert_eq!(cart.raw_total().pesos(), 15_000);

        // Adding the same product again must NOT create a second line
        assert_eq!(cart.add(&shirt()), 2);
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.total_quantity(), 2);
        assert_eq!(cart.raw_total().pesos(), 30_000);
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let mut cart = Cart::new();
        cart.add(&shoes());
        cart.add(&shirt());
        cart.add(&shoes());

        let names: Vec<_> = cart.lines().iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Shoes", "Shirt"]);
    }

    #[test]
    fn test_remove_one_is_symmetric_with_add() {
        let mut cart = Cart::new();
        cart.add(&shirt());

        assert_eq!(cart.remove_one("Shirt"), RemoveOutcome::Removed);
        assert!(cart.is_empty());
        assert_eq!(cart.raw_total(), Money::zero());
    }

    #[test]
    fn test_remove_one_decrements_above_one() {
        let mut cart = Cart::new();
        cart.add(&shirt());
        cart.add(&shirt());

        assert_eq!(cart.remove_one("Shirt"), RemoveOutcome::Reduced(1));
        assert_eq!(cart.total_quantity(), 1);
    }

    #[test]
    fn test_remove_one_missing_is_noop() {
        let mut cart = Cart::new();
        cart.add(&shirt());

        assert_eq!(cart.remove_one("Hat"), RemoveOutcome::NotFound);
        assert_eq!(cart.total_quantity(), 1);
    }

    #[test]
    fn test_remove_line_ignores_quantity() {
        let mut cart = Cart::new();
        cart.add(&shirt());
        cart.add(&shirt());
        cart.add(&shirt());

        let removed = cart.remove_line("Shirt").unwrap();
        assert_eq!(removed.quantity, 3);
        assert!(cart.is_empty());
        assert!(cart.remove_line("Shirt").is_none());
    }

    #[test]
    fn test_set_quantity_absolute() {
        let mut cart = Cart::new();
        cart.add(&shirt());

        assert_eq!(cart.set_quantity("Shirt", 5), SetOutcome::Set(5));
        assert_eq!(cart.total_quantity(), 5);
        assert_eq!(cart.raw_total().pesos(), 75_000);
    }

    #[test]
    fn test_set_quantity_zero_or_negative_removes() {
        for qty in [0, -1, -10] {
            let mut cart = Cart::new();
            cart.add(&shirt());

            assert_eq!(cart.set_quantity("Shirt", qty), SetOutcome::Removed);
            assert!(cart.is_empty());
        }
    }

    #[test]
    fn test_set_quantity_missing_is_noop() {
        let mut cart = Cart::new();
        assert_eq!(cart.set_quantity("Shirt", 3), SetOutcome::NotFound);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add(&shirt());
        cart.add(&shoes());

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.raw_total(), Money::zero());
        assert_eq!(cart.total_quantity(), 0);
    }

    #[test]
    fn test_total_consistency_after_every_mutation() {
        let mut cart = Cart::new();
        let check = |cart: &Cart| {
            let expected: i64 = cart
                .lines()
                .iter()
                .map(|l| l.unit_price.pesos() * l.quantity)
                .sum();
            assert_eq!(cart.raw_total().pesos(), expected);
        };

        cart.add(&shirt());
        check(&cart);
        cart.add(&shoes());
        check(&cart);
        cart.set_quantity("Shoes", 4);
        check(&cart);
        cart.remove_one("Shirt");
        check(&cart);
        cart.clear();
        check(&cart);
        assert_eq!(cart.raw_total().pesos(), 0);
    }

    #[test]
    fn test_from_lines_drops_invalid_quantities() {
        let mut bad = CartLine::from_product(&shirt());
        bad.quantity = 0;
        let good = CartLine::from_product(&shoes());

        let cart = Cart::from_lines(vec![bad, good]);
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.lines()[0].name, "Shoes");
    }
}
