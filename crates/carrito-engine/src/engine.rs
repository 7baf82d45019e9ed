//! # Cart Engine
//!
//! Owns the in-memory cart and the discount session; every mutation passes
//! through here and is followed by a best-effort persistence round-trip.
//!
//! ## Concurrency
//! Callers run on one logical event loop, so there is no internal queuing:
//! a `Mutex` serializes the short in-memory step, the lock is dropped before
//! any `await`, and the store only ever receives full-list snapshots
//! (last-writer-wins). Reads during a pending write observe the latest
//! in-memory value.

use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

use carrito_core::{pricing, Cart, CartLine, CoreResult, Money, PricingQuote, Product};
use carrito_core::{RemoveOutcome, SetOutcome};
use carrito_store::Storage;

use crate::notify::{self, Notifier};

// =============================================================================
// Discount State
// =============================================================================

/// Session-scoped discount state. In-memory only: never persisted, reset on
/// engine restart and on checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscountState {
    /// Whether a valid promotional code is currently active.
    pub applied: bool,
    /// The canonical form of the active code. Empty when none.
    pub code: String,
}

// =============================================================================
// Cart Engine
// =============================================================================

/// The cart engine.
///
/// ## Ownership
/// Constructed once by the composition root and shared by reference. The
/// engine is the only writer of the cart key in the store.
pub struct CartEngine {
    cart: Mutex<Cart>,
    discount: Mutex<DiscountState>,
    storage: Storage,
    notifier: Arc<dyn Notifier>,
}

impl CartEngine {
    /// Creates an engine with an empty cart, skipping the store.
    pub fn new(storage: Storage, notifier: Arc<dyn Notifier>) -> Self {
        CartEngine {
            cart: Mutex::new(Cart::new()),
            discount: Mutex::new(DiscountState::default()),
            storage,
            notifier,
        }
    }

    /// Creates an engine restored from the persisted cart.
    ///
    /// ## Failure Semantics
    /// Never fails: a read error or absent key yields an empty cart, with
    /// the failure logged. Cart availability must not depend on store health.
    pub async fn restore(storage: Storage, notifier: Arc<dyn Notifier>) -> Self {
        let cart = match storage.load_cart().await {
            Ok(lines) => {
                debug!(count = lines.len(), "restored cart from store");
                Cart::from_lines(lines)
            }
            Err(e) => {
                warn!(error = %e, "failed to load cart from store, starting empty");
                Cart::new()
            }
        };

        CartEngine {
            cart: Mutex::new(cart),
            discount: Mutex::new(DiscountState::default()),
            storage,
            notifier,
        }
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    /// Current lines, in insertion order. No side effects.
    pub fn lines(&self) -> Vec<CartLine> {
        self.lock_cart().lines().to_vec()
    }

    /// Sum of all line quantities, for badge counts.
    pub fn total_quantity(&self) -> i64 {
        self.lock_cart().total_quantity()
    }

    /// The raw total: Σ unit_price × quantity, before discount/shipping/tax.
    pub fn raw_total(&self) -> Money {
        self.lock_cart().raw_total()
    }

    /// Whether a valid code is active this session.
    pub fn discount_applied(&self) -> bool {
        self.lock_discount().applied
    }

    /// Snapshot of the discount session.
    pub fn discount_state(&self) -> DiscountState {
        self.lock_discount().clone()
    }

    /// The full checkout breakdown for the current cart and discount flag.
    pub fn quote(&self) -> PricingQuote {
        pricing::quote(self.raw_total(), self.discount_applied())
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Adds one unit of a product, aggregating by name.
    ///
    /// ## Behavior
    /// - Existing line: quantity += 1; otherwise a new line with quantity 1
    /// - Persists the full list (best-effort)
    /// - Notifies "added to cart" with the resulting quantity
    pub async fn add_item(&self, product: &Product) {
        debug!(name = %product.name, "add_item");

        let (quantity, snapshot) = {
            let mut cart = self.lock_cart();
            let quantity = cart.add(product);
            (quantity, cart.lines().to_vec())
        };

        self.notifier
            .notify(&notify::added(&product.name, quantity))
            .await;
        self.persist(snapshot).await;
    }

    /// Removes one unit of a product.
    ///
    /// ## Behavior
    /// - Name absent: silent no-op — nothing persisted, nothing notified
    /// - Quantity > 1: decrement, informational notification with new count
    /// - Quantity == 1: line removed, informational notification
    pub async fn remove_one_unit(&self, name: &str) {
        debug!(name, "remove_one_unit");

        let (outcome, snapshot) = {
            let mut cart = self.lock_cart();
            let outcome = cart.remove_one(name);
            (outcome, cart.lines().to_vec())
        };

        match outcome {
            RemoveOutcome::NotFound => return,
            RemoveOutcome::Reduced(quantity) => {
                self.notifier.notify(&notify::reduced(name, quantity)).await;
            }
            RemoveOutcome::Removed => {
                self.notifier.notify(&notify::removed(name)).await;
            }
        }
        self.persist(snapshot).await;
    }

    /// Deletes a line entirely, regardless of quantity.
    ///
    /// Name absent: silent no-op.
    pub async fn remove_line(&self, name: &str) {
        debug!(name, "remove_line");

        let (removed, snapshot) = {
            let mut cart = self.lock_cart();
            let removed = cart.remove_line(name);
            (removed, cart.lines().to_vec())
        };

        if removed.is_none() {
            return;
        }
        self.persist(snapshot).await;
        self.notifier.notify(&notify::deleted(name)).await;
    }

    /// Sets a line's quantity to an absolute value.
    ///
    /// ## Behavior
    /// - Name absent: silent no-op
    /// - `quantity <= 0`: the line is removed
    /// - Bulk edit path: persists, but no notification
    pub async fn set_quantity(&self, name: &str, quantity: i64) {
        debug!(name, quantity, "set_quantity");

        let (outcome, snapshot) = {
            let mut cart = self.lock_cart();
            let outcome = cart.set_quantity(name, quantity);
            (outcome, cart.lines().to_vec())
        };

        if outcome == SetOutcome::NotFound {
            return;
        }
        self.persist(snapshot).await;
    }

    /// Empties the cart.
    ///
    /// Persists the empty list; the confirmation notification is only sent
    /// if the cart actually held something.
    pub async fn clear(&self) {
        debug!("clear");

        let had_items = {
            let mut cart = self.lock_cart();
            let had_items = !cart.is_empty();
            cart.clear();
            had_items
        };

        self.persist(Vec::new()).await;
        if had_items {
            self.notifier.notify(&notify::cleared()).await;
        }
    }

    // -------------------------------------------------------------------------
    // Discount Codes
    // -------------------------------------------------------------------------

    /// Applies a promotional code.
    ///
    /// ## Behavior
    /// - Valid code: sets the session flag, stores the canonical code, emits
    ///   a success notification. A second valid code replaces the first; the
    ///   5% component never stacks.
    /// - Empty or unknown code: rejection notification, state unchanged, and
    ///   the error is returned to the caller.
    pub async fn apply_discount_code(&self, input: &str) -> CoreResult<()> {
        match pricing::validate_code(input) {
            Ok(code) => {
                debug!(code = %code, "discount code applied");
                {
                    let mut discount = self.lock_discount();
                    discount.applied = true;
                    discount.code = code.clone();
                }
                self.notifier.notify(&notify::code_applied(&code)).await;
                Ok(())
            }
            Err(e) => {
                debug!(input, error = %e, "discount code rejected");
                self.notifier
                    .notify(&notify::code_rejected(&e.to_string()))
                    .await;
                Err(e)
            }
        }
    }

    // -------------------------------------------------------------------------
    // Checkout
    // -------------------------------------------------------------------------

    /// Confirms the order: returns the final breakdown, then starts a fresh
    /// session (empty cart, discount reset, empty list persisted).
    ///
    /// Returns `None` on an empty cart.
    ///
    /// The charged amount is the quote's `grand_total` — the raw total; tax
    /// and shipping stay informational.
    pub async fn checkout(&self) -> Option<PricingQuote> {
        let quote = {
            let mut cart = self.lock_cart();
            if cart.is_empty() {
                return None;
            }
            let quote = pricing::quote(cart.raw_total(), self.lock_discount().applied);
            cart.clear();
            quote
        };

        debug!(total = %quote.grand_total, "checkout confirmed");
        *self.lock_discount() = DiscountState::default();

        self.persist(Vec::new()).await;
        self.notifier
            .notify(&notify::order_confirmed(quote.grand_total))
            .await;
        Some(quote)
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    /// Best-effort snapshot write. Failures are logged and swallowed: the
    /// in-memory mutation is already done and is never rolled back.
    async fn persist(&self, snapshot: Vec<CartLine>) {
        if let Err(e) = self.storage.save_cart(&snapshot).await {
            warn!(error = %e, "failed to persist cart, keeping in-memory state");
        }
    }

    fn lock_cart(&self) -> std::sync::MutexGuard<'_, Cart> {
        self.cart.lock().expect("cart mutex poisoned")
    }

    fn lock_discount(&self) -> std::sync::MutexGuard<'_, DiscountState> {
        self.discount.lock().expect("discount mutex poisoned")
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
