//! # carrito-core: Pure Business Logic for Carrito
//!
//! This crate is the heart of the shopping cart: all cart math and pricing
//! rules as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Carrito Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (Ionic)                              │   │
//! │  │    Catalog UI ──► Cart UI ──► Checkout UI ──► Confirmation      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    carrito-engine                               │   │
//! │  │    add_item, remove_one_unit, apply_discount_code, checkout     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ carrito-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │  pricing  │  │   │
//! │  │   │  Product  │  │   Money   │  │   Cart    │  │ discount  │  │   │
//! │  │   │  CartLine │  │  (pesos)  │  │ outcomes  │  │ tax, ship │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    carrito-store                                │   │
//! │  │              JSON key-value persistence (cart, favorites)       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, CartLine)
//! - [`money`] - Money type with integer peso arithmetic (no floating point!)
//! - [`cart`] - The cart aggregate and its mutation outcomes
//! - [`pricing`] - Discount, shipping, and VAT derivation; discount codes
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: every function is deterministic
//! 2. **No I/O**: storage, network, and notifications live in other crates
//! 3. **Integer Money**: whole Chilean pesos in i64, never floats
//! 4. **Explicit Errors**: typed errors, never strings or panics

pub mod cart;
pub mod error;
pub mod money;
pub mod pricing;
pub mod types;

pub use cart::{Cart, RemoveOutcome, SetOutcome};
pub use error::{CoreError, CoreResult};
pub use money::Money;
pub use pricing::PricingQuote;
pub use types::{CartLine, Product};
