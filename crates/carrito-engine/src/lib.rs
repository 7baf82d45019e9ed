//! # carrito-engine
//!
//! The cart engine: single source of truth for cart contents.
//!
//! ## Control Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Engine Mutation Path                              │
//! │                                                                         │
//! │  UI call ──► CartEngine method                                          │
//! │                   │                                                     │
//! │                   ▼                                                     │
//! │          lock cart, mutate, snapshot lines, unlock                      │
//! │                   │                        (atomic in-memory step;     │
//! │                   ▼                         reads see it immediately)  │
//! │          persist snapshot to the store     (async, best-effort:        │
//! │                   │                         failures logged, in-memory │
//! │                   ▼                         state stays authoritative) │
//! │          emit user notification            (fire-and-forget)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine is constructed explicitly by the composition root and handed
//! to consumers by reference; there is no ambient singleton.

pub mod engine;
pub mod notify;

pub use engine::{CartEngine, DiscountState};
pub use notify::{NoopNotifier, Notifier};
