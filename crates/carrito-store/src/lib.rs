//! # carrito-store
//!
//! Persistence layer for Carrito: a small async key-value store holding the
//! cart and favorites snapshots as JSON.
//!
//! This crate provides:
//!
//! - [`KvStore`]: the async get/set/remove contract on named keys
//! - [`JsonFileKv`]: one JSON file per key, written atomically
//! - [`MemoryKv`]: in-memory map for tests and non-durable fallback
//! - [`Storage`]: typed facade over the domain keys (cart, favorites)
//!
//! ## Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use carrito_store::{JsonFileKv, Storage};
//!
//! let kv = Arc::new(JsonFileKv::new(data_dir));
//! let storage = Storage::new(kv);
//!
//! storage.save_cart(&lines).await?;
//! let restored = storage.load_cart().await?;
//! ```

pub mod error;
pub mod kv;
pub mod storage;

pub use error::StoreError;
pub use kv::{JsonFileKv, KvStore, MemoryKv};
pub use storage::{FavoriteProduct, Storage, CART_KEY, FAVORITES_KEY};
