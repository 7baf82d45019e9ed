//! # Storage Facade
//!
//! Typed access to the two domain keys, mirroring what the engine and the
//! favorites screen need:
//!
//! - `carrito_productos` — the full ordered cart line list, overwritten as a
//!   snapshot on every mutation (lines are few, diffs would be overkill)
//! - `productos_favoritos` — the favorites list, the same product record plus
//!   an `isFavorite` flag
//!
//! The cart key is owned exclusively by the cart engine; favorites are a
//! structurally parallel but independent concern.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use carrito_core::{CartLine, Product};

use crate::error::StoreResult;
use crate::kv::KvStore;

/// Key holding the persisted cart line list.
pub const CART_KEY: &str = "carrito_productos";

/// Key holding the persisted favorites list.
pub const FAVORITES_KEY: &str = "productos_favoritos";

// =============================================================================
// Favorite Product
// =============================================================================

/// A favorited catalog product: the product record plus its flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteProduct {
    /// The catalog record, flattened into the same JSON object.
    #[serde(flatten)]
    pub product: Product,

    /// Always true once persisted; kept for frontend compatibility.
    pub is_favorite: bool,
}

// =============================================================================
// Storage
// =============================================================================

/// Typed facade over a [`KvStore`].
///
/// Cheap to clone; hand one to each consumer.
#[derive(Clone)]
pub struct Storage {
    kv: Arc<dyn KvStore>,
}

impl Storage {
    /// Wraps a key-value store.
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Storage { kv }
    }

    // -------------------------------------------------------------------------
    // Cart
    // -------------------------------------------------------------------------

    /// Persists the full cart line list as one snapshot.
    pub async fn save_cart(&self, lines: &[CartLine]) -> StoreResult<()> {
        debug!(count = lines.len(), "saving cart snapshot");
        self.kv.set(CART_KEY, serde_json::to_value(lines)?).await
    }

    /// Loads the persisted cart line list. Absent key means an empty cart.
    pub async fn load_cart(&self) -> StoreResult<Vec<CartLine>> {
        match self.kv.get(CART_KEY).await? {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Ok(Vec::new()),
        }
    }

    /// Deletes the persisted cart entirely.
    pub async fn clear_cart(&self) -> StoreResult<()> {
        self.kv.remove(CART_KEY).await
    }

    // -------------------------------------------------------------------------
    // Favorites
    // -------------------------------------------------------------------------

    /// Persists the full favorites list.
    pub async fn save_favorites(&self, favorites: &[FavoriteProduct]) -> StoreResult<()> {
        debug!(count = favorites.len(), "saving favorites snapshot");
        self.kv
            .set(FAVORITES_KEY, serde_json::to_value(favorites)?)
            .await
    }

    /// Loads the persisted favorites list. Absent key means no favorites.
    pub async fn load_favorites(&self) -> StoreResult<Vec<FavoriteProduct>> {
        match self.kv.get(FAVORITES_KEY).await? {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Ok(Vec::new()),
        }
    }

    /// Adds a product to favorites. No-op if the name is already present.
    pub async fn add_favorite(&self, product: &Product) -> StoreResult<()> {
        let mut favorites = self.load_favorites().await?;
        if favorites.iter().any(|f| f.product.name == product.name) {
            return Ok(());
        }

        favorites.push(FavoriteProduct {
            product: product.clone(),
            is_favorite: true,
        });
        self.save_favorites(&favorites).await
    }

    /// Removes a product from favorites by name. No-op if absent.
    pub async fn remove_favorite(&self, name: &str) -> StoreResult<()> {
        let mut favorites = self.load_favorites().await?;
        favorites.retain(|f| f.product.name != name);
        self.save_favorites(&favorites).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryKv;
    use carrito_core::Money;

    fn storage() -> Storage {
        Storage::new(Arc::new(MemoryKv::new()))
    }

    fn shirt() -> Product {
        Product::new("Shirt", Money::from_pesos(15_000))
    }

    #[tokio::test]
    async fn test_cart_roundtrip() {
        let storage = storage();
        let lines = vec![CartLine::from_product(&shirt())];

        storage.save_cart(&lines).await.unwrap();
        assert_eq!(storage.load_cart().await.unwrap(), lines);

        storage.clear_cart().await.unwrap();
        assert!(storage.load_cart().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_load_cart_before_first_save_is_empty() {
        assert!(storage().load_cart().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_favorite_is_idempotent_by_name() {
        let storage = storage();

        storage.add_favorite(&shirt()).await.unwrap();
        storage.add_favorite(&shirt()).await.unwrap();

        let favorites = storage.load_favorites().await.unwrap();
        assert_eq!(favorites.len(), 1);
        assert!(favorites[0].is_favorite);
        assert_eq!(favorites[0].product.name, "Shirt");
    }

    #[tokio::test]
    async fn test_remove_favorite_filters_by_name() {
        let storage = storage();
        storage.add_favorite(&shirt()).await.unwrap();
        storage
            .add_favorite(&Product::new("Shoes", Money::from_pesos(30_000)))
            .await
            .unwrap();

        storage.remove_favorite("Shirt").await.unwrap();

        let favorites = storage.load_favorites().await.unwrap();
        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites[0].product.name, "Shoes");

        // Missing name: silent no-op
        storage.remove_favorite("Hat").await.unwrap();
    }

    #[tokio::test]
    async fn test_favorite_serializes_flattened() {
        let fav = FavoriteProduct {
            product: shirt(),
            is_favorite: true,
        };
        let json = serde_json::to_value(&fav).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "name": "Shirt", "price": 15_000, "isFavorite": true })
        );
    }
}
