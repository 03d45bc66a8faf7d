//! Write-through cart persistence over the session.

use tower_sessions::Session;

use gearhouse_core::{Cart, CartItem, ProductId};

use crate::models::session_keys;

/// Cart store bound to one visitor's session.
///
/// Every mutation loads the current snapshot, applies the change in
/// memory, and immediately writes the full snapshot back, so the session
/// never lags the in-memory cart. `clear` deletes the key entirely: a
/// fresh visitor and a cleared cart are distinguishable from a visitor
/// who emptied their cart line by line.
pub struct CartStore<'a> {
    session: &'a Session,
}

impl<'a> CartStore<'a> {
    /// Bind the store to a session.
    #[must_use]
    pub const fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Load the cart. A missing or corrupt snapshot yields an empty cart;
    /// loading never fails the request.
    pub async fn load(&self) -> Cart {
        self.session
            .get::<Cart>(session_keys::CART)
            .await
            .ok()
            .flatten()
            .unwrap_or_default()
    }

    /// Append an item and persist the updated snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the session write fails.
    pub async fn add(&self, item: CartItem) -> Result<Cart, tower_sessions::session::Error> {
        let mut cart = self.load().await;
        cart.add(item);
        self.save(&cart).await?;
        Ok(cart)
    }

    /// Remove all lines matching the product id and persist the result.
    /// Removing an absent id still rewrites the (unchanged) snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the session write fails.
    pub async fn remove(&self, id: &ProductId) -> Result<Cart, tower_sessions::session::Error> {
        let mut cart = self.load().await;
        cart.remove(id);
        self.save(&cart).await?;
        Ok(cart)
    }

    /// Empty the cart by deleting the persisted key entirely.
    ///
    /// # Errors
    ///
    /// Returns an error if the session write fails.
    pub async fn clear(&self) -> Result<(), tower_sessions::session::Error> {
        self.session
            .remove::<Cart>(session_keys::CART)
            .await
            .map(|_| ())
    }

    async fn save(&self, cart: &Cart) -> Result<(), tower_sessions::session::Error> {
        self.session.insert(session_keys::CART, cart).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use tower_sessions::{MemoryStore, Session};

    use gearhouse_core::Rupees;

    use super::*;

    fn test_session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    fn item(id: &str, price: i64) -> CartItem {
        CartItem {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            description: String::new(),
            price: Some(Rupees::new(price)),
        }
    }

    async fn snapshot(session: &Session) -> Option<Cart> {
        session.get::<Cart>(session_keys::CART).await.unwrap()
    }

    #[tokio::test]
    async fn test_missing_snapshot_loads_empty() {
        let session = test_session();
        let cart = CartStore::new(&session).load().await;
        assert!(cart.is_empty());
    }

    #[tokio::test]
    async fn test_write_through_after_every_mutation() {
        let session = test_session();
        let store = CartStore::new(&session);

        let cart = store.add(item("p1", 500)).await.unwrap();
        let stored = snapshot(&session).await.unwrap();
        assert_eq!(stored.len(), cart.len());
        assert_eq!(stored.total(), cart.total());

        let cart = store.add(item("p2", 1500)).await.unwrap();
        let stored = snapshot(&session).await.unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored.total(), cart.total());

        let cart = store.remove(&ProductId::new("p1")).await.unwrap();
        let stored = snapshot(&session).await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored.total(), cart.total());
    }

    #[tokio::test]
    async fn test_remove_strips_every_matching_line() {
        let session = test_session();
        let store = CartStore::new(&session);

        store.add(item("p1", 100)).await.unwrap();
        store.add(item("p2", 200)).await.unwrap();
        store.add(item("p1", 100)).await.unwrap();

        let cart = store.remove(&ProductId::new("p1")).await.unwrap();
        let ids: Vec<&str> = cart.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["p2"]);
    }

    #[tokio::test]
    async fn test_clear_deletes_the_key() {
        let session = test_session();
        let store = CartStore::new(&session);

        store.add(item("p1", 100)).await.unwrap();
        store.clear().await.unwrap();

        // Key absent, not an empty array.
        assert!(snapshot(&session).await.is_none());
        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_remove_to_empty_keeps_empty_snapshot() {
        let session = test_session();
        let store = CartStore::new(&session);

        store.add(item("p1", 100)).await.unwrap();
        store.remove(&ProductId::new("p1")).await.unwrap();

        // Emptied line by line: the key survives with an empty sequence,
        // distinct from a cleared cart.
        let stored = snapshot(&session).await;
        assert!(stored.is_some());
        assert!(stored.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_snapshot_loads_empty() {
        let session = test_session();
        session
            .insert(session_keys::CART, "not a cart")
            .await
            .unwrap();

        let cart = CartStore::new(&session).load().await;
        assert!(cart.is_empty());
    }
}
