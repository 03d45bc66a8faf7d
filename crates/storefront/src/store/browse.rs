//! Browse-state persistence over the session.
//!
//! The accumulated product list, cursor, and filter mode survive across
//! HTMX fragment requests by living in the session. Transitions stay in
//! `gearhouse_core::BrowseState`; this store only loads and saves.

use tower_sessions::Session;

use gearhouse_core::BrowseState;

use crate::models::session_keys;

/// Browse store bound to one visitor's session.
pub struct BrowseStore<'a> {
    session: &'a Session,
}

impl<'a> BrowseStore<'a> {
    /// Bind the store to a session.
    #[must_use]
    pub const fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Load the browse state. Missing or corrupt state starts over from
    /// the default (empty list, cursor 1).
    pub async fn load(&self) -> BrowseState {
        self.session
            .get::<BrowseState>(session_keys::BROWSE)
            .await
            .ok()
            .flatten()
            .unwrap_or_default()
    }

    /// Persist the browse state.
    ///
    /// # Errors
    ///
    /// Returns an error if the session write fails.
    pub async fn save(&self, state: &BrowseState) -> Result<(), tower_sessions::session::Error> {
        self.session.insert(session_keys::BROWSE, state).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use tower_sessions::{MemoryStore, Session};

    use gearhouse_core::BrowseMode;

    use super::*;

    fn test_session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    #[tokio::test]
    async fn test_missing_state_is_default() {
        let session = test_session();
        let state = BrowseStore::new(&session).load().await;
        assert!(state.products.is_empty());
        assert_eq!(state.mode, BrowseMode::Browsing { cursor: 1 });
    }

    #[tokio::test]
    async fn test_round_trip() {
        let session = test_session();
        let store = BrowseStore::new(&session);

        let mut state = BrowseState::default();
        state.start(Vec::new(), 25, Vec::new());
        state.apply_page(2, Vec::new());
        store.save(&state).await.unwrap();

        let loaded = store.load().await;
        assert_eq!(loaded.total, 25);
        assert_eq!(loaded.mode, BrowseMode::Browsing { cursor: 2 });
    }

    #[tokio::test]
    async fn test_corrupt_state_starts_over() {
        let session = test_session();
        session.insert(session_keys::BROWSE, 42).await.unwrap();

        let state = BrowseStore::new(&session).load().await;
        assert!(state.products.is_empty());
    }
}
