//! Shared application state.
//!
//! The state is cloned per request handler. All handlers share the one
//! repository handle built at bootstrap; nothing here is recreated per
//! request.

use std::sync::Arc;

use sessionmgr_core::session::SessionStore;
use sessionmgr_core::storage::{SessionRepository, TableAdmin};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// The session CRUD surface.
    pub sessions: Arc<SessionStore>,
    /// Administrative table operations (limit changes).
    pub admin: Arc<dyn TableAdmin>,
}

impl AppState {
    /// Creates state over an explicitly injected repository and admin
    /// handle. Called once at bootstrap.
    pub fn new(repository: Arc<dyn SessionRepository>, admin: Arc<dyn TableAdmin>) -> Self {
        Self {
            sessions: Arc::new(SessionStore::new(repository)),
            admin,
        }
    }

    /// Creates state backed by the in-memory store, for tests and local
    /// development without a cloud table.
    pub fn in_memory() -> Self {
        let store = Arc::new(crate::storage::inmemory::InMemoryStore::default());
        Self::new(store.clone(), store)
    }
}
