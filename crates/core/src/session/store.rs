use std::sync::Arc;

use serde_json::{json, Value};

use crate::merge::apply_merge_patch;
use crate::storage::{Result, SessionRepository, StoreError, UserSummary};

use super::ATTR_USER_NAME;

/// CRUD surface over the session table.
///
/// Holds an injected repository handle shared by all concurrent request
/// handlers; the handle is constructed once at bootstrap and never
/// recreated per request.
pub struct SessionStore {
    repository: Arc<dyn SessionRepository>,
}

impl SessionStore {
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }

    /// Creates a session for a user in an account and returns the
    /// store-assigned user id. User names are not checked for uniqueness.
    pub async fn create(&self, account_number: i64, user_name: &str) -> Result<i64> {
        let payload = json!({ ATTR_USER_NAME: user_name });
        let user_id = self
            .repository
            .create_session(account_number, payload)
            .await?;
        tracing::debug!(account_number, user_id, "created session");
        Ok(user_id)
    }

    /// Point lookup by composite primary key under eventual consistency.
    /// A missing record is an error, never an empty payload.
    pub async fn get_by_key(&self, account_number: i64, user_id: i64) -> Result<Value> {
        self.repository
            .get_session(account_number, user_id)
            .await?
            .ok_or(StoreError::NotFound {
                account_number,
                user_id,
            })
    }

    /// Every `{userName, userID}` pair registered in the account, fully
    /// materialized, in store-determined order.
    pub async fn list_users_in_account(&self, account_number: i64) -> Result<Vec<UserSummary>> {
        self.repository.list_users(account_number).await
    }

    /// Applies an RFC 7386 merge patch to the stored document and writes the
    /// merged result back, returning it.
    ///
    /// This is a read-modify-write over three remote calls with no
    /// conditional write: a concurrent writer racing between the read and
    /// the write can be silently overwritten.
    pub async fn update(&self, account_number: i64, user_id: i64, patch: &Value) -> Result<Value> {
        let current = self.get_by_key(account_number, user_id).await?;
        let merged = apply_merge_patch(&current, patch);
        self.repository
            .put_session(account_number, user_id, &merged)
            .await?;
        tracing::debug!(account_number, user_id, "merged session update");
        Ok(merged)
    }
}
