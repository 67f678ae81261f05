//! In-memory storage backend.
//!
//! Backs tests and local development without a cloud table. Mirrors the
//! remote backend's semantics: per-account monotonically increasing user
//! ids, replace-on-put, and partial limit overlay.

// Unused when the binary is built with the dynamodb backend; tests and the
// inmemory feature exercise it.
#![allow(dead_code)]

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use sessionmgr_core::session::ATTR_USER_NAME;
use sessionmgr_core::storage::{
    PollBudget, Result, SessionRepository, TableAdmin, TableDescriptor, TableLimitChanges,
    TableLimits, UserSummary,
};

#[derive(Default)]
struct Table {
    sessions: HashMap<(i64, i64), Value>,
    counters: HashMap<i64, i64>,
    limits: Option<TableLimits>,
}

/// In-memory session table.
#[derive(Default)]
pub struct InMemoryStore {
    table: RwLock<Table>,
}

impl InMemoryStore {
    /// Current table limits, if the table has been provisioned.
    pub async fn limits(&self) -> Option<TableLimits> {
        self.table.read().await.limits
    }
}

#[async_trait]
impl SessionRepository for InMemoryStore {
    async fn create_session(&self, account_number: i64, payload: Value) -> Result<i64> {
        let mut table = self.table.write().await;
        let next = table.counters.entry(account_number).or_insert(0);
        *next += 1;
        let user_id = *next;
        table.sessions.insert((account_number, user_id), payload);
        Ok(user_id)
    }

    async fn get_session(&self, account_number: i64, user_id: i64) -> Result<Option<Value>> {
        let table = self.table.read().await;
        Ok(table.sessions.get(&(account_number, user_id)).cloned())
    }

    async fn put_session(&self, account_number: i64, user_id: i64, payload: &Value) -> Result<()> {
        let mut table = self.table.write().await;
        table
            .sessions
            .insert((account_number, user_id), payload.clone());
        Ok(())
    }

    async fn list_users(&self, account_number: i64) -> Result<Vec<UserSummary>> {
        let table = self.table.read().await;
        Ok(table
            .sessions
            .iter()
            .filter(|((account, _), _)| *account == account_number)
            .map(|((_, user_id), payload)| UserSummary {
                user_name: payload
                    .get(ATTR_USER_NAME)
                    .and_then(Value::as_str)
                    .map(String::from),
                user_id: *user_id,
            })
            .collect())
    }
}

#[async_trait]
impl TableAdmin for InMemoryStore {
    async fn ensure_table(&self, descriptor: &TableDescriptor, _budget: PollBudget) -> Result<()> {
        let mut table = self.table.write().await;
        // Existing tables keep their limits and data; create is a no-op.
        if table.limits.is_none() {
            table.limits = Some(descriptor.limits);
        }
        Ok(())
    }

    async fn update_limits(
        &self,
        changes: TableLimitChanges,
        _budget: PollBudget,
    ) -> Result<TableLimits> {
        let mut table = self.table.write().await;
        let current = table.limits.unwrap_or_default();
        let updated = changes.overlay(current);
        table.limits = Some(updated);
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use sessionmgr_core::storage::TableLimits;

    use super::*;

    #[tokio::test]
    async fn test_ensure_table_is_idempotent() {
        let store = InMemoryStore::default();
        let descriptor = TableDescriptor::new("demo.persistent_session");

        store
            .ensure_table(&descriptor, PollBudget::PROVISIONING)
            .await
            .unwrap();
        store
            .create_session(100, json!({"userName": "alice"}))
            .await
            .unwrap();

        // The second call neither errors nor alters existing data.
        store
            .ensure_table(&descriptor, PollBudget::PROVISIONING)
            .await
            .unwrap();
        assert!(store.get_session(100, 1).await.unwrap().is_some());
        assert_eq!(store.limits().await, Some(TableLimits::default()));
    }

    #[tokio::test]
    async fn test_update_limits_partial_overlay() {
        let store = InMemoryStore::default();
        store
            .ensure_table(
                &TableDescriptor::new("demo.persistent_session"),
                PollBudget::PROVISIONING,
            )
            .await
            .unwrap();

        let updated = store
            .update_limits(
                TableLimitChanges {
                    read_units: Some(50),
                    ..Default::default()
                },
                PollBudget::LIMIT_CHANGE,
            )
            .await
            .unwrap();

        let defaults = TableLimits::default();
        assert_eq!(updated.read_units, 50);
        assert_eq!(updated.write_units, defaults.write_units);
        assert_eq!(updated.storage_gb, defaults.storage_gb);
    }

    #[tokio::test]
    async fn test_counter_is_scoped_per_account() {
        let store = InMemoryStore::default();
        let a1 = store.create_session(1, json!({})).await.unwrap();
        let a2 = store.create_session(1, json!({})).await.unwrap();
        let b1 = store.create_session(2, json!({})).await.unwrap();
        assert_eq!((a1, a2, b1), (1, 2, 1));
    }
}
