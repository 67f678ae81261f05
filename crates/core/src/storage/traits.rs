use async_trait::async_trait;
use serde_json::Value;

use super::{PollBudget, Result, TableDescriptor, TableLimitChanges, TableLimits, UserSummary};

/// Record-level access to the session table.
///
/// Implementations must be safe for concurrent use from many request
/// handlers sharing one instance.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Writes a new session document and returns the store-assigned user id
    /// for the account. User ids increase monotonically per account and are
    /// never supplied by the caller.
    async fn create_session(&self, account_number: i64, payload: Value) -> Result<i64>;

    /// Point read by composite primary key under eventual consistency.
    /// Returns `None` when no record matches the key.
    async fn get_session(&self, account_number: i64, user_id: i64) -> Result<Option<Value>>;

    /// Writes a session document by composite primary key, replacing any
    /// existing payload.
    async fn put_session(&self, account_number: i64, user_id: i64, payload: &Value) -> Result<()>;

    /// Account-scoped projection of every record's `userName` and user id,
    /// fully materialized. Ordering is store-determined.
    async fn list_users(&self, account_number: i64) -> Result<Vec<UserSummary>>;
}

/// Administrative operations on the session table.
#[async_trait]
pub trait TableAdmin: Send + Sync {
    /// Idempotent create-if-absent with initial limits, polling until the
    /// table is active or the budget's wall-clock deadline expires.
    async fn ensure_table(&self, descriptor: &TableDescriptor, budget: PollBudget) -> Result<()>;

    /// Overlays the supplied limit values on the current ones and re-issues
    /// the table alteration, polling to completion with the given budget.
    /// Returns the limits now in effect.
    async fn update_limits(
        &self,
        changes: TableLimitChanges,
        budget: PollBudget,
    ) -> Result<TableLimits>;
}
