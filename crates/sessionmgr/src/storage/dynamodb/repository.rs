//! Session repository over the document store.

use async_trait::async_trait;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use serde_json::Value;

use sessionmgr_core::session::ATTR_USER_NAME;
use sessionmgr_core::storage::{
    PollBudget, Result, SessionRepository, StoreError, TableAdmin, TableDescriptor,
    TableLimitChanges, TableLimits, UserSummary,
};

use super::connect::StoreHandle;
use super::conversions::{attr_as_i64, attr_to_json, json_to_attr};
use super::error::{map_get_error, map_put_error, map_query_error, map_update_error};
use super::provision;
use super::{ATTR_USER_SEQ, COL_ACCOUNT_NUMBER, COL_SESSION, COL_USER_ID, COUNTER_USER_ID};

/// Document-store backed session repository.
///
/// Holds the one shared [`StoreHandle`]; every remote call takes a permit
/// from the handle's pool so in-flight requests never exceed the configured
/// concurrency limit.
pub struct DynamoStore {
    handle: StoreHandle,
}

impl DynamoStore {
    pub fn new(handle: StoreHandle) -> Self {
        Self { handle }
    }

    /// The compartment-qualified table this store operates on.
    pub fn table(&self) -> &str {
        self.handle.table()
    }

    async fn acquire(&self) -> Result<tokio::sync::SemaphorePermit<'_>> {
        self.handle
            .permits
            .acquire()
            .await
            .map_err(|_| StoreError::Connection("connection pool closed".to_string()))
    }

    /// Assign the next user id for an account by bumping the per-account
    /// counter item atomically.
    async fn next_user_id(&self, account_number: i64) -> Result<i64> {
        let updated = self
            .handle
            .client
            .update_item()
            .table_name(&self.handle.table)
            .key(COL_ACCOUNT_NUMBER, AttributeValue::N(account_number.to_string()))
            .key(COL_USER_ID, AttributeValue::N(COUNTER_USER_ID.to_string()))
            .update_expression("ADD #seq :one")
            .expression_attribute_names("#seq", ATTR_USER_SEQ)
            .expression_attribute_values(":one", AttributeValue::N("1".to_string()))
            .return_values(ReturnValue::UpdatedNew)
            .send()
            .await
            .map_err(map_update_error)?;

        attr_as_i64(
            updated.attributes.as_ref().and_then(|a| a.get(ATTR_USER_SEQ)),
            ATTR_USER_SEQ,
        )
    }
}

#[async_trait]
impl SessionRepository for DynamoStore {
    async fn create_session(&self, account_number: i64, payload: Value) -> Result<i64> {
        let _permit = self.acquire().await?;
        let user_id = self.next_user_id(account_number).await?;

        self.handle
            .client
            .put_item()
            .table_name(&self.handle.table)
            .item(COL_ACCOUNT_NUMBER, AttributeValue::N(account_number.to_string()))
            .item(COL_USER_ID, AttributeValue::N(user_id.to_string()))
            .item(COL_SESSION, json_to_attr(&payload))
            .send()
            .await
            .map_err(map_put_error)?;

        Ok(user_id)
    }

    async fn get_session(&self, account_number: i64, user_id: i64) -> Result<Option<Value>> {
        let _permit = self.acquire().await?;
        let result = self
            .handle
            .client
            .get_item()
            .table_name(&self.handle.table)
            .key(COL_ACCOUNT_NUMBER, AttributeValue::N(account_number.to_string()))
            .key(COL_USER_ID, AttributeValue::N(user_id.to_string()))
            // Eventual consistency: a slightly stale read is acceptable in
            // exchange for lower latency and cost.
            .consistent_read(false)
            .send()
            .await
            .map_err(map_get_error)?;

        match result.item.as_ref().and_then(|item| item.get(COL_SESSION)) {
            Some(session) => Ok(Some(attr_to_json(session)?)),
            // Absent record, or the per-account counter item, which carries
            // no session document.
            None => Ok(None),
        }
    }

    async fn put_session(&self, account_number: i64, user_id: i64, payload: &Value) -> Result<()> {
        let _permit = self.acquire().await?;
        self.handle
            .client
            .put_item()
            .table_name(&self.handle.table)
            .item(COL_ACCOUNT_NUMBER, AttributeValue::N(account_number.to_string()))
            .item(COL_USER_ID, AttributeValue::N(user_id.to_string()))
            .item(COL_SESSION, json_to_attr(payload))
            .send()
            .await
            .map_err(map_put_error)?;
        Ok(())
    }

    async fn list_users(&self, account_number: i64) -> Result<Vec<UserSummary>> {
        let _permit = self.acquire().await?;

        let mut users = Vec::new();
        let mut start_key = None;
        // Materialize the whole projection before responding, following
        // pagination as far as the store takes it.
        loop {
            let result = self
                .handle
                .client
                .query()
                .table_name(&self.handle.table)
                .key_condition_expression("#account = :account")
                .filter_expression("attribute_exists(#session)")
                .projection_expression("#user, #session.userName")
                .expression_attribute_names("#account", COL_ACCOUNT_NUMBER)
                .expression_attribute_names("#user", COL_USER_ID)
                .expression_attribute_names("#session", COL_SESSION)
                .expression_attribute_values(
                    ":account",
                    AttributeValue::N(account_number.to_string()),
                )
                .set_exclusive_start_key(start_key)
                .send()
                .await
                .map_err(map_query_error)?;

            for item in result.items() {
                users.push(UserSummary {
                    user_name: item
                        .get(COL_SESSION)
                        .and_then(|s| s.as_m().ok())
                        .and_then(|m| m.get(ATTR_USER_NAME))
                        .and_then(|n| n.as_s().ok())
                        .cloned(),
                    user_id: attr_as_i64(item.get(COL_USER_ID), COL_USER_ID)?,
                });
            }

            start_key = result.last_evaluated_key;
            if start_key.is_none() {
                break;
            }
        }

        Ok(users)
    }
}

#[async_trait]
impl TableAdmin for DynamoStore {
    async fn ensure_table(&self, descriptor: &TableDescriptor, budget: PollBudget) -> Result<()> {
        provision::ensure_table(&self.handle, descriptor, budget).await
    }

    async fn update_limits(
        &self,
        changes: TableLimitChanges,
        budget: PollBudget,
    ) -> Result<TableLimits> {
        provision::update_limits(&self.handle, changes, budget).await
    }
}
