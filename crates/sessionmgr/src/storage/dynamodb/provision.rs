//! Table provisioning and limit changes.
//!
//! Both paths share one polling primitive: issue the alteration, then probe
//! the table state every `poll_interval` until it is ACTIVE or the
//! wall-clock deadline expires. Initial provisioning gets the long budget
//! because it can require real infrastructure allocation; a limits update
//! gets the short one.

use std::future::Future;

use aws_sdk_dynamodb::operation::create_table::CreateTableError;
use aws_sdk_dynamodb::operation::describe_table::DescribeTableError;
use aws_sdk_dynamodb::types::{
    AttributeDefinition, KeySchemaElement, KeyType, ProvisionedThroughput, ScalarAttributeType,
};
use tokio::time::Instant;

use sessionmgr_core::storage::{
    PollBudget, StoreError, TableDescriptor, TableLimitChanges, TableLimits, DEFAULT_STORAGE_GB,
};

use super::connect::StoreHandle;
use super::error::map_table_error;
use super::{COL_ACCOUNT_NUMBER, COL_USER_ID};

/// Idempotent create-if-absent of the session table with its fixed schema
/// and initial limits, polling until it is active.
pub async fn ensure_table(
    handle: &StoreHandle,
    descriptor: &TableDescriptor,
    budget: PollBudget,
) -> Result<(), StoreError> {
    let request = handle
        .client
        .create_table()
        .table_name(&descriptor.name)
        .attribute_definitions(numeric_attribute(COL_ACCOUNT_NUMBER)?)
        .attribute_definitions(numeric_attribute(COL_USER_ID)?)
        .key_schema(key_element(COL_ACCOUNT_NUMBER, KeyType::Hash)?)
        .key_schema(key_element(COL_USER_ID, KeyType::Range)?)
        .provisioned_throughput(throughput(descriptor.limits)?);

    if let Err(err) = request.send().await {
        match err.as_service_error() {
            // Already provisioned; safe to call again.
            Some(CreateTableError::ResourceInUseException(_)) => {
                tracing::debug!(table = %descriptor.name, "table already exists");
            }
            _ => return Err(map_table_error(err, "CreateTable")),
        }
    }

    wait_for_active(|| table_state(handle, &descriptor.name), budget).await
}

/// Overlay the supplied limit values on the current ones and re-issue the
/// table alteration, polling with the given budget. A timed-out wait is
/// surfaced to the caller as an error.
pub async fn update_limits(
    handle: &StoreHandle,
    changes: TableLimitChanges,
    budget: PollBudget,
) -> Result<TableLimits, StoreError> {
    let current = current_limits(handle).await?;
    let updated = changes.overlay(current);

    // The store rejects an alteration that does not change throughput, and
    // storage capacity is elastic on this backend; nothing to issue.
    if updated.read_units == current.read_units && updated.write_units == current.write_units {
        return Ok(updated);
    }

    handle
        .client
        .update_table()
        .table_name(&handle.table)
        .provisioned_throughput(throughput(updated)?)
        .send()
        .await
        .map_err(|err| map_table_error(err, "UpdateTable"))?;

    wait_for_active(|| table_state(handle, &handle.table), budget).await?;
    tracing::info!(
        table = %handle.table,
        read_units = updated.read_units,
        write_units = updated.write_units,
        storage_gb = updated.storage_gb,
        "table limits updated"
    );
    Ok(updated)
}

/// Current limits of the session table. The store does not report a storage
/// cap (capacity is elastic), so the default is carried for the overlay.
async fn current_limits(handle: &StoreHandle) -> Result<TableLimits, StoreError> {
    let described = handle
        .client
        .describe_table()
        .table_name(&handle.table)
        .send()
        .await
        .map_err(|err| map_table_error(err, "DescribeTable"))?;

    let defaults = TableLimits::default();
    let throughput = described
        .table
        .as_ref()
        .and_then(|t| t.provisioned_throughput.as_ref());

    Ok(TableLimits {
        read_units: throughput
            .and_then(|t| t.read_capacity_units)
            .unwrap_or(defaults.read_units),
        write_units: throughput
            .and_then(|t| t.write_capacity_units)
            .unwrap_or(defaults.write_units),
        storage_gb: DEFAULT_STORAGE_GB,
    })
}

/// Probe the table's readiness state. A table that is not yet visible
/// reports "UNKNOWN" so the caller keeps polling until its deadline.
async fn table_state(handle: &StoreHandle, table: &str) -> Result<String, StoreError> {
    let result = handle.client.describe_table().table_name(table).send().await;
    match result {
        Ok(described) => Ok(described
            .table
            .and_then(|t| t.table_status)
            .map(|status| status.as_str().to_string())
            .unwrap_or_else(|| "UNKNOWN".to_string())),
        Err(err) => match err.as_service_error() {
            Some(DescribeTableError::ResourceNotFoundException(_)) => Ok("UNKNOWN".to_string()),
            _ => Err(map_table_error(err, "DescribeTable")),
        },
    }
}

/// Poll `probe` every `poll_interval` until it reports ACTIVE or the
/// wall-clock deadline expires. The deadline bounds total elapsed time, so
/// slow probes do not extend the budget.
pub(crate) async fn wait_for_active<F, Fut>(
    mut probe: F,
    budget: PollBudget,
) -> Result<(), StoreError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<String, StoreError>>,
{
    let deadline = Instant::now() + budget.max_wait;
    loop {
        let state = probe().await?;
        if state == "ACTIVE" {
            return Ok(());
        }
        if Instant::now() >= deadline {
            return Err(StoreError::ProvisioningTimeout { state });
        }
        tokio::time::sleep(budget.poll_interval).await;
    }
}

fn numeric_attribute(name: &str) -> Result<AttributeDefinition, StoreError> {
    AttributeDefinition::builder()
        .attribute_name(name)
        .attribute_type(ScalarAttributeType::N)
        .build()
        .map_err(|err| StoreError::Query(err.to_string()))
}

fn key_element(name: &str, key_type: KeyType) -> Result<KeySchemaElement, StoreError> {
    KeySchemaElement::builder()
        .attribute_name(name)
        .key_type(key_type)
        .build()
        .map_err(|err| StoreError::Query(err.to_string()))
}

fn throughput(limits: TableLimits) -> Result<ProvisionedThroughput, StoreError> {
    ProvisionedThroughput::builder()
        .read_capacity_units(limits.read_units)
        .write_capacity_units(limits.write_units)
        .build()
        .map_err(|err| StoreError::Query(err.to_string()))
}
