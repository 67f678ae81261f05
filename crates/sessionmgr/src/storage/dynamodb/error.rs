//! SDK error mapping.
//!
//! Maps AWS SDK errors to [`StoreError`] from `sessionmgr_core::storage`.
//! Transport-level timeouts and dispatch failures are classified before the
//! service error is inspected so callers see a timeout as a timeout rather
//! than a generic query failure.

use std::fmt::Debug;

use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::get_item::GetItemError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::operation::query::QueryError;
use aws_sdk_dynamodb::operation::update_item::UpdateItemError;

use sessionmgr_core::storage::StoreError;

/// Classify the transport-level failure modes shared by every operation.
/// Returns `None` when the error carries a service response.
fn map_transport_error<E, R: Debug>(err: &SdkError<E, R>, op: &'static str) -> Option<StoreError> {
    match err {
        SdkError::TimeoutError(_) => Some(StoreError::Timeout(op.to_string())),
        SdkError::DispatchFailure(failure) if failure.is_timeout() => {
            Some(StoreError::Timeout(op.to_string()))
        }
        SdkError::DispatchFailure(_) => Some(StoreError::Connection(format!(
            "{op} could not be dispatched"
        ))),
        _ => None,
    }
}

/// Map a GetItem SDK error to StoreError.
pub fn map_get_error<R: Debug>(err: SdkError<GetItemError, R>) -> StoreError {
    if let Some(mapped) = map_transport_error(&err, "GetItem") {
        return mapped;
    }
    match err.as_service_error() {
        Some(GetItemError::ResourceNotFoundException(_)) => {
            StoreError::Query("table not found".to_string())
        }
        Some(GetItemError::ProvisionedThroughputExceededException(_)) => {
            StoreError::Query("throughput exceeded, please retry".to_string())
        }
        _ => StoreError::Query(format!("GetItem failed: {err:?}")),
    }
}

/// Map a PutItem SDK error to StoreError.
pub fn map_put_error<R: Debug>(err: SdkError<PutItemError, R>) -> StoreError {
    if let Some(mapped) = map_transport_error(&err, "PutItem") {
        return mapped;
    }
    match err.as_service_error() {
        Some(PutItemError::ResourceNotFoundException(_)) => {
            StoreError::Query("table not found".to_string())
        }
        Some(PutItemError::ProvisionedThroughputExceededException(_)) => {
            StoreError::Query("throughput exceeded, please retry".to_string())
        }
        _ => StoreError::Query(format!("PutItem failed: {err:?}")),
    }
}

/// Map an UpdateItem SDK error to StoreError.
pub fn map_update_error<R: Debug>(err: SdkError<UpdateItemError, R>) -> StoreError {
    if let Some(mapped) = map_transport_error(&err, "UpdateItem") {
        return mapped;
    }
    match err.as_service_error() {
        Some(UpdateItemError::ResourceNotFoundException(_)) => {
            StoreError::Query("table not found".to_string())
        }
        Some(UpdateItemError::ProvisionedThroughputExceededException(_)) => {
            StoreError::Query("throughput exceeded, please retry".to_string())
        }
        _ => StoreError::Query(format!("UpdateItem failed: {err:?}")),
    }
}

/// Map a Query SDK error to StoreError.
pub fn map_query_error<R: Debug>(err: SdkError<QueryError, R>) -> StoreError {
    if let Some(mapped) = map_transport_error(&err, "Query") {
        return mapped;
    }
    match err.as_service_error() {
        Some(QueryError::ResourceNotFoundException(_)) => {
            StoreError::Query("table not found".to_string())
        }
        Some(QueryError::ProvisionedThroughputExceededException(_)) => {
            StoreError::Query("throughput exceeded, please retry".to_string())
        }
        _ => StoreError::Query(format!("Query failed: {err:?}")),
    }
}

/// Map a table-level operation error (create/describe/update table) to
/// StoreError.
pub fn map_table_error<E: Debug, R: Debug>(err: SdkError<E, R>, op: &'static str) -> StoreError {
    if let Some(mapped) = map_transport_error(&err, op) {
        return mapped;
    }
    StoreError::Query(format!("{op} failed: {err:?}"))
}
