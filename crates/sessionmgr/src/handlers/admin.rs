//! Administrative table-limit handler.

use axum::{
    extract::{Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use sessionmgr_core::storage::{PollBudget, TableLimitChanges};

use crate::{handlers::AppError, state::AppState};

/// Optional new limits; omitted parameters keep their current value.
#[derive(Debug, Deserialize)]
pub struct UpdateLimitsParams {
    #[serde(rename = "readUnits")]
    pub read_units: Option<i64>,
    #[serde(rename = "writeUnits")]
    pub write_units: Option<i64>,
    #[serde(rename = "storageGB")]
    pub storage_gb: Option<i64>,
}

/// Update the provisioned throughput or storage for the session table
/// (POST /sessionmanager/tablelimits).
pub async fn update_table_limits(
    State(state): State<AppState>,
    Query(params): Query<UpdateLimitsParams>,
) -> Result<StatusCode, AppError> {
    let changes = TableLimitChanges {
        read_units: params.read_units,
        write_units: params.write_units,
        storage_gb: params.storage_gb,
    };
    state
        .admin
        .update_limits(changes, PollBudget::LIMIT_CHANGE)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
