//! Session CRUD handlers.

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

use sessionmgr_core::merge::parse_patch;
use sessionmgr_core::storage::UserSummary;

use crate::{handlers::AppError, state::AppState};

/// Retrieve the persistent session for one user in an account
/// (GET /sessionmanager/getsession/{account_num}/{user_id}).
pub async fn get_session(
    State(state): State<AppState>,
    Path((account_num, user_id)): Path<(i64, i64)>,
) -> Result<Json<Value>, AppError> {
    let document = state.sessions.get_by_key(account_num, user_id).await?;
    Ok(Json(document))
}

/// List every user name and id registered in an account
/// (GET /sessionmanager/getusers/{account_num}).
pub async fn get_users(
    State(state): State<AppState>,
    Path(account_num): Path<i64>,
) -> Result<Json<Vec<UserSummary>>, AppError> {
    let users = state.sessions.list_users_in_account(account_num).await?;
    Ok(Json(users))
}

/// Create a persistent session for a user in an account
/// (POST /sessionmanager/create/{account_num}/{user_name}).
///
/// The response carries the store-assigned user id as a string, matching
/// the wire contract consumed by existing clients.
pub async fn create_session(
    State(state): State<AppState>,
    Path((account_num, user_name)): Path<(i64, String)>,
) -> Result<Json<Value>, AppError> {
    let user_id = state.sessions.create(account_num, &user_name).await?;
    Ok(Json(json!({ "userID": user_id.to_string() })))
}

/// Apply an RFC 7386 merge patch to a stored session and return the merged
/// document (POST /sessionmanager/update/{account_num}/{user_id}).
pub async fn update_session(
    State(state): State<AppState>,
    Path((account_num, user_id)): Path<(i64, i64)>,
    body: String,
) -> Result<Json<Value>, AppError> {
    let patch = parse_patch(&body)?;
    let merged = state.sessions.update(account_num, user_id, &patch).await?;
    Ok(Json(merged))
}
