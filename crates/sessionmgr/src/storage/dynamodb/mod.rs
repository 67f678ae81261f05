//! DynamoDB-compatible document store backend.
//!
//! Production storage for session records. The backend owns the fixed
//! table schema: a numeric `account_number` hash key, a numeric `user_id`
//! range key assigned from a per-account counter item, and an open
//! `session_info` document attribute.

mod connect;
mod conversions;
mod error;
mod provision;
mod repository;

pub use connect::{connect, ConnectOptions, StoreHandle};
pub use repository::DynamoStore;

/// Account-number column (hash key).
pub const COL_ACCOUNT_NUMBER: &str = "account_number";
/// User-id column (range key, store-generated).
pub const COL_USER_ID: &str = "user_id";
/// Open-document column holding the session payload.
pub const COL_SESSION: &str = "session_info";

/// Attribute on the per-account counter item that holds the last assigned
/// user id.
pub(crate) const ATTR_USER_SEQ: &str = "user_seq";
/// Reserved range-key value for the per-account counter item. Session ids
/// start at 1.
pub(crate) const COUNTER_USER_ID: i64 = 0;
