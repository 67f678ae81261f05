//! Storage backend implementations.
//!
//! Concrete implementations of the repository traits from
//! `sessionmgr_core::storage`. The production backend targets a
//! DynamoDB-compatible document store; the in-memory backend serves tests
//! and local development.

#[cfg(feature = "dynamodb")]
pub mod dynamodb;

pub mod inmemory;
