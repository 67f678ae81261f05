//! Core logic for the persistent session manager.
//!
//! This crate holds everything that does not touch the network: credential
//! resolution and validation, RFC 7386 merge-patch application, the storage
//! traits that backends implement, and the `SessionStore` CRUD surface built
//! on top of them. The binary crate wires these to a concrete document-store
//! backend and the HTTP layer.

pub mod credentials;
pub mod merge;
pub mod session;
pub mod storage;
