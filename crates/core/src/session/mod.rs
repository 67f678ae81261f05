//! The session CRUD surface.

mod store;

pub use store::SessionStore;

/// Recognized field in the schema-less session payload, used by the
/// account-scoped listing projection.
pub const ATTR_USER_NAME: &str = "userName";
