//! Storage abstractions for the session table.
//!
//! Backends implement [`SessionRepository`] for record access and
//! [`TableAdmin`] for provisioning and limit changes. The concrete
//! implementations live in the binary crate; this module only defines the
//! contract, the shared value types, and the error model.

mod error;
mod http_mapping;
mod traits;
mod types;

pub use error::{Result, StoreError};
pub use http_mapping::store_error_to_status_code;
pub use traits::{SessionRepository, TableAdmin};
pub use types::{
    PollBudget, TableDescriptor, TableLimitChanges, TableLimits, UserSummary, DEFAULT_READ_UNITS,
    DEFAULT_STORAGE_GB, DEFAULT_WRITE_UNITS,
};
