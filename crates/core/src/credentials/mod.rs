//! Credential resolution for the document-store connection.
//!
//! The seven connection parameters can come from a map-like configuration
//! source or from a flat `key=value` credentials file. Either way the result
//! is a fully validated [`CredentialBundle`]; there is no partially populated
//! bundle.

mod bundle;
mod error;
mod resolver;

pub use bundle::{CredentialBundle, Passphrase};
pub use error::CredentialError;
pub use resolver::{resolve_from_file, resolve_from_map};

/// Configuration key for the region endpoint URI.
pub const KEY_REGION_URI: &str = "region_uri";
/// Configuration key for the tenant identifier.
pub const KEY_TENANT_ID: &str = "tenant_id";
/// Configuration key for the user identifier.
pub const KEY_USER_ID: &str = "user_id";
/// Configuration key for the signing-key fingerprint.
pub const KEY_FINGERPRINT: &str = "fingerprint";
/// Configuration key for the path to the private signing-key file.
pub const KEY_SIGNING_KEY_FILE: &str = "signing_key_file";
/// Configuration key for the signing-key passphrase.
pub const KEY_SIGNING_KEY_PASSPHRASE: &str = "signing_key_passphrase";
/// Configuration key for the target compartment.
pub const KEY_COMPARTMENT: &str = "compartment";
