use std::fmt;
use std::path::{Path, PathBuf};

use zeroize::Zeroize;

/// Signing-key passphrase held in a mutable buffer that is wiped on drop.
///
/// The `Debug` impl redacts the contents so the passphrase can never leak
/// through logging or error formatting.
pub struct Passphrase(Vec<u8>);

impl Passphrase {
    pub fn new(value: String) -> Self {
        Passphrase(value.into_bytes())
    }

    /// Expose the raw passphrase bytes. Callers must not copy them into
    /// long-lived allocations.
    pub fn expose(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Drop for Passphrase {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl fmt::Debug for Passphrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Passphrase(***)")
    }
}

/// Immutable bundle of the seven connection parameters.
///
/// Constructed only by the resolvers in this module, which guarantee that
/// every field is present and that the signing-key path exists on disk.
#[derive(Debug)]
pub struct CredentialBundle {
    pub(super) region_uri: String,
    pub(super) tenant_id: String,
    pub(super) user_id: String,
    pub(super) fingerprint: String,
    pub(super) signing_key_file: PathBuf,
    pub(super) passphrase: Passphrase,
    pub(super) compartment: String,
}

impl CredentialBundle {
    pub fn region_uri(&self) -> &str {
        &self.region_uri
    }

    pub fn tenant_id(&self) -> &str {
        &self.tenant_id
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn signing_key_file(&self) -> &Path {
        &self.signing_key_file
    }

    pub fn passphrase(&self) -> &Passphrase {
        &self.passphrase
    }

    pub fn compartment(&self) -> &str {
        &self.compartment
    }
}
