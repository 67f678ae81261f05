//! Connection bootstrap.
//!
//! Turns a resolved [`CredentialBundle`] into the one shared [`StoreHandle`]
//! the process uses for its entire lifetime.

use std::sync::Arc;
use std::time::Duration;

use aws_sdk_dynamodb::config::{retry::RetryConfig, timeout::TimeoutConfig, Credentials, Region};
use aws_sdk_dynamodb::Client;
use tokio::sync::Semaphore;

use sessionmgr_core::credentials::CredentialBundle;
use sessionmgr_core::storage::StoreError;

use crate::config::DEFAULT_MAX_CONCURRENCY;

/// Fixed request timeout for every remote call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
/// Bounded retry policy: one retry with a short base delay.
const RETRY_MAX_ATTEMPTS: u32 = 2;
const RETRY_BASE_DELAY: Duration = Duration::from_millis(10);

/// Connection options beyond the credential bundle.
#[derive(Debug, Clone, Copy)]
pub struct ConnectOptions {
    /// Pooled-connection limit (concurrent in-flight requests).
    pub max_concurrency: usize,
}

impl Default for ConnectOptions {
    fn default() -> Self {
        Self {
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }
}

/// Live, pooled connection to the document store.
///
/// Owned by the process for its lifetime and shared across all concurrent
/// request handlers; pool and credential state are set once here and never
/// mutated afterwards.
pub struct StoreHandle {
    pub(crate) client: Client,
    pub(crate) table: String,
    pub(crate) permits: Arc<Semaphore>,
}

impl StoreHandle {
    /// The compartment-qualified session table name.
    pub fn table(&self) -> &str {
        &self.table
    }
}

/// Authenticate with the document store and return a live handle.
///
/// Consumes the bundle; dropping it wipes the signing-key passphrase. The
/// signature algorithm itself is the SDK's concern — this layer only loads
/// the key material and fails with an authentication error when it cannot.
pub async fn connect(
    bundle: CredentialBundle,
    table_name: &str,
    options: ConnectOptions,
) -> Result<StoreHandle, StoreError> {
    let key_material = load_signing_key(&bundle)?;

    // The store accepts request signatures keyed by the
    // tenant/user/fingerprint triple, with the private key as the signing
    // secret.
    let key_id = format!(
        "{}/{}/{}",
        bundle.tenant_id(),
        bundle.user_id(),
        bundle.fingerprint()
    );
    let credentials = Credentials::new(key_id, key_material, None, None, "credential-bundle");

    let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .credentials_provider(credentials)
        .region(Region::new(region_label(bundle.region_uri())))
        .endpoint_url(https_endpoint(bundle.region_uri()))
        .retry_config(
            RetryConfig::standard()
                .with_max_attempts(RETRY_MAX_ATTEMPTS)
                .with_initial_backoff(RETRY_BASE_DELAY),
        )
        .timeout_config(
            TimeoutConfig::builder()
                .operation_timeout(REQUEST_TIMEOUT)
                .build(),
        )
        .load()
        .await;

    let client = Client::new(&sdk_config);

    // Cheap handshake probe; the handle is useless if the endpoint is
    // unreachable, and bootstrap must fail fast.
    client
        .list_tables()
        .limit(1)
        .send()
        .await
        .map_err(|err| StoreError::Connection(format!("handshake failed: {err}")))?;

    let table = format!("{}.{}", bundle.compartment(), table_name);
    tracing::info!(
        endpoint = %https_endpoint(bundle.region_uri()),
        table = %table,
        max_concurrency = options.max_concurrency,
        "connected to document store"
    );

    Ok(StoreHandle {
        client,
        table,
        permits: Arc::new(Semaphore::new(options.max_concurrency)),
    })
}

/// Read and sanity-check the private signing key.
fn load_signing_key(bundle: &CredentialBundle) -> Result<String, StoreError> {
    let path = bundle.signing_key_file();
    let contents = std::fs::read_to_string(path).map_err(|err| {
        StoreError::Authentication(format!("cannot read signing key {}: {err}", path.display()))
    })?;

    if !contents.contains("PRIVATE KEY") {
        return Err(StoreError::Authentication(format!(
            "{} is not a PEM private key",
            path.display()
        )));
    }
    if contents.contains("ENCRYPTED") && bundle.passphrase().is_empty() {
        return Err(StoreError::Authentication(format!(
            "{} is encrypted but no passphrase was supplied",
            path.display()
        )));
    }

    Ok(contents)
}

/// Derive the HTTPS endpoint from the region URI.
fn https_endpoint(region_uri: &str) -> String {
    if region_uri.starts_with("http://") || region_uri.starts_with("https://") {
        region_uri.to_string()
    } else {
        format!("https://{region_uri}")
    }
}

/// Region label for request signing: the first host label of the URI.
fn region_label(region_uri: &str) -> String {
    let host = region_uri
        .trim_start_matches("https://")
        .trim_start_matches("http://");
    host.split(['.', '/', ':'])
        .next()
        .filter(|label| !label.is_empty())
        .unwrap_or("local")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_https_endpoint_adds_scheme_once() {
        assert_eq!(
            https_endpoint("nosql.us-east.example.test"),
            "https://nosql.us-east.example.test"
        );
        assert_eq!(
            https_endpoint("https://nosql.us-east.example.test"),
            "https://nosql.us-east.example.test"
        );
    }

    #[test]
    fn test_region_label_takes_first_host_label() {
        assert_eq!(region_label("nosql.us-east.example.test"), "nosql");
        assert_eq!(region_label("https://store.example.test:8443"), "store");
        assert_eq!(region_label(""), "local");
    }
}
