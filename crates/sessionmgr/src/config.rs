use std::{collections::HashMap, env, path::PathBuf};

use sessionmgr_core::credentials::{
    KEY_COMPARTMENT, KEY_FINGERPRINT, KEY_REGION_URI, KEY_SIGNING_KEY_FILE,
    KEY_SIGNING_KEY_PASSPHRASE, KEY_TENANT_ID, KEY_USER_ID,
};

/// Default size of the pooled-connection limit.
pub const DEFAULT_MAX_CONCURRENCY: usize = 10;

/// Default name of the session table (qualified by the compartment at
/// connection time).
pub const DEFAULT_TABLE_NAME: &str = "persistent_session";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Pooled-connection limit for the document store (default: 10)
    pub max_concurrency: usize,
    /// Base name of the session table (default: "persistent_session")
    pub table_name: String,
    /// Optional credentials file; when set, connection parameters are read
    /// from it instead of the environment.
    pub credentials_file: Option<PathBuf>,
    /// Optional directory of fixture documents to seed at startup.
    pub fixture_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `MAX_CONCURRENCY` - pooled-connection limit (default: 10)
    /// - `SESSION_TABLE_NAME` - table base name (default: "persistent_session")
    /// - `SESSION_CREDENTIALS_FILE` - credentials file path (optional)
    /// - `SESSION_FIXTURE_DIR` - fixture document directory (optional)
    pub fn from_env() -> Self {
        Self {
            max_concurrency: env::var("MAX_CONCURRENCY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_CONCURRENCY),
            table_name: env::var("SESSION_TABLE_NAME")
                .unwrap_or_else(|_| DEFAULT_TABLE_NAME.to_string()),
            credentials_file: env::var("SESSION_CREDENTIALS_FILE").ok().map(PathBuf::from),
            fixture_dir: env::var("SESSION_FIXTURE_DIR").ok().map(PathBuf::from),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Collect the connection parameters from `DB_*` environment variables into
/// the map-like source the credential resolver consumes.
pub fn credential_source_from_env() -> HashMap<String, String> {
    let vars = [
        ("DB_REGION_URI", KEY_REGION_URI),
        ("DB_TENANT_ID", KEY_TENANT_ID),
        ("DB_USER_ID", KEY_USER_ID),
        ("DB_KEY_FINGERPRINT", KEY_FINGERPRINT),
        ("DB_SIGNING_KEY_FILE", KEY_SIGNING_KEY_FILE),
        ("DB_SIGNING_KEY_PASSPHRASE", KEY_SIGNING_KEY_PASSPHRASE),
        ("DB_COMPARTMENT", KEY_COMPARTMENT),
    ];

    let mut source = HashMap::new();
    for (env_name, key) in vars {
        if let Ok(value) = env::var(env_name) {
            source.insert(key.to_string(), value);
        }
    }
    source
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        env::remove_var("MAX_CONCURRENCY");
        env::remove_var("SESSION_TABLE_NAME");
        env::remove_var("SESSION_CREDENTIALS_FILE");
        env::remove_var("SESSION_FIXTURE_DIR");

        let config = Config::from_env();

        assert_eq!(config.max_concurrency, DEFAULT_MAX_CONCURRENCY);
        assert_eq!(config.table_name, DEFAULT_TABLE_NAME);
        assert!(config.credentials_file.is_none());
        assert!(config.fixture_dir.is_none());
    }
}
