//! Fixture seeding.
//!
//! Scans a directory of JSON documents and writes each one as a full
//! session record. Used by the test harness and local development; the
//! production path never calls this unless a fixture directory is
//! configured.

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

use sessionmgr_core::storage::SessionRepository;

/// Seed one record per file in `dir`. Every file must be a JSON document of
/// the form `{"account_number": <n>, "user_id": <n>, "session_info": {...}}`.
/// Returns the number of records written.
pub async fn seed_from_dir(repository: &dyn SessionRepository, dir: &Path) -> Result<usize> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("cannot read fixture directory {}", dir.display()))?;

    let mut seeded = 0;
    for entry in entries {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }

        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("cannot read fixture {}", path.display()))?;
        let record: Value = serde_json::from_str(&text)
            .with_context(|| format!("fixture {} is not valid JSON", path.display()))?;

        let account_number = record
            .get("account_number")
            .and_then(Value::as_i64)
            .with_context(|| format!("fixture {} is missing account_number", path.display()))?;
        let user_id = record
            .get("user_id")
            .and_then(Value::as_i64)
            .with_context(|| format!("fixture {} is missing user_id", path.display()))?;
        let session = record
            .get("session_info")
            .with_context(|| format!("fixture {} is missing session_info", path.display()))?;

        repository
            .put_session(account_number, user_id, session)
            .await?;
        seeded += 1;
    }

    tracing::info!(count = seeded, dir = %dir.display(), "seeded fixture records");
    Ok(seeded)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::storage::inmemory::InMemoryStore;

    use super::*;

    #[tokio::test]
    async fn test_seed_writes_one_record_per_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("alice.json"),
            r#"{"account_number": 3, "user_id": 1002, "session_info": {"userName": "alice"}}"#,
        )
        .unwrap();
        std::fs::write(
            dir.path().join("bob.json"),
            r#"{"account_number": 3, "user_id": 2001, "session_info": {"userName": "bob"}}"#,
        )
        .unwrap();

        let store = InMemoryStore::default();
        let seeded = seed_from_dir(&store, dir.path()).await.unwrap();
        assert_eq!(seeded, 2);

        let session = store.get_session(3, 1002).await.unwrap().unwrap();
        assert_eq!(session, json!({"userName": "alice"}));
    }

    #[tokio::test]
    async fn test_seed_rejects_incomplete_records() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("broken.json"),
            r#"{"session_info": {"userName": "nobody"}}"#,
        )
        .unwrap();

        let store = InMemoryStore::default();
        assert!(seed_from_dir(&store, dir.path()).await.is_err());
    }
}
