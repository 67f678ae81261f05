use thiserror::Error;

/// Errors that can occur during document-store operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("no session for account {account_number}, user {user_id}")]
    NotFound { account_number: i64, user_id: i64 },

    #[error("authentication setup failed: {0}")]
    Authentication(String),

    #[error("connection failed: {0}")]
    Connection(String),

    #[error("query failed: {0}")]
    Query(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("table did not become active in time, current state = {state}")]
    ProvisioningTimeout { state: String },
}

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let error = StoreError::NotFound {
            account_number: 100,
            user_id: 7,
        };
        assert_eq!(error.to_string(), "no session for account 100, user 7");
    }

    #[test]
    fn test_provisioning_timeout_carries_state() {
        let error = StoreError::ProvisioningTimeout {
            state: "CREATING".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "table did not become active in time, current state = CREATING"
        );
    }

    #[test]
    fn test_connection_display() {
        let error = StoreError::Connection("handshake refused".to_string());
        assert_eq!(error.to_string(), "connection failed: handshake refused");
    }
}
