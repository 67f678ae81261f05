//! Pure mapping from storage errors to HTTP status codes.

use super::StoreError;

/// Maps a [`StoreError`] to the HTTP status code the routing layer should
/// return for a failed request-scoped operation.
///
/// - `NotFound` -> 404
/// - `Timeout` / `ProvisioningTimeout` -> 504
/// - `Connection` -> 503
/// - everything else -> 500
pub fn store_error_to_status_code(error: &StoreError) -> u16 {
    match error {
        StoreError::NotFound { .. } => 404,
        StoreError::Timeout(_) | StoreError::ProvisioningTimeout { .. } => 504,
        StoreError::Connection(_) => 503,
        StoreError::Authentication(_) => 500,
        StoreError::Query(_) => 500,
        StoreError::Serialization(_) => 500,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let error = StoreError::NotFound {
            account_number: 1,
            user_id: 2,
        };
        assert_eq!(store_error_to_status_code(&error), 404);
    }

    #[test]
    fn test_timeout_maps_to_504() {
        assert_eq!(
            store_error_to_status_code(&StoreError::Timeout("GetItem".to_string())),
            504
        );
        assert_eq!(
            store_error_to_status_code(&StoreError::ProvisioningTimeout {
                state: "UPDATING".to_string()
            }),
            504
        );
    }

    #[test]
    fn test_connection_maps_to_503() {
        assert_eq!(
            store_error_to_status_code(&StoreError::Connection("refused".to_string())),
            503
        );
    }

    #[test]
    fn test_query_maps_to_500() {
        assert_eq!(
            store_error_to_status_code(&StoreError::Query("bad expression".to_string())),
            500
        );
    }
}
