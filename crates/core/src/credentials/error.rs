use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while resolving connection credentials.
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("expected to find required parameter '{name}'")]
    MissingParameter { name: &'static str },

    #[error("could not find signing key file {path}")]
    CredentialFileNotFound { path: PathBuf },

    #[error("malformed line {line_number} in credentials file: {line:?}")]
    MalformedLine { line_number: usize, line: String },

    #[error("failed to read credentials file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_parameter_names_the_field() {
        let error = CredentialError::MissingParameter { name: "tenant_id" };
        assert_eq!(
            error.to_string(),
            "expected to find required parameter 'tenant_id'"
        );
    }

    #[test]
    fn test_file_not_found_names_the_path() {
        let error = CredentialError::CredentialFileNotFound {
            path: PathBuf::from("/tmp/missing.pem"),
        };
        assert_eq!(
            error.to_string(),
            "could not find signing key file /tmp/missing.pem"
        );
    }
}
