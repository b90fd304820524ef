//! Error types for the IonQ Braket adapter.

use thiserror::Error;

/// Result type for Braket operations.
pub type IonqResult<T> = Result<T, IonqError>;

/// Errors that can occur when talking to AWS Braket.
#[derive(Debug, Error)]
pub enum IonqError {
    /// Missing AWS credentials.
    #[error("AWS credentials not found. Configure via environment, SSO, or IAM role.")]
    MissingCredentials,

    /// Missing S3 bucket configuration.
    #[error("S3 bucket not configured. Set QQ_BRAKET_S3_BUCKET environment variable.")]
    MissingS3Bucket,

    /// Malformed task ARN.
    #[error("Invalid task ARN: {0}")]
    InvalidTaskArn(String),

    /// Braket API error.
    #[error("Braket API error: {0}")]
    BraketApi(String),

    /// S3 error.
    #[error("S3 error: {0}")]
    S3Error(String),

    /// Task not found.
    #[error("Task not found: {0}")]
    TaskNotFound(String),

    /// Task failed.
    #[error("Task failed: {0}")]
    TaskFailed(String),

    /// Task was cancelled.
    #[error("Task was cancelled: {0}")]
    TaskCancelled(String),

    /// Circuit conversion error.
    #[error("Circuit conversion error: {0}")]
    CircuitError(String),

    /// Circuit too large for device.
    #[error("Circuit requires {required} qubits but device only has {available}")]
    TooManyQubits {
        /// Qubits needed.
        required: usize,
        /// Qubits available.
        available: usize,
    },

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl From<IonqError> for qq_hal::HalError {
    fn from(e: IonqError) -> Self {
        match e {
            IonqError::MissingCredentials | IonqError::MissingS3Bucket => {
                qq_hal::HalError::AuthenticationFailed(e.to_string())
            }
            IonqError::TaskNotFound(id) => qq_hal::HalError::JobNotFound(id),
            IonqError::TaskFailed(msg) => qq_hal::HalError::JobFailed(msg),
            IonqError::TaskCancelled(_) => qq_hal::HalError::JobCancelled,
            IonqError::TooManyQubits {
                required,
                available,
            } => qq_hal::HalError::CircuitTooLarge(format!(
                "Circuit requires {required} qubits but device only has {available}"
            )),
            IonqError::CircuitError(msg) => qq_hal::HalError::InvalidCircuit(msg),
            IonqError::InvalidTaskArn(msg) => qq_hal::HalError::Configuration(msg),
            _ => qq_hal::HalError::Backend(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_s3_bucket_display() {
        let err = IonqError::MissingS3Bucket;
        assert!(err.to_string().contains("QQ_BRAKET_S3_BUCKET"));
    }

    #[test]
    fn test_too_many_qubits_display() {
        let err = IonqError::TooManyQubits {
            required: 30,
            available: 25,
        };
        let msg = err.to_string();
        assert!(msg.contains("30"));
        assert!(msg.contains("25"));
    }

    // -- HalError conversion tests --

    #[test]
    fn test_missing_credentials_to_hal_auth() {
        let hal: qq_hal::HalError = IonqError::MissingCredentials.into();
        assert!(matches!(hal, qq_hal::HalError::AuthenticationFailed(_)));
    }

    #[test]
    fn test_missing_s3_to_hal_auth() {
        let hal: qq_hal::HalError = IonqError::MissingS3Bucket.into();
        assert!(matches!(hal, qq_hal::HalError::AuthenticationFailed(_)));
    }

    #[test]
    fn test_task_not_found_to_hal() {
        let hal: qq_hal::HalError = IonqError::TaskNotFound("t1".into()).into();
        assert!(matches!(hal, qq_hal::HalError::JobNotFound(id) if id == "t1"));
    }

    #[test]
    fn test_task_failed_to_hal() {
        let hal: qq_hal::HalError = IonqError::TaskFailed("boom".into()).into();
        assert!(matches!(hal, qq_hal::HalError::JobFailed(msg) if msg == "boom"));
    }

    #[test]
    fn test_task_cancelled_to_hal() {
        let hal: qq_hal::HalError = IonqError::TaskCancelled("user".into()).into();
        assert!(matches!(hal, qq_hal::HalError::JobCancelled));
    }

    #[test]
    fn test_too_many_qubits_to_hal() {
        let hal: qq_hal::HalError = IonqError::TooManyQubits {
            required: 30,
            available: 25,
        }
        .into();
        assert!(matches!(hal, qq_hal::HalError::CircuitTooLarge(_)));
    }

    #[test]
    fn test_circuit_error_to_hal() {
        let hal: qq_hal::HalError = IonqError::CircuitError("bad gate".into()).into();
        assert!(matches!(hal, qq_hal::HalError::InvalidCircuit(_)));
    }

    #[test]
    fn test_braket_api_to_hal_backend() {
        let hal: qq_hal::HalError = IonqError::BraketApi("server error".into()).into();
        assert!(matches!(hal, qq_hal::HalError::Backend(_)));
    }
}
