use thiserror::Error;

/// Error type shared by the shipping service crates.
#[derive(Debug, Error)]
pub enum ShippingError {
    /// The backing store could not accept a new consignment.
    #[error("Storage write failed: {0}")]
    StorageWrite(String),

    /// The caller's deadline passed before the operation started.
    #[error("Deadline exceeded")]
    DeadlineExceeded,

    /// Request parameters could not be decoded.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl ShippingError {
    /// Stable machine-readable code for this error, used in RPC responses.
    pub fn code(&self) -> &'static str {
        match self {
            ShippingError::StorageWrite(_) => "storage_write_failure",
            ShippingError::DeadlineExceeded => "deadline_exceeded",
            ShippingError::InvalidRequest(_) => "invalid_request",
            ShippingError::Serialization(_) => "serialization",
        }
    }
}

impl From<serde_json::Error> for ShippingError {
    fn from(e: serde_json::Error) -> Self {
        ShippingError::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            ShippingError::StorageWrite("disk full".into()).code(),
            "storage_write_failure"
        );
        assert_eq!(ShippingError::DeadlineExceeded.code(), "deadline_exceeded");
        assert_eq!(ShippingError::InvalidRequest("x".into()).code(), "invalid_request");
    }

    #[test]
    fn test_display_includes_cause() {
        let e = ShippingError::StorageWrite("disk full".into());
        assert_eq!(e.to_string(), "Storage write failed: disk full");
    }

    #[test]
    fn test_from_serde_json_error() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let e: ShippingError = err.into();
        assert_eq!(e.code(), "serialization");
    }
}
