/// The error type for strategy operations.
///
/// Only system-level failures are errors. A code that is missing,
/// malformed, or simply wrong is a rejection, not an error, and is
/// reported through [`Outcome::Reject`](crate::Outcome::Reject).
#[derive(Debug, thiserror::Error)]
pub enum StrategyError {
    /// The host's setup resolver failed to produce a credential
    /// (e.g. the lookup backend was unavailable).
    #[error("credential resolution failed: {0}")]
    Resolution(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl StrategyError {
    pub fn resolution(msg: impl Into<String>) -> Self {
        Self::Resolution(msg.into())
    }
}

/// Result type alias for strategy operations
pub type Result<T> = std::result::Result<T, StrategyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_error_display() {
        let err = StrategyError::resolution("key store is down");
        assert!(matches!(err, StrategyError::Resolution(_)));
        assert_eq!(
            err.to_string(),
            "credential resolution failed: key store is down"
        );
    }

    #[test]
    fn test_anyhow_error_passthrough() {
        let cause = anyhow::anyhow!("connection refused");
        let err: StrategyError = cause.into();
        assert!(matches!(err, StrategyError::Anyhow(_)));
        assert_eq!(err.to_string(), "connection refused");
    }
}
