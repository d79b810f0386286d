//! Credential resolution.

use crate::error::Result;
use async_trait::async_trait;
use serde::Deserialize;

fn default_time_step() -> u64 {
    30
}

/// Shared-secret material for one principal.
///
/// Resolved fresh for every authentication attempt; never cached or
/// persisted by this crate.
#[derive(Debug, Clone, Deserialize)]
pub struct Credential {
    /// Base32-encoded shared secret.
    pub shared_key: String,
    /// TOTP validity window in seconds (default: 30).
    #[serde(default = "default_time_step")]
    pub time_step: u64,
}

impl Credential {
    /// Create a credential with the default 30-second time step.
    pub fn new(shared_key: impl Into<String>) -> Self {
        Self {
            shared_key: shared_key.into(),
            time_step: default_time_step(),
        }
    }

    /// Set the time step in seconds.
    pub fn time_step(mut self, seconds: u64) -> Self {
        self.time_step = seconds;
        self
    }
}

/// Resolves the shared secret for the principal attempting authentication.
///
/// Implement this for your storage layer. The resolver is invoked exactly
/// once per authentication attempt; a resolution failure surfaces as an
/// [`Error`](crate::Outcome::Error) outcome and the TOTP check is skipped.
///
/// # Example
///
/// ```rust,ignore
/// use totp_strategy::{Credential, Result, SetupResolver};
/// use async_trait::async_trait;
///
/// struct DbResolver {
///     db: DatabaseConnection,
/// }
///
/// #[async_trait]
/// impl SetupResolver for DbResolver {
///     type Principal = String;
///
///     async fn resolve(&self, user_id: &String) -> Result<Credential> {
///         let row = self.db.find_totp_key(user_id).await?;
///         Ok(Credential::new(row.key).time_step(row.period))
///     }
/// }
/// ```
#[async_trait]
pub trait SetupResolver: Send + Sync {
    /// The identity attempting authentication, as modelled by the host.
    type Principal: Send + Sync;

    /// Look up the credential for `principal`.
    async fn resolve(&self, principal: &Self::Principal) -> Result<Credential>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_time_step() {
        let cred = Credential::new("GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ");
        assert_eq!(cred.time_step, 30);
    }

    #[test]
    fn test_time_step_builder() {
        let cred = Credential::new("GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ").time_step(60);
        assert_eq!(cred.time_step, 60);
    }

    #[test]
    fn test_deserialize_with_default_time_step() {
        let cred: Credential =
            serde_json::from_str(r#"{"shared_key": "GEZDGNBVGY3TQOJQ"}"#).unwrap();
        assert_eq!(cred.shared_key, "GEZDGNBVGY3TQOJQ");
        assert_eq!(cred.time_step, 30);
    }

    #[test]
    fn test_deserialize_with_explicit_time_step() {
        let cred: Credential =
            serde_json::from_str(r#"{"shared_key": "GEZDGNBVGY3TQOJQ", "time_step": 60}"#)
                .unwrap();
        assert_eq!(cred.time_step, 60);
    }
}
