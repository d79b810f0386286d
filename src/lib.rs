//! TOTP authentication strategy.
//!
//! Validates a time-based one-time password submitted through a request
//! body or query string. Credential lookup is delegated to a host-supplied
//! [`SetupResolver`] and the TOTP algorithm itself to the `totp-rs`
//! library; this crate wires the two together and reports exactly one of
//! three outcomes per attempt: success, reject, or error.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use totp_strategy::{Credential, Outcome, Result, SetupResolver, TotpStrategy};
//! use async_trait::async_trait;
//!
//! struct KeyStore;
//!
//! #[async_trait]
//! impl SetupResolver for KeyStore {
//!     type Principal = String;
//!
//!     async fn resolve(&self, user_id: &String) -> Result<Credential> {
//!         let key = load_totp_key(user_id).await?;
//!         Ok(Credential::new(key))
//!     }
//! }
//!
//! let strategy = TotpStrategy::new();
//!
//! match strategy.authenticate(Some(&body), Some(&query), user_id, &KeyStore).await {
//!     Outcome::Success(user) => grant_session(user),
//!     Outcome::Reject => deny(),
//!     Outcome::Error(cause) => fail_request(cause),
//! }
//! ```
//!
//! # Design
//!
//! - The code field is configurable and supports the bracketed nesting of
//!   HTML form submissions (`creds[totp]`).
//! - A missing or wrong code is a rejection, not an error; errors are
//!   reserved for resolver failures.
//! - All configuration is immutable after construction, so concurrent
//!   authentication attempts share no mutable state.

mod credential;
mod error;
mod lookup;
mod strategy;
mod totp;

pub use credential::{Credential, SetupResolver};
pub use error::{Result, StrategyError};
pub use lookup::FieldPath;
pub use strategy::{AuthEvents, Outcome, TotpStrategy};
pub use totp::{Algorithm, CodeChecker, TotpChecker, TotpOptions};

/// Crate version, as published.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
