//! The TOTP authentication strategy.

use crate::credential::SetupResolver;
use crate::error::StrategyError;
use crate::lookup::FieldPath;
use crate::totp::{CodeChecker, TotpChecker, TotpOptions};
use serde_json::Value;

/// The result of one authentication attempt.
///
/// Exactly one variant is produced per attempt. A missing or wrong code is
/// a [`Reject`](Outcome::Reject), never an [`Error`](Outcome::Error);
/// errors are reserved for credential-resolution failures.
#[derive(Debug)]
pub enum Outcome<P> {
    /// The code verified; the principal is authenticated.
    Success(P),
    /// The code was absent, malformed, or failed verification.
    Reject,
    /// The setup resolver failed.
    Error(StrategyError),
}

impl<P> Outcome<P> {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn is_reject(&self) -> bool {
        matches!(self, Outcome::Reject)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Outcome::Error(_))
    }

    /// Deliver this outcome to the host's event sink.
    ///
    /// Consumes the outcome and invokes exactly one of the three
    /// notification methods.
    pub fn dispatch<E: AuthEvents<P>>(self, events: &mut E) {
        match self {
            Outcome::Success(principal) => events.on_success(principal),
            Outcome::Reject => events.on_reject(),
            Outcome::Error(cause) => events.on_error(cause),
        }
    }
}

/// Host notification contract.
///
/// Replaces the host framework's success/fail/error base-class signaling
/// with an injected interface, so the strategy stays independent of any
/// particular middleware lifecycle.
pub trait AuthEvents<P> {
    /// The principal authenticated successfully.
    fn on_success(&mut self, principal: P);

    /// Authentication failed normally (bad or missing code).
    fn on_reject(&mut self);

    /// A system error prevented verification.
    fn on_error(&mut self, cause: StrategyError);
}

/// Authenticates requests based on a TOTP value submitted through the
/// request body or query string.
///
/// The field holding the code is configurable with [`code_field`] and
/// supports the bracketed nesting of HTML form submissions. Credential
/// lookup is delegated to a host-supplied [`SetupResolver`].
///
/// [`code_field`]: TotpStrategy::code_field
///
/// # Example
///
/// ```rust,ignore
/// use totp_strategy::{TotpStrategy, TotpOptions};
///
/// let strategy = TotpStrategy::with_options(TotpOptions::new().digits(6))
///     .code_field("creds[totp]");
///
/// let outcome = strategy
///     .authenticate(Some(&body), Some(&query), user_id, &resolver)
///     .await;
/// ```
pub struct TotpStrategy<C = TotpChecker> {
    code_field: FieldPath,
    checker: C,
}

impl TotpStrategy<TotpChecker> {
    /// Create a strategy with default TOTP options.
    pub fn new() -> Self {
        Self::with_options(TotpOptions::default())
    }

    /// Create a strategy with the given TOTP options.
    pub fn with_options(options: TotpOptions) -> Self {
        Self::with_checker(TotpChecker::new(options))
    }
}

impl Default for TotpStrategy<TotpChecker> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: CodeChecker> TotpStrategy<C> {
    /// Create a strategy with a custom code checker.
    pub fn with_checker(checker: C) -> Self {
        Self {
            code_field: FieldPath::parse("code"),
            checker,
        }
    }

    /// Set the field path where the code is found (default: `"code"`).
    pub fn code_field(mut self, spec: &str) -> Self {
        self.code_field = FieldPath::parse(spec);
        self
    }

    /// Run one authentication attempt.
    ///
    /// The body is consulted first; the query string only when the body
    /// yields nothing. The resolver is then invoked for the principal's
    /// credential, and the code is checked against it. A missing code is
    /// not short-circuited: it still goes through resolution and fails the
    /// check, so a resolver failure always surfaces as an error.
    pub async fn authenticate<R>(
        &self,
        body: Option<&Value>,
        query: Option<&Value>,
        principal: R::Principal,
        resolver: &R,
    ) -> Outcome<R::Principal>
    where
        R: SetupResolver,
    {
        let value = self
            .code_field
            .lookup(body)
            .or_else(|| self.code_field.lookup(query));

        if value.is_none() {
            tracing::debug!("TOTP code not present in request body or query");
        }

        let credential = match resolver.resolve(&principal).await {
            Ok(credential) => credential,
            Err(e) => return Outcome::Error(e),
        };

        let code = value.map(scalar_text).unwrap_or_default();

        if self
            .checker
            .check(&code, &credential.shared_key, credential.time_step)
        {
            Outcome::Success(principal)
        } else {
            Outcome::Reject
        }
    }

    /// Run one authentication attempt and deliver the outcome to `events`.
    ///
    /// Exactly one of the three notification methods is invoked.
    pub async fn authenticate_into<R, E>(
        &self,
        body: Option<&Value>,
        query: Option<&Value>,
        principal: R::Principal,
        resolver: &R,
        events: &mut E,
    ) where
        R: SetupResolver,
        E: AuthEvents<R::Principal>,
    {
        self.authenticate(body, query, principal, resolver)
            .await
            .dispatch(events);
    }
}

/// Render a looked-up scalar as the submitted code string.
fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
