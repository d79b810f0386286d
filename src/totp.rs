//! TOTP code checking.

pub use totp_rs::Algorithm;
use totp_rs::{Secret, TOTP};

/// Options for TOTP verification.
///
/// Held as an immutable value by each checker instance, so strategies with
/// different options can coexist in one process without interfering.
#[derive(Clone)]
pub struct TotpOptions {
    /// Number of digits in the code (default: 6).
    pub digits: usize,
    /// Algorithm (default: SHA1 for compatibility).
    pub algorithm: Algorithm,
    /// Accepted clock drift, in time steps on either side (default: 1).
    pub skew: u8,
}

impl Default for TotpOptions {
    fn default() -> Self {
        Self {
            digits: 6,
            algorithm: Algorithm::SHA1,
            skew: 1,
        }
    }
}

impl TotpOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of digits.
    pub fn digits(mut self, digits: usize) -> Self {
        self.digits = digits;
        self
    }

    /// Set the algorithm.
    pub fn algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Set the accepted clock drift in time steps.
    pub fn skew(mut self, skew: u8) -> Self {
        self.skew = skew;
        self
    }
}

/// Checks a submitted code against a shared key.
///
/// Synchronous and pure apart from reading the current wall-clock time.
/// The default implementation is [`TotpChecker`]; tests and hosts with
/// bespoke OTP schemes can substitute their own.
pub trait CodeChecker: Send + Sync {
    /// Returns whether `code` is valid for `shared_key` within the current
    /// `time_step`-second window.
    fn check(&self, code: &str, shared_key: &str, time_step: u64) -> bool;
}

/// [`CodeChecker`] backed by the `totp-rs` library.
#[derive(Clone, Default)]
pub struct TotpChecker {
    options: TotpOptions,
}

impl TotpChecker {
    /// Create a checker with the given options.
    pub fn new(options: TotpOptions) -> Self {
        Self { options }
    }

    /// Check against a specific timestamp (useful for testing).
    pub fn check_at(&self, code: &str, shared_key: &str, time_step: u64, time: u64) -> bool {
        let code = normalize(code);
        match self.build_totp(shared_key, time_step) {
            Some(totp) => totp.check(&code, time),
            None => false,
        }
    }

    fn build_totp(&self, shared_key: &str, time_step: u64) -> Option<TOTP> {
        let secret = match Secret::Encoded(shared_key.to_string()).to_bytes() {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(error = %e, "invalid TOTP shared key");
                return None;
            }
        };

        match TOTP::new(
            self.options.algorithm,
            self.options.digits,
            self.options.skew,
            time_step,
            secret,
        ) {
            Ok(totp) => Some(totp),
            Err(e) => {
                tracing::warn!(error = %e, "failed to construct TOTP");
                None
            }
        }
    }
}

impl CodeChecker for TotpChecker {
    fn check(&self, code: &str, shared_key: &str, time_step: u64) -> bool {
        let code = normalize(code);

        let Some(totp) = self.build_totp(shared_key, time_step) else {
            return false;
        };

        match totp.check_current(&code) {
            Ok(valid) => valid,
            Err(e) => {
                tracing::warn!(error = %e, "TOTP verification error (system time issue?)");
                // Return false rather than error - we don't want to leak
                // information about why verification failed
                false
            }
        }
    }
}

/// Clean the code (remove spaces, dashes).
fn normalize(code: &str) -> String {
    code.replace([' ', '-'], "")
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ";

    fn code_at(time: u64, step: u64) -> String {
        let secret = Secret::Encoded(KEY.to_string()).to_bytes().unwrap();
        TOTP::new(Algorithm::SHA1, 6, 1, step, secret)
            .unwrap()
            .generate(time)
    }

    #[test]
    fn test_valid_code_at_fixed_time() {
        let checker = TotpChecker::default();
        let code = code_at(1_700_000_000, 30);
        assert!(checker.check_at(&code, KEY, 30, 1_700_000_000));
    }

    #[test]
    fn test_wrong_code_rejected() {
        let checker = TotpChecker::default();
        let code = code_at(1_700_000_000, 30);
        let wrong = if code == "000000" { "111111" } else { "000000" };
        assert!(!checker.check_at(wrong, KEY, 30, 1_700_000_000));
    }

    #[test]
    fn test_code_with_spaces_and_dashes() {
        let checker = TotpChecker::default();
        let code = code_at(1_700_000_000, 30);
        let formatted = format!("{} - {}", &code[..3], &code[3..]);
        assert!(checker.check_at(&formatted, KEY, 30, 1_700_000_000));
    }

    #[test]
    fn test_skew_accepts_previous_window() {
        let checker = TotpChecker::default();
        let code = code_at(1_700_000_000 - 30, 30);
        assert!(checker.check_at(&code, KEY, 30, 1_700_000_000));
    }

    #[test]
    fn test_custom_time_step() {
        let checker = TotpChecker::default();
        let code = code_at(1_700_000_000, 60);
        assert!(checker.check_at(&code, KEY, 60, 1_700_000_000));
    }

    #[test]
    fn test_invalid_shared_key_yields_false_not_panic() {
        let checker = TotpChecker::default();
        assert!(!checker.check_at("123456", "not base32!!", 30, 1_700_000_000));
    }

    #[test]
    fn test_too_short_shared_key_yields_false() {
        // Under 128 bits of secret material; totp-rs refuses to build.
        let checker = TotpChecker::default();
        assert!(!checker.check_at("123456", "GEZDGNBV", 30, 1_700_000_000));
    }

    #[test]
    fn test_empty_code_rejected() {
        let checker = TotpChecker::default();
        assert!(!checker.check_at("", KEY, 30, 1_700_000_000));
    }
}
