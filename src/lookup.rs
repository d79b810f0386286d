//! Bracketed field path lookup.
//!
//! Mirrors the array/object syntax of HTML form submissions, so a strategy
//! configured with `creds[totp]` finds the code in
//! `{ "creds": { "totp": "123456" } }`.

use serde_json::Value;

/// A field path parsed from a bracketed specifier.
///
/// Parsed once at strategy construction and reused across requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// Parse a bracketed field specifier into its segments.
    ///
    /// All `]` characters are removed, then the remainder is split on `[`:
    /// `"code"` yields `["code"]`, `"a[b][c]"` yields `["a", "b", "c"]`.
    /// Malformed specifiers never fail to parse; they simply produce
    /// segments that will not match anything.
    pub fn parse(spec: &str) -> Self {
        let flat = spec.replace(']', "");
        Self {
            segments: flat.split('[').map(str::to_string).collect(),
        }
    }

    /// Extract a scalar value from a nested mapping.
    ///
    /// Returns `None` when the object is absent, a key along the path is
    /// missing, or the path ends on a mapping rather than a scalar. A
    /// non-mapping value is returned as soon as it is encountered, even if
    /// path segments remain unconsumed.
    pub fn lookup<'a>(&self, object: Option<&'a Value>) -> Option<&'a Value> {
        let mut current = object?;

        for segment in &self.segments {
            let prop = current.as_object()?.get(segment)?;
            match prop {
                Value::Null => return None,
                Value::Object(_) => current = prop,
                _ => return Some(prop),
            }
        }

        // Every segment consumed but we are still inside a mapping: the
        // caller asked for a scalar, so this counts as not found.
        None
    }
}
