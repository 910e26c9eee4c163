//! # Input Validation
//!
//! Field data arriving from forms and spreadsheets is messy. Rather than
//! silently coercing bad values, every sanitizing step returns a
//! [`Validated`] tag so callers can see which path was taken:
//!
//! - `Accepted` - the raw value was used as-is
//! - `Defaulted` - the raw value was replaced, with the reason
//! - `Rejected` - the value is unusable under the active [`InputPolicy`]
//!
//! ## Example
//!
//! ```rust
//! use sipil_core::validation::{parse_acceleration, InputPolicy, Validated};
//!
//! let ss = parse_acceleration("Ss", "0,75 g");
//! assert!(ss.is_defaulted());
//! assert_eq!(ss.value(), Some(&0.0));
//!
//! let strict = InputPolicy::Strict.apply(ss);
//! assert!(matches!(strict, Validated::Rejected { .. }));
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Outcome of a sanitizing step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Validated<T> {
    /// Raw input accepted unchanged
    Accepted { value: T },
    /// Raw input replaced by a fallback value
    Defaulted { value: T, reason: String },
    /// Raw input refused
    Rejected { reason: String },
}

impl<T> Validated<T> {
    /// Wrap an accepted value
    pub fn accepted(value: T) -> Self {
        Validated::Accepted { value }
    }

    /// Wrap a fallback value with the reason it was substituted
    pub fn defaulted(value: T, reason: impl Into<String>) -> Self {
        Validated::Defaulted {
            value,
            reason: reason.into(),
        }
    }

    /// Build a rejection
    pub fn rejected(reason: impl Into<String>) -> Self {
        Validated::Rejected {
            reason: reason.into(),
        }
    }

    /// The usable value, if any
    pub fn value(&self) -> Option<&T> {
        match self {
            Validated::Accepted { value } | Validated::Defaulted { value, .. } => Some(value),
            Validated::Rejected { .. } => None,
        }
    }

    /// Reason text for defaulted and rejected outcomes
    pub fn reason(&self) -> Option<&str> {
        match self {
            Validated::Accepted { .. } => None,
            Validated::Defaulted { reason, .. } | Validated::Rejected { reason } => Some(reason),
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, Validated::Accepted { .. })
    }

    pub fn is_defaulted(&self) -> bool {
        matches!(self, Validated::Defaulted { .. })
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Validated::Rejected { .. })
    }

    /// Promote every substitution to a rejection
    pub fn strict(self) -> Self {
        match self {
            Validated::Defaulted { reason, .. } => Validated::Rejected { reason },
            other => other,
        }
    }

    /// Convert to a `CalcResult`, failing only on `Rejected`.
    pub fn into_result(self, field: &str) -> CalcResult<T> {
        match self {
            Validated::Accepted { value } | Validated::Defaulted { value, .. } => Ok(value),
            Validated::Rejected { reason } => {
                Err(CalcError::invalid_input(field, "<rejected>", reason))
            }
        }
    }
}

/// How sanitizing steps treat values they would otherwise substitute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputPolicy {
    /// Substitute fallback values and report them as `Defaulted`
    #[default]
    Permissive,
    /// Refuse anything that is not `Accepted`
    Strict,
}

impl InputPolicy {
    /// Apply this policy to a sanitizing outcome
    pub fn apply<T>(self, validated: Validated<T>) -> Validated<T> {
        match self {
            InputPolicy::Permissive => validated,
            InputPolicy::Strict => validated.strict(),
        }
    }
}

/// Sanitize a spectral acceleration (g) given as a number.
///
/// Negative and non-finite values fall back to `0.0`.
pub fn sanitize_acceleration(field: &str, value: f64) -> Validated<f64> {
    if !value.is_finite() {
        return Validated::defaulted(0.0, format!("{field} = {value} is not finite; using 0.0"));
    }
    if value < 0.0 {
        return Validated::defaulted(0.0, format!("{field} = {value} is negative; using 0.0"));
    }
    Validated::accepted(value)
}

/// Parse a spectral acceleration (g) from free text.
///
/// Non-numeric text falls back to `0.0`. Surrounding whitespace is ignored.
pub fn parse_acceleration(field: &str, raw: &str) -> Validated<f64> {
    match raw.trim().parse::<f64>() {
        Ok(value) => sanitize_acceleration(field, value),
        Err(_) => Validated::defaulted(
            0.0,
            format!("{field} = '{}' is not numeric; using 0.0", raw.trim()),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_text_accepted() {
        let v = parse_acceleration("Ss", " 0.75 ");
        assert_eq!(v, Validated::accepted(0.75));
        assert!(v.reason().is_none());
    }

    // Non-numeric text is coerced to zero under the permissive policy. Callers
    // that need to catch typos must opt into InputPolicy::Strict.
    #[test]
    fn test_non_numeric_text_coerced_to_zero() {
        let v = parse_acceleration("Ss", "abc");
        assert!(v.is_defaulted());
        assert_eq!(v.value(), Some(&0.0));
        assert!(v.reason().unwrap().contains("not numeric"));
    }

    #[test]
    fn test_negative_and_nan_defaulted() {
        assert!(sanitize_acceleration("S1", -0.2).is_defaulted());
        assert!(sanitize_acceleration("S1", f64::NAN).is_defaulted());
        assert!(parse_acceleration("S1", "inf").is_defaulted());
    }

    #[test]
    fn test_strict_policy_rejects() {
        let v = InputPolicy::Strict.apply(parse_acceleration("Ss", "n/a"));
        assert!(v.is_rejected());
        let err = v.into_result("Ss").unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_strict_policy_keeps_accepted() {
        let v = InputPolicy::Strict.apply(parse_acceleration("Ss", "1.1"));
        assert_eq!(v.into_result("Ss").unwrap(), 1.1);
    }

    #[test]
    fn test_serialization() {
        let v = Validated::defaulted(0.0, "not numeric");
        let json = serde_json::to_string(&v).unwrap();
        assert!(json.contains("\"status\":\"defaulted\""));
        let roundtrip: Validated<f64> = serde_json::from_str(&json).unwrap();
        assert_eq!(v, roundtrip);
    }
}
