//! Goal-hierarchy rules shared by the API and repository layers.
//!
//! The hierarchy is strictly parent-owns-child:
//! `User 1--* Objective 1--* KeyResult 1--* Task`. The helpers here validate
//! user input before anything is written and keep the
//! `0 <= progress <= target` invariant in one place.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};
use validator::ValidateEmail;

use crate::error::CoreError;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum length for objective names and key result / task descriptions.
pub const MAX_TEXT_LENGTH: usize = 255;

/// Maximum length for an email address (RFC 5321 path limit).
pub const MAX_EMAIL_LENGTH: usize = 254;

// ---------------------------------------------------------------------------
// Credentials
// ---------------------------------------------------------------------------

/// Normalize an email address for storage and lookup (trimmed, lower-cased).
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Normalize and validate an email address.
///
/// Returns the normalized form on success so callers store exactly what was
/// validated.
pub fn validate_email(email: &str) -> Result<String, CoreError> {
    let normalized = normalize_email(email);
    if normalized.len() > MAX_EMAIL_LENGTH || !normalized.validate_email() {
        return Err(CoreError::InvalidEmail(email.trim().to_string()));
    }
    Ok(normalized)
}

/// Reject empty passwords. Strength policy beyond that is left to clients.
pub fn validate_password(password: &str) -> Result<(), CoreError> {
    if password.is_empty() {
        return Err(CoreError::Validation("password must not be empty".to_string()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Hierarchy fields
// ---------------------------------------------------------------------------

/// Trim a required text field and check it is non-empty and not too long.
///
/// `field` names the input in the error message (e.g. `"name"`).
pub fn validate_text(field: &str, value: &str) -> Result<String, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    if trimmed.chars().count() > MAX_TEXT_LENGTH {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {MAX_TEXT_LENGTH} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Trim an optional text field. Blank strings collapse to `None`.
pub fn normalize_optional_text(field: &str, value: Option<&str>) -> Result<Option<String>, CoreError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => validate_text(field, v).map(Some),
    }
}

/// A key result target must be strictly positive.
pub fn validate_target(target: i32) -> Result<(), CoreError> {
    if target <= 0 {
        return Err(CoreError::Validation(format!(
            "target must be greater than 0, got {target}"
        )));
    }
    Ok(())
}

/// Enforce `0 <= progress <= target`, returning the progress narrowed to the
/// column type.
///
/// Accepts `i64` so request values beyond the `i32` range are reported as
/// out of range instead of failing to parse.
pub fn validate_progress(progress: i64, target: i32) -> Result<i32, CoreError> {
    match i32::try_from(progress) {
        Ok(p) if (0..=target).contains(&p) => Ok(p),
        _ => Err(CoreError::InvalidProgress { progress, target }),
    }
}

// ---------------------------------------------------------------------------
// Due dates
// ---------------------------------------------------------------------------

/// Parse a due date given either as an RFC 3339 timestamp or a plain
/// `YYYY-MM-DD` date (interpreted as midnight UTC).
pub fn parse_due_date(raw: &str) -> Result<Timestamp, CoreError> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| {
            CoreError::Validation(format!(
                "dueDate must be an RFC 3339 timestamp or YYYY-MM-DD, got '{raw}'"
            ))
        })
}

/// Serde adapter for optional `dueDate` fields in request bodies.
///
/// Use with `#[serde(default, deserialize_with = "deserialize_due_date")]`.
/// `null`, a missing field, and an empty string all yield `None`.
pub fn deserialize_due_date<'de, D>(deserializer: D) -> Result<Option<Timestamp>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => parse_due_date(s)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

// ---------------------------------------------------------------------------
// Patches
// ---------------------------------------------------------------------------

/// Serde adapter for clearable fields in update bodies.
///
/// Use with `#[serde(default, deserialize_with = "deserialize_patch")]`:
/// a missing field is `None` (leave as is), `null` is `Some(None)` (clear),
/// and a value is `Some(Some(value))`.
pub fn deserialize_patch<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Clearable variant of [`deserialize_due_date`]: `null` and `""` clear.
pub fn deserialize_due_date_patch<'de, D>(
    deserializer: D,
) -> Result<Option<Option<Timestamp>>, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_due_date(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::{Datelike, Timelike};

    #[test]
    fn email_is_normalized() {
        assert_eq!(validate_email("  A@X.com ").unwrap(), "a@x.com");
    }

    #[test]
    fn malformed_email_rejected() {
        assert_matches!(validate_email("not-an-email"), Err(CoreError::InvalidEmail(_)));
        assert_matches!(validate_email(""), Err(CoreError::InvalidEmail(_)));
        assert_matches!(validate_email("a@"), Err(CoreError::InvalidEmail(_)));
    }

    #[test]
    fn empty_password_rejected() {
        assert_matches!(validate_password(""), Err(CoreError::Validation(_)));
        assert!(validate_password("pw1").is_ok());
    }

    #[test]
    fn text_is_trimmed_and_required() {
        assert_eq!(validate_text("name", "  Ship v1 ").unwrap(), "Ship v1");
        assert_matches!(validate_text("name", "   "), Err(CoreError::Validation(msg)) if msg.contains("name"));
    }

    #[test]
    fn overlong_text_rejected() {
        let long = "x".repeat(MAX_TEXT_LENGTH + 1);
        assert_matches!(validate_text("description", &long), Err(CoreError::Validation(_)));
    }

    #[test]
    fn blank_optional_text_is_none() {
        assert_eq!(normalize_optional_text("description", Some("  ")).unwrap(), None);
        assert_eq!(normalize_optional_text("description", None).unwrap(), None);
        assert_eq!(
            normalize_optional_text("description", Some(" why ")).unwrap(),
            Some("why".to_string())
        );
    }

    #[test]
    fn target_must_be_positive() {
        assert!(validate_target(1).is_ok());
        assert_matches!(validate_target(0), Err(CoreError::Validation(_)));
        assert_matches!(validate_target(-5), Err(CoreError::Validation(_)));
    }

    #[test]
    fn progress_bounds_are_inclusive() {
        assert_eq!(validate_progress(0, 10).unwrap(), 0);
        assert_eq!(validate_progress(10, 10).unwrap(), 10);
        assert_matches!(
            validate_progress(11, 10),
            Err(CoreError::InvalidProgress { progress: 11, target: 10 })
        );
        assert_matches!(validate_progress(-1, 10), Err(CoreError::InvalidProgress { .. }));
    }

    #[test]
    fn progress_beyond_i32_is_out_of_range() {
        assert_matches!(
            validate_progress(3_000_000_000, 10),
            Err(CoreError::InvalidProgress { progress: 3_000_000_000, target: 10 })
        );
        assert_matches!(
            validate_progress(i64::MIN, i32::MAX),
            Err(CoreError::InvalidProgress { .. })
        );
    }

    #[test]
    fn due_date_accepts_plain_date() {
        let ts = parse_due_date("2026-12-31").unwrap();
        assert_eq!((ts.year(), ts.month(), ts.day()), (2026, 12, 31));
        assert_eq!(ts.hour(), 0);
    }

    #[test]
    fn due_date_accepts_rfc3339_with_offset() {
        let ts = parse_due_date("2026-03-01T10:00:00+02:00").unwrap();
        assert_eq!(ts.hour(), 8);
    }

    #[test]
    fn due_date_rejects_garbage() {
        assert_matches!(parse_due_date("next friday"), Err(CoreError::Validation(_)));
    }

    #[derive(Debug, serde::Deserialize)]
    struct Body {
        #[serde(default, deserialize_with = "deserialize_due_date")]
        due: Option<Timestamp>,
    }

    #[test]
    fn due_date_serde_adapter() {
        let b: Body = serde_json::from_str(r#"{"due": "2026-01-02"}"#).unwrap();
        assert!(b.due.is_some());
        let b: Body = serde_json::from_str(r#"{"due": null}"#).unwrap();
        assert!(b.due.is_none());
        let b: Body = serde_json::from_str("{}").unwrap();
        assert!(b.due.is_none());
        assert!(serde_json::from_str::<Body>(r#"{"due": "soon"}"#).is_err());
    }

    #[derive(Debug, serde::Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "deserialize_patch")]
        note: Option<Option<String>>,
        #[serde(default, deserialize_with = "deserialize_due_date_patch")]
        due: Option<Option<Timestamp>>,
    }

    #[test]
    fn patch_distinguishes_missing_null_and_value() {
        let p: Patch = serde_json::from_str("{}").unwrap();
        assert_eq!(p.note, None);
        assert_eq!(p.due, None);

        let p: Patch = serde_json::from_str(r#"{"note": null, "due": null}"#).unwrap();
        assert_eq!(p.note, Some(None));
        assert_eq!(p.due, Some(None));

        let p: Patch = serde_json::from_str(r#"{"note": "hi", "due": "2026-05-01"}"#).unwrap();
        assert_eq!(p.note, Some(Some("hi".to_string())));
        assert!(matches!(p.due, Some(Some(_))));
    }
}
