use chrono::{DateTime, NaiveDate};
use serde::Serialize;
use serde_json::Value;
use validator::{Validate, ValidationError};

use crate::errors::AppError;

/// Shape check only: `local@domain.tld` with no whitespace and a single `@`.
pub fn is_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if !is_email(email) {
        let mut err = ValidationError::new("email");
        err.message = Some("Invalid email format".into());
        return Err(err);
    }
    Ok(())
}

/// Fails on the first listed field that is absent, null or an empty string.
/// Field names are the serialized names of `input`.
pub fn require_fields<T: Serialize>(input: &T, fields: &[&str]) -> Result<(), AppError> {
    let value = serde_json::to_value(input).map_err(|err| AppError::Upstream(err.to_string()))?;
    for field in fields {
        let missing = match value.get(field) {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) => s.is_empty(),
            Some(_) => false,
        };
        if missing {
            return Err(AppError::Validation(format!("Missing required field: {}", field)));
        }
    }
    Ok(())
}

/// Runs the derived rules and reports the message of the first failing field
/// in `priority` order, so callers always see the same error for the same input.
pub fn validate_payload<T: Validate>(payload: &T, priority: &[&'static str]) -> Result<(), AppError> {
    payload.validate().map_err(|errors| {
        let field_errors = errors.field_errors();
        let message = priority
            .iter()
            .filter_map(|field| field_errors.get(field))
            .flat_map(|errs| errs.iter())
            .find_map(|err| err.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| errors.to_string());
        AppError::Validation(message)
    })
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp, keeping only the calendar date.
pub fn parse_joining_date(raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|dt| dt.date_naive()))
        .map_err(|_| AppError::Validation("Invalid date_of_joining".to_string()))
}
