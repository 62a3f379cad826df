//! Field-level readers used by every request schema.
//!
//! A [`FieldReader`] walks an untrusted JSON object and records one
//! [`ValidationError`] per violated field instead of stopping at the first
//! problem. Readers return `None` for a field exactly when they recorded an
//! error for it (or the field was legitimately absent), so a schema can build its
//! value only when every required field came back `Some` and no error was recorded.

use crate::errors::Error;
use chrono::NaiveDate;
use serde_json::{Map, Value};
use std::{borrow::Cow, str::FromStr};
use validator::{ValidateEmail, ValidateLength, ValidationError, ValidationErrors};

/// Raw request body: a JSON object keyed by field name.
pub type Input = Map<String, Value>;

/// Error key used for violations that do not belong to a single declared field.
pub const UNKNOWN_FIELDS_KEY: &str = "__unknown__";
/// Error key used when the body is not a JSON object at all.
pub const BODY_KEY: &str = "__body__";

/// Builds a validation error with a stable code and a readable message.
pub fn violation(code: &'static str, message: impl Into<Cow<'static, str>>) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

/// Collects violations while reading declared fields out of an [`Input`].
pub struct FieldReader<'a> {
    input: &'a Input,
    errors: ValidationErrors,
}

impl<'a> FieldReader<'a> {
    /// Starts reading `input`; any key outside `declared` is reported immediately.
    pub fn new(input: &'a Input, declared: &[&str]) -> Self {
        let mut errors = ValidationErrors::new();
        let mut unknown: Vec<&str> = input
            .keys()
            .map(String::as_str)
            .filter(|key| !declared.contains(key))
            .collect();
        if !unknown.is_empty() {
            unknown.sort_unstable();
            let mut error = violation(
                "unknown_field",
                format!("unknown field(s): {}", unknown.join(", ")),
            );
            error.add_param(Cow::Borrowed("fields"), &unknown);
            errors.add(UNKNOWN_FIELDS_KEY, error);
        }
        Self { input, errors }
    }

    fn lookup(&self, field: &str) -> Option<&'a Value> {
        self.input.get(field).filter(|value| !value.is_null())
    }

    fn record(&mut self, field: &'static str, error: ValidationError) {
        self.errors.add(field, error);
    }

    /// Field must be present and non-null.
    pub fn required<T>(
        &mut self,
        field: &'static str,
        parse: impl FnOnce(&Value) -> Result<T, ValidationError>,
    ) -> Option<T> {
        let Some(value) = self.lookup(field) else {
            self.record(field, violation("required", format!("{field} is required")));
            return None;
        };
        self.parse_value(field, value, parse)
    }

    /// Field may be absent or null; either way the result is `None`.
    pub fn optional<T>(
        &mut self,
        field: &'static str,
        parse: impl FnOnce(&Value) -> Result<T, ValidationError>,
    ) -> Option<T> {
        let value = self.lookup(field)?;
        self.parse_value(field, value, parse)
    }

    /// Partial-update field that cannot be cleared: absent means "unchanged",
    /// null is a violation.
    pub fn patch<T>(
        &mut self,
        field: &'static str,
        parse: impl FnOnce(&Value) -> Result<T, ValidationError>,
    ) -> Option<T> {
        match self.input.get(field) {
            None => None,
            Some(Value::Null) => {
                self.record(
                    field,
                    violation("invalid_type", format!("{field} cannot be null")),
                );
                None
            }
            Some(value) => self.parse_value(field, value, parse),
        }
    }

    /// Partial-update field that can be cleared: absent is `None`, null is
    /// `Some(None)`, a valid value is `Some(Some(v))`.
    pub fn nullable_patch<T>(
        &mut self,
        field: &'static str,
        parse: impl FnOnce(&Value) -> Result<T, ValidationError>,
    ) -> Option<Option<T>> {
        match self.input.get(field) {
            None => None,
            Some(Value::Null) => Some(None),
            Some(value) => self.parse_value(field, value, parse).map(Some),
        }
    }

    fn parse_value<T>(
        &mut self,
        field: &'static str,
        value: &Value,
        parse: impl FnOnce(&Value) -> Result<T, ValidationError>,
    ) -> Option<T> {
        match parse(value) {
            Ok(parsed) => Some(parsed),
            Err(mut error) => {
                error.add_param(Cow::Borrowed("value"), value);
                self.record(field, error);
                None
            }
        }
    }

    /// True when no violation has been recorded so far.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.errors().is_empty()
    }

    /// Hands back every recorded violation.
    #[must_use]
    pub fn into_errors(self) -> ValidationErrors {
        self.errors
    }
}

/// A string of at most `max` characters that is not blank. The value is returned
/// as given, without trimming.
pub fn text(value: &Value, max: u64) -> Result<String, ValidationError> {
    let Some(s) = value.as_str() else {
        return Err(violation("invalid_type", "expected a string"));
    };
    if s.trim().is_empty() {
        return Err(violation("blank", "must not be empty"));
    }
    let s = s.to_string();
    if !s.validate_length(None, Some(max), None) {
        return Err(violation(
            "too_long",
            format!("must be at most {max} characters"),
        ));
    }
    Ok(s)
}

/// A short identifier made of ASCII letters, digits, `-` and `_`.
pub fn slug(value: &Value, max: u64) -> Result<String, ValidationError> {
    let s = text(value, max)?;
    if s.chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        Ok(s)
    } else {
        Err(violation(
            "invalid_format",
            "may only contain ASCII letters, digits, '-' and '_'",
        ))
    }
}

/// A color token in `#RRGGBB` form.
pub fn hex_color(value: &Value) -> Result<String, ValidationError> {
    let s = text(value, 7)?;
    let is_hex = s.len() == 7
        && s.starts_with('#')
        && s[1..].chars().all(|c| c.is_ascii_hexdigit());
    if is_hex {
        Ok(s)
    } else {
        Err(violation("invalid_format", "must be a color like #FF0000"))
    }
}

/// An ISO 4217 currency code such as `EUR`.
pub fn currency(value: &Value) -> Result<String, ValidationError> {
    let s = text(value, 3)?;
    if iso_currency::Currency::from_code(&s).is_some() {
        Ok(s)
    } else {
        Err(violation(
            "invalid_format",
            format!("'{s}' is not a valid ISO 4217 currency code"),
        ))
    }
}

/// An email address.
pub fn email(value: &Value, max: u64) -> Result<String, ValidationError> {
    let s = text(value, max)?;
    if s.validate_email() {
        Ok(s)
    } else {
        Err(violation("invalid_format", "must be a valid email address"))
    }
}

/// A whole number within `min..=max`. Floats are rejected rather than truncated.
pub fn integer(value: &Value, min: i64, max: i64) -> Result<i64, ValidationError> {
    let Some(n) = value.as_i64() else {
        return Err(violation("invalid_type", "expected an integer"));
    };
    if (min..=max).contains(&n) {
        Ok(n)
    } else {
        Err(violation(
            "out_of_range",
            format!("must be between {min} and {max}"),
        ))
    }
}

/// A calendar date in `YYYY-MM-DD` form.
pub fn date(value: &Value) -> Result<NaiveDate, ValidationError> {
    let Some(s) = value.as_str() else {
        return Err(violation("invalid_type", "expected a date string"));
    };
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .filter(|parsed| parsed.format("%Y-%m-%d").to_string() == s)
        .ok_or_else(|| violation("invalid_format", "must be a date like 2024-01-31"))
}

/// A member of a closed enumeration, matched exactly.
pub fn enumeration<T>(value: &Value) -> Result<T, ValidationError>
where
    T: FromStr<Err = Error>,
{
    let Some(s) = value.as_str() else {
        return Err(violation("invalid_type", "expected a string"));
    };
    s.parse::<T>().map_err(|err| match err {
        Error::InvalidEnumValue { allowed, .. } => {
            let mut error = violation(
                "invalid_enum_value",
                format!("must be one of: {}", allowed.join(", ")),
            );
            error.add_param(Cow::Borrowed("allowed"), &allowed);
            error
        }
        other => violation("invalid_enum_value", other.to_string()),
    })
}
