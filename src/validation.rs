use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use validator::{ValidationError, ValidationErrors};

/// Field name to messages, serialised as a plain JSON object.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// Merges derive-level failures into this map.
    pub fn merge(&mut self, errors: ValidationErrors) {
        for (field, failures) in errors.field_errors() {
            for failure in failures {
                self.add(&field.to_string(), message_for(failure));
            }
        }
    }

    /// Every message, ordered by field name.
    pub fn into_messages(self) -> Vec<String> {
        self.0.into_values().flatten().collect()
    }

    /// `Ok(value)` when no error was recorded.
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields = Self::new();
        fields.merge(errors);
        fields
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.0.keys().map(String::as_str).collect();
        write!(f, "invalid fields: {}", fields.join(", "))
    }
}

fn message_for(error: &ValidationError) -> String {
    match &error.message {
        Some(message) => message.to_string(),
        None => format!("Invalid value ({}).", error.code),
    }
}

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

/// Digits plus the usual separators, with at least one digit. Blank values
/// are left to the length rules.
pub fn phone_number(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(());
    }
    let allowed = value
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')'));
    if allowed && value.chars().any(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(invalid("phone", "Enter a valid phone number."))
    }
}

/// Letters, digits and @/./+/-/_ only.
pub fn username_chars(value: &str) -> Result<(), ValidationError> {
    if value
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'))
    {
        Ok(())
    } else {
        Err(invalid(
            "username",
            "Username may contain letters, digits and @/./+/-/_ only.",
        ))
    }
}
