//! Validation support shared by all entities.
//!
//! Entities derive `validator::Validate`; callers go through [`check`], which
//! flattens `ValidationErrors` into a [`Violations`] field→message map so the
//! API layer can hand the caller a structured bad-request body.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

/// A field→message map describing why validation failed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Violations(BTreeMap<String, String>);

impl Violations {
    /// Creates a violation map with a single entry.
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut map = BTreeMap::new();
        map.insert(field.into(), message.into());
        Self(map)
    }

    /// Returns the field→message entries.
    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.0
    }

    /// Returns true if no violation was recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for Violations {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for Violations {}

impl From<ValidationErrors> for Violations {
    fn from(errors: ValidationErrors) -> Self {
        let mut map = BTreeMap::new();
        for (field, field_errors) in errors.field_errors() {
            if let Some(error) = field_errors.first() {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| error.code.to_string());
                map.insert(field.to_string(), message);
            }
        }
        Self(map)
    }
}

/// Validates a value, flattening any errors into a [`Violations`] map.
pub fn check<T: Validate>(value: &T) -> Result<(), Violations> {
    value.validate().map_err(Violations::from)
}

/// Custom validator: the date must be strictly in the future.
pub fn in_the_future(date: &DateTime<Utc>) -> Result<(), ValidationError> {
    if *date <= Utc::now() {
        return Err(ValidationError::new("future"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[derive(Validate)]
    struct Probe {
        #[validate(length(min = 1, message = "name is required"))]
        name: String,
        #[validate(custom(function = in_the_future, message = "date must be in the future"))]
        date: DateTime<Utc>,
    }

    #[test]
    fn valid_value_passes() {
        let probe = Probe {
            name: "ok".to_string(),
            date: Utc::now() + Duration::days(1),
        };
        assert!(check(&probe).is_ok());
    }

    #[test]
    fn violations_carry_field_messages() {
        let probe = Probe {
            name: String::new(),
            date: Utc::now() - Duration::days(1),
        };
        let violations = check(&probe).unwrap_err();
        assert_eq!(
            violations.fields().get("name").map(String::as_str),
            Some("name is required")
        );
        assert_eq!(
            violations.fields().get("date").map(String::as_str),
            Some("date must be in the future")
        );
    }

    #[test]
    fn display_joins_entries() {
        let violations = Violations::single("email", "invalid email format");
        assert_eq!(violations.to_string(), "email: invalid email format");
    }

    #[test]
    fn past_date_is_rejected() {
        let yesterday = Utc::now() - Duration::days(1);
        assert!(in_the_future(&yesterday).is_err());
    }

    #[test]
    fn present_instant_is_rejected() {
        let now = Utc::now();
        assert!(in_the_future(&now).is_err());
    }

    #[test]
    fn serializes_as_bare_map() {
        let violations = Violations::single("name", "name is required");
        let json = serde_json::to_string(&violations).unwrap();
        assert_eq!(json, r#"{"name":"name is required"}"#);
    }
}
