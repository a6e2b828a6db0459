//! Customer entity.

use std::sync::LazyLock;

use common::CustomerId;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

static NAME_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z '-]+$").expect("name pattern"));

/// A customer known to the booking subsystem.
///
/// Referenced, never owned, by a [`crate::Booking`]; the travel agent
/// orchestrator forwards the contact fields to the remote reservation
/// services.
#[derive(Debug, Clone, PartialEq, Eq, Validate, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,

    #[validate(
        length(min = 1, max = 50, message = "name must be 1-50 characters"),
        regex(path = *NAME_FORMAT, message = "please use a name without numbers or specials")
    )]
    pub name: String,

    #[validate(email(message = "invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, max = 25, message = "phone number must be 1-25 characters"))]
    pub phone_number: String,
}

impl Customer {
    /// Creates a customer with a fresh random id.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone_number: impl Into<String>,
    ) -> Self {
        Self {
            id: CustomerId::new(),
            name: name.into(),
            email: email.into(),
            phone_number: phone_number.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::check;

    #[test]
    fn valid_customer_passes() {
        let customer = Customer::new("Jane Doe", "jane.doe@example.com", "0791574891");
        assert!(check(&customer).is_ok());
    }

    #[test]
    fn name_with_digits_is_rejected() {
        let customer = Customer::new("Jane D03", "jane.doe@example.com", "0791574891");
        let violations = check(&customer).unwrap_err();
        assert!(violations.fields().contains_key("name"));
    }

    #[test]
    fn malformed_email_is_rejected() {
        let customer = Customer::new("Jane Doe", "not-an-email", "0791574891");
        let violations = check(&customer).unwrap_err();
        assert_eq!(
            violations.fields().get("email").map(String::as_str),
            Some("invalid email format")
        );
    }

    #[test]
    fn empty_phone_is_rejected() {
        let customer = Customer::new("Jane Doe", "jane.doe@example.com", "");
        assert!(check(&customer).is_err());
    }

    #[test]
    fn serialization_roundtrip() {
        let customer = Customer::new("Jane Doe", "jane.doe@example.com", "0791574891");
        let json = serde_json::to_string(&customer).unwrap();
        let deserialized: Customer = serde_json::from_str(&json).unwrap();
        assert_eq!(customer, deserialized);
    }
}
