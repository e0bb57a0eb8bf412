//! Field checks shared by the entity modules.
//!
//! Violations are collected per record and reported together as
//! `Validation error: <first>, <second>` in field order.

use crate::errors::ModelError;
use crate::object_id::ObjectId;

pub const NAME_MAX_LEN: usize = 100;

#[derive(Debug, Default)]
pub struct FieldErrors(Vec<&'static str>);

impl FieldErrors {
    pub fn push(&mut self, message: &'static str) {
        self.0.push(message);
    }

    #[cfg(test)]
    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_result(self) -> Result<(), ModelError> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(ModelError::Validation(format!("Validation error: {}", self.0.join(", "))))
        }
    }
}

/// Trim a display name and check it is present and at most 100 characters.
pub fn check_name(errors: &mut FieldErrors, value: &str, required: &'static str, too_long: &'static str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.push(required);
    } else if trimmed.chars().count() > NAME_MAX_LEN {
        errors.push(too_long);
    }
    trimmed.to_string()
}

/// Check a parent reference has the identifier shape; returns it lowercased.
pub fn check_reference(errors: &mut FieldErrors, value: &str, required: &'static str, invalid: &'static str) -> String {
    if value.is_empty() {
        errors.push(required);
        return String::new();
    }
    match ObjectId::parse_str(value) {
        Ok(id) => id.to_hex(),
        Err(_) => {
            errors.push(invalid);
            value.to_string()
        }
    }
}

/// Dotted-quad IPv4: four octets of one to three digits, each at most 255.
/// Leading zeros are accepted.
pub fn is_valid_ipv4(value: &str) -> bool {
    let octets: Vec<&str> = value.split('.').collect();
    octets.len() == 4
        && octets.iter().all(|o| {
            (1..=3).contains(&o.len())
                && o.bytes().all(|b| b.is_ascii_digit())
                && o.parse::<u16>().map(|n| n <= 255).unwrap_or(false)
        })
}
