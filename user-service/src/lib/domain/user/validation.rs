use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

pub const USERNAME_MIN_LENGTH: usize = 5;
pub const USERNAME_MAX_LENGTH: usize = 50;

pub const PHONE_NUMBER_MIN_LENGTH: usize = 10;
pub const PHONE_NUMBER_MAX_LENGTH: usize = 15;

pub const NAME_MIN_LENGTH: usize = 3;
pub const NAME_MAX_LENGTH: usize = 255;

pub const PASSWORD_MIN_LENGTH: usize = 6;
pub const PASSWORD_MAX_LENGTH: usize = 64;

/// Letters, numbers, underscores and dashes. Applied after lowercasing.
static USERNAME_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z0-9_-]+$").unwrap());

/// `+62` country prefix followed by digits only.
static PHONE_NUMBER_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+62[0-9]+$").unwrap());

/// Reasons collected for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldErrors {
    pub field: String,
    pub reasons: Vec<String>,
}

/// Aggregated validation failure.
///
/// Collects every violated rule of a validation pass, keyed by field, in
/// the order the fields were first reported. Renders as
/// `field: reason1,reason2;other: reason` which is the body clients see.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationError {
    fields: Vec<FieldErrors>,
}

impl ValidationError {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a reason against a field, keeping first-seen field order.
    pub fn add_error(&mut self, field: &str, reason: impl Into<String>) {
        let reason = reason.into();
        match self.fields.iter_mut().find(|f| f.field == field) {
            Some(existing) => existing.reasons.push(reason),
            None => self.fields.push(FieldErrors {
                field: field.to_string(),
                reasons: vec![reason],
            }),
        }
    }

    /// Append every reason of `other`, field by field.
    pub fn merge(&mut self, other: ValidationError) {
        for field in other.fields {
            for reason in field.reasons {
                self.add_error(&field.field, reason);
            }
        }
    }

    pub fn has_error(&self) -> bool {
        !self.fields.is_empty()
    }

    pub fn fields(&self) -> &[FieldErrors] {
        &self.fields
    }

    /// Turn the accumulator into a result for `value`.
    ///
    /// # Errors
    /// Returns `self` when at least one reason was recorded.
    pub fn into_result<T>(self, value: T) -> Result<T, ValidationError> {
        if self.has_error() {
            Err(self)
        } else {
            Ok(value)
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, field) in self.fields.iter().enumerate() {
            if index > 0 {
                f.write_str(";")?;
            }
            write!(f, "{}: {}", field.field, field.reasons.join(","))?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

fn length_reason(min: usize, max: usize) -> String {
    format!("must be between {} and {} characters in length", min, max)
}

fn has_length_between(value: &str, min: usize, max: usize) -> bool {
    let length = value.chars().count();
    (min..=max).contains(&length)
}

/// Expects an already lowercased username.
pub fn validate_username(username: &str, errors: &mut ValidationError) {
    if !has_length_between(username, USERNAME_MIN_LENGTH, USERNAME_MAX_LENGTH) {
        errors.add_error(
            "username",
            length_reason(USERNAME_MIN_LENGTH, USERNAME_MAX_LENGTH),
        );
    }

    if !USERNAME_PATTERN.is_match(username) {
        errors.add_error(
            "username",
            "can only contain letter, numbers, underscores, and dashes",
        );
    }
}

pub fn validate_phone_number(phone_number: &str, errors: &mut ValidationError) {
    if !has_length_between(
        phone_number,
        PHONE_NUMBER_MIN_LENGTH,
        PHONE_NUMBER_MAX_LENGTH,
    ) {
        errors.add_error(
            "phoneNumber",
            length_reason(PHONE_NUMBER_MIN_LENGTH, PHONE_NUMBER_MAX_LENGTH),
        );
    }

    if !PHONE_NUMBER_PATTERN.is_match(phone_number) {
        errors.add_error(
            "phoneNumber",
            "must start with '+62' and only containt number",
        );
    }
}

pub fn validate_name(name: &str, errors: &mut ValidationError) {
    if !has_length_between(name, NAME_MIN_LENGTH, NAME_MAX_LENGTH) {
        errors.add_error("name", length_reason(NAME_MIN_LENGTH, NAME_MAX_LENGTH));
    }
}

pub fn validate_password(password: &str, errors: &mut ValidationError) {
    if !has_length_between(password, PASSWORD_MIN_LENGTH, PASSWORD_MAX_LENGTH) {
        errors.add_error(
            "password",
            length_reason(PASSWORD_MIN_LENGTH, PASSWORD_MAX_LENGTH),
        );
    }

    if !is_strong_password(password) {
        errors.add_error(
            "password",
            "containing at least 1 capital characters AND 1 number AND 1 special (nonalpha-numeric) characters",
        );
    }
}

/// Uppercase, lowercase, digit and ASCII symbol must all be present.
fn is_strong_password(password: &str) -> bool {
    let mut has_upper = false;
    let mut has_lower = false;
    let mut has_digit = false;
    let mut has_symbol = false;

    for c in password.chars() {
        if c.is_uppercase() {
            has_upper = true;
        } else if c.is_lowercase() {
            has_lower = true;
        } else if c.is_ascii_digit() {
            has_digit = true;
        } else if is_ascii_symbol(c) {
            has_symbol = true;
        }
    }

    has_upper && has_lower && has_digit && has_symbol
}

fn is_ascii_symbol(c: char) -> bool {
    matches!(c as u32, 33..=47 | 58..=64 | 91..=96 | 123..=126)
}
