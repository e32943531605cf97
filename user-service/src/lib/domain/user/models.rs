use std::fmt;

use chrono::DateTime;
use chrono::Utc;

use crate::user::validation;
use crate::user::validation::ValidationError;

/// User aggregate entity.
///
/// A `User` built through [`User::new`] has passed every field rule. Users
/// read back from storage carry the password hash in `password`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub username: String,
    pub phone_number: String,
    pub gender: Gender,
    /// Plaintext while validating, replaced by its hash before storage.
    pub password: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl User {
    /// Build a user from raw registration input.
    ///
    /// The username is lowercased first, then every field rule runs
    /// (username, gender, phoneNumber, name, password) regardless of
    /// earlier failures.
    ///
    /// # Errors
    /// * `ValidationError` - One aggregated error listing every violated rule
    pub fn new(command: CreateUserCommand) -> Result<Self, ValidationError> {
        let user = Self {
            id: UserId::UNSET,
            name: command.name,
            username: command.username.to_lowercase(),
            phone_number: command.phone_number,
            gender: Gender::from_input(&command.gender),
            password: command.password,
            created_at: None,
            updated_at: None,
        };

        let mut errors = ValidationError::new();
        validation::validate_username(&user.username, &mut errors);
        if user.gender == Gender::Unknown {
            errors.add_error("gender", "can only male and female");
        }
        validation::validate_phone_number(&user.phone_number, &mut errors);
        validation::validate_name(&user.name, &mut errors);
        validation::validate_password(&user.password, &mut errors);

        errors.into_result(user)
    }
}

/// Store-assigned user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(pub i64);

impl UserId {
    /// Identifier of a user that has not been persisted yet.
    pub const UNSET: UserId = UserId(0);

    pub fn is_set(&self) -> bool {
        self.0 != 0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Unknown,
    Male,
    Female,
}

impl Gender {
    /// Case-insensitive match on "male"/"female"; anything else is `Unknown`.
    pub fn from_input(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "male" => Gender::Male,
            "female" => Gender::Female,
            _ => Gender::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Unknown => "",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw registration input, unvalidated.
#[derive(Debug, Clone, Default)]
pub struct CreateUserCommand {
    pub username: String,
    pub phone_number: String,
    pub name: String,
    pub password: String,
    pub gender: String,
}

/// Login credentials as supplied by the caller.
#[derive(Debug, Clone)]
pub struct GenerateUserTokenCommand {
    pub username: String,
    pub password: String,
}

/// Bearer token handed back after a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub value: String,
    /// Lifetime in seconds.
    pub expires_in: i64,
    pub token_type: String,
}

impl Token {
    pub const BEARER: &'static str = "Bearer";

    pub fn bearer(value: String, expires_in: i64) -> Self {
        Self {
            value,
            expires_in,
            token_type: Self::BEARER.to_string(),
        }
    }
}

/// Successful login bookkeeping kept per user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginInformation {
    pub user_id: UserId,
    pub success_login_count: i64,
    pub last_login_at: DateTime<Utc>,
}
