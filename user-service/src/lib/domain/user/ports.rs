use async_trait::async_trait;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::GenerateUserTokenCommand;
use crate::domain::user::models::Token;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::PasswordError;
use crate::user::errors::TokenError;
use crate::user::errors::UserError;

/// Port for user use cases, consumed by the transports.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new user.
    ///
    /// # Arguments
    /// * `command` - Raw registration input
    ///
    /// # Returns
    /// Identifier assigned by the store
    ///
    /// # Errors
    /// * `Validation` - Input violates one or more field rules
    /// * `Password` - Hashing failed
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `DatabaseError` - Database operation failed
    /// * `Cancelled` - A port call exceeded its deadline
    async fn create_user(&self, command: CreateUserCommand) -> Result<UserId, UserError>;

    /// Verify credentials and issue a bearer token.
    ///
    /// # Arguments
    /// * `command` - Username and plaintext password
    ///
    /// # Returns
    /// Signed bearer token
    ///
    /// # Errors
    /// * `Authentication` - Unknown username or wrong password (indistinguishable)
    /// * `Token` - Signing failed
    /// * `DatabaseError` - Lookup or login bookkeeping failed
    /// * `Cancelled` - A port call exceeded its deadline
    async fn generate_user_token(
        &self,
        command: GenerateUserTokenCommand,
    ) -> Result<Token, UserError>;
}

/// Write side of user persistence.
#[async_trait]
pub trait UserWriter: Send + Sync + 'static {
    /// Persist a new user.
    ///
    /// # Returns
    /// Identifier assigned by the store
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: &User) -> Result<UserId, UserError>;

    /// Record a successful login.
    ///
    /// Inserts the bookkeeping row with a count of 1 on first login and
    /// atomically increments it afterwards; the last login time is set to now.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn update_login_information(&self, user: &User) -> Result<(), UserError>;
}

/// Read side of user persistence.
#[async_trait]
pub trait UserGetter: Send + Sync + 'static {
    /// Retrieve user by canonical username.
    ///
    /// # Errors
    /// * `NotFoundByUsername` - No user with this username
    /// * `DatabaseError` - Database operation failed
    async fn get_by_username(&self, username: &str) -> Result<User, UserError>;
}

/// One-way password hashing.
pub trait PasswordEncryptor: Send + Sync + 'static {
    /// Hash `data` with the given cost factor.
    fn encrypt(&self, data: &[u8], cost: u32) -> Result<String, PasswordError>;

    /// Check `data` against a stored hash.
    ///
    /// # Errors
    /// * `Mismatch` - Data does not match the hash
    /// * `VerificationFailed` - Stored hash is unreadable
    fn compare_encrypted_and_data(&self, encrypted: &str, data: &[u8])
        -> Result<(), PasswordError>;
}

/// Issues bearer tokens for a subject type.
pub trait TokenProvider<T>: Send + Sync + 'static {
    fn generate(&self, subject: &T) -> Result<Token, TokenError>;
}
