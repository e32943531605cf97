use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::OnceCell;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::GenerateUserTokenCommand;
use crate::domain::user::models::Token;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::PasswordError;
use crate::user::errors::UserError;
use crate::user::ports::PasswordEncryptor;
use crate::user::ports::TokenProvider;
use crate::user::ports::UserGetter;
use crate::user::ports::UserServicePort;
use crate::user::ports::UserWriter;

/// Work factor handed to the password encryptor on registration.
pub const PASSWORD_HASH_COST: u32 = 2;

/// Hashed once and compared against when the username is unknown, so both
/// credential failures cost one password comparison.
const PLACEHOLDER_PASSWORD: &str = "placeholder-Password-1!";

/// Upper bound for a single storage call when none is configured.
pub const DEFAULT_PORT_DEADLINE: Duration = Duration::from_secs(10);

/// Domain service implementation for user operations.
///
/// Holds no mutable state; one instance is shared across requests.
pub struct UserService<W, G, E, P>
where
    W: UserWriter,
    G: UserGetter,
    E: PasswordEncryptor,
    P: TokenProvider<User>,
{
    user_writer: Arc<W>,
    user_getter: Arc<G>,
    encryptor: Arc<E>,
    token_provider: Arc<P>,
    port_deadline: Duration,
    placeholder_hash: OnceCell<String>,
}

impl<W, G, E, P> UserService<W, G, E, P>
where
    W: UserWriter,
    G: UserGetter,
    E: PasswordEncryptor,
    P: TokenProvider<User>,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `user_writer` - Persistence for new users and login bookkeeping
    /// * `user_getter` - Lookup by username
    /// * `encryptor` - Password hashing implementation
    /// * `token_provider` - Bearer token issuer
    pub fn new(
        user_writer: Arc<W>,
        user_getter: Arc<G>,
        encryptor: Arc<E>,
        token_provider: Arc<P>,
    ) -> Self {
        Self {
            user_writer,
            user_getter,
            encryptor,
            token_provider,
            port_deadline: DEFAULT_PORT_DEADLINE,
            placeholder_hash: OnceCell::new(),
        }
    }

    /// Override the deadline applied to each storage call.
    pub fn with_port_deadline(mut self, deadline: Duration) -> Self {
        self.port_deadline = deadline;
        self
    }

    async fn within_deadline<T, F>(&self, operation: &str, call: F) -> Result<T, UserError>
    where
        F: Future<Output = Result<T, UserError>>,
    {
        tokio::time::timeout(self.port_deadline, call)
            .await
            .map_err(|_| {
                UserError::Cancelled(format!(
                    "{} exceeded deadline of {}ms",
                    operation,
                    self.port_deadline.as_millis()
                ))
            })?
    }

    /// Runs on the blocking pool.
    async fn encrypt(&self, password: String) -> Result<String, PasswordError> {
        let encryptor = Arc::clone(&self.encryptor);
        tokio::task::spawn_blocking(move || {
            encryptor.encrypt(password.as_bytes(), PASSWORD_HASH_COST)
        })
        .await
        .map_err(|e| PasswordError::HashingFailed(e.to_string()))?
    }

    async fn compare(&self, encrypted: String, password: String) -> Result<(), PasswordError> {
        let encryptor = Arc::clone(&self.encryptor);
        tokio::task::spawn_blocking(move || {
            encryptor.compare_encrypted_and_data(&encrypted, password.as_bytes())
        })
        .await
        .map_err(|e| PasswordError::VerificationFailed(e.to_string()))?
    }

    /// Spend one comparison on an unknown username. The outcome is discarded.
    async fn compare_against_placeholder(&self, password: String) {
        let placeholder = self
            .placeholder_hash
            .get_or_try_init(|| self.encrypt(PLACEHOLDER_PASSWORD.to_string()))
            .await;

        let result = match placeholder {
            Ok(hash) => self.compare(hash.clone(), password).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(()) | Err(PasswordError::Mismatch) => {}
            Err(e) => tracing::warn!(error = %e, "Placeholder password comparison failed"),
        }
    }
}

/// Unknown usernames and wrong passwords must look identical to the caller.
fn collapse_credential_failure(err: UserError) -> UserError {
    match err {
        UserError::NotFoundByUsername(_) | UserError::Password(PasswordError::Mismatch) => {
            UserError::Authentication
        }
        other => other,
    }
}

#[async_trait]
impl<W, G, E, P> UserServicePort for UserService<W, G, E, P>
where
    W: UserWriter,
    G: UserGetter,
    E: PasswordEncryptor,
    P: TokenProvider<User>,
{
    async fn create_user(&self, command: CreateUserCommand) -> Result<UserId, UserError> {
        let mut user = User::new(command)?;

        user.password = self.encrypt(std::mem::take(&mut user.password)).await?;

        let id = self
            .within_deadline("create", self.user_writer.create(&user))
            .await?;

        tracing::info!(user_id = %id, username = %user.username, "User created");
        Ok(id)
    }

    async fn generate_user_token(
        &self,
        command: GenerateUserTokenCommand,
    ) -> Result<Token, UserError> {
        let username = command.username.to_lowercase();

        let lookup = self
            .within_deadline("get_by_username", self.user_getter.get_by_username(&username))
            .await;

        let user = match lookup {
            Ok(user) => user,
            Err(e) => {
                tracing::debug!(username = %username, error = %e, "User lookup failed");
                if matches!(e, UserError::NotFoundByUsername(_)) {
                    self.compare_against_placeholder(command.password).await;
                }
                return Err(collapse_credential_failure(e));
            }
        };

        self.compare(user.password.clone(), command.password)
            .await
            .map_err(|e| {
                tracing::debug!(user_id = %user.id, error = %e, "Password comparison failed");
                collapse_credential_failure(e.into())
            })?;

        let token = self.token_provider.generate(&user)?;

        // A failed login record fails the whole call; the issued token is dropped.
        self.within_deadline(
            "update_login_information",
            self.user_writer.update_login_information(&user),
        )
        .await
        .map_err(|e| {
            tracing::error!(
                user_id = %user.id,
                error = %e,
                "Failed to record login, discarding issued token"
            );
            e
        })?;

        tracing::info!(user_id = %user.id, "User token issued");
        Ok(token)
    }
}
