use auth::Claims;
use auth::JwtError;
use auth::JwtHandler;

use crate::domain::user::models::Token;
use crate::domain::user::models::User;
use crate::user::errors::TokenError;
use crate::user::ports::TokenProvider;

/// Issues signed JWT bearer tokens for users.
///
/// The subject is the stringified user id; issuer and audience come from
/// configuration.
pub struct JwtUserTokenProvider {
    handler: JwtHandler,
    issuer: String,
    audience: String,
    expires_in_seconds: i64,
}

impl JwtUserTokenProvider {
    pub fn new(
        handler: JwtHandler,
        issuer: impl Into<String>,
        audience: impl Into<String>,
        expires_in_seconds: i64,
    ) -> Self {
        let issuer = issuer.into();
        let audience = audience.into();
        Self {
            handler: handler
                .with_expected_issuer(&issuer)
                .with_expected_audience(&audience),
            issuer,
            audience,
            expires_in_seconds,
        }
    }

    /// Decode a token previously issued by this provider.
    ///
    /// # Errors
    /// * `TokenExpired` - Token is past its `exp`
    /// * `DecodingFailed` - Bad signature, wrong issuer/audience or malformed token
    pub fn validate(&self, token: &str) -> Result<Claims, JwtError> {
        self.handler.decode(token)
    }
}

impl TokenProvider<User> for JwtUserTokenProvider {
    fn generate(&self, subject: &User) -> Result<Token, TokenError> {
        let claims = Claims::for_subject(
            subject.id,
            &self.issuer,
            &self.audience,
            self.expires_in_seconds,
        )
        .map_err(|e| TokenError::SigningFailed(e.to_string()))?;

        let value = self
            .handler
            .encode(&claims)
            .map_err(|e| TokenError::SigningFailed(e.to_string()))?;

        Ok(Token::bearer(value, self.expires_in_seconds))
    }
}
