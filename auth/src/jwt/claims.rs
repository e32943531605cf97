use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use super::errors::JwtError;

/// Registered JWT claims (RFC 7519).
///
/// All fields are optional so tokens issued by other parties still decode.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject (user/entity identifier)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Expiration time (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Issued at (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Not before (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nbf: Option<i64>,

    /// Issuer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,

    /// Audience
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,

    /// JWT ID (unique token identifier)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
}

impl Claims {
    /// Create new empty claims.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a complete claim set for a freshly authenticated subject.
    ///
    /// `iat` and `nbf` are set to now, `exp` to now plus `expires_in_seconds`,
    /// and `jti` to a random UUID.
    ///
    /// # Errors
    /// * `InvalidExpiration` - The lifetime is not positive or overflows the clock
    pub fn for_subject(
        subject: impl ToString,
        issuer: impl ToString,
        audience: impl ToString,
        expires_in_seconds: i64,
    ) -> Result<Self, JwtError> {
        let now = Utc::now();
        let expiration = Duration::try_seconds(expires_in_seconds)
            .filter(|lifetime| *lifetime > Duration::zero())
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or(JwtError::InvalidExpiration(expires_in_seconds))?;

        Ok(Self {
            sub: Some(subject.to_string()),
            exp: Some(expiration.timestamp()),
            iat: Some(now.timestamp()),
            nbf: Some(now.timestamp()),
            iss: Some(issuer.to_string()),
            aud: Some(audience.to_string()),
            jti: Some(Uuid::new_v4().to_string()),
        })
    }

    /// Set subject.
    pub fn with_subject(mut self, sub: impl ToString) -> Self {
        self.sub = Some(sub.to_string());
        self
    }

    /// Set expiration (Unix timestamp).
    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = Some(exp);
        self
    }

}
