use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
    /// Deadline applied to each storage call made by the use cases.
    #[serde(default = "default_request_timeout_seconds")]
    pub request_timeout_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    /// HS256 secret, used unless both PEM keys are set.
    #[serde(default)]
    pub secret: Option<String>,
    /// RS256 private key (PEM). Takes precedence over `secret` together with `public_key_pem`.
    #[serde(default)]
    pub private_key_pem: Option<String>,
    #[serde(default)]
    pub public_key_pem: Option<String>,
    #[serde(default = "default_expires_seconds")]
    pub expires_seconds: i64,
    pub issuer: String,
    pub audience: String,
}

/// Longest accepted token lifetime (one year).
pub const MAX_JWT_EXPIRES_SECONDS: i64 = 365 * 24 * 60 * 60;

fn default_max_connections() -> u32 {
    5
}

fn default_request_timeout_seconds() -> u64 {
    10
}

fn default_expires_seconds() -> i64 {
    3600
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: DATABASE__URL=postgres://... overrides database.url
            .add_source(Environment::default().separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.jwt.validate()?;

        Ok(config)
    }
}

impl JwtConfig {
    /// Build the JWT handler matching the configured key material.
    ///
    /// # Errors
    /// * `InvalidKey` - PEM keys could not be parsed
    pub fn handler(&self) -> Result<auth::JwtHandler, auth::JwtError> {
        match (&self.private_key_pem, &self.public_key_pem, &self.secret) {
            (Some(private_key), Some(public_key), _) => {
                auth::JwtHandler::from_rsa_pem(private_key.as_bytes(), public_key.as_bytes())
            }
            (_, _, Some(secret)) => Ok(auth::JwtHandler::new(secret.as_bytes())),
            _ => Err(auth::JwtError::InvalidKey(
                "neither jwt.secret nor a jwt key pair is configured".to_string(),
            )),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.expires_seconds <= 0 || self.expires_seconds > MAX_JWT_EXPIRES_SECONDS {
            return Err(ConfigError::Message(format!(
                "jwt.expires_seconds must be between 1 and {}",
                MAX_JWT_EXPIRES_SECONDS
            )));
        }
        let has_key_pair = self.private_key_pem.is_some() && self.public_key_pem.is_some();
        if !has_key_pair && self.secret.is_none() {
            return Err(ConfigError::Message(
                "jwt.secret or jwt.private_key_pem/jwt.public_key_pem must be set".to_string(),
            ));
        }
        Ok(())
    }
}
