//! Credential primitives shared by the services.
//!
//! Provides:
//! - Password hashing (Argon2id) with a caller-chosen cost factor
//! - JWT claims with the registered RFC 7519 fields
//! - JWT encoding and validation (HS256 shared secret or RS256 key pair)
//!
//! Each service defines its own ports and adapts these implementations to them,
//! so no domain types leak into this crate.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash(b"my_password", 1).unwrap();
//! let is_valid = hasher.verify(b"my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## JWT Tokens
//! ```
//! use auth::{JwtHandler, Claims};
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!")
//!     .with_expected_audience("dating-be");
//! let claims = Claims::for_subject("42", "dating-be", "dating-be", 3600).unwrap();
//! let token = handler.encode(&claims).unwrap();
//! let decoded: Claims = handler.decode(&token).unwrap();
//! assert_eq!(decoded.sub.as_deref(), Some("42"));
//! ```

pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
