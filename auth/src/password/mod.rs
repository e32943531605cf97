//! Argon2id password hashing with a caller-chosen time cost.

pub mod argon2;
pub mod errors;

pub use argon2::PasswordHasher;
pub use errors::PasswordError;
