pub mod password;
pub mod token;

pub use password::Argon2PasswordEncryptor;
pub use token::JwtUserTokenProvider;
