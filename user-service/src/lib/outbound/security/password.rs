use crate::user::errors::PasswordError;
use crate::user::ports::PasswordEncryptor;

/// Argon2id password encryptor backed by the auth library.
pub struct Argon2PasswordEncryptor {
    hasher: auth::PasswordHasher,
}

impl Argon2PasswordEncryptor {
    pub fn new() -> Self {
        Self {
            hasher: auth::PasswordHasher::new(),
        }
    }
}

impl Default for Argon2PasswordEncryptor {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordEncryptor for Argon2PasswordEncryptor {
    fn encrypt(&self, data: &[u8], cost: u32) -> Result<String, PasswordError> {
        self.hasher
            .hash(data, cost)
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    fn compare_encrypted_and_data(
        &self,
        encrypted: &str,
        data: &[u8],
    ) -> Result<(), PasswordError> {
        match self.hasher.verify(data, encrypted) {
            Ok(true) => Ok(()),
            Ok(false) => Err(PasswordError::Mismatch),
            Err(e) => Err(PasswordError::VerificationFailed(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encrypt_then_compare() {
        let encryptor = Argon2PasswordEncryptor::new();
        let hash = encryptor.encrypt(b"Asd123!", 1).unwrap();

        assert_ne!(hash, "Asd123!");
        assert_eq!(encryptor.compare_encrypted_and_data(&hash, b"Asd123!"), Ok(()));
        assert_eq!(
            encryptor.compare_encrypted_and_data(&hash, b"Asd123?"),
            Err(PasswordError::Mismatch)
        );
    }

    #[test]
    fn test_invalid_cost_is_hashing_failure() {
        let encryptor = Argon2PasswordEncryptor::new();
        let result = encryptor.encrypt(b"Asd123!", 0);
        assert!(matches!(result, Err(PasswordError::HashingFailed(_))));
    }

    #[test]
    fn test_plaintext_stored_value_is_unreadable() {
        let encryptor = Argon2PasswordEncryptor::new();
        let result = encryptor.compare_encrypted_and_data("Asd123!", b"Asd123!");
        assert!(matches!(result, Err(PasswordError::VerificationFailed(_))));
    }
}
