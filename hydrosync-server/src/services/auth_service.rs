use std::sync::Arc;

use argon2::password_hash::{SaltString, rand_core};
use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version,
    password_hash,
};

use crate::configs::Hashing;

#[derive(Debug, Clone)]
pub struct Argon2Hash(Argon2<'static>);

/// Password hashing for device credentials.
#[derive(Clone)]
pub struct AuthService {
    hasher: Arc<Argon2Hash>,
}

impl AuthService {
    pub fn new(hashing: &Hashing) -> Result<Self, argon2::Error> {
        let params = Params::new(
            hashing.memory_cost,
            hashing.time_cost,
            hashing.parallelism,
            None,
        )?;
        let hash = Argon2Hash(Argon2::new(Algorithm::Argon2id, Version::V0x13, params));

        Ok(Self {
            hasher: Arc::new(hash),
        })
    }

    pub fn hash(&self, password: &str) -> Result<String, password_hash::Error> {
        let hash_salt = SaltString::generate(&mut rand_core::OsRng);
        let hash = self.hasher.0.hash_password(password.as_bytes(), &hash_salt)?;

        Ok(hash.to_string())
    }

    /// Check `password` against a stored PHC string.
    ///
    /// Parameters are read from the hash itself, so hashes created with other
    /// cost settings still verify.
    pub fn verify(&self, passhash: &str, password: &str) -> Result<bool, password_hash::Error> {
        let parsed_hash = PasswordHash::new(passhash)?;

        Ok(self
            .hasher
            .0
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

impl Default for AuthService {
    fn default() -> Self {
        Self {
            hasher: Arc::new(Argon2Hash(Argon2::default())),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::tests::test_hashing;

    use super::*;

    #[test]
    fn test_hash_and_verify_password() {
        let auth_service = AuthService::new(&test_hashing()).unwrap();
        let password = "test-password";

        let hash = auth_service.hash(password).unwrap();
        assert!(hash.starts_with("$argon2id"));

        assert!(auth_service.verify(&hash, password).unwrap());
        assert!(!auth_service.verify(&hash, "wrong-password").unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let auth_service = AuthService::new(&test_hashing()).unwrap();

        let first = auth_service.hash("test-password").unwrap();
        let second = auth_service.hash("test-password").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_verify_accepts_other_cost_settings() {
        let hash = AuthService::default().hash("test-password").unwrap();

        let auth_service = AuthService::new(&test_hashing()).unwrap();
        assert!(auth_service.verify(&hash, "test-password").unwrap());
    }

    #[test]
    fn test_verify_rejects_malformed_hash() {
        let auth_service = AuthService::new(&test_hashing()).unwrap();

        assert!(auth_service.verify("not-a-hash", "test-password").is_err());
    }

    #[test]
    fn test_rejects_invalid_cost_settings() {
        let hashing = Hashing {
            memory_cost: 0,
            time_cost: 0,
            parallelism: 0,
        };

        assert!(AuthService::new(&hashing).is_err());
    }
}
