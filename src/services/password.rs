//! Credential hashing.
//!
//! Plaintext passwords only ever pass through here on their way to an
//! Argon2id PHC string. Hashing runs on the blocking pool.

use std::{future::Future, pin::Pin};

use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};

#[derive(Debug, thiserror::Error)]
pub enum HashError {
    #[error("password hashing failed: {0}")]
    Hash(String),

    #[error("hashing task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// One-way, salted `hash(plaintext) -> digest`.
pub trait CredentialHasher: Send + Sync {
    fn hash(
        &self,
        plaintext: String,
    ) -> Pin<Box<dyn Future<Output = Result<String, HashError>> + Send + '_>>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2Hasher;

impl Argon2Hasher {
    fn hash_blocking(plaintext: &str) -> Result<String, HashError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(plaintext.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| HashError::Hash(e.to_string()))
    }
}

impl CredentialHasher for Argon2Hasher {
    fn hash(
        &self,
        plaintext: String,
    ) -> Pin<Box<dyn Future<Output = Result<String, HashError>> + Send + '_>> {
        Box::pin(async move {
            tokio::task::spawn_blocking(move || Self::hash_blocking(&plaintext)).await?
        })
    }
}

#[cfg(test)]
mod tests {
    use argon2::{PasswordHash, PasswordVerifier};

    use super::*;

    #[tokio::test]
    async fn argon2_hash_verifies_and_hides_plaintext() {
        let digest = Argon2Hasher.hash("hunter2".to_string()).await.unwrap();

        assert!(digest.starts_with("$argon2id$"));
        assert!(!digest.contains("hunter2"));

        let parsed = PasswordHash::new(&digest).unwrap();
        assert!(
            Argon2::default()
                .verify_password(b"hunter2", &parsed)
                .is_ok()
        );
        assert!(Argon2::default().verify_password(b"wrong", &parsed).is_err());
    }

    #[tokio::test]
    async fn same_password_gets_different_salts() {
        let a = Argon2Hasher.hash("x".to_string()).await.unwrap();
        let b = Argon2Hasher.hash("x".to_string()).await.unwrap();
        assert_ne!(a, b);
    }
}
