//! Password hashing and verification
//!
//! Hashing is CPU bound, so both operations run on the blocking pool.

use thiserror::Error;

/// Work factor used when none is configured
pub const DEFAULT_COST: u32 = 10;

#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("Password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("Password hashing task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Hashes and verifies plaintext passwords with a fixed work factor
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a plaintext password into an opaque, salted hash
    pub async fn hash(&self, plaintext: String) -> Result<String, CredentialError> {
        let cost = self.cost;
        let hashed = tokio::task::spawn_blocking(move || bcrypt::hash(plaintext, cost)).await??;
        Ok(hashed)
    }

    /// Check a plaintext password against a stored hash
    pub async fn verify(&self, plaintext: String, hash: String) -> Result<bool, CredentialError> {
        let valid =
            tokio::task::spawn_blocking(move || bcrypt::verify(plaintext, &hash)).await??;
        Ok(valid)
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(DEFAULT_COST)
    }
}
