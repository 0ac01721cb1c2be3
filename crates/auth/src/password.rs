//! Password hashing and verification.
//!
//! The hash algorithm is an implementation detail of this module; callers only
//! see an opaque one-way hash/verify pair.

use thiserror::Error;

const BCRYPT_COST: u32 = 10;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("password hashing failed: {0}")]
    Hash(String),
}

/// Hash a plaintext password for storage.
pub fn hash_password(plain: &str) -> Result<String, PasswordError> {
    bcrypt::hash(plain, BCRYPT_COST).map_err(|e| PasswordError::Hash(e.to_string()))
}

/// Verify a plaintext password against a stored hash.
///
/// A malformed stored hash verifies as `false` rather than erroring, so a
/// corrupt row can never authenticate.
pub fn verify_password(plain: &str, stored_hash: &str) -> bool {
    bcrypt::verify(plain, stored_hash).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_accepts_the_right_password() {
        let hash = hash_password("password123").unwrap();
        assert!(verify_password("password123", &hash));
    }

    #[test]
    fn verify_rejects_the_wrong_password() {
        let hash = hash_password("password123").unwrap();
        assert!(!verify_password("password124", &hash));
    }

    #[test]
    fn verify_rejects_a_malformed_hash() {
        assert!(!verify_password("password123", "not-a-bcrypt-hash"));
    }
}
