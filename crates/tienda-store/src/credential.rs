//! # Credential Hashing
//!
//! Argon2id PHC strings for user credentials. The plaintext never reaches a
//! table; only [`CredentialHasher::hash`] output is stored.
//!
//! ```text
//! create_user("correct horse")
//!      │
//!      ▼
//! hash() ──► "$argon2id$v=19$m=19456,t=2,p=1$<salt>$<digest>"
//!      │
//!      ▼
//! UserTable row (credential_hash)
//! ```
//!
//! Verification reads the cost parameters back out of the PHC string, so
//! hashes made at one cost still verify after the store is reconfigured.

use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version,
};

use crate::error::{StoreError, StoreResult};

/// Argon2 cost profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HashingCost {
    /// Library defaults (OWASP-recommended Argon2id parameters).
    #[default]
    Standard,
    /// Minimum parameters. For tests only.
    Low,
}

/// Hashes and verifies credentials.
#[derive(Debug, Clone, Copy, Default)]
pub struct CredentialHasher {
    cost: HashingCost,
}

impl CredentialHasher {
    pub fn new(cost: HashingCost) -> Self {
        CredentialHasher { cost }
    }

    fn argon2(&self) -> Argon2<'static> {
        match self.cost {
            HashingCost::Standard => Argon2::default(),
            HashingCost::Low => Params::new(
                Params::MIN_M_COST,
                Params::MIN_T_COST,
                Params::MIN_P_COST,
                None,
            )
            .map(|params| Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
            .unwrap_or_default(),
        }
    }

    /// Hashes a credential with a fresh random salt.
    pub fn hash(&self, credential: &str) -> StoreResult<String> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = self
            .argon2()
            .hash_password(credential.as_bytes(), &salt)
            .map_err(|e| StoreError::Internal(format!("Failed to hash credential: {}", e)))?;

        Ok(hash.to_string())
    }

    /// Checks a credential against a stored PHC string.
    ///
    /// A malformed stored hash counts as a mismatch.
    pub fn verify(&self, credential: &str, hash: &str) -> bool {
        let parsed_hash = match PasswordHash::new(hash) {
            Ok(h) => h,
            Err(_) => return false,
        };

        self.argon2()
            .verify_password(credential.as_bytes(), &parsed_hash)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let hasher = CredentialHasher::new(HashingCost::Low);
        let hash = hasher.hash("correct horse").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(!hash.contains("correct horse"));
        assert!(hasher.verify("correct horse", &hash));
        assert!(!hasher.verify("battery staple", &hash));
    }

    #[test]
    fn test_salts_differ() {
        let hasher = CredentialHasher::new(HashingCost::Low);
        let a = hasher.hash("correct horse").unwrap();
        let b = hasher.hash("correct horse").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_verify_rejects_garbage_hash() {
        let hasher = CredentialHasher::default();
        assert!(!hasher.verify("correct horse", "not-a-phc-string"));
    }

    #[test]
    fn test_low_cost_hash_verifies_with_standard_hasher() {
        let hash = CredentialHasher::new(HashingCost::Low)
            .hash("correct horse")
            .unwrap();
        assert!(CredentialHasher::default().verify("correct horse", &hash));
    }
}
