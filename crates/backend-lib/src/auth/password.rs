// ============================
// crates/backend-lib/src/auth/password.rs
// ============================
//! Password hashing and verification.
use crate::error::AppError;
use scrypt::{
    password_hash::{
        rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString,
    },
    Scrypt,
};
use zeroize::Zeroize;

/// Default log2 work factor
pub const DEFAULT_HASH_COST: u8 = 12;

/// Salted, adaptive-cost password hasher.
///
/// The work factor is read from configuration once at startup and injected
/// here; nothing reads it per call.
#[derive(Clone, Copy)]
pub struct PasswordHasher {
    params: scrypt::Params,
}

impl PasswordHasher {
    /// Create a hasher with the given log2 work factor.
    pub fn new(cost: u8) -> Result<Self, AppError> {
        let params = scrypt::Params::new(cost, 8, 1, scrypt::Params::RECOMMENDED_LEN)
            .map_err(|e| AppError::Internal(format!("invalid hash cost {cost}: {e}")))?;
        Ok(Self { params })
    }

    /// Hash a password. Every call draws a fresh random salt, so equal
    /// passwords produce distinct hashes.
    pub fn hash(&self, plain: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Scrypt
            .hash_password_customized(plain.as_bytes(), None, None, self.params, &salt)
            .map_err(|e| AppError::Internal(format!("password hashing failed: {e}")))?
            .to_string();
        Ok(hash)
    }

    /// Verify a password against a stored hash.
    ///
    /// Comparison is constant-time under the hood; a malformed stored hash
    /// verifies as `false` rather than erroring.
    pub fn verify(&self, hash: &str, plain: &str) -> bool {
        let parsed_hash = match PasswordHash::new(hash) {
            Ok(h) => h,
            Err(_) => return false,
        };
        Scrypt
            .verify_password(plain.as_bytes(), &parsed_hash)
            .is_ok()
    }

    /// Hash a password and zeroize the plaintext buffer.
    pub fn hash_secure(&self, plain: &mut String) -> Result<String, AppError> {
        let hash = self.hash(plain)?;
        plain.zeroize();
        Ok(hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Low cost keeps the suite fast; production cost comes from settings.
    fn hasher() -> PasswordHasher {
        PasswordHasher::new(6).unwrap()
    }

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let hasher = hasher();
        let hash = hasher.hash("Str0ng!Pass").unwrap();

        assert!(hasher.verify(&hash, "Str0ng!Pass"));
        assert!(!hasher.verify(&hash, "Wr0ng!Pass"));
        assert!(!hasher.verify(&hash, "str0ng!pass"));
    }

    #[test]
    fn test_same_password_distinct_hashes() {
        let hasher = hasher();
        let hash1 = hasher.hash("Str0ng!Pass").unwrap();
        let hash2 = hasher.hash("Str0ng!Pass").unwrap();

        // Different salts
        assert_ne!(hash1, hash2);
        assert!(hasher.verify(&hash1, "Str0ng!Pass"));
        assert!(hasher.verify(&hash2, "Str0ng!Pass"));
    }

    #[test]
    fn test_cost_is_embedded_in_hash() {
        let hash = hasher().hash("Str0ng!Pass").unwrap();
        assert!(hash.starts_with("$scrypt$"));
        assert!(hash.contains("ln=6"));
    }

    #[test]
    fn test_malformed_hash_verifies_false() {
        let hasher = hasher();
        assert!(!hasher.verify("not-a-phc-string", "Str0ng!Pass"));
        assert!(!hasher.verify("", "Str0ng!Pass"));
    }

    #[test]
    fn test_hash_secure_zeroizes_plaintext() {
        let hasher = hasher();
        let mut plain = "Str0ng!Pass".to_string();
        let hash = hasher.hash_secure(&mut plain).unwrap();

        assert!(plain.is_empty());
        assert!(hasher.verify(&hash, "Str0ng!Pass"));
    }

    #[test]
    fn test_out_of_range_cost_rejected() {
        assert!(PasswordHasher::new(64).is_err());
    }
}
