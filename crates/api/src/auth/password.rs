//! Argon2id password hashing and verification.
//!
//! Hashes are stored as PHC strings, so the salt and parameters travel with
//! the hash. Strength rules live in `numisroma_core::validation`.

use std::sync::LazyLock;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

/// Verified against when a login names no account.
static DUMMY_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash_password("numisroma-absent-account").ok());

/// Hash a plaintext password with Argon2id and a random salt.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Check a plaintext password against a stored PHC hash.
///
/// A mismatch is `Ok(false)`; `Err` means the stored hash is unusable.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed_hash = PasswordHash::new(hash)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e),
    }
}

/// Spend one Argon2 verification of `password` against [`DUMMY_HASH`].
/// The outcome is discarded.
pub fn verify_dummy_password(password: &str) {
    if let Some(hash) = DUMMY_HASH.as_deref() {
        let _ = verify_password(password, hash);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify() {
        let hash = hash_password("Sestertius9!").expect("hashing should succeed");
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("Sestertius9!", &hash).unwrap());
    }

    #[test]
    fn wrong_password_is_false_not_error() {
        let hash = hash_password("Sestertius9!").unwrap();
        assert!(!verify_password("Sestertius8!", &hash).unwrap());
    }

    #[test]
    fn same_password_gets_fresh_salt() {
        let a = hash_password("Quadrans1@").unwrap();
        let b = hash_password("Quadrans1@").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn corrupt_hash_is_an_error() {
        assert!(verify_password("anything", "not-a-phc-string").is_err());
    }

    #[test]
    fn dummy_hash_is_a_real_argon2id_hash() {
        let hash = DUMMY_HASH.as_deref().expect("dummy hash should build");
        assert!(hash.starts_with("$argon2id$"));
        assert!(!verify_password("Sestertius9!", hash).unwrap());
        verify_dummy_password("Sestertius9!");
    }
}
