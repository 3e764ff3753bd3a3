//! Password hashing backed by bcrypt.
//!
//! Hashes are self-describing (`$2b$<cost>$<salt><digest>`), so verification
//! needs nothing but the stored string.

use std::sync::LazyLock;

use bcrypt::{DEFAULT_COST, hash, verify};

use crate::errors::AppError;

/// bcrypt work factor used for every new hash.
pub const PASSWORD_HASH_COST: u32 = DEFAULT_COST;

/// Hashes `password` with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, PASSWORD_HASH_COST)
        .map_err(|e| AppError::internal_error(format!("Failed to hash password: {}", e)))
}

/// Checks `password` against a stored bcrypt hash.
///
/// A malformed or truncated hash counts as a mismatch.
pub fn verify_password(password: &str, hash: &str) -> bool {
    match verify(password, hash) {
        Ok(matches) => matches,
        Err(e) => {
            tracing::warn!(error = %e, "Stored password hash could not be parsed");
            false
        }
    }
}

/// Hash of a throwaway password, computed once at the same cost as real hashes.
static DUMMY_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash("classbook-dummy-password", PASSWORD_HASH_COST).ok());

/// Spends one bcrypt verification when there is no stored hash to check, so
/// a missing account takes as long to reject as a wrong password. Always
/// returns `false`.
pub fn verify_dummy_password(password: &str) -> bool {
    if let Some(dummy) = DUMMY_HASH.as_deref() {
        let _ = verify(password, dummy);
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_embeds_cost() {
        let hash = hash_password("secret").unwrap();
        assert!(hash.starts_with(&format!("$2b${:02}$", PASSWORD_HASH_COST)));
    }

    #[test]
    fn test_verify_round_trip() {
        let hash = hash_password("secret").unwrap();
        assert!(verify_password("secret", &hash));
        assert!(!verify_password("Secret", &hash));
    }

    #[test]
    fn test_verify_malformed_hash_is_false() {
        assert!(!verify_password("secret", "not_a_valid_bcrypt_hash"));
        assert!(!verify_password("secret", ""));
        assert!(!verify_password("secret", "$2b$12$tooshort"));
    }

    #[test]
    fn test_dummy_verification_never_matches() {
        assert!(!verify_dummy_password("classbook-dummy-password"));
        assert!(!verify_dummy_password("anything"));
    }

    #[test]
    fn test_dummy_hash_uses_real_cost() {
        let dummy = DUMMY_HASH.as_deref().unwrap();
        assert!(dummy.starts_with(&format!("$2b${:02}$", PASSWORD_HASH_COST)));
    }
}
