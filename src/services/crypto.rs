use argon2::{
    password_hash::SaltString, Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};

use crate::errors::InternalError;

/// Hash a plaintext password with Argon2id
///
/// The digest embeds its own salt and parameters, so it is the only thing
/// that needs to be stored.
pub fn hash_password(plaintext: &str) -> Result<String, InternalError> {
    let salt = SaltString::generate(&mut rand_core::OsRng);
    let digest = Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map_err(|e| InternalError::crypto("hash_password", e.to_string()))?
        .to_string();
    Ok(digest)
}

/// Verify a plaintext password against a stored digest
///
/// Returns false for a wrong password AND for a malformed digest; callers
/// never need to distinguish the two.
pub fn verify_password(digest: &str, plaintext: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(digest) else {
        return false;
    };
    Argon2::default()
        .verify_password(plaintext.as_bytes(), &parsed)
        .is_ok()
}
