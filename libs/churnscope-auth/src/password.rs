//! One-way credential hashing.
//!
//! Passwords are stored as argon2id PHC strings and verified by
//! re-hash-and-compare. Nothing here can recover a plaintext.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

/// Hash a plaintext password with a fresh random salt.
///
/// # Errors
/// Returns an error if the underlying hasher rejects the input
/// (e.g. it exceeds the algorithm's length limits).
pub fn hash_password(plaintext: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)?
        .to_string())
}

/// Verify `plaintext` against a stored PHC string.
///
/// An unparsable stored hash counts as a failed verification; the caller
/// cannot distinguish it from a wrong password.
#[must_use]
pub fn verify_password(plaintext: &str, stored: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored) else {
        tracing::warn!("stored password hash is not a valid PHC string");
        return false;
    };
    Argon2::default()
        .verify_password(plaintext.as_bytes(), &parsed)
        .is_ok()
}
