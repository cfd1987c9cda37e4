//! Argon2 password hashing shared by the auth and user services.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

pub fn hash_password(plain_text: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plain_text.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("password hash failed: {}", e))?;
    Ok(hash.to_string())
}

/// `false` for a wrong password and for a stored hash that does not parse.
pub fn verify_password(plain_text: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(plain_text.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}
