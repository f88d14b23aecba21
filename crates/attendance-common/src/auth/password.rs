//! Password hashing and strength rules
//!
//! Hashes are Argon2id PHC strings.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::AppError;

/// Hash a password using Argon2id
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {e}")))
}

/// Verify a password against a stored hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid password hash format: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Strength requirements for new account passwords
#[derive(Debug, Clone, Copy)]
pub struct PasswordPolicy {
    pub min_length: usize,
    pub max_length: usize,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 8,
            max_length: 128,
        }
    }
}

impl PasswordPolicy {
    /// Check length and require upper case, lower case and a digit
    pub fn check(&self, password: &str) -> Result<(), AppError> {
        let length = password.chars().count();
        if length < self.min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters long",
                self.min_length
            )));
        }
        if length > self.max_length {
            return Err(AppError::validation(format!(
                "Password must be at most {} characters long",
                self.max_length
            )));
        }

        let missing = [
            (password.chars().any(char::is_uppercase), "an uppercase letter"),
            (password.chars().any(char::is_lowercase), "a lowercase letter"),
            (password.chars().any(|c| c.is_ascii_digit()), "a digit"),
        ]
        .into_iter()
        .find_map(|(present, what)| (!present).then_some(what));

        match missing {
            Some(what) => Err(AppError::validation(format!(
                "Password must contain at least {what}"
            ))),
            None => Ok(()),
        }
    }
}
