use argon2::password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::errors::AppError;

// Argon2 is CPU bound; both helpers run on the blocking pool.

pub async fn hash_password(password: String) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || {
        let salt = SaltString::generate(&mut rand::thread_rng());
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
    })
    .await
    .map_err(|err| AppError::Upstream(err.to_string()))?
    .map_err(|err| AppError::Upstream(format!("Hashing error: {}", err)))
}

/// `Ok(false)` on a mismatch; `Err` only when the stored hash is unusable.
pub async fn verify_password(password: String, stored_hash: String) -> Result<bool, AppError> {
    tokio::task::spawn_blocking(move || {
        let parsed_hash = PasswordHash::new(&stored_hash)?;
        match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(err) => Err(err),
        }
    })
    .await
    .map_err(|err| AppError::Upstream(err.to_string()))?
    .map_err(|err| AppError::Upstream(format!("Invalid password hash: {}", err)))
}
