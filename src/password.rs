//! Argon2 password hashing. Stored credentials are PHC strings, never the submitted text.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::AppError;

pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AppError::PasswordHash)
}

/// False for a wrong password and for stored values that are not PHC hashes.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// [`hash_password`] on the blocking pool, keeping argon2's CPU time off the request workers.
pub async fn hash_password_blocking(password: String) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "password hashing task failed");
            AppError::PasswordHash
        })?
}

/// [`verify_password`] on the blocking pool.
pub async fn verify_password_blocking(password: String, stored: String) -> Result<bool, AppError> {
    tokio::task::spawn_blocking(move || verify_password(&password, &stored))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "password verification task failed");
            AppError::PasswordHash
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn blocking_pool_variants_agree() {
        let hash = hash_password_blocking("s3cret-pw".into()).await.unwrap();
        assert!(verify_password("s3cret-pw", &hash));
        assert!(verify_password_blocking("s3cret-pw".into(), hash.clone()).await.unwrap());
        assert!(!verify_password_blocking("wrong".into(), hash).await.unwrap());
    }

    #[test]
    fn hash_verifies_only_the_original_password() {
        let hash = hash_password("s3cret-pw").unwrap();
        assert_ne!(hash, "s3cret-pw");
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("s3cret-pw", &hash));
        assert!(!verify_password("s3cret-PW", &hash));
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash_password("same").unwrap();
        let b = hash_password("same").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn plaintext_rows_never_authenticate() {
        assert!(!verify_password("hunter2", "hunter2"));
    }
}
