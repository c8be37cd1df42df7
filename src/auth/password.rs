//! bcrypt password hashing

use crate::error::AppError;
use tracing::warn;

/// Work factor for stored password hashes
pub const DEFAULT_HASH_COST: u32 = 10;

/// Hash `password` with a fresh salt; the salt and cost live inside the hash
pub fn hash_password(password: &str, cost: u32) -> Result<String, AppError> {
    bcrypt::hash(password, cost)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

/// Check `password` against a stored hash. A malformed hash never verifies.
pub fn verify_password(password: &str, hash: &str) -> bool {
    match bcrypt::verify(password, hash) {
        Ok(matched) => matched,
        Err(e) => {
            warn!("Stored password hash is unusable: {}", e);
            false
        }
    }
}
