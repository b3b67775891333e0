//! Salted password hashing.
//!
//! Passwords are stored as hex-encoded SHA-256 over `salt || password`
//! with a random per-account salt. Verification compares digests in
//! constant time.

use sha2::{Digest, Sha256};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHash {
    pub hash: String,
    pub salt: String,
}

pub fn hash_password(password: &str) -> PasswordHash {
    let salt = Uuid::new_v4().simple().to_string();
    let hash = digest(&salt, password);
    PasswordHash { hash, salt }
}

pub fn verify_password(password: &str, salt: &str, expected_hash: &str) -> bool {
    let candidate = digest(salt, password);
    constant_time_eq(candidate.as_bytes(), expected_hash.as_bytes())
}

fn digest(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter()
        .zip(b.iter())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y))
        == 0
}
