//! Identifier and secret-key generation.
//!
//! Ids and keys are both 32 lowercase hex characters. Ids come from UUID v4;
//! keys take 128 bits straight from the thread-local CSPRNG.

use rand::Rng;
use uuid::Uuid;

/// Length in hex characters of every generated id and key.
pub const TOKEN_HEX_LEN: usize = 32;

/// Generates a fresh resource id (list or item).
pub fn generate_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Generates a fresh secret list key.
pub fn generate_key() -> String {
    let bytes: [u8; 16] = rand::thread_rng().gen();
    hex::encode(bytes)
}

/// Compares a stored key with a caller-supplied one in constant time.
///
/// Runtime depends only on the lengths, never on where the keys differ.
pub fn keys_match(stored: &str, supplied: &str) -> bool {
    let stored = stored.as_bytes();
    let supplied = supplied.as_bytes();
    if stored.len() != supplied.len() {
        return false;
    }

    stored
        .iter()
        .zip(supplied)
        .fold(0u8, |acc, (left, right)| acc | (left ^ right))
        == 0
}
