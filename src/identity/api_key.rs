//! Per-game API keys.
//!
//! A key is 32 random bytes rendered as lowercase hex. The store only keeps
//! `hex(sha256(key + salt))`.

use rand::RngCore;
use sha2::{Digest, Sha256};

/// Generates and checks salted game API keys.
#[derive(Clone)]
pub struct ApiKeyHasher {
    salt: String,
}

impl std::fmt::Debug for ApiKeyHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeyHasher")
            .field("salt", &"<redacted>")
            .finish()
    }
}

impl ApiKeyHasher {
    /// Creates a hasher with the given salt.
    #[must_use]
    pub fn new(salt: impl Into<String>) -> Self {
        Self { salt: salt.into() }
    }

    /// Generates a new plaintext API key.
    #[must_use]
    pub fn generate(&self) -> String {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        hex::encode(bytes)
    }

    /// Returns the storable hash of `key`.
    #[must_use]
    pub fn hash(&self, key: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(key.as_bytes());
        hasher.update(self.salt.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Checks `key` against a stored hash.
    #[must_use]
    pub fn verify(&self, key: &str, stored_hash: &str) -> bool {
        self.hash(key).eq_ignore_ascii_case(stored_hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_keys_are_64_hex_chars() {
        let key = ApiKeyHasher::new("s").generate();
        assert_eq!(key.len(), 64);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn hash_is_sha256_of_key_and_salt() {
        let hasher = ApiKeyHasher::new("default-salt");
        // sha256("abcdefault-salt")
        let expected = hex::encode(Sha256::digest(b"abcdefault-salt"));
        assert_eq!(hasher.hash("abc"), expected);
    }

    #[test]
    fn verify_depends_on_salt() {
        let a = ApiKeyHasher::new("salt-a");
        let b = ApiKeyHasher::new("salt-b");
        let key = a.generate();
        let stored = a.hash(&key);
        assert!(a.verify(&key, &stored));
        assert!(!b.verify(&key, &stored));
        assert!(!a.verify("wrong", &stored));
    }
}
