//! Live adapter for the `IdGenerator` port.

use uuid::Uuid;

use crate::ports::IdGenerator;

const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
const ID_LEN: usize = 8;

/// Live ID generator producing short base62 ids from random UUIDs.
pub struct LiveIdGenerator;

impl LiveIdGenerator {
    /// Creates a new live ID generator.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for LiveIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for LiveIdGenerator {
    fn generate_id(&self) -> String {
        let mut n = Uuid::new_v4().as_u128();
        let base = ALPHABET.len() as u128;
        (0..ID_LEN)
            .map(|_| {
                let digit = usize::try_from(n % base).unwrap_or_default();
                n /= base;
                char::from(ALPHABET[digit])
            })
            .collect()
    }
}
