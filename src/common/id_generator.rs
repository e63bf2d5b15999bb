// src/common/id_generator.rs
//! Crockford Base32 ID Generator
//!
//! Generates short, prefixed row IDs using Crockford Base32 encoding.
//! Format: PREFIX_XXXXXXXX (e.g., LD_K7NP3XQ2 for a land plot)
//!
//! Payment references are not generated here: they are UUID v4 strings so
//! the gateway and the webhook can correlate them.

use rand::Rng;

/// Crockford Base32 alphabet (excludes I, L, O, U to avoid confusion)
const CROCKFORD_ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";

const ID_LENGTH: usize = 8;

/// Entity type prefixes for ID generation
#[derive(Debug, Clone, Copy)]
pub enum EntityPrefix {
    /// Land plot (LD_)
    Land,
    /// Payment row (PY_)
    Payment,
}

impl EntityPrefix {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityPrefix::Land => "LD",
            EntityPrefix::Payment => "PY",
        }
    }
}

fn generate_crockford_string(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| {
            let idx = rng.gen_range(0..32);
            CROCKFORD_ALPHABET[idx] as char
        })
        .collect()
}

/// Generate a prefixed ID, e.g. `generate_id(EntityPrefix::Land)` → "LD_K7NP3XQ2"
pub fn generate_id(prefix: EntityPrefix) -> String {
    format!("{}_{}", prefix.as_str(), generate_crockford_string(ID_LENGTH))
}

pub fn generate_land_id() -> String {
    generate_id(EntityPrefix::Land)
}

pub fn generate_payment_id() -> String {
    generate_id(EntityPrefix::Payment)
}

/// Fresh payment reference shared with the gateway
pub fn generate_payment_reference() -> String {
    uuid::Uuid::new_v4().to_string()
}
