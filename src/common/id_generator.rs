// src/common/id_generator.rs
//! Crockford Base32 uid generator
//!
//! Generates human-readable, prefixed uids for facts.
//! Format: PREFIX_XXXXXX (e.g., N_K7NP3X for insights)
//!
//! Benefits:
//! - No ambiguous characters (excludes I, L, O, U)
//! - Case-insensitive
//! - ~1 billion combinations per entity type (32^6)

use rand::Rng;

/// Crockford Base32 alphabet (excludes I, L, O, U to avoid confusion)
const CROCKFORD_ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";

/// Entity type prefixes for uid generation
#[derive(Debug, Clone, Copy)]
pub enum EntityPrefix {
    /// Insight fact (N_)
    Insight,
    /// Link fact (L_)
    Link,
    /// Comment (C_)
    Comment,
}

impl EntityPrefix {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityPrefix::Insight => "N",
            EntityPrefix::Link => "L",
            EntityPrefix::Comment => "C",
        }
    }
}

/// Generate a random Crockford Base32 string of specified length
fn generate_crockford_string(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| {
            let idx = rng.gen_range(0..32);
            CROCKFORD_ALPHABET[idx] as char
        })
        .collect()
}

/// Generate a prefixed uid, e.g. "N_K7NP3X"
pub fn generate_uid(prefix: EntityPrefix) -> String {
    format!("{}_{}", prefix.as_str(), generate_crockford_string(6))
}

/// Generate an Insight uid (N_XXXXXX)
pub fn generate_insight_uid() -> String {
    generate_uid(EntityPrefix::Insight)
}

/// Generate a Link uid (L_XXXXXX)
pub fn generate_link_uid() -> String {
    generate_uid(EntityPrefix::Link)
}

/// Generate a Comment uid (C_XXXXXX)
pub fn generate_comment_uid() -> String {
    generate_uid(EntityPrefix::Comment)
}
