//! Per-call identifiers, drawn from the operating system's secure source.
//!
//! No global uniqueness is guaranteed, only an astronomically low collision
//! probability. Callers treat "derived address already in use" as a benign
//! condition, never as corruption.

use rand::rngs::OsRng;
use rand::RngCore;

/// A fresh 64-bit computation offset.
pub fn fresh_offset() -> u64 {
    OsRng.next_u64()
}

/// A fresh 128-bit encryption nonce.
pub fn fresh_nonce() -> u128 {
    let mut bytes = [0u8; 16];
    OsRng.fill_bytes(&mut bytes);
    u128::from_le_bytes(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consecutive_values_are_independent() {
        // Not a uniqueness proof, but a 64/128-bit collision across two
        // draws would indicate a broken entropy source.
        assert_ne!(fresh_offset(), fresh_offset());
        assert_ne!(fresh_nonce(), fresh_nonce());
    }
}
