//! Random salts and nonces from the operating system CSPRNG

use rand::RngCore;
use rand::rngs::OsRng;

/// Return `N` cryptographically secure random bytes.
///
/// Panics if the operating system entropy source is unavailable. That is
/// not a condition callers are expected to recover from.
pub fn random_bytes<const N: usize>() -> [u8; N] {
    let mut bytes = [0u8; N];
    OsRng.fill_bytes(&mut bytes);
    bytes
}
