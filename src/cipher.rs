//! AES-256-GCM with a detached 16-byte tag
//!
//! No associated data is authenticated; the tag covers the ciphertext
//! under the given key and nonce only.

use aes_gcm::aead::{AeadInPlace, KeyInit};
use aes_gcm::{Aes256Gcm, Key, Nonce, Tag};
use zeroize::Zeroizing;

use crate::error::{CryptoDriverError, ErrorCategory, ErrorKind, Result};
use crate::kdf::KEY_LEN;

/// Length of nonce in bytes
pub const NONCE_LEN: usize = 12;

/// Length of authentication tag in bytes
pub const TAG_LEN: usize = 16;

fn new_cipher(key: &[u8; KEY_LEN]) -> Aes256Gcm {
    Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key))
}

/// Encrypt `plaintext`, returning the ciphertext (same length as the
/// plaintext) and the authentication tag.
pub fn seal(
    key: &[u8; KEY_LEN],
    nonce: &[u8; NONCE_LEN],
    plaintext: &[u8],
) -> Result<(Vec<u8>, [u8; TAG_LEN])> {
    let mut buffer = plaintext.to_vec();
    let tag = new_cipher(key)
        .encrypt_in_place_detached(Nonce::from_slice(nonce), b"", &mut buffer)
        .map_err(|_| {
            CryptoDriverError::new(ErrorCategory::Internal, ErrorKind::Cipher, "encryption failed")
        })?;

    let mut tag_bytes = [0u8; TAG_LEN];
    tag_bytes.copy_from_slice(&tag);
    Ok((buffer, tag_bytes))
}

/// Verify `tag` and decrypt `ciphertext`.
///
/// Nothing is returned unless the tag verifies. The working buffer is
/// wiped on failure.
pub fn open(
    key: &[u8; KEY_LEN],
    nonce: &[u8; NONCE_LEN],
    ciphertext: &[u8],
    tag: &[u8; TAG_LEN],
) -> Result<Zeroizing<Vec<u8>>> {
    let mut buffer = Zeroizing::new(ciphertext.to_vec());
    new_cipher(key)
        .decrypt_in_place_detached(
            Nonce::from_slice(nonce),
            b"",
            &mut buffer[..],
            Tag::from_slice(tag),
        )
        .map_err(|_| {
            CryptoDriverError::user(
                ErrorKind::AuthenticationFailure,
                "corrupt input, tampered-with data, or wrong secret",
            )
        })?;
    Ok(buffer)
}
