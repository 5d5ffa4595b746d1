//! Framing of salt, nonce, ciphertext and tag into a single value
//!
//! The binary format is:
//! - salt: 16 bytes (password mode only)
//! - nonce: 12 bytes
//! - ciphertext: variable length, equal to the plaintext length
//! - tag: 16 bytes
//!
//! There are no length prefixes; every field but the ciphertext has a fixed
//! size, so the total length determines the field boundaries. The text
//! rendering is lowercase hex of the binary format.

use crate::cipher::{NONCE_LEN, TAG_LEN};
use crate::error::{CryptoDriverError, ErrorCategory, ErrorKind, Result};
use crate::kdf::SALT_LEN;

/// Which fixed fields precede the ciphertext.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// `nonce || ciphertext || tag`
    Unsalted,
    /// `salt || nonce || ciphertext || tag`
    Salted,
}

impl Layout {
    pub const fn salt_len(self) -> usize {
        match self {
            Layout::Unsalted => 0,
            Layout::Salted => SALT_LEN,
        }
    }

    /// Total size of the fixed-length fields, i.e. the size of an envelope
    /// holding an empty plaintext.
    pub const fn overhead(self) -> usize {
        self.salt_len() + NONCE_LEN + TAG_LEN
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub salt: Option<[u8; SALT_LEN]>,
    pub nonce: [u8; NONCE_LEN],
    pub ciphertext: Vec<u8>,
    pub tag: [u8; TAG_LEN],
}

impl Envelope {
    pub fn layout(&self) -> Layout {
        match self.salt {
            Some(_) => Layout::Salted,
            None => Layout::Unsalted,
        }
    }

    /// Length of the plaintext this envelope decrypts to.
    pub fn plaintext_len(&self) -> usize {
        self.ciphertext.len()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut output = Vec::with_capacity(self.layout().overhead() + self.ciphertext.len());
        if let Some(salt) = &self.salt {
            output.extend_from_slice(salt);
        }
        output.extend_from_slice(&self.nonce);
        output.extend_from_slice(&self.ciphertext);
        output.extend_from_slice(&self.tag);
        output
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    pub fn from_bytes(layout: Layout, bytes: &[u8]) -> Result<Self> {
        if bytes.len() < layout.overhead() {
            return Err(CryptoDriverError::user(
                ErrorKind::MalformedEnvelope,
                format!(
                    "envelope likely truncated: {} bytes, expected at least {}",
                    bytes.len(),
                    layout.overhead()
                ),
            ));
        }

        let (salt, rest) = bytes.split_at(layout.salt_len());
        let (nonce, rest) = rest.split_at(NONCE_LEN);
        let (ciphertext, tag) = rest.split_at(rest.len() - TAG_LEN);

        let salt = match layout {
            Layout::Unsalted => None,
            Layout::Salted => Some(fixed(salt, "salt")?),
        };

        Ok(Self {
            salt,
            nonce: fixed(nonce, "nonce")?,
            ciphertext: ciphertext.to_vec(),
            tag: fixed(tag, "tag")?,
        })
    }

    /// Parse the hex rendering. Upper- and lowercase digits are accepted.
    pub fn from_hex(layout: Layout, text: &str) -> Result<Self> {
        let bytes = hex::decode(text).map_err(|e| {
            CryptoDriverError::with_source(
                ErrorCategory::User,
                ErrorKind::MalformedEnvelope,
                format!("envelope is not valid hex: {}", e),
                e,
            )
        })?;
        Self::from_bytes(layout, &bytes)
    }
}

fn fixed<const N: usize>(field: &[u8], name: &str) -> Result<[u8; N]> {
    field.try_into().map_err(|_| {
        CryptoDriverError::user(
            ErrorKind::MalformedEnvelope,
            format!("failed to read {}", name),
        )
    })
}
