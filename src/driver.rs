//! Text-in, hex-envelope-out encryption driver
//!
//! A [`CryptoDriver`] holds one secret for its whole lifetime and exposes
//! `encrypt`/`decrypt` over UTF-8 text. The key-acquisition step is chosen
//! at compile time through the [`KeyMode`] type parameter; the cipher and
//! envelope framing are shared by both modes.
//!
//! The `*_raw` entry points take possibly-absent, possibly-non-UTF-8 input
//! and check presence before type, and type before length, so callers
//! holding untyped data get the most specific precondition failure.

use std::fmt;
use std::marker::PhantomData;

use tracing::debug;
use zeroize::{Zeroize, Zeroizing};

use crate::cipher::{self, NONCE_LEN};
use crate::envelope::{Envelope, Layout};
use crate::error::{CryptoDriverError, ErrorCategory, ErrorKind, Result};
use crate::kdf::SALT_LEN;
use crate::mode::{FixedKey, KeyMode, Password};
use crate::random::random_bytes;

/// Driver keyed directly by a 32-byte secret.
pub type FixedKeyDriver = CryptoDriver<FixedKey>;

/// Driver keyed by a password stretched with scrypt.
pub type PasswordDriver = CryptoDriver<Password>;

pub struct CryptoDriver<M: KeyMode> {
    secret: Zeroizing<String>,
    mode: PhantomData<M>,
}

impl<M: KeyMode> CryptoDriver<M> {
    /// Create a driver holding `secret`.
    ///
    /// In fixed-key mode the secret must be exactly 32 bytes. Any string,
    /// including the empty string, is accepted as a password.
    pub fn new(secret: &str) -> Result<Self> {
        M::validate(secret)?;
        debug!(mode = M::NAME, "created driver");
        Ok(Self {
            secret: Zeroizing::new(secret.to_owned()),
            mode: PhantomData,
        })
    }

    /// Create a driver from a secret that may be absent or not text.
    pub fn from_raw(secret: Option<&[u8]>) -> Result<Self> {
        let secret = require_text(
            secret,
            ErrorKind::MissingSecret,
            ErrorKind::InvalidSecretType,
            "secret",
        )?;
        Self::new(secret)
    }

    /// Envelope framing this driver produces and accepts.
    pub fn layout(&self) -> Layout {
        M::LAYOUT
    }

    /// Encrypt `plaintext` under a fresh nonce (and salt, in password mode),
    /// returning the lowercase hex envelope.
    pub fn encrypt(&self, plaintext: &str) -> Result<String> {
        let salt = match M::LAYOUT {
            Layout::Unsalted => None,
            Layout::Salted => Some(random_bytes::<SALT_LEN>()),
        };
        self.encrypt_with(plaintext, salt, random_bytes::<NONCE_LEN>())
    }

    /// Like [`Self::encrypt`], for plaintext that may be absent or not text.
    pub fn encrypt_raw(&self, plaintext: Option<&[u8]>) -> Result<String> {
        let plaintext = require_text(
            plaintext,
            ErrorKind::MissingPlaintext,
            ErrorKind::InvalidPlaintextType,
            "data",
        )?;
        self.encrypt(plaintext)
    }

    /// Encrypt with a caller-provided salt and nonce.
    ///
    /// This function is ONLY for producing deterministic test vectors.
    /// NEVER use it in production - reusing a nonce under the same key
    /// breaks AES-GCM. Always use [`Self::encrypt`], which generates them.
    pub fn encrypt_with(
        &self,
        plaintext: &str,
        salt: Option<[u8; SALT_LEN]>,
        nonce: [u8; NONCE_LEN],
    ) -> Result<String> {
        if salt.is_some() != (M::LAYOUT == Layout::Salted) {
            return Err(CryptoDriverError::new(
                ErrorCategory::Internal,
                ErrorKind::MalformedEnvelope,
                format!("salt presence does not match {} mode", M::NAME),
            ));
        }

        let key = M::acquire_key(&self.secret, salt.as_ref())?;
        let (ciphertext, tag) = cipher::seal(&key, &nonce, plaintext.as_bytes())?;
        let envelope = Envelope {
            salt,
            nonce,
            ciphertext,
            tag,
        };
        debug!(
            mode = M::NAME,
            plaintext_len = envelope.plaintext_len(),
            "encrypted"
        );

        Ok(envelope.to_hex())
    }

    /// Decrypt a hex envelope produced by [`Self::encrypt`] under the same
    /// secret.
    pub fn decrypt(&self, envelope: &str) -> Result<String> {
        let envelope = Envelope::from_hex(M::LAYOUT, envelope)?;
        let key = M::acquire_key(&self.secret, envelope.salt.as_ref())?;
        let mut plaintext =
            cipher::open(&key, &envelope.nonce, &envelope.ciphertext, &envelope.tag)
                .inspect_err(|_| debug!(mode = M::NAME, "authentication failed"))?;
        debug!(
            mode = M::NAME,
            plaintext_len = plaintext.len(),
            "decrypted"
        );

        String::from_utf8(std::mem::take(&mut *plaintext)).map_err(|e| {
            e.into_bytes().zeroize();
            CryptoDriverError::user(
                ErrorKind::NonUtf8Plaintext,
                "decrypted payload is not valid UTF-8",
            )
        })
    }

    /// Like [`Self::decrypt`], for an envelope that may be absent or not text.
    pub fn decrypt_raw(&self, envelope: Option<&[u8]>) -> Result<String> {
        let envelope = require_text(
            envelope,
            ErrorKind::MissingCiphertext,
            ErrorKind::InvalidCiphertextType,
            "encrypted",
        )?;
        self.decrypt(envelope)
    }
}

impl<M: KeyMode> Clone for CryptoDriver<M> {
    fn clone(&self) -> Self {
        Self {
            secret: self.secret.clone(),
            mode: PhantomData,
        }
    }
}

impl<M: KeyMode> fmt::Debug for CryptoDriver<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CryptoDriver")
            .field("mode", &M::NAME)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

fn require_text<'a>(
    value: Option<&'a [u8]>,
    missing: ErrorKind,
    not_text: ErrorKind,
    name: &str,
) -> Result<&'a str> {
    let value = value.ok_or_else(|| {
        CryptoDriverError::user(
            missing,
            format!("the \"{}\" value must be provided and must be a string", name),
        )
    })?;
    std::str::from_utf8(value).map_err(|e| {
        CryptoDriverError::with_source(
            ErrorCategory::User,
            not_text,
            format!("the \"{}\" value must be of type string", name),
            e,
        )
    })
}
