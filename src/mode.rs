//! The two ways a driver turns its secret into an AES key
//!
//! [`FixedKey`] uses a 32-byte secret verbatim and frames envelopes without
//! a salt. [`Password`] stretches an arbitrary password with scrypt under a
//! fresh salt that travels in the envelope.

use tracing::warn;
use zeroize::Zeroizing;

use crate::envelope::Layout;
use crate::error::{CryptoDriverError, ErrorCategory, ErrorKind, Result};
use crate::kdf::{self, KEY_LEN, SALT_LEN};

mod sealed {
    pub trait Sealed {}
}

/// Key acquisition strategy for a [`crate::CryptoDriver`].
pub trait KeyMode: sealed::Sealed + Send + Sync + 'static {
    /// Human-readable name used in log events.
    const NAME: &'static str;

    /// Envelope framing produced and accepted in this mode.
    const LAYOUT: Layout;

    /// Check a secret at driver construction.
    fn validate(secret: &str) -> Result<()>;

    /// Produce the AES key for one call. `salt` is `Some` exactly when
    /// [`Self::LAYOUT`] is [`Layout::Salted`].
    fn acquire_key(
        secret: &str,
        salt: Option<&[u8; SALT_LEN]>,
    ) -> Result<Zeroizing<[u8; KEY_LEN]>>;
}

/// The secret is the key: exactly 32 bytes of UTF-8 text.
#[derive(Debug, Clone, Copy)]
pub struct FixedKey;

/// The secret is a password, stretched with scrypt on every call.
#[derive(Debug, Clone, Copy)]
pub struct Password;

impl sealed::Sealed for FixedKey {}
impl sealed::Sealed for Password {}

impl KeyMode for FixedKey {
    const NAME: &'static str = "fixed-key";
    const LAYOUT: Layout = Layout::Unsalted;

    fn validate(secret: &str) -> Result<()> {
        if secret.len() != KEY_LEN {
            return Err(CryptoDriverError::user(
                ErrorKind::InvalidKeyLength,
                format!("the key must be {} bytes (256 bits)", KEY_LEN),
            ));
        }
        Ok(())
    }

    fn acquire_key(
        secret: &str,
        _salt: Option<&[u8; SALT_LEN]>,
    ) -> Result<Zeroizing<[u8; KEY_LEN]>> {
        Self::validate(secret)?;
        let mut key = Zeroizing::new([0u8; KEY_LEN]);
        key.copy_from_slice(secret.as_bytes());
        Ok(key)
    }
}

impl KeyMode for Password {
    const NAME: &'static str = "password";
    const LAYOUT: Layout = Layout::Salted;

    fn validate(secret: &str) -> Result<()> {
        if secret.is_empty() {
            warn!("accepting empty password");
        }
        Ok(())
    }

    fn acquire_key(
        secret: &str,
        salt: Option<&[u8; SALT_LEN]>,
    ) -> Result<Zeroizing<[u8; KEY_LEN]>> {
        let salt = salt.ok_or_else(|| {
            CryptoDriverError::new(
                ErrorCategory::Internal,
                ErrorKind::KeyDerivation,
                "password mode requires a salt",
            )
        })?;
        kdf::derive_key(secret.as_bytes(), salt)
    }
}
