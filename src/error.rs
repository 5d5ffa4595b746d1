use std::error::Error as StdError;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorCategory {
    /// Any failure that cannot be confidently attributed to any other error
    /// category in this enum.
    ///
    /// Use of Internal is never a guarantee the error is not, for example,
    /// due to a user error - merely that it cannot be confidently determined
    /// by the code.
    Internal,

    /// The caller provided invalid input, the wrong secret, or data that
    /// was altered in transit.
    User,
}

/// Condition tags for consumers that want to branch on error kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// No secret was supplied to the driver.
    MissingSecret,
    /// The secret was not text (not valid UTF-8).
    InvalidSecretType,
    /// Fixed-key mode only: the key is not exactly 32 bytes.
    InvalidKeyLength,
    /// No plaintext was supplied to encrypt.
    MissingPlaintext,
    /// The plaintext was not text (not valid UTF-8).
    InvalidPlaintextType,
    /// No envelope was supplied to decrypt.
    MissingCiphertext,
    /// The envelope was not text (not valid UTF-8).
    InvalidCiphertextType,
    /// The envelope is not hex, or is too short to hold its fixed fields.
    MalformedEnvelope,
    /// Tag verification failed: wrong secret, tampering, or corruption.
    AuthenticationFailure,
    /// The envelope authenticated, but its payload is not UTF-8 text.
    NonUtf8Plaintext,
    /// scrypt rejected its parameters or output length.
    KeyDerivation,
    /// The AEAD primitive refused to seal the plaintext.
    Cipher,
    /// Passphrase could not be obtained from the configured reader.
    PassphraseUnavailable,
    /// Interaction with the filesystem, stdin/stdout, or other I/O failed.
    Io,
}

#[derive(Debug, Error)]
#[error("{msg}")]
pub struct CryptoDriverError {
    /// Broad error category, always provided.
    pub category: ErrorCategory,
    /// Specific condition tag.
    pub kind: ErrorKind,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
    msg: String,
}

impl CryptoDriverError {
    /// Creates a new error tagged with a category and kind.
    pub fn new(category: ErrorCategory, kind: ErrorKind, msg: impl Into<String>) -> Self {
        Self {
            category,
            kind,
            source: None,
            msg: msg.into(),
        }
    }

    /// Creates a new error that retains the originating source error.
    pub fn with_source(
        category: ErrorCategory,
        kind: ErrorKind,
        msg: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self {
            category,
            kind,
            source: Some(Box::new(source)),
            msg: msg.into(),
        }
    }

    /// Shorthand for a [`ErrorCategory::User`] error.
    pub(crate) fn user(kind: ErrorKind, msg: impl Into<String>) -> Self {
        Self::new(ErrorCategory::User, kind, msg)
    }

    /// The user-facing message carried by the error.
    pub fn message(&self) -> &str {
        &self.msg
    }

    /// Returns the preserved source error if present.
    pub fn source_error(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.source.as_deref()
    }

    /// Wraps the current error with a higher-level message while preserving the original as source.
    pub fn with_context(self, msg: impl Into<String>) -> Self {
        let category = self.category;
        let kind = self.kind;
        Self {
            category,
            kind,
            source: Some(Box::new(self)),
            msg: msg.into(),
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, CryptoDriverError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_context_keeps_kind_and_source() {
        let err = CryptoDriverError::user(ErrorKind::MalformedEnvelope, "too short");
        let wrapped = err.with_context("failed to decrypt");

        assert_eq!(wrapped.kind, ErrorKind::MalformedEnvelope);
        assert_eq!(wrapped.category, ErrorCategory::User);
        assert_eq!(wrapped.to_string(), "failed to decrypt");
        assert_eq!(wrapped.source().unwrap().to_string(), "too short");
    }

    #[test]
    fn test_with_source() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = CryptoDriverError::with_source(
            ErrorCategory::Internal,
            ErrorKind::Io,
            "failed to read",
            io,
        );

        assert_eq!(err.message(), "failed to read");
        assert_eq!(err.source_error().unwrap().to_string(), "gone");
    }
}
