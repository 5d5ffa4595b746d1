//! File encryption/decryption operations
//!
//! This module provides high-level operations that read text from one file
//! and write the hex envelope (or the recovered text) to another.

use crate::driver::CryptoDriver;
use crate::error::{CryptoDriverError, ErrorCategory, ErrorKind, Result};
use crate::mode::{FixedKey, KeyMode, Password};
use crate::passphrase::PassphraseReader;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tracing::info;

/// Runtime choice between the two driver configurations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySource {
    /// The secret is a 32-byte key used as is.
    FixedKey,
    /// The secret is a password stretched with scrypt.
    Password,
}

impl KeySource {
    fn encrypt(self, secret: &[u8], plaintext: &[u8]) -> Result<String> {
        match self {
            KeySource::FixedKey => encrypt_in::<FixedKey>(secret, plaintext),
            KeySource::Password => encrypt_in::<Password>(secret, plaintext),
        }
    }

    fn decrypt(self, secret: &[u8], envelope: &[u8]) -> Result<String> {
        match self {
            KeySource::FixedKey => decrypt_in::<FixedKey>(secret, envelope),
            KeySource::Password => decrypt_in::<Password>(secret, envelope),
        }
    }
}

fn encrypt_in<M: KeyMode>(secret: &[u8], plaintext: &[u8]) -> Result<String> {
    CryptoDriver::<M>::from_raw(Some(secret))?.encrypt_raw(Some(plaintext))
}

fn decrypt_in<M: KeyMode>(secret: &[u8], envelope: &[u8]) -> Result<String> {
    CryptoDriver::<M>::from_raw(Some(secret))?.decrypt_raw(Some(envelope))
}

/// Encrypt a text file
///
/// Reads UTF-8 plaintext from `input_path`, encrypts it with a secret from
/// `passphrase_reader`, and writes the hex envelope to `output_path`.
///
/// The output file is created with mode 0o600 (read/write for owner only) on Unix systems.
pub fn encrypt_file(
    source: KeySource,
    input_path: &Path,
    output_path: &Path,
    passphrase_reader: &mut dyn PassphraseReader,
) -> Result<()> {
    let plaintext = fs::read(input_path).map_err(|e| read_error(input_path, e))?;
    let secret = passphrase_reader.read_passphrase()?;
    let envelope = source
        .encrypt(&secret, &plaintext)
        .map_err(|e| e.with_context("encryption failed"))?;
    write_file_secure(output_path, envelope.as_bytes())
        .map_err(|e| e.with_context(format!("failed to write to {}", output_path.display())))?;
    info!(output = %output_path.display(), "wrote envelope");

    Ok(())
}

/// Decrypt an envelope file
///
/// Reads the hex envelope from `input_path`, decrypts it with a secret from
/// `passphrase_reader`, and writes the plaintext to `output_path`. Trailing
/// whitespace after the envelope (such as a final newline added by an
/// editor) is ignored.
///
/// The output file is created with mode 0o600 (read/write for owner only) on Unix systems.
pub fn decrypt_file(
    source: KeySource,
    input_path: &Path,
    output_path: &Path,
    passphrase_reader: &mut dyn PassphraseReader,
) -> Result<()> {
    let envelope = fs::read(input_path).map_err(|e| read_error(input_path, e))?;
    let secret = passphrase_reader.read_passphrase()?;
    let plaintext = source
        .decrypt(&secret, envelope.trim_ascii_end())
        .map_err(|e| e.with_context("failed to decrypt"))?;
    write_file_secure(output_path, plaintext.as_bytes())
        .map_err(|e| e.with_context(format!("failed to write to {}", output_path.display())))?;
    info!(output = %output_path.display(), "wrote plaintext");

    Ok(())
}

/// Write file with secure permissions (0o600 on Unix)
fn write_file_secure(path: &Path, contents: &[u8]) -> Result<()> {
    #[cfg(unix)]
    {
        use std::fs::OpenOptions;
        use std::os::unix::fs::OpenOptionsExt;

        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o600)
            .open(path)
            .map_err(|e| {
                CryptoDriverError::with_source(
                    ErrorCategory::User,
                    ErrorKind::Io,
                    format!("failed to open {}", path.display()),
                    e,
                )
            })?;

        file.write_all(contents).map_err(|e| {
            CryptoDriverError::with_source(
                ErrorCategory::Internal,
                ErrorKind::Io,
                format!("failed to write {}", path.display()),
                e,
            )
        })?;
        Ok(())
    }

    #[cfg(not(unix))]
    {
        fs::write(path, contents).map_err(|e| {
            CryptoDriverError::with_source(
                ErrorCategory::User,
                ErrorKind::Io,
                format!("failed to write {}", path.display()),
                e,
            )
        })?;
        Ok(())
    }
}

fn read_error(path: &Path, err: io::Error) -> CryptoDriverError {
    let category = if err.kind() == io::ErrorKind::NotFound {
        ErrorCategory::User
    } else {
        ErrorCategory::Internal
    };
    CryptoDriverError::with_source(
        category,
        ErrorKind::Io,
        format!("failed to read from {}", path.display()),
        err,
    )
}
