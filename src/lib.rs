//! crypto-driver - authenticated encryption of text into hex envelopes
//!
//! A [`CryptoDriver`] seals UTF-8 text with AES-256-GCM and renders the
//! result as one lowercase hex string; decryption verifies the tag before
//! any plaintext is released. Two configurations share the same engine:
//!
//! - [`FixedKeyDriver`]: the secret is a 32-byte key. Envelope layout is
//!   `nonce(12) || ciphertext || tag(16)`.
//! - [`PasswordDriver`]: the secret is a password stretched with scrypt
//!   (N=16384, r=8, p=1) under a fresh salt. Envelope layout is
//!   `salt(16) || nonce(12) || ciphertext || tag(16)`.
//!
//! ```
//! use crypto_driver::FixedKeyDriver;
//!
//! let driver = FixedKeyDriver::new("d6F3Efeqd6F3Efeqd6F3Efeqd6F3Efeq")?;
//! let envelope = driver.encrypt("hello world")?;
//! assert_eq!(driver.decrypt(&envelope)?, "hello world");
//! # Ok::<(), crypto_driver::CryptoDriverError>(())
//! ```

#![forbid(unsafe_code)]

pub mod cipher;
pub mod driver;
pub mod envelope;
pub mod error;
pub mod file_ops;
pub mod kdf;
pub mod mode;
pub mod passphrase;
pub mod random;

pub use driver::{CryptoDriver, FixedKeyDriver, PasswordDriver};
pub use error::{CryptoDriverError, ErrorCategory, ErrorKind, Result};
pub use mode::{FixedKey, KeyMode, Password};
