//! Property tests for the fixed-key driver and the envelope codec.
//!
//! Password mode is left to the unit and golden-vector tests; scrypt makes
//! hundreds of cases per property too slow.

use crypto_driver::envelope::{Envelope, Layout};
use crypto_driver::{ErrorKind, FixedKeyDriver};
use proptest::prelude::*;

fn driver() -> FixedKeyDriver {
    FixedKeyDriver::new("d6F3Efeqd6F3Efeqd6F3Efeqd6F3Efeq").unwrap()
}

proptest! {
    #[test]
    fn roundtrip(plaintext in any::<String>()) {
        let driver = driver();
        let envelope = driver.encrypt(&plaintext).unwrap();
        prop_assert_eq!(driver.decrypt(&envelope).unwrap(), plaintext);
    }

    #[test]
    fn envelope_length_tracks_plaintext(plaintext in any::<String>()) {
        let envelope = driver().encrypt(&plaintext).unwrap();
        prop_assert_eq!(envelope.len(), 2 * (Layout::Unsalted.overhead() + plaintext.len()));
        prop_assert!(envelope.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn single_digit_tamper_is_detected(plaintext in ".{0,64}", seed in any::<usize>()) {
        let driver = driver();
        let envelope = driver.encrypt(&plaintext).unwrap();
        let pos = seed % envelope.len();

        let mut chars: Vec<char> = envelope.chars().collect();
        chars[pos] = if chars[pos] == 'f' { 'e' } else { 'f' };
        let tampered: String = chars.into_iter().collect();

        let err = driver.decrypt(&tampered).unwrap_err();
        prop_assert!(matches!(
            err.kind,
            ErrorKind::AuthenticationFailure | ErrorKind::MalformedEnvelope
        ));
    }

    #[test]
    fn short_envelopes_are_malformed(bytes in proptest::collection::vec(any::<u8>(), 0..44)) {
        let salted = Envelope::from_bytes(Layout::Salted, &bytes);
        prop_assert!(salted.is_err());
        prop_assert_eq!(salted.unwrap_err().kind, ErrorKind::MalformedEnvelope);

        let unsalted = Envelope::from_bytes(Layout::Unsalted, &bytes);
        prop_assert_eq!(unsalted.is_ok(), bytes.len() >= 28);
    }

    #[test]
    fn codec_preserves_bytes(bytes in proptest::collection::vec(any::<u8>(), 44..256)) {
        for layout in [Layout::Unsalted, Layout::Salted] {
            let envelope = Envelope::from_bytes(layout, &bytes).unwrap();
            prop_assert_eq!(envelope.plaintext_len(), bytes.len() - layout.overhead());
            prop_assert_eq!(envelope.to_bytes(), bytes.clone());
        }
    }

    #[test]
    fn arbitrary_text_never_panics(text in "\\PC{0,200}") {
        let _ = driver().decrypt(&text);
    }
}
