//! Property-based tests for the symmetric seal/open pair
//!
//! Round-trip and size properties over arbitrary plaintexts and secrets.
//! The wrapped-key pair is covered by example-based tests instead; RSA
//! keygen per proptest case would dominate the runtime without adding
//! coverage of this layer.

use proptest::prelude::*;
use sealgate_crypto::{derive_key, open_symmetric, seal_symmetric};
use sealgate_proto::{BLOCK_SIZE, Envelope, IV_SIZE};

proptest! {
    #[test]
    fn round_trip_for_all_plaintexts(
        plaintext in prop::collection::vec(any::<u8>(), 0..4096),
        share in ".{0,40}",
        passphrase in ".{0,40}",
        iv in any::<[u8; IV_SIZE]>(),
    ) {
        let key = derive_key(&share, &passphrase);
        let envelope = seal_symmetric(&plaintext, &key, iv);
        let opened = open_symmetric(&envelope, &key).unwrap();
        prop_assert_eq!(opened, plaintext);
    }

    #[test]
    fn round_trip_survives_the_wire(
        plaintext in prop::collection::vec(any::<u8>(), 0..1024),
        iv in any::<[u8; IV_SIZE]>(),
    ) {
        let key = derive_key("WireShare", "wire phrase");
        let wire = seal_symmetric(&plaintext, &key, iv).to_bytes().unwrap();

        let parsed = Envelope::decode_symmetric(&wire).unwrap();
        let opened = open_symmetric(&parsed, &key).unwrap();
        prop_assert_eq!(opened, plaintext);
    }

    #[test]
    fn ciphertext_length_is_the_padded_length(
        plaintext in prop::collection::vec(any::<u8>(), 0..2048),
    ) {
        let key = derive_key("SizeShare", "size phrase");
        let envelope = seal_symmetric(&plaintext, &key, [0; IV_SIZE]);

        prop_assert_eq!(
            envelope.ciphertext().len(),
            (plaintext.len() / BLOCK_SIZE + 1) * BLOCK_SIZE
        );
    }

    #[test]
    fn wrong_key_never_returns_the_plaintext(
        plaintext in prop::collection::vec(any::<u8>(), 1..512),
        passphrase in "[a-z]{1,20}",
        wrong_passphrase in "[A-Z]{1,20}",
    ) {
        let key = derive_key("MismatchShare", &passphrase);
        let wrong = derive_key("MismatchShare", &wrong_passphrase);
        let envelope = seal_symmetric(&plaintext, &key, [9; IV_SIZE]);

        // Without an authentication tag the padding check can, rarely, let a
        // wrong key through; what must never happen is recovering the
        // original bytes.
        if let Ok(opened) = open_symmetric(&envelope, &wrong) {
            prop_assert_ne!(opened, plaintext);
        }
    }
}
