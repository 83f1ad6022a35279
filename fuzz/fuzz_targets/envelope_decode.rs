//! Fuzz target for envelope decoding
//!
//! Feeds arbitrary bytes to both decode paths and, when parsing succeeds,
//! attempts to open the result under a fixed key. Neither the decoder nor
//! the opener may ever panic; every invalid input must come back as an
//! error value.

#![no_main]

use libfuzzer_sys::fuzz_target;
use sealgate_crypto::{derive_key, open_symmetric};
use sealgate_proto::Envelope;

fuzz_target!(|data: &[u8]| {
    if let Ok(envelope) = Envelope::decode_symmetric(data) {
        let key = derive_key("fuzz-share", "fuzz-passphrase");
        let _ = open_symmetric(&envelope, &key);
    }

    let _ = Envelope::decode_wrapped(data);
});
