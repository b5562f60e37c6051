#![no_main]

use libfuzzer_sys::fuzz_target;
use bertree::{Decoder, Mode};

fuzz_target!(|data: &[u8]| {
    let node = match bertree::parse(data) {
        Ok(node) => node,
        Err(_) => return,
    };
    let encoded = node.to_bytes();
    assert_eq!(encoded.len(), node.encoded_len());
    assert_eq!(bertree::parse(encoded.as_slice()).unwrap(), node);

    // Anything accepted as DER must come out exactly as it went in.
    if Decoder::new(Mode::Der).decode(data).is_ok() {
        assert_eq!(encoded.as_slice(), &data[..node.total_len()]);
    }
});
