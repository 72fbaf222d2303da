#![no_main]

use libfuzzer_sys::fuzz_target;

// Tag contents are attacker-controlled: decoding must never panic, and
// anything that decodes must survive a re-encode.
fuzz_target!(|data: &[u8]| {
    let Ok(records) = ethkl_nfc::decode_message(data) else {
        return;
    };

    for record in &records {
        let _ = record.text_content();
    }

    if let Ok(encoded) = ethkl_nfc::encode_message(&records) {
        let decoded = ethkl_nfc::decode_message(&encoded).expect("re-encoded message must decode");
        assert_eq!(decoded, records);
    }
});
