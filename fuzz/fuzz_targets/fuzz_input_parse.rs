#![no_main]

use ethkl_types::{LockHash, WalletAddress, WeiAmount};
use libfuzzer_sys::fuzz_target;

// Hashes and amounts come from tags and the keyboard. Parsing must never
// panic, and a parsed hash must print back to something that parses to it.
fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(hash) = text.parse::<LockHash>() {
        assert_eq!(hash.to_string().parse::<LockHash>(), Ok(hash));
    }
    let _ = text.parse::<WalletAddress>();
    if let Ok(amount) = WeiAmount::parse_ether(text) {
        let _ = amount.to_ether_string();
        let _ = amount.to_ether_fixed(4);
    }
});
