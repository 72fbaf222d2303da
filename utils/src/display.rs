//! Display helpers for addresses and keys.

/// Shorten a public key or address to `0xAb...1234` for table cells.
///
/// Keys of eight characters or fewer are returned unchanged.
pub fn shorten_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return key.to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

/// Abbreviate the connected address for a status line (`0x29Dc9...`).
pub fn abbreviate_address(address: &str) -> String {
    let head: String = address.chars().take(7).collect();
    format!("{head}...")
}
