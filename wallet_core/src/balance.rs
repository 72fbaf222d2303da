//! Account status lines.

use ethkl_types::{WalletAddress, WeiAmount};
use ethkl_utils::abbreviate_address;

/// Decimals shown for the account balance.
pub const BALANCE_DECIMALS: usize = 4;

/// `Balance: 1.2346 ETH`
pub fn format_balance(balance: WeiAmount) -> String {
    format!("Balance: {} ETH", balance.to_ether_fixed(BALANCE_DECIMALS))
}

/// `Address: 0x29Dc9...`, or `Not connected`.
pub fn format_account(address: Option<&WalletAddress>) -> String {
    match address {
        Some(address) => format!("Address: {}", abbreviate_address(&address.to_string())),
        None => "Not connected".to_string(),
    }
}
