//! Typed bindings for the lock contract.

use ethers::contract::abigen;

abigen!(
    LockVault,
    r#"[
        function lockEth() external payable returns (bytes32)
        function claimEth(bytes32 transactionHash, uint256 amount) external
        function getTransaction(bytes32 transactionHash) external view returns (address, uint256, uint256, address[])
        function getClaimHistory(bytes32 transactionHash, address claimer) external view returns (uint256[], uint256[])
        function getTransactionHashesBySender(address sender) external view returns (bytes32[])
        function getLockedEthAmount(bytes32 transactionHash) external view returns (uint256)
        event EthLocked(bytes32 transactionHash, address indexed sender, uint256 amount)
        event EthClaimed(bytes32 indexed transactionHash, address indexed claimer, uint256 amount)
    ]"#
);
