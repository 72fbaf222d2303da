//! `EthGateway` read paths against a mocked JSON-RPC provider.
//!
//! Each test queues exactly one response, so the order the mock hands
//! responses back in does not matter.

use std::sync::Arc;

use ethers::abi::{encode, Token};
use ethers::providers::{MockProvider, Provider};
use ethers::types::{Address, Bytes, U256};

use ethkl_gateway::{ContractGateway, EthGateway, GatewayError};
use ethkl_types::{LockHash, Timestamp, WalletAddress, WeiAmount};

fn gateway() -> (EthGateway<Provider<MockProvider>>, MockProvider) {
    let (provider, mock) = Provider::mocked();
    let gateway = EthGateway::new(
        Arc::new(provider),
        WalletAddress::from_low_u64(0xC0FFEE),
        WalletAddress::from_low_u64(1),
    );
    (gateway, mock)
}

#[tokio::test]
async fn decodes_sender_hashes() {
    let (gateway, mock) = gateway();
    let encoded = encode(&[Token::Array(vec![
        Token::FixedBytes(vec![0x11; 32]),
        Token::FixedBytes(vec![0x22; 32]),
    ])]);
    mock.push::<Bytes, _>(Bytes::from(encoded)).unwrap();

    let hashes = gateway
        .get_transaction_hashes_by_sender(&WalletAddress::from_low_u64(1))
        .await
        .unwrap();
    assert_eq!(hashes, vec![LockHash::new([0x11; 32]), LockHash::new([0x22; 32])]);
}

#[tokio::test]
async fn decodes_transaction_tuple() {
    let (gateway, mock) = gateway();
    let sender = Address::from_low_u64_be(9);
    let claimer = Address::from_low_u64_be(10);
    let encoded = encode(&[
        Token::Address(sender),
        Token::Uint(U256::from(1_000u64)),
        Token::Uint(U256::from(250u64)),
        Token::Array(vec![Token::Address(claimer), Token::Address(claimer)]),
    ]);
    mock.push::<Bytes, _>(Bytes::from(encoded)).unwrap();

    let hash = LockHash::new([0x33; 32]);
    let entry = gateway.get_transaction(&hash).await.unwrap().unwrap();
    assert_eq!(entry.hash, hash);
    assert_eq!(entry.sender, WalletAddress::from(sender));
    assert_eq!(entry.amount, WeiAmount::from_wei(1_000));
    assert_eq!(entry.claimed, WeiAmount::from_wei(250));
    // duplicates survive decoding
    assert_eq!(entry.claimers, vec![WalletAddress::from(claimer); 2]);
}

#[tokio::test]
async fn zero_sender_means_unknown_lock() {
    let (gateway, mock) = gateway();
    let encoded = encode(&[
        Token::Address(Address::zero()),
        Token::Uint(U256::zero()),
        Token::Uint(U256::zero()),
        Token::Array(vec![]),
    ]);
    mock.push::<Bytes, _>(Bytes::from(encoded)).unwrap();

    let entry = gateway.get_transaction(&LockHash::ZERO).await.unwrap();
    assert!(entry.is_none());
}

#[tokio::test]
async fn decodes_claim_history_arrays() {
    let (gateway, mock) = gateway();
    let encoded = encode(&[
        Token::Array(vec![Token::Uint(U256::from(5u64)), Token::Uint(U256::from(7u64))]),
        Token::Array(vec![Token::Uint(U256::from(100u64))]),
    ]);
    mock.push::<Bytes, _>(Bytes::from(encoded)).unwrap();

    let history = gateway
        .get_claim_history(&LockHash::new([1; 32]), &WalletAddress::from_low_u64(2))
        .await
        .unwrap();
    assert_eq!(history.amounts, vec![WeiAmount::from_wei(5), WeiAmount::from_wei(7)]);
    assert_eq!(history.timestamps, vec![Timestamp::new(100)]);
    assert!(!history.is_consistent());
}

#[tokio::test]
async fn reads_native_balance() {
    let (gateway, mock) = gateway();
    mock.push(U256::from(42u64)).unwrap();

    let balance = gateway.balance_of(&WalletAddress::from_low_u64(1)).await.unwrap();
    assert_eq!(balance, WeiAmount::from_wei(42));
}

#[tokio::test]
async fn empty_mock_surfaces_as_error() {
    let (gateway, _mock) = gateway();
    let result = gateway.get_locked_eth_amount(&LockHash::ZERO).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn timestamp_beyond_u64_fails_the_history_call() {
    let (gateway, mock) = gateway();
    let encoded = encode(&[
        Token::Array(vec![Token::Uint(U256::from(5u64))]),
        Token::Array(vec![Token::Uint(U256::from(u64::MAX) + U256::one())]),
    ]);
    mock.push::<Bytes, _>(Bytes::from(encoded)).unwrap();

    let result = gateway
        .get_claim_history(&LockHash::new([1; 32]), &WalletAddress::from_low_u64(2))
        .await;
    assert!(matches!(result, Err(GatewayError::Decode(_))));
}
