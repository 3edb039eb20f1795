//! End-to-end pipeline: grind a real (easy) vanity keypair, persist it,
//! reload it, and recover a wallet from a mnemonic.

use std::time::Duration;

use sol_vanity::wallet::{derive, keyfile, mnemonic};
use sol_vanity::{SearchCoordinator, SearchRequest};

#[test]
fn grind_persist_reload() {
    // One case-insensitive character matches roughly 1 in 29 addresses, so
    // real random workers find it almost immediately.
    let request = SearchRequest {
        prefix: Some("a".into()),
        suffix: None,
        case_sensitive: false,
        workers: 2,
        timeout: Some(Duration::from_secs(60)),
    };

    let coordinator = SearchCoordinator::new();
    let result = coordinator.search(&request).expect("easy pattern must match");

    let address = result.keypair.address().to_base58();
    assert!(address.starts_with('a') || address.starts_with('A'), "{address}");
    assert!(result.attempts >= 1);

    let path = std::env::temp_dir().join(format!("sol_vanity-pipeline-{}.json", std::process::id()));
    keyfile::write_keypair_file(&result.keypair, &path).unwrap();
    let reloaded = keyfile::read_keypair_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(reloaded.address(), result.keypair.address());
}

#[test]
fn mnemonic_recovery_is_deterministic() {
    let phrase = mnemonic::generate_mnemonic().unwrap();

    let first = derive::keypair_from_mnemonic(&phrase, "", derive::SOLANA_DERIVATION_PATH).unwrap();
    let second = derive::keypair_from_mnemonic(&phrase, "", derive::SOLANA_DERIVATION_PATH).unwrap();

    assert_eq!(first.address(), second.address());
    // The recovered secret reproduces the same keypair through the Base58
    // encoding as well.
    let decoded = sol_vanity::Keypair::from_base58(&first.to_base58()).unwrap();
    assert_eq!(decoded.address(), first.address());
}
