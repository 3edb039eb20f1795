//! # sol_vanity
//!
//! High-performance Solana vanity address generator and keypair toolkit.
//!
//! ## Architecture
//!
//! - `crypto`: Ed25519 key generation and Base58 address derivation
//! - `matcher`: Pattern matching against address text
//! - `worker`: Parallel search workers and the coordinating search loop
//! - `wallet`: BIP-39 mnemonics, SLIP-0010 derivation, keypair files
//! - `config`: CLI surface and runtime defaults

pub mod config;
pub mod crypto;
pub mod error;
pub mod matcher;
pub mod wallet;
pub mod worker;

pub use crypto::{Address, Keypair};
pub use error::WalletError;
pub use matcher::{Pattern, PatternError};
pub use worker::{
    KeySource, SearchCoordinator, SearchError, SearchReport, SearchRequest, SearchResult,
};
