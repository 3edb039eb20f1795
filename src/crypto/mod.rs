//! Cryptographic operations for Solana key and address generation.
//!
//! This module provides:
//! - Secure random Ed25519 key generation
//! - Base58 address derivation (a Solana address is the Base58 encoding of
//!   the raw 32-byte public key, with no hashing step)
//! - Keypair encoding and decoding in the formats the Solana tooling uses

mod address;
mod keypair;

pub use address::Address;
pub use keypair::Keypair;
