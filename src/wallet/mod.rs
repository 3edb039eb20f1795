//! Wallet key material: BIP-39 mnemonics, SLIP-0010 Ed25519 derivation, and
//! keypair files.

pub mod derive;
pub mod keyfile;
pub mod mnemonic;
