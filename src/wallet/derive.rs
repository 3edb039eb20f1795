//! SLIP-0010 Ed25519 key derivation.
//!
//! Solana derives its keys along an all-hardened path (the curve has no
//! public parent derivation), so every path component must carry the
//! hardened marker.

use hmac::{Hmac, Mac};
use sha2::Sha512;
use zeroize::Zeroize;

use crate::crypto::Keypair;
use crate::error::WalletError;

use super::mnemonic;

type HmacSha512 = Hmac<Sha512>;

/// The standard Solana derivation path.
pub const SOLANA_DERIVATION_PATH: &str = "m/44'/501'/0'/0'";

/// Derive a keypair from a 64-byte BIP-39 seed along a hardened path.
///
/// SLIP-0010: the master key is `HMAC-SHA512(key = "ed25519 seed", data =
/// seed)`; each child is `HMAC-SHA512(key = chain_code, data = 0x00 || key ||
/// be32(index | 0x80000000))`.
pub fn derive_keypair(seed: &[u8], path: &str) -> Result<Keypair, WalletError> {
    let components = parse_derivation_path(path)?;

    let mut mac = HmacSha512::new_from_slice(b"ed25519 seed")
        .map_err(|e| WalletError::DerivationFailed(e.to_string()))?;
    mac.update(seed);
    let digest = mac.finalize().into_bytes();

    let mut key = [0u8; 32];
    let mut chain_code = [0u8; 32];
    key.copy_from_slice(&digest[..32]);
    chain_code.copy_from_slice(&digest[32..]);

    for index in components {
        let mut mac = HmacSha512::new_from_slice(&chain_code)
            .map_err(|e| WalletError::DerivationFailed(e.to_string()))?;
        mac.update(&[0x00]);
        mac.update(&key);
        mac.update(&(index | 0x8000_0000).to_be_bytes());
        let digest = mac.finalize().into_bytes();

        key.copy_from_slice(&digest[..32]);
        chain_code.copy_from_slice(&digest[32..]);
    }

    let keypair = Keypair::from_seed(key);
    key.zeroize();
    chain_code.zeroize();

    Ok(keypair)
}

/// Derive a keypair straight from a mnemonic phrase.
pub fn keypair_from_mnemonic(
    phrase: &str,
    passphrase: &str,
    path: &str,
) -> Result<Keypair, WalletError> {
    let seed = mnemonic::mnemonic_to_seed(phrase, passphrase)?;
    derive_keypair(&seed, path)
}

/// Parse "m/44'/501'/0'/0'" into [44, 501, 0, 0], requiring the hardened
/// marker (`'` or `h`) on every component.
fn parse_derivation_path(path: &str) -> Result<Vec<u32>, WalletError> {
    let rest = path
        .strip_prefix("m/")
        .ok_or_else(|| WalletError::DerivationFailed("path must start with m/".into()))?;

    rest.split('/')
        .map(|component| {
            let index = component
                .strip_suffix('\'')
                .or_else(|| component.strip_suffix('h'))
                .ok_or_else(|| {
                    WalletError::DerivationFailed(format!(
                        "ed25519 derivation is hardened-only; '{component}' lacks the ' marker"
                    ))
                })?;
            let index: u32 = index.parse().map_err(|e| {
                WalletError::DerivationFailed(format!("invalid path component '{component}': {e}"))
            })?;
            if index >= 0x8000_0000 {
                return Err(WalletError::DerivationFailed(format!(
                    "path component {index} out of range"
                )));
            }
            Ok(index)
        })
        .collect()
}
