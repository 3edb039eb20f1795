//! Ed25519 keypair generation and encoding.

use ed25519_dalek::SigningKey;
use zeroize::Zeroize;

use crate::error::WalletError;

use super::Address;

/// A Solana keypair (32-byte Ed25519 seed + derived address).
///
/// The secret seed is zeroized on drop.
pub struct Keypair {
    /// The Ed25519 secret seed (32 bytes)
    seed: [u8; 32],
    /// The derived address (public key)
    address: Address,
}

impl Keypair {
    /// Generates a new random keypair.
    ///
    /// Uses the operating system's cryptographically secure random number
    /// generator.
    #[inline]
    pub fn generate() -> Self {
        let signing_key = SigningKey::generate(&mut rand::rngs::OsRng);
        Self::from_signing_key(signing_key)
    }

    /// Builds a keypair from a 32-byte Ed25519 seed.
    #[inline]
    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self::from_signing_key(SigningKey::from_bytes(&seed))
    }

    fn from_signing_key(signing_key: SigningKey) -> Self {
        let address = Address::from_bytes(signing_key.verifying_key().to_bytes());
        Self {
            seed: signing_key.to_bytes(),
            address,
        }
    }

    /// Decodes a keypair from raw bytes.
    ///
    /// Accepts the 64-byte Solana keypair layout (seed followed by public
    /// key, as written by `solana-keygen`) or a bare 32-byte seed. For the
    /// 64-byte form the embedded public key must match the one derived from
    /// the seed.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, WalletError> {
        match bytes.len() {
            32 => {
                let seed: [u8; 32] = bytes.try_into().expect("length checked");
                Ok(Self::from_seed(seed))
            }
            64 => {
                let seed: [u8; 32] = bytes[..32].try_into().expect("length checked");
                let keypair = Self::from_seed(seed);
                if keypair.address.as_bytes() != &bytes[32..] {
                    return Err(WalletError::InvalidSecretKey(
                        "public key does not match secret seed".into(),
                    ));
                }
                Ok(keypair)
            }
            n => Err(WalletError::InvalidSecretKey(format!(
                "expected 32 or 64 bytes, got {n}"
            ))),
        }
    }

    /// Decodes a keypair from a Base58-encoded secret.
    pub fn from_base58(encoded: &str) -> Result<Self, WalletError> {
        let bytes = bs58::decode(encoded)
            .into_vec()
            .map_err(|e| WalletError::InvalidSecretKey(format!("base58 decode failed: {e}")))?;
        Self::from_bytes(&bytes)
    }

    /// Returns the 64-byte Solana keypair encoding (seed || public key).
    pub fn to_bytes(&self) -> [u8; 64] {
        let mut out = [0u8; 64];
        out[..32].copy_from_slice(&self.seed);
        out[32..].copy_from_slice(self.address.as_bytes());
        out
    }

    /// Returns the Base58 encoding of the 64-byte keypair.
    pub fn to_base58(&self) -> String {
        bs58::encode(self.to_bytes()).into_string()
    }

    /// Returns the derived address.
    #[inline]
    pub fn address(&self) -> &Address {
        &self.address
    }
}

impl Clone for Keypair {
    fn clone(&self) -> Self {
        Self {
            seed: self.seed,
            address: self.address,
        }
    }
}

impl Drop for Keypair {
    fn drop(&mut self) {
        self.seed.zeroize();
    }
}

impl std::fmt::Debug for Keypair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print the seed.
        write!(f, "Keypair({})", self.address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_keypairs_differ() {
        let a = Keypair::generate();
        let b = Keypair::generate();
        assert_ne!(a.address(), b.address());
    }

    #[test]
    fn seed_roundtrip() {
        let keypair = Keypair::generate();
        let bytes = keypair.to_bytes();
        let recovered = Keypair::from_bytes(&bytes).unwrap();
        assert_eq!(recovered.address(), keypair.address());
    }

    #[test]
    fn base58_roundtrip() {
        let keypair = Keypair::generate();
        let recovered = Keypair::from_base58(&keypair.to_base58()).unwrap();
        assert_eq!(recovered.address(), keypair.address());
    }

    #[test]
    fn deterministic_address_from_seed() {
        // RFC 8032 test vector: all-zero seed.
        let keypair = Keypair::from_seed([0u8; 32]);
        let again = Keypair::from_seed([0u8; 32]);
        assert_eq!(keypair.address(), again.address());
    }

    #[test]
    fn wrong_length_is_rejected() {
        let result = Keypair::from_bytes(&[1u8; 12]);
        assert!(matches!(result, Err(WalletError::InvalidSecretKey(_))));
    }

    #[test]
    fn mismatched_public_half_is_rejected() {
        let keypair = Keypair::generate();
        let mut bytes = keypair.to_bytes();
        bytes[40] ^= 0xff;
        let result = Keypair::from_bytes(&bytes);
        assert!(matches!(result, Err(WalletError::InvalidSecretKey(_))));
    }

    #[test]
    fn bad_base58_is_rejected() {
        let result = Keypair::from_base58("0OIl not base58");
        assert!(matches!(result, Err(WalletError::InvalidSecretKey(_))));
    }

    #[test]
    fn debug_does_not_leak_seed() {
        let keypair = Keypair::from_seed([7u8; 32]);
        let debug = format!("{keypair:?}");
        assert!(debug.contains(&keypair.address().to_base58()));
        assert!(!debug.contains("7, 7"));
    }
}
