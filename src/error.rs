//! Wallet-side error taxonomy.
//!
//! Search failures have their own type (`worker::SearchError`); everything
//! that touches key material, addresses, or keypair files reports through
//! `WalletError`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("invalid mnemonic: {0}")]
    InvalidMnemonic(String),

    #[error("invalid secret key: {0}")]
    InvalidSecretKey(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("derivation error: {0}")]
    DerivationFailed(String),

    #[error("keyfile error: {0}")]
    Keyfile(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_invalid_mnemonic() {
        let err = WalletError::InvalidMnemonic("word not in list".into());
        assert_eq!(err.to_string(), "invalid mnemonic: word not in list");
    }

    #[test]
    fn display_invalid_secret_key() {
        let err = WalletError::InvalidSecretKey("expected 64 bytes, got 12".into());
        assert_eq!(
            err.to_string(),
            "invalid secret key: expected 64 bytes, got 12"
        );
    }

    #[test]
    fn error_trait_is_implemented() {
        let err: Box<dyn std::error::Error> =
            Box::new(WalletError::InvalidAddress("bad decode".into()));
        assert!(err.to_string().contains("bad decode"));
    }
}
