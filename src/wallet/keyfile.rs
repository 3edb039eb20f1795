//! Keypair files.
//!
//! The on-disk format is the one `solana-keygen` writes: a JSON array of the
//! 64 keypair bytes (seed followed by public key).

use std::fs;
use std::path::Path;

use crate::crypto::Keypair;
use crate::error::WalletError;

/// Write a keypair to `path` as a JSON byte array.
///
/// On unix the file is created with mode 0600; it holds the secret seed.
pub fn write_keypair_file(keypair: &Keypair, path: impl AsRef<Path>) -> Result<(), WalletError> {
    let json = serde_json::to_string(&keypair.to_bytes().to_vec())
        .map_err(|e| WalletError::Keyfile(e.to_string()))?;
    fs::write(&path, json)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o600))?;
    }

    Ok(())
}

/// Read a keypair from a JSON byte-array file.
pub fn read_keypair_file(path: impl AsRef<Path>) -> Result<Keypair, WalletError> {
    let raw = fs::read_to_string(path)?;
    let bytes: Vec<u8> =
        serde_json::from_str(&raw).map_err(|e| WalletError::Keyfile(e.to_string()))?;
    Keypair::from_bytes(&bytes)
}
