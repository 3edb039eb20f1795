//! CLI surface and runtime defaults.
//!
//! Every tunable (pattern, workers, timeout, derivation path, output file)
//! comes in through explicit arguments; nothing is read from globals and no
//! key material is ever baked into the binary.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use crate::wallet::derive::SOLANA_DERIVATION_PATH;
use crate::worker::{default_worker_count, SearchRequest};

/// Default grind deadline. Pass `--timeout-ms 0` to search until found.
pub const DEFAULT_TIMEOUT_MS: u64 = 60_000;

/// Solana vanity address generator and keypair toolkit
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search for a keypair whose address matches a prefix and/or suffix
    Grind(GrindArgs),
    /// Generate a new wallet: mnemonic phrase plus derived keypair
    New(NewArgs),
    /// Recover a keypair from a mnemonic phrase
    Recover(RecoverArgs),
    /// Print the address of a keypair file or Base58-encoded secret
    Pubkey(PubkeyArgs),
}

#[derive(Args, Debug)]
pub struct GrindArgs {
    /// Address prefix to search for (base58 characters)
    #[arg(short, long)]
    pub prefix: Option<String>,

    /// Address suffix to search for (base58 characters)
    #[arg(short, long)]
    pub suffix: Option<String>,

    /// Match without regard to letter casing
    #[arg(short, long)]
    pub ignore_case: bool,

    /// Number of worker threads (default: CPU count minus one)
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Give up after this many milliseconds (0 = search until found)
    #[arg(short, long, default_value_t = DEFAULT_TIMEOUT_MS)]
    pub timeout_ms: u64,

    /// Write the found keypair to this file (JSON byte array)
    #[arg(short, long)]
    pub outfile: Option<PathBuf>,
}

impl GrindArgs {
    /// Builds the search request; the coordinator validates the pattern.
    pub fn to_request(&self) -> SearchRequest {
        SearchRequest {
            prefix: self.prefix.clone(),
            suffix: self.suffix.clone(),
            case_sensitive: !self.ignore_case,
            workers: self.workers.unwrap_or_else(default_worker_count),
            timeout: match self.timeout_ms {
                0 => None,
                ms => Some(Duration::from_millis(ms)),
            },
        }
    }
}

#[derive(Args, Debug)]
pub struct NewArgs {
    /// Hardened derivation path for the keypair
    #[arg(long, default_value = SOLANA_DERIVATION_PATH)]
    pub derivation_path: String,

    /// Optional BIP-39 passphrase
    #[arg(long, default_value = "")]
    pub passphrase: String,

    /// Write the keypair to this file (JSON byte array)
    #[arg(short, long)]
    pub outfile: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct RecoverArgs {
    /// The mnemonic phrase (quote the whole phrase)
    #[arg(short, long)]
    pub mnemonic: String,

    /// Hardened derivation path for the keypair
    #[arg(long, default_value = SOLANA_DERIVATION_PATH)]
    pub derivation_path: String,

    /// Optional BIP-39 passphrase
    #[arg(long, default_value = "")]
    pub passphrase: String,

    /// Write the keypair to this file (JSON byte array)
    #[arg(short, long)]
    pub outfile: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct PubkeyArgs {
    /// Path to a keypair file, or a Base58-encoded secret key
    pub keypair: String,
}
