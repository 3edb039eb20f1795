//! Pattern matching for Solana addresses.
//!
//! A pattern is an optional prefix plus an optional suffix (at least one must
//! be present), matched against the Base58 address text either case
//! sensitively or case folded.

mod pattern;

pub use pattern::{Pattern, PatternError};
