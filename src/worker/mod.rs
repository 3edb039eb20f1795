//! Parallel vanity address search.
//!
//! This module provides:
//! - CPU workers running the generate/match loop in isolation
//! - A coordinator that spawns workers, multiplexes their events, enforces
//!   the timeout, and resolves the search exactly once

mod cpu;
mod pool;

pub use cpu::{KeySource, KeySourceError, OsRngSource};
pub use pool::{
    default_worker_count, SearchCoordinator, SearchError, SearchReport, SearchRequest,
    SearchResult,
};
