//! Search coordination.
//!
//! The coordinator owns the aggregate attempt counter and the worker handles.
//! Workers never touch shared state; everything flows to the coordinator as
//! messages, and the coordinator multiplexes over the event channel, the
//! timeout, and the report tick with `crossbeam_channel::select!`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{after, never, tick, unbounded, Receiver};
use thiserror::Error;

use crate::crypto::Keypair;
use crate::matcher::Pattern;

use super::cpu::{CpuWorker, KeySource, OsRngSource, WorkerEvent};

/// Returns the default worker count: hardware concurrency minus one, at
/// least 1.
pub fn default_worker_count() -> usize {
    num_cpus::get().saturating_sub(1).max(1)
}

/// Parameters of one search.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    /// Address prefix to search for
    pub prefix: Option<String>,
    /// Address suffix to search for
    pub suffix: Option<String>,
    /// Whether matching is case sensitive
    pub case_sensitive: bool,
    /// Number of workers (clamped to at least 1)
    pub workers: usize,
    /// Give up after this long with no match. `None` searches until found.
    pub timeout: Option<Duration>,
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            prefix: None,
            suffix: None,
            case_sensitive: true,
            workers: default_worker_count(),
            timeout: None,
        }
    }
}

impl SearchRequest {
    /// Compiles the request's pattern, normalizing it exactly once.
    pub fn pattern(&self) -> Result<Pattern, SearchError> {
        Pattern::new(
            self.prefix.as_deref(),
            self.suffix.as_deref(),
            self.case_sensitive,
        )
        .map_err(|e| SearchError::InvalidRequest(e.to_string()))
    }
}

/// A successful search outcome. Produced exactly once per search.
#[derive(Debug)]
pub struct SearchResult {
    /// The matching keypair
    pub keypair: Keypair,
    /// Total attempts across all workers: every folded progress batch plus
    /// the winning worker's in-flight count at match time
    pub attempts: u64,
    /// Wall-clock duration of the search
    pub elapsed: Duration,
}

/// A periodic progress snapshot handed to the report observer.
#[derive(Debug, Clone, Copy)]
pub struct SearchReport {
    /// Attempts folded into the aggregate so far (monotonically
    /// non-decreasing across reports)
    pub attempts: u64,
    /// Smoothed attempts per second since the search started
    pub rate: f64,
    /// Time since the search started
    pub elapsed: Duration,
}

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("no match within {}ms", .waited.as_millis())]
    Timeout { waited: Duration },

    #[error("search cancelled")]
    Cancelled,

    #[error("all workers failed before a match was found")]
    WorkersFailed,
}

/// Runs vanity searches: validates the request, spawns workers, aggregates
/// their events, and resolves each search to exactly one terminal outcome.
pub struct SearchCoordinator {
    report_interval: Duration,
    cancel: Arc<AtomicBool>,
}

impl Default for SearchCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchCoordinator {
    pub fn new() -> Self {
        Self {
            report_interval: Duration::from_millis(100),
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Sets how often progress reports are emitted.
    pub fn with_report_interval(mut self, interval: Duration) -> Self {
        self.report_interval = interval;
        self
    }

    /// Returns the cancel flag. Setting it (e.g. from a Ctrl-C handler)
    /// makes the running search resolve to `Cancelled`.
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        self.cancel.clone()
    }

    /// Searches until a keypair matching the request's pattern is found,
    /// the timeout elapses, or the search is cancelled.
    pub fn search(&self, request: &SearchRequest) -> Result<SearchResult, SearchError> {
        self.search_with_report(request, |_| {})
    }

    /// Like [`search`](Self::search), invoking `on_report` on every progress
    /// tick.
    pub fn search_with_report<F>(
        &self,
        request: &SearchRequest,
        on_report: F,
    ) -> Result<SearchResult, SearchError>
    where
        F: FnMut(&SearchReport),
    {
        let workers = request.workers.max(1);
        let sources = (0..workers)
            .map(|_| Box::new(OsRngSource) as Box<dyn KeySource>)
            .collect();
        self.search_with_sources(request, sources, on_report)
    }

    /// Runs a search drawing candidate keys from the given sources, one
    /// worker per source. This is the deterministic entry point; production
    /// callers go through [`search`](Self::search).
    pub fn search_with_sources<F>(
        &self,
        request: &SearchRequest,
        sources: Vec<Box<dyn KeySource>>,
        mut on_report: F,
    ) -> Result<SearchResult, SearchError>
    where
        F: FnMut(&SearchReport),
    {
        // Validate before any worker exists.
        let pattern = request.pattern()?;
        if sources.is_empty() {
            return Err(SearchError::InvalidRequest(
                "at least one worker is required".into(),
            ));
        }

        let (event_tx, event_rx) = unbounded();
        let stop = Arc::new(AtomicBool::new(false));
        let mut alive = sources.len();

        let handles: Vec<JoinHandle<()>> = sources
            .into_iter()
            .enumerate()
            .map(|(id, source)| {
                let pattern = pattern.clone();
                let event_tx = event_tx.clone();
                let stop = stop.clone();

                thread::Builder::new()
                    .name(format!("vanity-worker-{id}"))
                    .spawn(move || {
                        CpuWorker::new(id, pattern, event_tx, stop, source).run();
                    })
                    .expect("failed to spawn worker thread")
            })
            .collect();

        // Only workers hold senders now, so the channel disconnects once
        // every worker has exited.
        drop(event_tx);

        let started = Instant::now();
        let deadline = match request.timeout {
            Some(timeout) => after(timeout),
            None => never(),
        };
        let reports = tick(self.report_interval);
        let mut total: u64 = 0;

        loop {
            crossbeam_channel::select! {
                recv(event_rx) -> event => match event {
                    Ok(WorkerEvent::Progress { attempts }) => {
                        total += attempts;
                    }
                    Ok(WorkerEvent::Found { keypair, attempts }) => {
                        total += attempts;
                        Self::shutdown(&stop, handles, &event_rx);
                        return Ok(SearchResult {
                            keypair,
                            attempts: total,
                            elapsed: started.elapsed(),
                        });
                    }
                    Ok(WorkerEvent::Failed { worker_id, message }) => {
                        alive -= 1;
                        eprintln!(
                            "warning: worker {worker_id} failed ({message}); \
                             {alive} worker(s) remaining"
                        );
                        if alive == 0 {
                            Self::shutdown(&stop, handles, &event_rx);
                            return Err(SearchError::WorkersFailed);
                        }
                    }
                    // Every sender dropped without a match.
                    Err(_) => {
                        Self::shutdown(&stop, handles, &event_rx);
                        return Err(SearchError::WorkersFailed);
                    }
                },
                recv(deadline) -> _ => {
                    Self::shutdown(&stop, handles, &event_rx);
                    return Err(SearchError::Timeout { waited: started.elapsed() });
                },
                recv(reports) -> _ => {
                    if self.cancel.load(Ordering::Relaxed) {
                        Self::shutdown(&stop, handles, &event_rx);
                        return Err(SearchError::Cancelled);
                    }
                    let elapsed = started.elapsed();
                    let secs = elapsed.as_secs_f64();
                    let rate = if secs > 0.0 { total as f64 / secs } else { 0.0 };
                    on_report(&SearchReport { attempts: total, rate, elapsed });
                },
            }
        }
    }

    /// Stops and joins all workers. Idempotent: the stop flag is a plain
    /// atomic store and joining an exited thread is a no-op. Events still
    /// buffered in the channel are discarded, so nothing a worker sent after
    /// the terminal transition is ever honored.
    fn shutdown(stop: &AtomicBool, handles: Vec<JoinHandle<()>>, events: &Receiver<WorkerEvent>) {
        stop.store(true, Ordering::Relaxed);
        for handle in handles {
            let _ = handle.join();
        }
        while events.try_recv().is_ok() {}
    }
}
