//! CPU worker for the vanity address search.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crossbeam_channel::Sender;
use thiserror::Error;

use crate::crypto::Keypair;
use crate::matcher::Pattern;

/// Attempts folded into one progress event. Trades event-channel overhead
/// against progress-display latency.
pub(crate) const PROGRESS_BATCH: u64 = 1000;

/// A source of candidate keypairs.
///
/// The default source draws fresh random keys from the OS generator; tests
/// substitute scripted sources to make the search deterministic.
pub trait KeySource: Send {
    fn next_keypair(&mut self) -> Result<Keypair, KeySourceError>;
}

/// Failure of a key source. Isolated to the worker that hit it; the search
/// keeps running on the remaining workers.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct KeySourceError(pub String);

/// The default key source: fresh random keypairs from the OS generator.
#[derive(Debug, Default)]
pub struct OsRngSource;

impl KeySource for OsRngSource {
    #[inline]
    fn next_keypair(&mut self) -> Result<Keypair, KeySourceError> {
        Ok(Keypair::generate())
    }
}

impl KeySource for Box<dyn KeySource> {
    #[inline]
    fn next_keypair(&mut self) -> Result<Keypair, KeySourceError> {
        (**self).next_keypair()
    }
}

/// Events flowing from a worker to the coordinator. Workers never receive
/// messages; the stop flag is their only inbound signal.
#[derive(Debug)]
pub(crate) enum WorkerEvent {
    /// Attempts made since the worker's previous report.
    Progress { attempts: u64 },
    /// A match. `attempts` is the worker's in-flight count not yet covered
    /// by a progress event, so the coordinator never double-counts.
    Found { keypair: Keypair, attempts: u64 },
    /// The worker's key source failed; the worker has exited.
    Failed { worker_id: usize, message: String },
}

/// A worker that generates candidate keypairs and tests them against the
/// pattern until it finds a match, its source fails, or it is told to stop.
pub struct CpuWorker<S> {
    id: usize,
    pattern: Pattern,
    events: Sender<WorkerEvent>,
    stop: Arc<AtomicBool>,
    source: S,
}

impl<S: KeySource> CpuWorker<S> {
    pub fn new(
        id: usize,
        pattern: Pattern,
        events: Sender<WorkerEvent>,
        stop: Arc<AtomicBool>,
        source: S,
    ) -> Self {
        Self {
            id,
            pattern,
            events,
            stop,
            source,
        }
    }

    /// Runs the worker loop until a match is found, the stop flag is set,
    /// the key source fails, or the event channel closes.
    ///
    /// Sends at most one `Found` or `Failed` event, then exits.
    pub fn run(mut self) {
        let mut unreported: u64 = 0;

        loop {
            if self.stop.load(Ordering::Relaxed) {
                break;
            }

            let keypair = match self.source.next_keypair() {
                Ok(keypair) => keypair,
                Err(e) => {
                    let _ = self.events.send(WorkerEvent::Failed {
                        worker_id: self.id,
                        message: e.to_string(),
                    });
                    break;
                }
            };
            unreported += 1;

            let address = keypair.address().to_base58();
            if self.pattern.matches(&address) {
                let _ = self.events.send(WorkerEvent::Found {
                    keypair,
                    attempts: unreported,
                });
                break;
            }

            if unreported >= PROGRESS_BATCH {
                if self
                    .events
                    .send(WorkerEvent::Progress { attempts: unreported })
                    .is_err()
                {
                    // Coordinator is gone; nothing left to report to.
                    break;
                }
                unreported = 0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;

    struct Scripted {
        keys: Vec<Keypair>,
    }

    impl KeySource for Scripted {
        fn next_keypair(&mut self) -> Result<Keypair, KeySourceError> {
            if self.keys.is_empty() {
                Err(KeySourceError("script exhausted".into()))
            } else {
                Ok(self.keys.remove(0))
            }
        }
    }

    fn target_and_filler() -> (Keypair, String, Keypair) {
        let target = Keypair::generate();
        let prefix = target.address().to_base58()[..4].to_string();
        let mut filler = Keypair::generate();
        while filler.address().to_base58().starts_with(&prefix) {
            filler = Keypair::generate();
        }
        (target, prefix, filler)
    }

    #[test]
    fn reports_found_with_inflight_count() {
        let (target, prefix, filler) = target_and_filler();
        let pattern = Pattern::new(Some(&prefix), None, true).unwrap();
        let (tx, rx) = unbounded();
        let stop = Arc::new(AtomicBool::new(false));

        let source = Scripted {
            keys: vec![filler.clone(), filler, target.clone()],
        };
        CpuWorker::new(0, pattern, tx, stop, source).run();

        match rx.try_recv().unwrap() {
            WorkerEvent::Found { keypair, attempts } => {
                assert_eq!(keypair.address(), target.address());
                assert_eq!(attempts, 3);
            }
            other => panic!("expected Found, got {other:?}"),
        }
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn pre_set_stop_flag_means_no_events() {
        let pattern = Pattern::new(Some("a"), None, false).unwrap();
        let (tx, rx) = unbounded();
        let stop = Arc::new(AtomicBool::new(true));

        CpuWorker::new(0, pattern, tx, stop.clone(), OsRngSource).run();

        assert!(rx.try_recv().is_err());
        // Stopping again is a no-op.
        stop.store(true, Ordering::Relaxed);
    }

    #[test]
    fn source_failure_is_reported_once() {
        let pattern = Pattern::new(Some("a"), None, false).unwrap();
        let (tx, rx) = unbounded();
        let stop = Arc::new(AtomicBool::new(false));

        CpuWorker::new(7, pattern, tx, stop, Scripted { keys: vec![] }).run();

        match rx.try_recv().unwrap() {
            WorkerEvent::Failed { worker_id, message } => {
                assert_eq!(worker_id, 7);
                assert_eq!(message, "script exhausted");
            }
            other => panic!("expected Failed, got {other:?}"),
        }
        assert!(rx.try_recv().is_err());
    }
}
