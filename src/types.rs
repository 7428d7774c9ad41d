use std::net::IpAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// One unit of work: a single TCP connect attempt against an address/port pair.
///
/// Work sets may contain duplicates; each occurrence is attempted separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScanTask {
    pub addr: IpAddr,
    pub port: u16,
}

/// Classified outcome of one connect attempt.
///
/// `Closed` covers both an active refusal and a connect timeout; it is the
/// expected outcome for the overwhelming majority of ports and is never
/// treated as an error. `Error` is reserved for unexpected I/O failures
/// (network unreachable, permission denied, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortState {
    Open,
    Closed,
    Error,
}

/// One result record, produced exactly once per [`ScanTask`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanResult {
    pub addr: IpAddr,
    pub port: u16,
    pub state: PortState,
    /// Human-readable diagnostic, present only when `state == Error`.
    pub detail: Option<String>,
}

impl ScanResult {
    pub fn new(task: ScanTask, state: PortState) -> Self {
        Self {
            addr: task.addr,
            port: task.port,
            state,
            detail: None,
        }
    }

    pub fn with_detail(task: ScanTask, detail: String) -> Self {
        Self {
            addr: task.addr,
            port: task.port,
            state: PortState::Error,
            detail: Some(detail),
        }
    }
}

/// Shared progress counters updated by scan tasks as they complete.
///
/// The `in_flight`/`peak_in_flight` gauges track how many attempts currently
/// hold a concurrency permit, which is how the "at most N concurrent
/// attempts" bound can be observed from outside the executor.
#[derive(Clone, Debug)]
pub struct ScanProgress {
    pub done: Arc<AtomicU64>,
    pub open: Arc<AtomicU64>,
    pub closed: Arc<AtomicU64>,
    pub errors: Arc<AtomicU64>,
    pub in_flight: Arc<AtomicU64>,
    pub peak_in_flight: Arc<AtomicU64>,
}

impl ScanProgress {
    pub fn new() -> Self {
        Self {
            done: Arc::new(AtomicU64::new(0)),
            open: Arc::new(AtomicU64::new(0)),
            closed: Arc::new(AtomicU64::new(0)),
            errors: Arc::new(AtomicU64::new(0)),
            in_flight: Arc::new(AtomicU64::new(0)),
            peak_in_flight: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Mark one attempt as having acquired its permit.
    pub fn attempt_started(&self) {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);
    }

    /// Mark one attempt as finished with the given classified state.
    pub fn attempt_finished(&self, state: PortState) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        match state {
            PortState::Open => self.open.fetch_add(1, Ordering::Relaxed),
            PortState::Closed => self.closed.fetch_add(1, Ordering::Relaxed),
            PortState::Error => self.errors.fetch_add(1, Ordering::Relaxed),
        };
        self.done.fetch_add(1, Ordering::Relaxed);
    }
}

impl Default for ScanProgress {
    fn default() -> Self {
        Self::new()
    }
}

/// Aggregate outcome of a finished run, derived by the caller.
#[derive(Debug, Clone)]
pub struct ScanSummary {
    pub elapsed: Duration,
    pub total: u64,
    pub open: u64,
    pub closed: u64,
    pub errors: u64,
}

impl ScanSummary {
    pub fn from_progress(progress: &ScanProgress, elapsed: Duration) -> Self {
        Self {
            elapsed,
            total: progress.done.load(Ordering::Relaxed),
            open: progress.open.load(Ordering::Relaxed),
            closed: progress.closed.load(Ordering::Relaxed),
            errors: progress.errors.load(Ordering::Relaxed),
        }
    }
}
