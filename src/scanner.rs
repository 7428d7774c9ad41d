use crate::types::{PortState, ScanProgress, ScanResult, ScanTask};
use anyhow::Result;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Per-attempt connect timeout. A single tunable constant, never derived from
/// the size of the work set.
pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 500;

/// Default cap on simultaneously in-flight connection attempts.
pub const DEFAULT_CONCURRENCY: usize = 1000;

/// Execute the work set with at most `concurrency` connection attempts in
/// flight, streaming one [`ScanResult`] per task over `tx` as soon as it is
/// classified.
///
/// - The concurrency gate is a `Semaphore`; a task holds its permit for the
///   whole attempt and releases it on every exit path (the permit is an owned
///   RAII guard dropped when the task ends).
/// - Each attempt is bounded by `tokio::time::timeout`.
/// - Returns only after every issued task has produced exactly one result.
pub async fn run_scan(
    tasks: &[ScanTask],
    concurrency: usize,
    connect_timeout: Duration,
    tx: UnboundedSender<ScanResult>,
) -> Result<ScanProgress> {
    run_scan_internal(tasks, concurrency, connect_timeout, tx, None, None).await
}

/// Variant that accepts a `CancellationToken` (operator interrupt) and
/// updates caller-owned [`ScanProgress`] counters. Once the token fires no
/// new tasks are issued; attempts already in flight run to completion, still
/// emit their result, and still release their permit.
pub async fn run_scan_with_progress(
    tasks: &[ScanTask],
    concurrency: usize,
    connect_timeout: Duration,
    tx: UnboundedSender<ScanResult>,
    cancel: CancellationToken,
    progress: ScanProgress,
) -> Result<ScanProgress> {
    run_scan_internal(
        tasks,
        concurrency,
        connect_timeout,
        tx,
        Some(cancel),
        Some(progress),
    )
    .await
}

async fn run_scan_internal(
    tasks: &[ScanTask],
    concurrency: usize,
    connect_timeout: Duration,
    tx: UnboundedSender<ScanResult>,
    cancel_opt: Option<CancellationToken>,
    progress_opt: Option<ScanProgress>,
) -> Result<ScanProgress> {
    let progress = progress_opt.unwrap_or_default();
    let cancel = cancel_opt.unwrap_or_default();
    let sem = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut set = JoinSet::new();

    for &task in tasks {
        if cancel.is_cancelled() {
            break;
        }
        let permit = sem
            .clone()
            .acquire_owned()
            .await
            .expect("semaphore in scope");
        let tx = tx.clone();
        let progress = progress.clone();

        set.spawn(async move {
            let _permit = permit; // held for the whole attempt

            progress.attempt_started();
            let result = probe(task, connect_timeout).await;
            progress.attempt_finished(result.state);

            // A send error means the sink is gone; the result is then
            // unobservable and there is nothing useful left to do with it.
            let _ = tx.send(result);
        });
    }

    while set.join_next().await.is_some() {}

    Ok(progress)
}

/// Attempt one TCP connect bounded by `connect_timeout` and classify it.
/// A successful connection is closed immediately; no data is exchanged.
async fn probe(task: ScanTask, connect_timeout: Duration) -> ScanResult {
    let addr = SocketAddr::new(task.addr, task.port);
    match time::timeout(connect_timeout, TcpStream::connect(addr)).await {
        Ok(Ok(stream)) => {
            drop(stream);
            ScanResult::new(task, PortState::Open)
        }
        Ok(Err(e)) => match classify(&e) {
            PortState::Error => ScanResult::with_detail(task, e.to_string()),
            state => ScanResult::new(task, state),
        },
        // Timeout expired: the expected outcome for filtered ports.
        Err(_) => ScanResult::new(task, PortState::Closed),
    }
}

/// Map a connect failure to a port state.
///
/// Active refusal is the normal "nothing listening" signal and is `Closed`.
/// EMFILE/ENFILE/EAGAIN indicate local descriptor exhaustion caused by
/// over-concurrency, not anything about the target, so they are suppressed
/// to `Closed` rather than surfaced as findings (logged at debug level).
/// Everything else is an unexpected failure and becomes `Error`.
fn classify(e: &io::Error) -> PortState {
    if e.kind() == io::ErrorKind::ConnectionRefused {
        return PortState::Closed;
    }
    match e.raw_os_error() {
        Some(code)
            if code == libc::EMFILE || code == libc::ENFILE || code == libc::EAGAIN =>
        {
            debug!(errno = code, "suppressing local socket exhaustion");
            PortState::Closed
        }
        Some(code) if code == libc::ETIMEDOUT => PortState::Closed,
        _ => PortState::Error,
    }
}
