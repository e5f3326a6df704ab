use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use log::{debug, warn};
use tokio::sync::{Mutex, Semaphore};
use tokio::task::{JoinError, JoinSet};
use tokio_util::sync::CancellationToken;

use crate::probe::{self, ProbeOutcome};
use crate::types::OpenPort;

/// Number of workers a scan will actually use for a requested concurrency:
/// at least one, at most what the semaphore can hand out.
pub fn effective_concurrency(requested: usize) -> usize {
    requested.clamp(1, Semaphore::MAX_PERMITS)
}

/// Scan the target's ports using asynchronous TCP connects with a
/// concurrency limit.
///
/// - Limits simultaneous connection attempts with a `Semaphore`; a permit is
///   acquired before each probe task is spawned, so at most `concurrency`
///   probes are in flight and the rest queue.
/// - Each probe gets `timeout` for the connect and again for the banner read.
/// - Returns open-port records in completion order; `ScanReport::assemble`
///   owns the final sort.
pub async fn scan(
    target: IpAddr,
    ports: &[u16],
    concurrency: usize,
    timeout: Duration,
) -> Result<Vec<OpenPort>> {
    scan_with_cancel(target, ports, concurrency, timeout, CancellationToken::new()).await
}

/// Variant that accepts a `CancellationToken` to allow external cancellation.
///
/// When the token fires, no further probes are submitted, in-flight probes
/// unblock at their next await point, and whatever has been collected so far
/// is returned without error.
pub async fn scan_with_cancel(
    target: IpAddr,
    ports: &[u16],
    concurrency: usize,
    timeout: Duration,
    cancel: CancellationToken,
) -> Result<Vec<OpenPort>> {
    let workers = effective_concurrency(concurrency);
    let results: Arc<Mutex<Vec<OpenPort>>> = Arc::new(Mutex::new(Vec::new()));
    let sem = Arc::new(Semaphore::new(workers));
    let mut set = JoinSet::new();
    let mut port_of_task: HashMap<tokio::task::Id, u16> = HashMap::new();

    debug!(
        "scanning {} ports on {} with {} workers, timeout {:?}",
        ports.len(),
        target,
        workers,
        timeout
    );

    for &port in ports {
        if cancel.is_cancelled() {
            break;
        }
        // Waiting for a permit throttles submission; cancellation unblocks it.
        let permit = tokio::select! {
            _ = cancel.cancelled() => break,
            permit = sem.clone().acquire_owned() => permit.expect("semaphore in scope"),
        };
        let results = results.clone();
        let cancel = cancel.clone();

        let handle = set.spawn(async move {
            let _permit = permit; // hold the slot until the probe resolves

            let outcome = tokio::select! {
                _ = cancel.cancelled() => return,
                outcome = probe::probe(target, port, timeout) => outcome,
            };
            match outcome {
                ProbeOutcome::Open(open) => {
                    let mut guard = results.lock().await;
                    guard.push(open);
                }
                ProbeOutcome::Closed => {
                    // Not open; no record kept.
                }
                ProbeOutcome::Error(e) => {
                    warn!("port {port}: probe failed: {e}");
                }
            }
        });
        port_of_task.insert(handle.id(), port);
    }

    while let Some(res) = set.join_next().await {
        if let Err(e) = res {
            warn!(
                "{}",
                join_failure_message(port_of_task.get(&e.id()).copied(), &e)
            );
        }
    }

    let collected = std::mem::take(&mut *results.lock().await);
    debug!("scan finished: {} open", collected.len());
    Ok(collected)
}

/// Warning text for a probe task that failed to run to completion.
fn join_failure_message(port: Option<u16>, err: &JoinError) -> String {
    match port {
        Some(port) => format!("port {port}: probe task did not complete: {err}"),
        None => format!("probe task did not complete: {err}"),
    }
}
