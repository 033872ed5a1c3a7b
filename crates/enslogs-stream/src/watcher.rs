//! Live log watcher: a background task forwarding decoded events into a
//! consumer-owned channel.
//!
//! ## Task loop
//! ```text
//! select (biased) {
//!     cancel            → stop, Ok(())
//!     subscription.err  → drain buffered logs, then
//!                         stop, Err(source error) / Ok(()) on completion
//!     live log          → decode ─┬─ error → stop, Err(decode error)
//!                                 └─ select (biased) {
//!                                        cancel           → stop, Ok(())
//!                                        subscription.err → stop
//!                                        sink.send        → next log
//!                                    }
//! }
//! ```
//! Logs the source queued ahead of its error or completion are still
//! delivered; the drain only races cancellation. The live subscription is
//! released on every exit path.

use enslogs_core::{
    error::{SourceError, StreamError},
    event::{ContractEvent, EventLog},
    filter::{FilterSpec, WatchOpts},
    log::RawLog,
    source::{LiveLogs, LogSource},
};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Handle to a running watcher task.
///
/// Dropping the handle cancels the task.
#[derive(Debug)]
pub struct WatchHandle {
    cancel: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<Result<(), StreamError>>>,
}

impl WatchHandle {
    /// Ask the task to stop. Idempotent.
    pub fn cancel(&mut self) {
        if let Some(tx) = self.cancel.take() {
            let _ = tx.send(());
        }
    }

    /// Wait for the task to end and return its terminal result.
    ///
    /// `Ok(())` after cancellation, clean completion of the subscription or
    /// the sink being dropped.
    pub async fn wait(mut self) -> Result<(), StreamError> {
        let Some(task) = self.task.take() else {
            return Ok(());
        };
        // `self` still holds the cancel sender, so joining does not cancel.
        match task.await {
            Ok(result) => result,
            Err(e) => Err(StreamError::TaskAborted {
                reason: e.to_string(),
            }),
        }
    }

    /// Cancel the task and wait for it to release its subscription.
    pub async fn unsubscribe(mut self) -> Result<(), StreamError> {
        self.cancel();
        self.wait().await
    }

    /// Returns `true` once the task has ended.
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map_or(true, JoinHandle::is_finished)
    }
}

impl Drop for WatchHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Open a live subscription for `filter` and spawn a task forwarding every
/// decoded event into `sink`.
///
/// Fails without spawning anything if the subscription cannot be opened.
pub async fn watch<E, S>(
    source: &S,
    filter: &FilterSpec,
    opts: &WatchOpts,
    sink: mpsc::Sender<EventLog<E>>,
) -> Result<WatchHandle, StreamError>
where
    E: ContractEvent,
    S: LogSource + ?Sized,
{
    let live = source.subscribe_live(filter, opts).await?;
    let (cancel_tx, cancel_rx) = oneshot::channel();
    let task = tokio::spawn(forward::<E>(live, sink, cancel_rx));
    info!("{} watcher started for {}", E::NAME, filter.address);
    Ok(WatchHandle {
        cancel: Some(cancel_tx),
        task: Some(task),
    })
}

async fn forward<E: ContractEvent>(
    live: LiveLogs,
    sink: mpsc::Sender<EventLog<E>>,
    mut cancel: oneshot::Receiver<()>,
) -> Result<(), StreamError> {
    let LiveLogs {
        mut logs,
        mut subscription,
    } = live;
    let mut logs_open = true;

    let result = loop {
        let raw = tokio::select! {
            biased;
            _ = &mut cancel => {
                debug!("{} watcher cancelled", E::NAME);
                break Ok(());
            }
            outcome = subscription.err() => {
                subscription.close();
                break match drain::<E>(&mut logs, &sink, &mut cancel).await {
                    Some(stopped) => stopped,
                    None => ended::<E>(outcome),
                };
            }
            log = logs.recv(), if logs_open => match log {
                Some(raw) => raw,
                None => {
                    logs_open = false;
                    continue;
                }
            },
        };

        let event = match EventLog::<E>::decode(raw) {
            Ok(event) => event,
            Err(err) => {
                warn!("{} decode failed, stopping watcher: {err}", E::NAME);
                break Err(err.into());
            }
        };

        tokio::select! {
            biased;
            _ = &mut cancel => {
                debug!("{} watcher cancelled during delivery", E::NAME);
                break Ok(());
            }
            outcome = subscription.err() => break ended::<E>(outcome),
            sent = sink.send(event) => {
                if sent.is_err() {
                    debug!("{} sink dropped, stopping watcher", E::NAME);
                    break Ok(());
                }
            }
        }
    };

    subscription.close();
    result
}

/// Forward logs already buffered when the subscription ended.
///
/// Returns `Some` if forwarding stopped early: cancellation, a decode failure
/// or a dropped sink.
async fn drain<E: ContractEvent>(
    logs: &mut mpsc::Receiver<RawLog>,
    sink: &mpsc::Sender<EventLog<E>>,
    cancel: &mut oneshot::Receiver<()>,
) -> Option<Result<(), StreamError>> {
    while let Ok(raw) = logs.try_recv() {
        let event = match EventLog::<E>::decode(raw) {
            Ok(event) => event,
            Err(err) => {
                warn!("{} decode failed while draining: {err}", E::NAME);
                return Some(Err(err.into()));
            }
        };
        tokio::select! {
            biased;
            _ = &mut *cancel => {
                debug!("{} watcher cancelled while draining", E::NAME);
                return Some(Ok(()));
            }
            sent = sink.send(event) => {
                if sent.is_err() {
                    debug!("{} sink dropped while draining", E::NAME);
                    return Some(Ok(()));
                }
            }
        }
    }
    None
}

fn ended<E: ContractEvent>(outcome: Option<SourceError>) -> Result<(), StreamError> {
    match outcome {
        Some(err) => {
            warn!("{} subscription failed: {err}", E::NAME);
            Err(err.into())
        }
        None => {
            debug!("{} subscription completed", E::NAME);
            Ok(())
        }
    }
}
