//! `LogSource` trait: abstraction over historical log queries and live log
//! subscriptions supplied by a node connection.
//!
//! A live subscription is split in two halves:
//! - [`LiveLogs`] is handed to the consumer: an inbound log channel plus a
//!   [`Subscription`] handle carrying the out-of-band error/completion signal.
//! - [`SubscriptionFeed`] stays with the transport, which pushes logs into it
//!   and finally fails or completes it.

use crate::error::SourceError;
use crate::filter::{FilterOpts, FilterSpec, WatchOpts};
use crate::log::RawLog;
use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};
use tracing::debug;

/// Default capacity of the inbound log channel of a live subscription.
pub const DEFAULT_LIVE_CAPACITY: usize = 128;

/// Abstracts over node connections able to query and stream contract logs.
///
/// Retry and reconnection policy belongs to the implementation; the stream
/// layer never retries.
#[async_trait]
pub trait LogSource: Send + Sync {
    /// Fetch every log matching `filter` within the block range of `opts`.
    async fn query_historical(
        &self,
        filter: &FilterSpec,
        opts: &FilterOpts,
    ) -> Result<Vec<RawLog>, SourceError>;

    /// Open a live subscription for logs matching `filter`.
    async fn subscribe_live(
        &self,
        filter: &FilterSpec,
        opts: &WatchOpts,
    ) -> Result<LiveLogs, SourceError>;
}

/// The consumer half of a live subscription.
#[derive(Debug)]
pub struct LiveLogs {
    /// Logs in the order the source emits them
    pub logs: mpsc::Receiver<RawLog>,
    /// Error/completion signal and release handle
    pub subscription: Subscription,
}

/// Handle to a live subscription.
///
/// The error signal fires at most once; afterwards the subscription is dead.
/// Closing (explicitly or by dropping) tells the feed that nobody listens
/// anymore.
#[derive(Debug)]
pub struct Subscription {
    err: Option<oneshot::Receiver<SourceError>>,
}

impl Subscription {
    /// Wait for the subscription to end.
    ///
    /// Resolves to `Some(error)` if the source failed, or `None` if the source
    /// completed cleanly. Once resolved (or after [`close`](Self::close)) this
    /// never resolves again. Cancel safe.
    pub async fn err(&mut self) -> Option<SourceError> {
        let Some(rx) = self.err.as_mut() else {
            return std::future::pending().await;
        };
        let outcome = rx.await.ok();
        self.err = None;
        outcome
    }

    /// Returns `true` once the subscription has ended or was closed.
    pub fn is_closed(&self) -> bool {
        self.err.is_none()
    }

    /// Release the subscription. Idempotent.
    pub fn close(&mut self) {
        if self.err.take().is_some() {
            debug!("live subscription released");
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.close();
    }
}

/// The transport half of a live subscription.
#[derive(Debug)]
pub struct SubscriptionFeed {
    logs: mpsc::Sender<RawLog>,
    err: oneshot::Sender<SourceError>,
}

impl SubscriptionFeed {
    /// Push a log to the consumer, waiting for channel capacity.
    pub async fn send(&self, log: RawLog) -> Result<(), SourceError> {
        self.logs.send(log).await.map_err(|_| SourceError::Closed)
    }

    /// Push a log without waiting.
    ///
    /// Fails with [`SourceError::Lagged`] if the consumer's buffer is full and
    /// with [`SourceError::Closed`] if the consumer went away.
    pub fn try_send(&self, log: RawLog) -> Result<(), SourceError> {
        self.logs.try_send(log).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => SourceError::Lagged {
                capacity: self.logs.max_capacity(),
            },
            mpsc::error::TrySendError::Closed(_) => SourceError::Closed,
        })
    }

    /// Terminate the subscription with an error.
    pub fn fail(self, error: SourceError) {
        let _ = self.err.send(error);
    }

    /// Terminate the subscription cleanly.
    pub fn complete(self) {
        drop(self);
    }

    /// Returns `true` if the consumer released the subscription.
    pub fn is_closed(&self) -> bool {
        self.err.is_closed()
    }

    /// Resolves once the consumer released the subscription.
    pub async fn closed(&mut self) {
        self.err.closed().await;
    }
}

/// Create a connected live subscription pair with the given log buffer.
pub fn subscription(capacity: usize) -> (LiveLogs, SubscriptionFeed) {
    let (log_tx, log_rx) = mpsc::channel(capacity.max(1));
    let (err_tx, err_rx) = oneshot::channel();
    (
        LiveLogs {
            logs: log_rx,
            subscription: Subscription { err: Some(err_rx) },
        },
        SubscriptionFeed {
            logs: log_tx,
            err: err_tx,
        },
    )
}
