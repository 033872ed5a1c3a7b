//! `LogIterator`: pull-based iteration over historical logs followed by a
//! live subscription.
//!
//! The live subscription is opened **before** the historical batch is
//! queried, so nothing emitted between the two calls is missed. A log that
//! the source reports in both phases is passed through twice.

use enslogs_core::{
    error::{SourceError, StreamError},
    event::{ContractEvent, EventLog},
    filter::{FilterOpts, FilterSpec, WatchOpts},
    log::RawLog,
    source::{LiveLogs, LogSource},
};
use futures::Stream;
use std::collections::VecDeque;
use tracing::{debug, warn};

/// What the live phase produced on one wait.
enum LivePoll {
    Log(RawLog),
    Ended(Option<SourceError>),
}

/// Iterator over the logs of one contract event.
///
/// Drive it with [`advance`](Self::advance); read the decoded event with
/// [`current`](Self::current). A fault is terminal: once `advance` returned
/// `false` with [`fault`](Self::fault) set, every later call returns `false`
/// without waiting.
#[derive(Debug)]
pub struct LogIterator<E> {
    current: Option<EventLog<E>>,
    history: VecDeque<RawLog>,
    live: Option<LiveLogs>,
    /// Set once the live phase ended; only buffered logs are handed out
    done: bool,
    /// Subscription error held back until the buffer is drained
    pending_fault: Option<StreamError>,
    fault: Option<StreamError>,
}

impl<E: ContractEvent> LogIterator<E> {
    /// Open an iterator over the logs matching `filter`.
    ///
    /// With `opts.end` set only the closed historical range is visited and no
    /// live subscription is opened.
    pub async fn open<S>(source: &S, filter: &FilterSpec, opts: &FilterOpts) -> Result<Self, StreamError>
    where
        S: LogSource + ?Sized,
    {
        let live = match opts.end {
            Some(_) => None,
            None => {
                let watch = WatchOpts {
                    start: Some(opts.start),
                };
                Some(source.subscribe_live(filter, &watch).await?)
            }
        };
        // An early return drops `live`, which releases the subscription.
        let history = source.query_historical(filter, opts).await?;
        debug!(
            "{} iterator opened: {} historical logs, live={}",
            E::NAME,
            history.len(),
            live.is_some()
        );
        Ok(Self::from_parts(history, live))
    }

    /// Assemble an iterator from an already fetched batch and an optional
    /// live subscription.
    pub fn from_parts(history: Vec<RawLog>, live: Option<LiveLogs>) -> Self {
        Self {
            current: None,
            history: history.into(),
            live,
            done: false,
            pending_fault: None,
            fault: None,
        }
    }

    /// Make the next decoded event available through [`current`](Self::current).
    ///
    /// Returns `false` once the iterator is exhausted or faulted. During the
    /// live phase this waits for the next log or for the subscription to end.
    pub async fn advance(&mut self) -> bool {
        self.current = None;
        if let Some(raw) = self.history.pop_front() {
            return self.decode(raw);
        }
        if self.done {
            return self.drain();
        }

        let Some(live) = self.live.as_mut() else {
            self.done = true;
            return false;
        };
        let polled = tokio::select! {
            biased;
            outcome = live.subscription.err() => LivePoll::Ended(outcome),
            log = live.logs.recv() => match log {
                Some(raw) => LivePoll::Log(raw),
                None => LivePoll::Ended(live.subscription.err().await),
            },
        };

        match polled {
            LivePoll::Log(raw) => self.decode(raw),
            LivePoll::Ended(outcome) => {
                self.done = true;
                if let Some(live) = self.live.as_mut() {
                    live.subscription.close();
                }
                match outcome {
                    Some(err) => {
                        warn!("{} subscription failed: {err}", E::NAME);
                        self.pending_fault = Some(err.into());
                    }
                    None => debug!("{} subscription completed", E::NAME),
                }
                // A log may have been buffered ahead of the error.
                self.drain()
            }
        }
    }

    /// The event made available by the last successful [`advance`](Self::advance).
    pub fn current(&self) -> Option<&EventLog<E>> {
        self.current.as_ref()
    }

    /// The error behind the most recent `false` from [`advance`](Self::advance).
    ///
    /// Stays `None` while logs buffered ahead of a subscription error are
    /// still being handed out.
    pub fn fault(&self) -> Option<&StreamError> {
        self.fault.as_ref()
    }

    /// Release the live subscription. Idempotent. Historical logs not yet
    /// visited are still returned by later `advance` calls.
    pub fn close(&mut self) {
        self.done = true;
        if let Some(mut live) = self.live.take() {
            live.subscription.close();
        }
    }

    /// Turn the iterator into a `Stream` of decoded events. A fault is yielded
    /// as the final item.
    pub fn into_stream(self) -> impl Stream<Item = Result<EventLog<E>, StreamError>> + Send {
        futures::stream::unfold(Some(self), |state| async move {
            let mut iter = state?;
            if iter.advance().await {
                let event = iter.current.take()?;
                Some((Ok(event), Some(iter)))
            } else {
                iter.fault.take().map(|err| (Err(err), None))
            }
        })
    }

    /// Hand out a log already sitting in the live buffer, without waiting.
    fn drain(&mut self) -> bool {
        let buffered = self.live.as_mut().and_then(|live| live.logs.try_recv().ok());
        match buffered {
            Some(raw) => self.decode(raw),
            None => {
                self.live = None;
                if let Some(err) = self.pending_fault.take() {
                    self.fault = Some(err);
                }
                false
            }
        }
    }

    fn decode(&mut self, raw: RawLog) -> bool {
        match EventLog::<E>::decode(raw) {
            Ok(event) => {
                self.current = Some(event);
                true
            }
            Err(err) => {
                warn!("{} decode failed: {err}", E::NAME);
                self.fault = Some(err.into());
                self.pending_fault = None;
                self.done = true;
                self.history.clear();
                self.live = None;
                false
            }
        }
    }
}
