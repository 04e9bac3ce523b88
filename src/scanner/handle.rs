//! Scan Handle
//!
//! Caller side of one running scan: message delivery, cancellation and joining the
//! worker for its statistics.

use crate::scanner::cancel::CancelHandle;
use crate::scanner::error::{ScanError, ScanResult};
use crate::scanner::types::{MatchEvent, ScanMessage, ScanStats};
use futures::Stream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Handle to an in-flight scan
///
/// Messages arrive in discovery order and end with one terminal message. Dropping
/// the handle stops the worker as if the scan had been cancelled.
#[derive(Debug)]
pub struct ScanHandle {
    receiver: mpsc::Receiver<ScanMessage>,
    cancel: CancelHandle,
    worker: JoinHandle<ScanStats>,
    terminated: bool,
}

impl ScanHandle {
    pub(crate) fn new(
        receiver: mpsc::Receiver<ScanMessage>,
        cancel: CancelHandle,
        worker: JoinHandle<ScanStats>,
    ) -> Self {
        Self {
            receiver,
            cancel,
            worker,
            terminated: false,
        }
    }

    /// Request cancellation; the stream still ends with `Cancelled`
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// A cloneable handle that can cancel this scan from elsewhere
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Receive the next message
    ///
    /// Returns `None` once the terminal message has been delivered, or if the worker
    /// died without sending one (see [`ScanHandle::join`]).
    pub async fn recv(&mut self) -> Option<ScanMessage> {
        if self.terminated {
            return None;
        }
        let message = self.receiver.recv().await;
        match &message {
            Some(m) if m.is_terminal() => self.terminated = true,
            None => self.terminated = true,
            Some(_) => {}
        }
        message
    }

    /// Consume the handle as a stream of messages, ending after the terminal one
    pub fn into_stream(self) -> impl Stream<Item = ScanMessage> + Send {
        futures::stream::unfold(self, |mut handle| async move {
            handle.recv().await.map(|message| (message, handle))
        })
    }

    /// Deliver each match to `on_match` until the scan ends, then join the worker
    pub async fn for_each_match<F>(mut self, mut on_match: F) -> ScanResult<ScanStats>
    where
        F: FnMut(MatchEvent),
    {
        while let Some(message) = self.recv().await {
            if let ScanMessage::Match(event) = message {
                on_match(event);
            }
        }
        self.join().await
    }

    /// Collect every match of the scan
    pub async fn collect_matches(self) -> ScanResult<(Vec<MatchEvent>, ScanStats)> {
        let mut matches = Vec::new();
        let stats = self.for_each_match(|event| matches.push(event)).await?;
        Ok((matches, stats))
    }

    /// Wait for the worker and return its statistics
    ///
    /// Undelivered messages are discarded; an unfinished worker stops at its next
    /// check because nobody is listening any more.
    pub async fn join(self) -> ScanResult<ScanStats> {
        let ScanHandle {
            receiver, worker, ..
        } = self;
        drop(receiver);

        worker.await.map_err(|e| ScanError::WorkerFailed {
            message: e.to_string(),
        })
    }
}
