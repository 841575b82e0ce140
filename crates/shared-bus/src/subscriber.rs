//! # Signal Subscribers
//!
//! Defines the receiving side of the bus: synchronous handlers keyed by
//! address range, and lazy change streams.

use crate::events::SignalFilter;
use shared_types::Signal;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio_stream::Stream;

/// Errors from subscription operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubscriptionError {
    /// The bus was dropped.
    #[error("Signal bus closed")]
    Closed,
}

/// Observer invoked synchronously for every matching inbound signal.
pub trait SignalHandler: Send + Sync {
    /// Handle one inbound change.
    fn on_signal(&self, signal: &Signal);
}

impl<F> SignalHandler for F
where
    F: Fn(&Signal) + Send + Sync,
{
    fn on_signal(&self, signal: &Signal) {
        self(signal)
    }
}

/// Identifier of a registered handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(pub(crate) u64);

pub(crate) struct HandlerEntry {
    pub(crate) id: HandlerId,
    pub(crate) filter: SignalFilter,
    pub(crate) handler: Arc<dyn SignalHandler>,
}

pub(crate) struct StreamEntry {
    pub(crate) filter: SignalFilter,
    pub(crate) sender: mpsc::UnboundedSender<Signal>,
}

/// A lazy, non-restartable stream of inbound changes.
///
/// Every delivered transition is yielded in arrival order; nothing is
/// coalesced, so a join re-sent with the same value appears twice. The
/// stream ends only when the bus is dropped.
pub struct SignalStream {
    receiver: mpsc::UnboundedReceiver<Signal>,
    filter: SignalFilter,
}

impl SignalStream {
    pub(crate) fn new(receiver: mpsc::UnboundedReceiver<Signal>, filter: SignalFilter) -> Self {
        Self { receiver, filter }
    }

    /// Receive the next matching signal.
    ///
    /// # Returns
    ///
    /// - `Some(signal)` - The next matching signal
    /// - `None` - The bus was dropped
    pub async fn recv(&mut self) -> Option<Signal> {
        self.receiver.recv().await
    }

    /// Try to receive the next signal without waiting.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(signal))` - A signal was available
    /// - `Ok(None)` - Nothing pending
    /// - `Err(SubscriptionError::Closed)` - The bus was dropped
    pub fn try_recv(&mut self) -> Result<Option<Signal>, SubscriptionError> {
        match self.receiver.try_recv() {
            Ok(signal) => Ok(Some(signal)),
            Err(mpsc::error::TryRecvError::Empty) => Ok(None),
            Err(mpsc::error::TryRecvError::Disconnected) => Err(SubscriptionError::Closed),
        }
    }

    /// Get the filter for this stream.
    #[must_use]
    pub fn filter(&self) -> &SignalFilter {
        &self.filter
    }
}

impl Stream for SignalStream {
    type Item = Signal;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.receiver.poll_recv(cx)
    }
}
