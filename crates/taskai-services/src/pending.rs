use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use taskai_core::View;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::error::ControllerError;

/// Identifies one gateway call issued by a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Awaiting,
}

/// Result of a finished gateway call, ready to hand back to its controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completed {
    pub origin: View,
    pub ticket: Ticket,
    pub text: String,
}

/// A gateway call running on the tokio runtime.
///
/// Awaiting it yields a [`Completed`]. Dropping it detaches the task;
/// [`PendingCall::abandon`] aborts it.
#[derive(Debug)]
pub struct PendingCall {
    origin: View,
    ticket: Ticket,
    fallback: &'static str,
    handle: JoinHandle<String>,
}

impl PendingCall {
    pub(crate) fn spawn<F>(origin: View, ticket: Ticket, fallback: &'static str, call: F) -> Self
    where
        F: Future<Output = String> + Send + 'static,
    {
        Self {
            origin,
            ticket,
            fallback,
            handle: tokio::spawn(call),
        }
    }

    pub fn origin(&self) -> View {
        self.origin
    }

    pub fn abandon(self) {
        debug!(origin = ?self.origin, ticket = self.ticket.0, "abandoning gateway call");
        self.handle.abort();
    }
}

impl Future for PendingCall {
    type Output = Completed;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Completed> {
        let (origin, ticket, fallback) = (self.origin, self.ticket, self.fallback);
        Pin::new(&mut self.handle).poll(cx).map(|joined| {
            let text = joined.unwrap_or_else(|err| {
                warn!(origin = ?origin, ticket = ticket.0, error = %err, "gateway task did not finish");
                fallback.to_owned()
            });
            Completed {
                origin,
                ticket,
                text,
            }
        })
    }
}

/// Two-state machine shared by the view controllers: idle, or waiting on one ticket.
#[derive(Debug, Default)]
pub(crate) struct CallTracker {
    issued: u64,
    awaiting: Option<Ticket>,
}

impl CallTracker {
    pub(crate) fn begin(&mut self) -> Result<Ticket, ControllerError> {
        if self.awaiting.is_some() {
            return Err(ControllerError::Busy);
        }
        self.issued += 1;
        let ticket = Ticket(self.issued);
        self.awaiting = Some(ticket);
        Ok(ticket)
    }

    /// True when `ticket` is the call being waited on; the tracker is idle afterwards.
    pub(crate) fn finish(&mut self, ticket: Ticket) -> bool {
        if self.awaiting == Some(ticket) {
            self.awaiting = None;
            true
        } else {
            debug!(ticket = ticket.0, "discarding stale gateway result");
            false
        }
    }

    pub(crate) fn abandon(&mut self) -> bool {
        self.awaiting.take().is_some()
    }

    pub(crate) fn phase(&self) -> Phase {
        if self.awaiting.is_some() {
            Phase::Awaiting
        } else {
            Phase::Idle
        }
    }
}
