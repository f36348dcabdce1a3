//! In-flight chat requests.
//!
//! Every dispatch runs as its own task. Outcomes are delivered on a channel
//! in the order the requests finish, not the order they were sent.

use chatline_core::{ChatReply, ChatTransport, Dispatch, RequestError};
use tokio::sync::mpsc;
use tokio::task::AbortHandle;
use tracing::debug;

/// A dispatch together with the outcome of its request.
pub type Completion = (Dispatch, Result<ChatReply, RequestError>);

/// Tracks running requests and yields their completions.
pub struct Requests {
    tx: mpsc::UnboundedSender<Completion>,
    rx: mpsc::UnboundedReceiver<Completion>,
    running: Vec<AbortHandle>,
}

impl Requests {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            tx,
            rx,
            running: Vec::new(),
        }
    }

    /// Send the dispatch's message on its own task.
    ///
    /// A request task that panics still completes, with [`RequestError::Task`].
    pub fn dispatch<T: ChatTransport + ?Sized>(&mut self, dispatch: Dispatch, transport: &T) {
        let request = tokio::spawn(transport.send(dispatch.message().to_string()));
        self.running.retain(|handle| !handle.is_finished());
        self.running.push(request.abort_handle());

        let tx = self.tx.clone();
        tokio::spawn(async move {
            let outcome = match request.await {
                Ok(outcome) => outcome,
                Err(e) if e.is_cancelled() => return,
                Err(e) => Err(RequestError::Task(e.to_string())),
            };
            let _ = tx.send((dispatch, outcome));
        });
    }

    /// Wait for the next request to finish. Pending forever while idle.
    pub async fn next(&mut self) -> Option<Completion> {
        self.rx.recv().await
    }

    /// Cancel every running request.
    pub fn abort_all(&mut self) {
        for handle in self.running.drain(..) {
            handle.abort();
        }
        debug!("pending chat requests aborted");
    }
}

impl Default for Requests {
    fn default() -> Self {
        Self::new()
    }
}
