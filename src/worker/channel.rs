// Task channel - Background to foreground status delivery
//
// A single-producer, single-consumer FIFO. The producer never blocks and
// never fails; the consumer drains queued messages into its handler on its
// own turn, so the handler is never re-entered.

use log::trace;
use std::fmt;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::time::Duration;

/// Status notification emitted by the background task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusMessage {
    /// Counter value at the time of the report
    pub counter: u64,
}

impl fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Counter reached: {}", self.counter)
    }
}

/// Message handler registered on the consumer side
pub type MessageHandler = Box<dyn FnMut(StatusMessage)>;

/// Create a connected producer/consumer pair
pub fn task_channel() -> (StatusSender, TaskListener) {
    let (tx, rx) = mpsc::channel();
    (
        StatusSender { tx },
        TaskListener {
            rx,
            handler: None,
            closed: false,
        },
    )
}

/// Producer end, owned by the background task
#[derive(Debug)]
pub struct StatusSender {
    tx: Sender<StatusMessage>,
}

impl StatusSender {
    /// Queue a message for the listener
    ///
    /// If the listener is gone the message is dropped.
    pub fn send(&self, message: StatusMessage) {
        if self.tx.send(message).is_err() {
            trace!("Listener gone, dropping '{}'", message);
        }
    }
}

/// Consumer end, owned by the foreground
pub struct TaskListener {
    rx: Receiver<StatusMessage>,
    handler: Option<MessageHandler>,
    closed: bool,
}

impl TaskListener {
    /// Register the message handler
    ///
    /// Only one handler is kept; registering again replaces the previous one.
    pub fn on_message<F>(&mut self, handler: F)
    where
        F: FnMut(StatusMessage) + 'static,
    {
        self.handler = Some(Box::new(handler));
    }

    /// Whether a handler is registered
    pub fn has_handler(&self) -> bool {
        self.handler.is_some()
    }

    /// Deliver every queued message to the handler, in send order
    ///
    /// Returns the number of messages delivered. Without a handler nothing is
    /// consumed and messages stay queued.
    pub fn dispatch_pending(&mut self) -> usize {
        let Some(handler) = self.handler.as_mut() else {
            return 0;
        };

        let mut delivered = 0;
        loop {
            match self.rx.try_recv() {
                Ok(message) => {
                    handler(message);
                    delivered += 1;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.closed = true;
                    break;
                }
            }
        }
        delivered
    }

    /// Wait up to `timeout` for a message, then deliver everything queued
    ///
    /// Returns the number of messages delivered.
    pub fn dispatch_timeout(&mut self, timeout: Duration) -> usize {
        let Some(handler) = self.handler.as_mut() else {
            return 0;
        };

        match self.rx.recv_timeout(timeout) {
            Ok(message) => {
                handler(message);
                1 + self.dispatch_pending()
            }
            Err(RecvTimeoutError::Timeout) => 0,
            Err(RecvTimeoutError::Disconnected) => {
                self.closed = true;
                0
            }
        }
    }

    /// Whether the producer has gone away and the queue has been drained
    ///
    /// Only observed by a dispatch call.
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl fmt::Debug for TaskListener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskListener")
            .field("has_handler", &self.handler.is_some())
            .field("closed", &self.closed)
            .finish()
    }
}
