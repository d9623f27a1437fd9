//! Cell synchronization with the board server.
//!
//! Two transports implement [`SyncChannel`]: HTTP polling and a push
//! socket. Both are fire-and-forget; results arrive through a [`SyncSink`]
//! and failures are only logged.

pub mod polling;
pub mod push;
pub mod wire;

use std::rc::Rc;

use crate::config::{ClientConfig, Transport};
use crate::model::{Cell, ServerInfo};

#[derive(Debug, Clone, PartialEq)]
pub enum SyncEvent {
    /// Full replacement list for the cell store.
    Cells(Vec<Cell>),
    Info(ServerInfo),
}

pub type SyncSink = Rc<dyn Fn(SyncEvent)>;

#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("network request failed: {0}")]
    Network(String),
    #[error("server answered with status {0}")]
    Status(u16),
    #[error("could not decode server payload: {0}")]
    Decode(String),
    #[error("socket error: {0}")]
    Socket(String),
}

impl From<gloo_net::Error> for SyncError {
    fn from(err: gloo_net::Error) -> Self {
        match err {
            gloo_net::Error::SerdeError(e) => SyncError::Decode(e.to_string()),
            other => SyncError::Network(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for SyncError {
    fn from(err: serde_json::Error) -> Self {
        SyncError::Decode(err.to_string())
    }
}

pub trait SyncChannel {
    /// Begins timers and subscriptions.
    fn start(&self);
    /// Asks for a fresh full cell list.
    fn refresh(&self);
    /// Sends a new cell and asks for a refresh right after.
    fn create(&self, cell: Cell);
    /// Drops timers and connections.
    fn stop(&self);
}

/// Builds the transport selected in `config`.
pub fn connect(config: &ClientConfig, sink: SyncSink) -> Rc<dyn SyncChannel> {
    match config.transport {
        Transport::Poll => Rc::new(polling::PollingChannel::new(&config.server, sink)),
        Transport::Push => Rc::new(push::PushChannel::new(&config.socket, sink)),
    }
}
