//! Bus connector lifecycle.
//!
//! A [`Connector`] owns the listening or dialing end of a transport link
//! and hands out framed [`Connection`]s. Wire transports live outside this
//! crate; [`LoopbackConnection`] is an in-memory stand-in for tests and
//! diagnostics.

use std::collections::VecDeque;

use crate::ConnectorError;

/// A framed, bidirectional link to the bus peer.
pub trait Connection {
    /// Queue one frame for the peer.
    fn send(&mut self, frame: &[u8]) -> Result<(), ConnectorError>;

    /// Take the next pending frame, or `None` when nothing is queued.
    fn receive(&mut self) -> Result<Option<Vec<u8>>, ConnectorError>;

    fn is_connected(&self) -> bool;
}

/// Creates and tears down [`Connection`]s.
pub trait Connector {
    fn create_connection(&mut self) -> Result<Box<dyn Connection>, ConnectorError>;

    /// Drop the active connection. `report_error` selects whether the
    /// teardown is logged as a failure or as a routine close.
    fn close_connection(&mut self, report_error: bool);
}

/// In-memory connection: frames sent come back out of `receive` in order.
#[derive(Default)]
pub struct LoopbackConnection {
    queue: VecDeque<Vec<u8>>,
    closed: bool,
}

impl LoopbackConnection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn close(&mut self) {
        self.closed = true;
        self.queue.clear();
    }
}

impl Connection for LoopbackConnection {
    fn send(&mut self, frame: &[u8]) -> Result<(), ConnectorError> {
        if self.closed {
            return Err(ConnectorError::Closed);
        }
        self.queue.push_back(frame.to_vec());
        Ok(())
    }

    fn receive(&mut self) -> Result<Option<Vec<u8>>, ConnectorError> {
        if self.closed {
            return Err(ConnectorError::Closed);
        }
        Ok(self.queue.pop_front())
    }

    fn is_connected(&self) -> bool {
        !self.closed
    }
}
