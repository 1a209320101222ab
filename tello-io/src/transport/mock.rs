//! Mock transport for testing

use super::Transport;
use crate::error::{Error, Result};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

/// Mock transport with scripted replies
///
/// Clones share state, so a test can keep one handle while the driver owns
/// another.
#[derive(Clone, Default)]
pub struct MockTransport {
    inner: Arc<Mutex<MockTransportInner>>,
}

#[derive(Default)]
struct MockTransportInner {
    replies: VecDeque<String>,
    sent: Vec<String>,
}

impl MockTransport {
    /// Create a new mock transport
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reply to be returned by the next `receive()`
    pub fn push_reply(&self, reply: &str) {
        self.inner.lock().replies.push_back(reply.to_string());
    }

    /// All command lines sent so far
    pub fn sent(&self) -> Vec<String> {
        self.inner.lock().sent.clone()
    }

    /// Clear sent commands
    pub fn clear_sent(&self) {
        self.inner.lock().sent.clear();
    }
}

impl Transport for MockTransport {
    fn send(&mut self, command: &str) -> Result<()> {
        self.inner.lock().sent.push(command.to_string());
        Ok(())
    }

    fn receive(&mut self) -> Result<String> {
        self.inner
            .lock()
            .replies
            .pop_front()
            .ok_or(Error::Timeout(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_records_and_replies() {
        let mock = MockTransport::new();
        mock.push_reply("ok");

        let mut transport = mock.clone();
        assert_eq!(transport.request("command").unwrap(), "ok");
        assert_eq!(mock.sent(), vec!["command".to_string()]);
    }

    #[test]
    fn test_no_reply_times_out() {
        let mut transport = MockTransport::new();
        assert_eq!(transport.receive(), Err(Error::Timeout(0)));
    }
}
