//! Transport layer for I/O abstraction
//!
//! The Tello SDK is line oriented: one text command out, one text reply
//! back. A transport moves exactly those lines.

use crate::error::Result;

mod mock;
mod udp;
pub use mock::MockTransport;
pub use udp::UdpTransport;

/// Transport trait for device communication
pub trait Transport: Send {
    /// Send one command line
    fn send(&mut self, command: &str) -> Result<()>;

    /// Block until one reply line arrives or the timeout expires
    fn receive(&mut self) -> Result<String>;

    /// Send a command and wait for its reply
    fn request(&mut self, command: &str) -> Result<String> {
        self.send(command)?;
        self.receive()
    }
}
