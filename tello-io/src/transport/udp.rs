//! UDP transport implementation

use super::Transport;
use crate::error::{Error, Result};
use std::io::ErrorKind;
use std::net::UdpSocket;
use std::time::Duration;

/// Largest reply the drone sends on the command port
const RECV_BUFFER_SIZE: usize = 1024;

/// UDP transport for the Tello command port
pub struct UdpTransport {
    socket: UdpSocket,
    timeout_ms: u64,
}

impl UdpTransport {
    /// Bind a local socket and aim it at the drone
    ///
    /// # Arguments
    /// * `bind_address` - Local address (e.g., "0.0.0.0:8889")
    /// * `drone_address` - Drone command address (e.g., "192.168.10.1:8889")
    /// * `timeout_ms` - Reply timeout in milliseconds
    pub fn open(bind_address: &str, drone_address: &str, timeout_ms: u64) -> Result<Self> {
        let socket = UdpSocket::bind(bind_address)?;
        socket.connect(drone_address)?;
        socket.set_read_timeout(Some(Duration::from_millis(timeout_ms.max(1))))?;

        tracing::info!(
            "Opened UDP command socket {} -> {} (timeout {}ms)",
            bind_address,
            drone_address,
            timeout_ms
        );

        Ok(Self { socket, timeout_ms })
    }
}

impl Transport for UdpTransport {
    fn send(&mut self, command: &str) -> Result<()> {
        tracing::trace!("UDP send: {}", command);
        self.socket.send(command.as_bytes())?;
        Ok(())
    }

    fn receive(&mut self) -> Result<String> {
        let mut buffer = [0u8; RECV_BUFFER_SIZE];
        match self.socket.recv(&mut buffer) {
            Ok(len) => {
                let reply = String::from_utf8_lossy(&buffer[..len]).trim().to_string();
                tracing::trace!("UDP recv: {}", reply);
                Ok(reply)
            }
            Err(e) if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => {
                Err(Error::Timeout(self.timeout_ms))
            }
            Err(e) => Err(e.into()),
        }
    }
}
