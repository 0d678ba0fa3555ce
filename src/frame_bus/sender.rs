//! 📤 Frame Bus UDP Sender
//!
//! Fire-and-forget delivery of outbound commands to the chart frame.
//! Non-blocking socket so a dead frame process never stalls the panel loop.

use anyhow::{Context, Result};
use log::{debug, warn};
use std::net::{SocketAddr, UdpSocket};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::frame_bus::messages::OutboundMessage;

/// Delivery seam for outbound messages. The bridge and dispatch queue only
/// talk to this trait; tests swap in a recording implementation.
pub trait FrameTransport {
    /// One delivery attempt, at-most-once. Errors are the caller's to log;
    /// no retry happens at any layer.
    fn deliver(&self, message: &OutboundMessage, target: SocketAddr) -> Result<()>;
}

/// UDP transport used in production.
pub struct UdpFrameSender {
    socket: UdpSocket,
    sent_count: AtomicU64,
    error_count: AtomicU64,
}

impl UdpFrameSender {
    /// Bind an ephemeral local port for sending.
    pub fn new() -> Result<Self> {
        let socket = UdpSocket::bind("0.0.0.0:0")
            .context("Failed to bind UDP socket for frame bus sender")?;
        // Never block the panel loop if the frame is offline
        socket
            .set_nonblocking(true)
            .context("Failed to set frame bus sender non-blocking")?;

        Ok(Self {
            socket,
            sent_count: AtomicU64::new(0),
            error_count: AtomicU64::new(0),
        })
    }

    pub fn sent_count(&self) -> u64 {
        self.sent_count.load(Ordering::Relaxed)
    }

    pub fn error_count(&self) -> u64 {
        self.error_count.load(Ordering::Relaxed)
    }
}

impl FrameTransport for UdpFrameSender {
    fn deliver(&self, message: &OutboundMessage, target: SocketAddr) -> Result<()> {
        let bytes = message.to_bytes()?;
        match self.socket.send_to(&bytes, target) {
            Ok(n) => {
                self.sent_count.fetch_add(1, Ordering::Relaxed);
                debug!("📤 Sent {} ({} bytes) → {}", message.kind(), n, target);
                Ok(())
            }
            Err(e) => {
                self.error_count.fetch_add(1, Ordering::Relaxed);
                warn!("⚠️ Failed to send {} → {}: {}", message.kind(), target, e);
                Err(e).context("UDP send to chart frame failed")
            }
        }
    }
}

#[cfg(test)]
pub mod testing {
    //! Recording transport shared by the queue and bridge tests.

    use super::*;
    use std::cell::RefCell;

    /// Captures every delivered message in order instead of hitting the
    /// network.
    #[derive(Default)]
    pub struct RecordingTransport {
        pub delivered: RefCell<Vec<(OutboundMessage, SocketAddr)>>,
    }

    impl RecordingTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn kinds(&self) -> Vec<&'static str> {
            self.delivered
                .borrow()
                .iter()
                .map(|(m, _)| m.kind())
                .collect()
        }

        pub fn count(&self) -> usize {
            self.delivered.borrow().len()
        }
    }

    impl FrameTransport for RecordingTransport {
        fn deliver(&self, message: &OutboundMessage, target: SocketAddr) -> Result<()> {
            self.delivered.borrow_mut().push((message.clone(), target));
            Ok(())
        }
    }
}
