//! 📦 Outbound Dispatch Queue
//!
//! Buffers commands destined for the chart frame until the readiness
//! handshake completes, then drains them in insertion order. Delivery is
//! at-most-once and fire-and-forget; a transport error drops the message
//! with a warning rather than retrying.

use log::{debug, info, warn};
use std::collections::VecDeque;

use crate::frame_bus::channel::RemoteChannel;
use crate::frame_bus::messages::OutboundMessage;
use crate::frame_bus::sender::FrameTransport;

/// FIFO queue of outbound messages awaiting a ready channel.
#[derive(Debug, Default)]
pub struct DispatchQueue {
    pending: VecDeque<OutboundMessage>,
}

impl DispatchQueue {
    pub fn new() -> Self {
        Self {
            pending: VecDeque::new(),
        }
    }

    /// Deliver immediately when the channel is ready, otherwise buffer.
    pub fn enqueue_or_send<T: FrameTransport>(
        &mut self,
        message: OutboundMessage,
        channel: &RemoteChannel,
        transport: &T,
    ) {
        match channel.identity() {
            Some(target) if channel.is_ready() => {
                deliver_once(&message, target, transport);
            }
            _ => {
                debug!("📦 Queued {} (frame not ready)", message.kind());
                self.pending.push_back(message);
            }
        }
    }

    /// Drain every queued message in insertion order to the ready channel.
    /// Called once per Loading→Ready transition; calling with an already
    /// empty queue is a no-op, so no message can be delivered twice.
    pub fn flush<T: FrameTransport>(&mut self, channel: &RemoteChannel, transport: &T) -> usize {
        if !channel.is_ready() {
            warn!("Flush requested while frame not ready; keeping queue intact");
            return 0;
        }
        let Some(target) = channel.identity() else {
            return 0;
        };

        let drained = self.pending.len();
        while let Some(message) = self.pending.pop_front() {
            deliver_once(&message, target, transport);
        }
        if drained > 0 {
            info!("📦 Flushed {} queued message(s) to frame", drained);
        }
        drained
    }

    /// Discard everything. Used when the frame reloads: messages addressed
    /// to the torn-down channel must not reach its replacement.
    pub fn clear(&mut self) -> usize {
        let dropped = self.pending.len();
        self.pending.clear();
        if dropped > 0 {
            debug!("🗑️ Discarded {} stale queued message(s)", dropped);
        }
        dropped
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Single delivery attempt. Errors are logged and the message is dropped.
fn deliver_once<T: FrameTransport>(
    message: &OutboundMessage,
    target: std::net::SocketAddr,
    transport: &T,
) {
    if let Err(e) = transport.deliver(message, target) {
        warn!("⚠️ Dropped {} after failed delivery: {}", message.kind(), e);
    }
}
