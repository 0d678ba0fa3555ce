//! 🔌 Remote Channel State Machine
//!
//! Tracks the logical connection to the chart frame: which endpoint is
//! attached and whether the readiness handshake has completed.
//!
//! ```text
//! Uninitialized --(attach)--> Loading --(IFRAME_READY)--> Ready
//!       Ready --(reload / frame address change)--> Loading
//! ```
//!
//! The channel is owned exclusively by the bridge; nothing else may mutate
//! readiness or identity.

use log::{debug, info};
use std::net::SocketAddr;

/// Connection lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelState {
    /// No frame endpoint attached yet.
    Uninitialized,
    /// Endpoint attached, handshake not yet received.
    Loading,
    /// Handshake received; outbound messages deliver immediately.
    Ready,
}

/// The logical connection to the chart frame process.
#[derive(Debug)]
pub struct RemoteChannel {
    state: ChannelState,
    identity: Option<SocketAddr>,
}

impl RemoteChannel {
    pub fn new() -> Self {
        Self {
            state: ChannelState::Uninitialized,
            identity: None,
        }
    }

    /// Attach a frame endpoint. Re-attaching (frame reload, token address
    /// change) replaces the identity and resets readiness.
    pub fn attach(&mut self, identity: SocketAddr) {
        if self.identity.is_some() {
            info!("🔄 Frame channel reloading → {}", identity);
        } else {
            info!("🔌 Frame channel attached → {}", identity);
        }
        self.identity = Some(identity);
        self.state = ChannelState::Loading;
    }

    /// Record the readiness handshake. Returns `true` only on the
    /// Loading→Ready transition, so the caller flushes at most once per
    /// handshake.
    pub fn mark_ready(&mut self) -> bool {
        match self.state {
            ChannelState::Loading => {
                self.state = ChannelState::Ready;
                info!("✅ Frame channel ready");
                true
            }
            ChannelState::Ready => {
                debug!("Frame signalled ready again; already ready");
                false
            }
            ChannelState::Uninitialized => {
                debug!("Ready signal with no frame attached; ignored");
                false
            }
        }
    }

    pub fn state(&self) -> ChannelState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == ChannelState::Ready
    }

    /// Endpoint to deliver outbound messages to, if attached.
    pub fn identity(&self) -> Option<SocketAddr> {
        self.identity
    }

    /// Origin check: does a received datagram's source match the attached
    /// frame? Messages from anyone else are routine loopback noise and get
    /// dropped without logging an error.
    pub fn matches_source(&self, source: SocketAddr) -> bool {
        self.identity == Some(source)
    }
}

impl Default for RemoteChannel {
    fn default() -> Self {
        Self::new()
    }
}
