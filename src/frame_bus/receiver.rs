//! 📻 Frame Bus UDP Receiver
//!
//! Listens for events from the chart frame process and forwards them, parsed
//! and paired with their source address, to the bridge task over an mpsc
//! channel. Origin filtering happens in the bridge, not here: the receiver
//! reports every sender so the bridge can compare against the attached
//! channel identity.

use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio::sync::mpsc;

use crate::frame_bus::messages::InboundEvent;

/// Largest datagram the frame sends (CURRENT_WALLETS with a full whitelist).
const RECV_BUF_SIZE: usize = 16 * 1024;

/// Counters for received traffic. Parse failures are dropped datagrams, not
/// errors.
#[derive(Debug, Default)]
pub struct ReceiverStats {
    pub total_received: AtomicU64,
    pub parse_errors: AtomicU64,
}

/// Receives frame events and forwards them to the bridge.
pub struct FrameBusReceiver {
    socket: Arc<UdpSocket>,
    stats: Arc<ReceiverStats>,
    running: Arc<AtomicBool>,
}

impl FrameBusReceiver {
    /// Bind the inbound event port.
    pub async fn bind(addr: SocketAddr) -> Result<Self> {
        let socket = UdpSocket::bind(addr)
            .await
            .with_context(|| format!("Failed to bind frame bus receiver on {}", addr))?;

        info!("📻 Frame bus receiver bound to {}", addr);

        Ok(Self {
            socket: Arc::new(socket),
            stats: Arc::new(ReceiverStats::default()),
            running: Arc::new(AtomicBool::new(false)),
        })
    }

    pub fn stats(&self) -> Arc<ReceiverStats> {
        self.stats.clone()
    }

    /// Start the receive loop in a background task. Returns the channel the
    /// bridge reads `(source, event)` pairs from, in strict arrival order.
    pub fn start(&self) -> mpsc::Receiver<(SocketAddr, InboundEvent)> {
        let (tx, rx) = mpsc::channel(1000);

        self.running.store(true, Ordering::Relaxed);
        let socket = self.socket.clone();
        let stats = self.stats.clone();
        let running = self.running.clone();

        tokio::spawn(async move {
            let mut buf = vec![0u8; RECV_BUF_SIZE];
            info!("🎧 Listening for chart frame events...");

            while running.load(Ordering::Relaxed) {
                match socket.recv_from(&mut buf).await {
                    Ok((len, source)) => {
                        stats.total_received.fetch_add(1, Ordering::Relaxed);

                        match InboundEvent::from_bytes(&buf[..len]) {
                            Some(event) => {
                                debug!("📨 {} from {}", event.kind(), source);
                                if tx.send((source, event)).await.is_err() {
                                    // Bridge went away; stop listening
                                    break;
                                }
                            }
                            None => {
                                stats.parse_errors.fetch_add(1, Ordering::Relaxed);
                                debug!("Dropped unparseable {}-byte datagram from {}", len, source);
                            }
                        }
                    }
                    Err(e) => {
                        warn!("⚠️ Frame bus receive error: {}", e);
                    }
                }
            }

            info!("📻 Frame bus receiver stopped");
        });

        rx
    }

    pub fn stop(&self) {
        self.running.store(false, Ordering::Relaxed);
    }
}
