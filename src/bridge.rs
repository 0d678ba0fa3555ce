//! 🌉 Frame Bridge - host side of the chart frame protocol
//!
//! Owns the whole in-memory state bundle for one mounted chart view: the
//! remote channel, the outbound dispatch queue, cached telemetry, and the
//! wallet-sync trigger. All inbound traffic funnels through
//! [`FrameBridge::handle_inbound`]; all outbound traffic leaves through the
//! dispatch queue. Nothing else mutates this state.

use log::{debug, info};
use std::net::SocketAddr;
use tokio::sync::mpsc;

use crate::frame_bus::channel::RemoteChannel;
use crate::frame_bus::messages::{InboundEvent, OutboundMessage};
use crate::frame_bus::queue::DispatchQueue;
use crate::frame_bus::sender::FrameTransport;
use crate::telemetry::{ChartSnapshot, TelemetryState};
use crate::wallet_sync::{sync_message, SyncTrigger, WalletRecord};

pub struct FrameBridge<T: FrameTransport> {
    channel: RemoteChannel,
    queue: DispatchQueue,
    transport: T,
    telemetry: TelemetryState,
    sync: SyncTrigger,
    /// Wallet set behind the last sync, kept so a frame reload can re-send
    /// it without the fingerprint having changed.
    last_synced: Option<Vec<WalletRecord>>,
    snapshots: mpsc::UnboundedSender<ChartSnapshot>,
}

impl<T: FrameTransport> FrameBridge<T> {
    pub fn new(
        transport: T,
        trade_log_capacity: usize,
        snapshots: mpsc::UnboundedSender<ChartSnapshot>,
    ) -> Self {
        Self {
            channel: RemoteChannel::new(),
            queue: DispatchQueue::new(),
            transport,
            telemetry: TelemetryState::new(trade_log_capacity),
            sync: SyncTrigger::new(),
            last_synced: None,
            snapshots,
        }
    }

    /// Attach the chart frame endpoint. A second attach is a reload: the
    /// stale queue is discarded (its messages were addressed to the old
    /// channel) and the last synced wallet set is re-enqueued so the fresh
    /// channel receives it once its own `IFRAME_READY` arrives.
    pub fn attach(&mut self, frame_addr: SocketAddr) {
        let reloading = self.channel.identity().is_some();
        self.channel.attach(frame_addr);

        if reloading {
            self.queue.clear();
            if let Some(wallets) = self.last_synced.clone() {
                self.queue
                    .enqueue_or_send(sync_message(&wallets), &self.channel, &self.transport);
            }
        }
    }

    /// Observe the current wallet set; pushes a whitelist update to the
    /// frame only when the address/label fingerprint changed.
    pub fn sync_wallets(&mut self, wallets: &[WalletRecord]) {
        if let Some(message) = self.sync.observe(wallets) {
            info!(
                "🔁 Wallet set changed ({} wallet(s)) → {}",
                wallets.len(),
                message.kind()
            );
            self.last_synced = Some(wallets.to_vec());
            self.queue
                .enqueue_or_send(message, &self.channel, &self.transport);
        }
    }

    /// Ask the frame for its current whitelist (`CURRENT_WALLETS` reply).
    pub fn request_wallets(&mut self) {
        self.queue
            .enqueue_or_send(OutboundMessage::GetWallets, &self.channel, &self.transport);
    }

    /// Route one inbound event. Events whose source is not the attached
    /// frame endpoint are dropped silently; everything else updates local
    /// state and publishes a fresh snapshot where telemetry changed.
    pub fn handle_inbound(&mut self, source: SocketAddr, event: InboundEvent) {
        if !self.channel.matches_source(source) {
            debug!("Ignoring {} from unmatched source {}", event.kind(), source);
            return;
        }

        match event {
            InboundEvent::Ready => {
                if self.channel.mark_ready() {
                    self.queue.flush(&self.channel, &self.transport);
                }
            }
            InboundEvent::WalletsAdded { success, count } => {
                info!("✅ Frame added {} wallet(s) (success={})", count, success);
            }
            InboundEvent::WalletsCleared { success } => {
                info!("🗑️ Frame cleared wallets (success={})", success);
            }
            InboundEvent::CurrentWallets { wallets } => {
                debug!("Frame reports {} wallet(s)", wallets.len());
                self.telemetry.set_current_wallets(wallets);
                self.publish_snapshot();
            }
            InboundEvent::TradingStats { data } => {
                self.telemetry.set_trading_stats(data);
                self.publish_snapshot();
            }
            InboundEvent::SolPrice { data } => {
                debug!("💵 SOL price: ${:.2}", data.sol_price);
                self.telemetry.set_sol_price(data);
                self.publish_snapshot();
            }
            InboundEvent::Trade { data } => {
                info!(
                    "📈 Whitelist {:?}: {} tokens @ {} SOL ({})",
                    data.side, data.tokens_amount, data.sol_amount, data.address
                );
                self.telemetry.record_trade(data);
                self.publish_snapshot();
            }
            InboundEvent::TokenPrice { data } => {
                self.telemetry.set_token_price(data);
                self.publish_snapshot();
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        self.channel.is_ready()
    }

    pub fn queued_messages(&self) -> usize {
        self.queue.len()
    }

    pub fn telemetry(&self) -> &TelemetryState {
        &self.telemetry
    }

    fn publish_snapshot(&self) {
        // Host UI gone means nothing to notify; not an error
        let _ = self.snapshots.send(self.telemetry.snapshot());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame_bus::messages::{
        SolPriceUpdate, TradeEvent, TradeSide, TradingStats, WalletEntry,
    };
    use crate::frame_bus::sender::testing::RecordingTransport;

    fn frame_addr() -> SocketAddr {
        "127.0.0.1:46001".parse().unwrap()
    }

    fn other_addr() -> SocketAddr {
        "127.0.0.1:49999".parse().unwrap()
    }

    fn wallet(address: &str, active: bool) -> WalletRecord {
        WalletRecord {
            address: address.to_string(),
            label: None,
            is_active: active,
        }
    }

    fn trade(n: u64) -> InboundEvent {
        InboundEvent::Trade {
            data: TradeEvent {
                side: TradeSide::Buy,
                address: "Addr1".to_string(),
                tokens_amount: 100.0,
                avg_price: 0.0001,
                sol_amount: 0.05,
                timestamp: 1_714_000_000 + n,
                signature: format!("sig{}", n),
            },
        }
    }

    fn make_bridge() -> (
        FrameBridge<RecordingTransport>,
        mpsc::UnboundedReceiver<ChartSnapshot>,
    ) {
        let (tx, rx) = mpsc::unbounded_channel();
        (FrameBridge::new(RecordingTransport::new(), 10, tx), rx)
    }

    #[test]
    fn test_queued_until_ready_then_flushed_in_order() {
        // Scenario: AddWallets + ClearWallets enqueued before the handshake,
        // then IFRAME_READY arrives
        let (mut bridge, _rx) = make_bridge();
        bridge.attach(frame_addr());

        bridge.sync_wallets(&[wallet("Addr1", false), wallet("Addr2", false)]);
        bridge.sync_wallets(&[]);
        assert_eq!(bridge.queued_messages(), 2);
        assert_eq!(bridge.transport.count(), 0);

        bridge.handle_inbound(frame_addr(), InboundEvent::Ready);

        assert!(bridge.is_ready());
        assert_eq!(bridge.queued_messages(), 0);
        assert_eq!(bridge.transport.kinds(), vec!["ADD_WALLETS", "CLEAR_WALLETS"]);
    }

    #[test]
    fn test_duplicate_ready_does_not_redeliver() {
        let (mut bridge, _rx) = make_bridge();
        bridge.attach(frame_addr());
        bridge.sync_wallets(&[wallet("Addr1", false)]);

        bridge.handle_inbound(frame_addr(), InboundEvent::Ready);
        bridge.handle_inbound(frame_addr(), InboundEvent::Ready);

        assert_eq!(bridge.transport.count(), 1);
    }

    #[test]
    fn test_send_immediate_once_ready() {
        let (mut bridge, _rx) = make_bridge();
        bridge.attach(frame_addr());
        bridge.handle_inbound(frame_addr(), InboundEvent::Ready);

        bridge.sync_wallets(&[wallet("Addr1", false)]);
        assert_eq!(bridge.queued_messages(), 0);
        assert_eq!(bridge.transport.count(), 1);
    }

    #[test]
    fn test_origin_filtering_drops_unmatched_source() {
        // CURRENT_WALLETS from a stranger must not touch the cache
        let (mut bridge, mut rx) = make_bridge();
        bridge.attach(frame_addr());
        bridge.handle_inbound(frame_addr(), InboundEvent::Ready);

        bridge.handle_inbound(
            other_addr(),
            InboundEvent::CurrentWallets {
                wallets: vec![serde_json::json!({"address": "Evil"})],
            },
        );
        assert!(bridge.telemetry().current_wallets().is_empty());
        assert!(rx.try_recv().is_err());

        // A Ready from a stranger must not complete someone else's handshake
        let (mut cold, _rx2) = make_bridge();
        cold.attach(frame_addr());
        cold.handle_inbound(other_addr(), InboundEvent::Ready);
        assert!(!cold.is_ready());
    }

    #[test]
    fn test_selection_toggle_sends_nothing() {
        let (mut bridge, _rx) = make_bridge();
        bridge.attach(frame_addr());
        bridge.handle_inbound(frame_addr(), InboundEvent::Ready);

        bridge.sync_wallets(&[wallet("Addr1", false), wallet("Addr2", false)]);
        let sent = bridge.transport.count();

        bridge.sync_wallets(&[wallet("Addr1", true), wallet("Addr2", false)]);
        assert_eq!(bridge.transport.count(), sent);
    }

    #[test]
    fn test_trade_log_bounded_via_inbound_events() {
        // 12 trades in, snapshot holds the 10 newest, newest first
        let (mut bridge, mut rx) = make_bridge();
        bridge.attach(frame_addr());
        bridge.handle_inbound(frame_addr(), InboundEvent::Ready);

        for n in 1..=12 {
            bridge.handle_inbound(frame_addr(), trade(n));
        }

        let mut last = None;
        while let Ok(snap) = rx.try_recv() {
            last = Some(snap);
        }
        let snap = last.expect("snapshots published");
        assert_eq!(snap.recent_trades.len(), 10);
        assert_eq!(snap.recent_trades[0].signature, "sig12");
        assert_eq!(snap.recent_trades[9].signature, "sig3");
    }

    #[test]
    fn test_reload_rearms_and_resends_wallets() {
        let (mut bridge, _rx) = make_bridge();
        bridge.attach(frame_addr());
        bridge.handle_inbound(frame_addr(), InboundEvent::Ready);

        bridge.sync_wallets(&[wallet("Addr1", false)]);
        assert_eq!(bridge.transport.count(), 1);

        // Frame reloads on a new port; readiness drops, wallet set re-queued
        let new_addr: SocketAddr = "127.0.0.1:46002".parse().unwrap();
        bridge.attach(new_addr);
        assert!(!bridge.is_ready());
        assert_eq!(bridge.queued_messages(), 1);

        // Old endpoint can no longer complete the handshake
        bridge.handle_inbound(frame_addr(), InboundEvent::Ready);
        assert!(!bridge.is_ready());

        bridge.handle_inbound(new_addr, InboundEvent::Ready);
        assert_eq!(bridge.queued_messages(), 0);
        assert_eq!(bridge.transport.count(), 2);
        {
            let delivered = bridge.transport.delivered.borrow();
            assert_eq!(delivered[1].1, new_addr);
            match &delivered[1].0 {
                OutboundMessage::AddWallets { wallets } => {
                    assert_eq!(
                        wallets[0],
                        WalletEntry {
                            address: "Addr1".to_string(),
                            label: Some("Addr1".to_string()),
                        }
                    );
                }
                other => panic!("expected AddWallets, got {:?}", other),
            }
        }

        // Fingerprint unchanged: a fresh observation still sends nothing new
        bridge.sync_wallets(&[wallet("Addr1", false)]);
        assert_eq!(bridge.transport.count(), 2);
    }

    #[test]
    fn test_reload_discards_stale_queue() {
        let (mut bridge, _rx) = make_bridge();
        bridge.attach(frame_addr());

        bridge.request_wallets();
        bridge.request_wallets();
        assert_eq!(bridge.queued_messages(), 2);

        // No wallet set synced yet: reload leaves only an empty queue
        let new_addr: SocketAddr = "127.0.0.1:46002".parse().unwrap();
        bridge.attach(new_addr);
        assert_eq!(bridge.queued_messages(), 0);

        bridge.handle_inbound(new_addr, InboundEvent::Ready);
        assert_eq!(bridge.transport.count(), 0);
    }

    #[test]
    fn test_telemetry_events_publish_snapshots() {
        let (mut bridge, mut rx) = make_bridge();
        bridge.attach(frame_addr());
        bridge.handle_inbound(frame_addr(), InboundEvent::Ready);

        bridge.handle_inbound(
            frame_addr(),
            InboundEvent::SolPrice {
                data: SolPriceUpdate {
                    sol_price: 193.44,
                    timestamp: 1,
                },
            },
        );
        let snap = rx.try_recv().unwrap();
        assert_eq!(snap.sol_price, Some(193.44));

        bridge.handle_inbound(
            frame_addr(),
            InboundEvent::TradingStats {
                data: TradingStats {
                    bought: 1.0,
                    sold: 0.5,
                    net: 0.5,
                    trades: 3,
                    sol_price: 193.44,
                    timestamp: 2,
                },
            },
        );
        let snap = rx.try_recv().unwrap();
        assert_eq!(snap.trading_stats.unwrap().trades, 3);

        // Acks are informational: no snapshot
        bridge.handle_inbound(
            frame_addr(),
            InboundEvent::WalletsAdded {
                success: true,
                count: 2,
            },
        );
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_events_before_attach_are_dropped() {
        let (mut bridge, mut rx) = make_bridge();
        bridge.handle_inbound(frame_addr(), InboundEvent::Ready);
        assert!(!bridge.is_ready());

        bridge.handle_inbound(frame_addr(), trade(1));
        assert!(rx.try_recv().is_err());
        assert!(bridge.telemetry().trade_log().is_empty());
    }
}
