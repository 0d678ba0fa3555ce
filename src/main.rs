//! 🌉 Chart Bridge Service
//!
//! Wires the frame bus to the host wallet store:
//! - polls the wallet file and pushes whitelist changes to the chart frame
//! - receives frame telemetry and logs each published snapshot
//! - periodically asks the frame for its current whitelist

use anyhow::{Context, Result};
use chrono::Local;
use log::{error, info, warn};
use tokio::sync::mpsc;
use tokio::time::{interval, Duration, MissedTickBehavior};

use chart_bridge::bridge::FrameBridge;
use chart_bridge::config::Config;
use chart_bridge::frame_bus::{FrameBusReceiver, UdpFrameSender};
use chart_bridge::telemetry::ChartSnapshot;
use chart_bridge::wallet_file;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let config = Config::from_env().context("Failed to load configuration")?;
    info!("🌉 Chart bridge starting");
    info!("   inbound: {}", config.bus.bind_addr);
    info!("   frame:   {}", config.bus.frame_addr);
    info!("   wallets: {}", config.wallets.file.display());

    let sender = UdpFrameSender::new().context("Failed to create frame bus sender")?;

    let (snapshot_tx, snapshot_rx) = mpsc::unbounded_channel();
    tokio::spawn(log_snapshots(snapshot_rx));

    let mut bridge = FrameBridge::new(sender, config.telemetry.trade_log_capacity, snapshot_tx);
    bridge.attach(config.bus.frame_addr);

    let receiver = FrameBusReceiver::bind(config.bus.bind_addr).await?;
    let stats = receiver.stats();
    let mut events = receiver.start();

    let mut wallet_poll = interval(Duration::from_millis(config.wallets.poll_interval_ms));
    wallet_poll.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut refresh = interval(Duration::from_secs(config.wallets.refresh_interval_secs));
    refresh.set_missed_tick_behavior(MissedTickBehavior::Skip);

    info!("✅ Chart bridge running");

    loop {
        tokio::select! {
            maybe_event = events.recv() => {
                match maybe_event {
                    Some((source, event)) => bridge.handle_inbound(source, event),
                    None => {
                        error!("❌ Frame bus receiver channel closed; shutting down");
                        break;
                    }
                }
            }

            _ = wallet_poll.tick() => {
                match wallet_file::load_wallets(&config.wallets.file) {
                    Ok(wallets) => bridge.sync_wallets(&wallets),
                    // Keep the last synced set on a bad read
                    Err(e) => warn!("⚠️ Wallet file read failed: {:#}", e),
                }
            }

            _ = refresh.tick() => {
                if bridge.is_ready() {
                    bridge.request_wallets();
                }
                let received = stats.total_received.load(std::sync::atomic::Ordering::Relaxed);
                let dropped = stats.parse_errors.load(std::sync::atomic::Ordering::Relaxed);
                info!("📊 Bus stats: {} received, {} unparseable, {} queued",
                      received, dropped, bridge.queued_messages());
            }
        }
    }

    Ok(())
}

/// Consumes published snapshots the way the host UI would, logging a
/// one-line summary of each.
async fn log_snapshots(mut rx: mpsc::UnboundedReceiver<ChartSnapshot>) {
    while let Some(snap) = rx.recv().await {
        let stats = snap
            .trading_stats
            .as_ref()
            .map(|s| format!("net {:.4} SOL over {} trades", s.net, s.trades))
            .unwrap_or_else(|| "no stats yet".to_string());
        let sol = snap
            .sol_price
            .map(|p| format!("${:.2}", p))
            .unwrap_or_else(|| "-".to_string());

        info!(
            "📸 [{}] snapshot: {} | SOL {} | {} recent trade(s) | {} frame wallet(s)",
            Local::now().format("%H:%M:%S"),
            stats,
            sol,
            snap.recent_trades.len(),
            snap.current_wallets.len()
        );
    }
}
