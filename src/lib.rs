//! 🌉 Chart Bridge - CAESAR panel ↔ chart frame messaging
//!
//! Host side of the chart frame protocol. The frame runs as a separate local
//! process and talks JSON over a localhost UDP bus:
//! - Outbound (panel → frame): wallet whitelist commands, queued until the
//!   frame's readiness handshake
//! - Inbound (frame → panel): trading telemetry, price ticks, whitelist
//!   acknowledgements
//!
//! ## Architecture
//! - Frame Bus: wire format, channel state machine, dispatch queue,
//!   UDP sender/receiver
//! - Bridge: origin filtering and inbound routing, flush-on-ready,
//!   reload re-arm
//! - Wallet Sync: fingerprint-based change detection over the wallet store
//! - Telemetry: bounded trade log and last-write-wins price/stats slots,
//!   published as snapshots to the host UI

pub mod bridge;
pub mod config;
pub mod frame_bus;
pub mod telemetry;
pub mod wallet_file;
pub mod wallet_sync;

pub use bridge::FrameBridge;
pub use config::Config;
pub use frame_bus::{
    ChannelState, DispatchQueue, FrameBusReceiver, FrameTransport, InboundEvent, OutboundMessage,
    RemoteChannel, UdpFrameSender, WalletEntry,
};
pub use telemetry::{ChartSnapshot, TelemetryState, TradeLog};
pub use wallet_sync::{SyncTrigger, WalletRecord, WalletSyncKey};
