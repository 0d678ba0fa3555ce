//! 📡 Frame Bus - Communication layer between panel and chart frame
//!
//! Handles all messaging with the embedded chart frame process:
//! - Outbound commands (wallet whitelist management), queued until the frame
//!   signals readiness
//! - Inbound telemetry events (trades, prices, stats) and acknowledgements

pub mod channel;
pub mod messages;
pub mod queue;
pub mod receiver;
pub mod sender;

pub use channel::{ChannelState, RemoteChannel};
pub use messages::{
    InboundEvent, OutboundMessage, SolPriceUpdate, TokenPriceUpdate, TradeEvent, TradeSide,
    TradingStats, WalletEntry,
};
pub use queue::DispatchQueue;
pub use receiver::{FrameBusReceiver, ReceiverStats};
pub use sender::{FrameTransport, UdpFrameSender};
