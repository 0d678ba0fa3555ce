//! 📡 Frame Bus Message Definitions for Panel ↔ Chart Frame Communication
//!
//! JSON datagrams with a mandatory `type` discriminator, matching the frame's
//! wire protocol exactly (SCREAMING_SNAKE tags, camelCase payload fields).
//! Outbound commands are fire-and-forget; inbound events carry telemetry and
//! acknowledgements back to the panel.

use serde::{Deserialize, Serialize};

/// A wallet entry as the chart frame expects it: address plus an optional
/// display label. Selection state and balances never cross the bus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletEntry {
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Commands sent from the panel to the chart frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OutboundMessage {
    /// Replace the frame's whitelist with these wallets.
    #[serde(rename = "ADD_WALLETS")]
    AddWallets { wallets: Vec<WalletEntry> },

    /// Remove every wallet from the frame's whitelist.
    #[serde(rename = "CLEAR_WALLETS")]
    ClearWallets,

    /// Ask the frame to report its current whitelist (replied to with
    /// `CURRENT_WALLETS`).
    #[serde(rename = "GET_WALLETS")]
    GetWallets,
}

impl OutboundMessage {
    /// Serialize for UDP transmission.
    pub fn to_bytes(&self) -> anyhow::Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Short name for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            OutboundMessage::AddWallets { .. } => "ADD_WALLETS",
            OutboundMessage::ClearWallets => "CLEAR_WALLETS",
            OutboundMessage::GetWallets => "GET_WALLETS",
        }
    }
}

/// Buy/sell side as the frame reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeSide {
    Buy,
    Sell,
}

/// Aggregate whitelist trading statistics pushed by the frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradingStats {
    pub bought: f64,
    pub sold: f64,
    pub net: f64,
    pub trades: u32,
    pub sol_price: f64,
    pub timestamp: u64,
}

/// SOL/USD price tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolPriceUpdate {
    pub sol_price: f64,
    pub timestamp: u64,
}

/// A single whitelist trade observed by the frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeEvent {
    #[serde(rename = "type")]
    pub side: TradeSide,
    pub address: String,
    pub tokens_amount: f64,
    pub avg_price: f64,
    pub sol_amount: f64,
    pub timestamp: u64,
    pub signature: String,
}

/// Token price tick for the charted mint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPriceUpdate {
    pub token_price: f64,
    pub token_mint: String,
    pub timestamp: u64,
    pub trade_type: TradeSide,
    pub volume: f64,
}

/// Events received from the chart frame.
///
/// Unknown `type` tags fail to parse and are dropped by the receiver, which
/// keeps the panel forward-compatible with frame-side protocol additions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum InboundEvent {
    /// Handshake: the frame is loaded and accepting commands.
    #[serde(rename = "IFRAME_READY")]
    Ready,

    /// Acknowledgement for `ADD_WALLETS`. Advisory only.
    #[serde(rename = "WALLETS_ADDED")]
    WalletsAdded { success: bool, count: u32 },

    /// Acknowledgement for `CLEAR_WALLETS`. Advisory only.
    #[serde(rename = "WALLETS_CLEARED")]
    WalletsCleared { success: bool },

    /// The frame's current whitelist, as opaque records.
    #[serde(rename = "CURRENT_WALLETS")]
    CurrentWallets { wallets: Vec<serde_json::Value> },

    #[serde(rename = "WHITELIST_TRADING_STATS")]
    TradingStats { data: TradingStats },

    #[serde(rename = "SOL_PRICE_UPDATE")]
    SolPrice { data: SolPriceUpdate },

    #[serde(rename = "WHITELIST_TRADE")]
    Trade { data: TradeEvent },

    #[serde(rename = "TOKEN_PRICE_UPDATE")]
    TokenPrice { data: TokenPriceUpdate },
}

impl InboundEvent {
    /// Parse a received datagram. Returns `None` for malformed payloads or
    /// unrecognized `type` tags; the caller drops those.
    pub fn from_bytes(buf: &[u8]) -> Option<Self> {
        serde_json::from_slice(buf).ok()
    }

    /// Short name for logging and receiver stats.
    pub fn kind(&self) -> &'static str {
        match self {
            InboundEvent::Ready => "IFRAME_READY",
            InboundEvent::WalletsAdded { .. } => "WALLETS_ADDED",
            InboundEvent::WalletsCleared { .. } => "WALLETS_CLEARED",
            InboundEvent::CurrentWallets { .. } => "CURRENT_WALLETS",
            InboundEvent::TradingStats { .. } => "WHITELIST_TRADING_STATS",
            InboundEvent::SolPrice { .. } => "SOL_PRICE_UPDATE",
            InboundEvent::Trade { .. } => "WHITELIST_TRADE",
            InboundEvent::TokenPrice { .. } => "TOKEN_PRICE_UPDATE",
        }
    }
}
