//! 📊 In-Memory Trading Telemetry
//!
//! Holds whatever the chart frame has most recently reported: aggregate
//! whitelist stats, SOL and token price ticks, the frame's own wallet list,
//! and a bounded log of recent trades. Nothing here persists; the state lives
//! and dies with the bridge.

use serde::Serialize;
use std::collections::VecDeque;

use crate::frame_bus::messages::{SolPriceUpdate, TokenPriceUpdate, TradeEvent, TradingStats};

/// Default bound on the recent-trades log.
pub const DEFAULT_TRADE_LOG_CAPACITY: usize = 10;

/// Bounded most-recent-first log of whitelist trades. Oldest entries fall
/// off silently once the capacity is reached.
#[derive(Debug, Clone)]
pub struct TradeLog {
    entries: VecDeque<TradeEvent>,
    capacity: usize,
}

impl TradeLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Prepend a trade and truncate to capacity.
    pub fn push(&mut self, trade: TradeEvent) {
        self.entries.push_front(trade);
        self.entries.truncate(self.capacity);
    }

    /// Trades in most-recent-first order.
    pub fn recent(&self) -> Vec<TradeEvent> {
        self.entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for TradeLog {
    fn default() -> Self {
        Self::new(DEFAULT_TRADE_LOG_CAPACITY)
    }
}

/// Aggregate view handed to the host UI after every inbound state change.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSnapshot {
    pub trading_stats: Option<TradingStats>,
    pub sol_price: Option<f64>,
    pub current_wallets: Vec<serde_json::Value>,
    pub recent_trades: Vec<TradeEvent>,
    pub token_price: Option<TokenPriceUpdate>,
}

/// All telemetry the bridge caches from inbound events. Single-slot values
/// are last-write-wins; the frame delivers in order over loopback, so no
/// timestamp reordering check is made.
#[derive(Debug)]
pub struct TelemetryState {
    trading_stats: Option<TradingStats>,
    sol_price: Option<f64>,
    current_wallets: Vec<serde_json::Value>,
    trades: TradeLog,
    token_price: Option<TokenPriceUpdate>,
}

impl TelemetryState {
    pub fn new(trade_log_capacity: usize) -> Self {
        Self {
            trading_stats: None,
            sol_price: None,
            current_wallets: Vec::new(),
            trades: TradeLog::new(trade_log_capacity),
            token_price: None,
        }
    }

    pub fn set_trading_stats(&mut self, stats: TradingStats) {
        self.trading_stats = Some(stats);
    }

    pub fn set_sol_price(&mut self, update: SolPriceUpdate) {
        self.sol_price = Some(update.sol_price);
    }

    pub fn set_token_price(&mut self, update: TokenPriceUpdate) {
        self.token_price = Some(update);
    }

    pub fn set_current_wallets(&mut self, wallets: Vec<serde_json::Value>) {
        self.current_wallets = wallets;
    }

    pub fn record_trade(&mut self, trade: TradeEvent) {
        self.trades.push(trade);
    }

    pub fn sol_price(&self) -> Option<f64> {
        self.sol_price
    }

    pub fn trade_log(&self) -> &TradeLog {
        &self.trades
    }

    pub fn current_wallets(&self) -> &[serde_json::Value] {
        &self.current_wallets
    }

    pub fn snapshot(&self) -> ChartSnapshot {
        ChartSnapshot {
            trading_stats: self.trading_stats.clone(),
            sol_price: self.sol_price,
            current_wallets: self.current_wallets.clone(),
            recent_trades: self.trades.recent(),
            token_price: self.token_price.clone(),
        }
    }
}

impl Default for TelemetryState {
    fn default() -> Self {
        Self::new(DEFAULT_TRADE_LOG_CAPACITY)
    }
}
