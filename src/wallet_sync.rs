//! 🔁 Wallet Synchronization Trigger
//!
//! Decides when the panel must push its wallet list to the chart frame.
//! The decision is keyed on a fingerprint of the wallet set: addresses and
//! display labels only. Selection flags and balances are deliberately
//! excluded, so toggling a wallet active/inactive in the panel never
//! re-sends the whitelist.

use crate::frame_bus::messages::{OutboundMessage, WalletEntry};

/// A wallet as the host-side store reports it. The store also carries the
/// private key; it is never read into this type.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletRecord {
    pub address: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub is_active: bool,
}

/// Display name shown to the frame: the label if one is set, otherwise the
/// address truncated to `XXXXXX...XXXX`.
pub fn display_name(wallet: &WalletRecord) -> String {
    if let Some(label) = &wallet.label {
        if !label.is_empty() {
            return label.clone();
        }
    }
    truncate_address(&wallet.address)
}

fn truncate_address(address: &str) -> String {
    if address.len() <= 10 {
        return address.to_string();
    }
    format!("{}...{}", &address[..6], &address[address.len() - 4..])
}

/// Change-detection fingerprint of the wallet set. Never transmitted.
///
/// Joins `(address, label)` pairs in order plus the count. Unit separator
/// between fields keeps `["ab","c"]` and `["a","bc"]` distinct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletSyncKey(String);

impl WalletSyncKey {
    pub fn of(wallets: &[WalletRecord]) -> Self {
        let joined: Vec<String> = wallets
            .iter()
            .map(|w| {
                format!(
                    "{}\u{1f}{}",
                    w.address,
                    w.label.as_deref().unwrap_or_default()
                )
            })
            .collect();
        WalletSyncKey(format!("{}|{}", joined.join(","), wallets.len()))
    }
}

/// Watches the wallet set's fingerprint and produces the outbound command to
/// send when it changes.
#[derive(Debug, Default)]
pub struct SyncTrigger {
    last_key: Option<WalletSyncKey>,
}

impl SyncTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Observe the current wallet set. Returns the command to enqueue when
    /// the fingerprint changed (including the first observation), `None`
    /// otherwise.
    pub fn observe(&mut self, wallets: &[WalletRecord]) -> Option<OutboundMessage> {
        let key = WalletSyncKey::of(wallets);
        if self.last_key.as_ref() == Some(&key) {
            return None;
        }
        self.last_key = Some(key);
        Some(sync_message(wallets))
    }
}

/// The full replace-or-clear instruction for a wallet set.
pub fn sync_message(wallets: &[WalletRecord]) -> OutboundMessage {
    if wallets.is_empty() {
        OutboundMessage::ClearWallets
    } else {
        OutboundMessage::AddWallets {
            wallets: wallets
                .iter()
                .map(|w| WalletEntry {
                    address: w.address.clone(),
                    label: Some(display_name(w)),
                })
                .collect(),
        }
    }
}
