//! 💼 Wallet Store Reader
//!
//! The panel's wallet store is an external collaborator; this module reads
//! its JSON export: an array of `{address, label?, isActive, ...}` records.
//! Extra fields (including the private key) are never deserialized. Entries
//! whose address is not valid base58-encoded 32-byte data are skipped with
//! a warning rather than failing the whole load.

use anyhow::{Context, Result};
use log::warn;
use std::fs;
use std::path::Path;

use crate::wallet_sync::WalletRecord;

/// Solana pubkeys decode to exactly 32 bytes.
const PUBKEY_LEN: usize = 32;

/// Load wallet records from the store file, dropping invalid entries.
pub fn load_wallets(path: &Path) -> Result<Vec<WalletRecord>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read wallet file {}", path.display()))?;

    let records: Vec<WalletRecord> = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse wallet file {}", path.display()))?;

    let total = records.len();
    let valid: Vec<WalletRecord> = records
        .into_iter()
        .filter(|w| {
            if is_valid_address(&w.address) {
                true
            } else {
                warn!("⚠️ Skipping wallet with invalid address: {}", w.address);
                false
            }
        })
        .collect();

    if valid.len() < total {
        warn!(
            "⚠️ Wallet file {}: kept {}/{} entries",
            path.display(),
            valid.len(),
            total
        );
    }

    Ok(valid)
}

fn is_valid_address(address: &str) -> bool {
    matches!(bs58::decode(address).into_vec(), Ok(bytes) if bytes.len() == PUBKEY_LEN)
}
