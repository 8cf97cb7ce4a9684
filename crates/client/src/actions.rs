//! UI-facing operations.
//!
//! These wrap [`WaveClient`] with the portal's failure policy: log and carry
//! on. The only user-facing notice is the alert shown when the user asks to
//! connect and there is no wallet.

use futures_util::StreamExt;
use wave_portal_shared::{Account, WaveError, WaveUpdate};

use crate::feed::WaveSender;
use crate::logging::Alert;
use crate::wave_client::WaveClient;
use crate::{log_debug, log_error, log_info, log_warn};

pub const NO_WALLET_ALERT: &str = "Get MetaMask!";

/// The already authorized account, or `None`. Never fails.
pub async fn find_authorized_account(client: &WaveClient) -> Option<Account> {
    match client.authorized_account().await {
        Ok(Some(account)) => {
            log_info!("Found an authorized account: {account}");
            Some(account)
        }
        Ok(None) => {
            log_error!("No authorized account found");
            None
        }
        Err(WaveError::NoProvider) => {
            log_error!("Make sure you have MetaMask!");
            None
        }
        Err(e) => {
            log_error!("Failed to list accounts: {e}");
            None
        }
    }
}

/// Ask the wallet for an account. Returns the account to store, or `None` to
/// leave the current one untouched.
pub async fn connect_wallet(client: &WaveClient, alert: &dyn Alert) -> Option<Account> {
    match client.connect().await {
        Ok(account) => {
            log_info!("Connected {account}");
            Some(account)
        }
        Err(WaveError::NoProvider) => {
            alert.alert(NO_WALLET_ALERT);
            None
        }
        Err(e) => {
            log_error!("Failed to connect wallet: {e}");
            None
        }
    }
}

/// Load the wave list into `sink` and keep it fed with live events.
///
/// The live subscription is registered before the historical fetch so nothing
/// emitted in between is missed. Runs until `sink` is closed or the enclosing
/// task is dropped.
pub async fn load_waves(client: &WaveClient, sink: WaveSender) {
    let watcher = match client.watch_new_waves().await {
        Ok(watcher) => watcher,
        Err(WaveError::NoProvider) => {
            log_info!("Ethereum object doesn't exist!");
            return;
        }
        Err(e) => {
            log_error!("Not loading waves: {e}");
            return;
        }
    };
    log_info!("getting all waves");

    match client.fetch_waves().await {
        Ok(history) => {
            if sink.unbounded_send(WaveUpdate::History(history)).is_err() {
                return;
            }
        }
        Err(e) => log_error!("Failed to fetch waves: {e}"),
    }

    let mut live = Box::pin(watcher.into_stream());
    while !sink.is_closed() {
        match live.next().await {
            Some(Ok(batch)) => {
                for wave in batch {
                    log_info!("NewWave {} {} {}", wave.address, wave.timestamp, wave.message);
                    if sink.unbounded_send(WaveUpdate::Live(wave)).is_err() {
                        return;
                    }
                }
            }
            Some(Err(e)) => log_warn!("NewWave poll failed: {e}"),
            None => break,
        }
    }
}

/// Send a wave. Returns `true` once the transaction is mined, which is the
/// caller's cue to clear the input; on any failure the input is kept. Never
/// touches the wave list: only the feed writes there.
pub async fn submit_wave(client: &WaveClient, message: Option<String>) -> bool {
    let Some(message) = message else {
        log_warn!("Not waving: {}", WaveError::EmptyInput);
        return false;
    };
    match client.ready() {
        Ok(()) => {}
        Err(WaveError::NoProvider) => {
            log_info!("Ethereum object doesn't exist!");
            return false;
        }
        Err(e) => {
            log_error!("Not waving: {e}");
            return false;
        }
    }

    match client.submit_wave(&message).await {
        Ok(receipt) => {
            log_debug!(
                "Wave {} mined in block {:?}, {} total",
                receipt.hash,
                receipt.block_number,
                receipt.total_waves
            );
            true
        }
        Err(e) => {
            log_error!("Wave failed: {e}");
            false
        }
    }
}
