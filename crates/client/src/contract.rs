//! Handle to the deployed `WavePortal` contract.

use std::time::Duration;

use alloy_primitives::{Address, B256, U256};
use alloy_sol_types::SolEvent;
use futures_util::Stream;
use wave_portal_shared::{
    decode_all_waves, decode_new_wave, decode_total_waves, encode_get_all_waves,
    encode_get_total_waves, encode_wave, Account, LogFilter, TransactionReceipt,
    TransactionRequest, WaveError, WavePortal, WaveRecord,
};

use crate::provider::EthClient;
use crate::time::sleep;

/// A provider bound to the contract address.
#[derive(Debug, Clone)]
pub struct WavePortalHandle {
    eth: EthClient,
    address: Address,
    poll_interval: Duration,
}

impl WavePortalHandle {
    pub fn new(eth: EthClient, address: Address, poll_interval: Duration) -> Self {
        Self {
            eth,
            address,
            poll_interval,
        }
    }

    /// `getAllWaves()`, normalized, in the order the contract returns them.
    pub async fn get_all_waves(&self) -> Result<Vec<WaveRecord>, WaveError> {
        let out = self.eth.call(self.address, encode_get_all_waves()).await?;
        decode_all_waves(&out)
    }

    /// `getTotalWaves()`.
    pub async fn total_waves(&self) -> Result<U256, WaveError> {
        let out = self.eth.call(self.address, encode_get_total_waves()).await?;
        decode_total_waves(&out)
    }

    /// Submit `wave(message)` from `from`. Resolves once the wallet has
    /// broadcast the transaction, not when it is mined.
    pub async fn wave(&self, from: &Account, message: &str) -> Result<PendingWave, WaveError> {
        let tx = TransactionRequest {
            from: from.as_str().to_string(),
            to: self.address,
            data: encode_wave(message),
        };
        let hash = self.eth.send_transaction(&tx).await?;
        Ok(PendingWave {
            eth: self.eth.clone(),
            hash,
            poll_interval: self.poll_interval,
        })
    }

    /// Start watching for `NewWave` events emitted after the current block.
    ///
    /// Registration does not fail: if the current block cannot be read now,
    /// the first poll that reads one starts from that block instead.
    pub async fn watch_new_waves(&self) -> NewWaveWatcher {
        let next_block = match self.eth.block_number().await {
            Ok(current) => Some(current + 1),
            Err(e) => {
                crate::log_warn!("NewWave start block unknown, resolving on first poll: {e}");
                None
            }
        };
        NewWaveWatcher {
            eth: self.eth.clone(),
            address: self.address,
            next_block,
            poll_interval: self.poll_interval,
        }
    }
}

/// A broadcast `wave` transaction awaiting inclusion.
#[derive(Debug)]
pub struct PendingWave {
    eth: EthClient,
    hash: B256,
    poll_interval: Duration,
}

impl PendingWave {
    pub fn hash(&self) -> B256 {
        self.hash
    }

    /// Poll for the receipt until the transaction is in a block. There is no
    /// timeout; a transaction that never lands keeps this pending.
    pub async fn confirmed(self) -> Result<TransactionReceipt, WaveError> {
        loop {
            if let Some(receipt) = self.eth.transaction_receipt(self.hash).await? {
                if !receipt.succeeded() {
                    return Err(WaveError::TransactionReverted { hash: self.hash });
                }
                return Ok(receipt);
            }
            sleep(self.poll_interval).await;
        }
    }
}

/// Most blocks a single `eth_getLogs` request covers. Providers reject wider
/// ranges, so a watcher that fell behind catches up over several polls.
pub const MAX_LOG_RANGE: u64 = 1_000;

/// Live `NewWave` subscription.
///
/// Polls `eth_getLogs` over the blocks produced since the previous poll. The
/// subscription is only as long-lived as the watcher: drop it (or the task that
/// drives it) and nothing keeps polling.
#[derive(Debug)]
pub struct NewWaveWatcher {
    eth: EthClient,
    address: Address,
    next_block: Option<u64>,
    poll_interval: Duration,
}

impl NewWaveWatcher {
    /// First block the next poll will cover, once known.
    pub fn next_block(&self) -> Option<u64> {
        self.next_block
    }

    /// Fetch the waves emitted since the last poll. On error the block range is
    /// kept, so the next poll retries it.
    pub async fn poll(&mut self) -> Result<Vec<WaveRecord>, WaveError> {
        let latest = self.eth.block_number().await?;
        let from = self.next_block.unwrap_or(latest);
        if latest < from {
            return Ok(Vec::new());
        }
        let to = latest.min(from + MAX_LOG_RANGE - 1);

        let filter = LogFilter {
            address: self.address,
            topics: vec![WavePortal::NewWave::SIGNATURE_HASH],
            from_block: from.into(),
            to_block: to.into(),
        };
        let logs = self.eth.logs(&filter).await?;
        self.next_block = Some(to + 1);

        let mut waves = Vec::with_capacity(logs.len());
        for log in logs.iter().filter(|log| !log.removed) {
            match decode_new_wave(log) {
                Ok(wave) => waves.push(wave),
                Err(e) => crate::log_warn!("Skipping undecodable NewWave log: {e}"),
            }
        }
        Ok(waves)
    }

    /// Sleep one poll interval, then poll.
    pub async fn tick(&mut self) -> Result<Vec<WaveRecord>, WaveError> {
        sleep(self.poll_interval).await;
        self.poll().await
    }

    /// The subscription as an endless stream with one item per poll. Empty
    /// batches are yielded too, so consumers get a chance to stop between polls.
    pub fn into_stream(self) -> impl Stream<Item = Result<Vec<WaveRecord>, WaveError>> {
        futures_util::stream::unfold(self, |mut watcher| async move {
            let batch = watcher.tick().await;
            Some((batch, watcher))
        })
    }
}
