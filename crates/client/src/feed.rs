//! Single-writer queue for the wave list.
//!
//! The historical fetch and the live subscription both produce
//! [`WaveUpdate`]s onto one channel. A single reducer owns the accumulator,
//! applies updates in arrival order and republishes the whole list after each
//! one.

use futures_channel::mpsc::{unbounded, UnboundedReceiver, UnboundedSender};
use futures_util::StreamExt;
use wave_portal_shared::{WaveCollection, WaveUpdate};

pub type WaveSender = UnboundedSender<WaveUpdate>;
pub type WaveReceiver = UnboundedReceiver<WaveUpdate>;

pub fn wave_feed() -> (WaveSender, WaveReceiver) {
    unbounded()
}

/// Apply updates until every sender is dropped. Returns the final list.
pub async fn run_reducer(
    mut updates: WaveReceiver,
    mut publish: impl FnMut(&WaveCollection),
) -> WaveCollection {
    let mut waves = WaveCollection::new();
    while let Some(update) = updates.next().await {
        waves.apply(update);
        publish(&waves);
    }
    waves
}
