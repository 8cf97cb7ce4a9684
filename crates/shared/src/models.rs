//! Domain models for the wave portal.

use std::fmt;

use alloy_primitives::{Address, U256};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::WaveError;

/// An authorized wallet account, exactly as the provider reported it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Account(String);

impl Account {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Account {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A single wave, normalized for display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WaveRecord {
    pub address: Address,
    pub timestamp: DateTime<Utc>,
    pub message: String,
}

impl WaveRecord {
    /// Build a record from the raw on-chain tuple. `timestamp` is whole seconds
    /// since the Unix epoch.
    pub fn from_raw(address: Address, timestamp: U256, message: String) -> Result<Self, WaveError> {
        Ok(Self {
            address,
            timestamp: timestamp_from_secs(timestamp)?,
            message,
        })
    }
}

/// Convert an on-chain `uint256` seconds count into a point in time.
pub fn timestamp_from_secs(secs: U256) -> Result<DateTime<Utc>, WaveError> {
    let secs: u64 = secs
        .try_into()
        .map_err(|_| WaveError::InvalidTimestamp(secs.to_string()))?;
    let secs = i64::try_from(secs).map_err(|_| WaveError::InvalidTimestamp(secs.to_string()))?;
    DateTime::<Utc>::from_timestamp(secs, 0)
        .ok_or_else(|| WaveError::InvalidTimestamp(secs.to_string()))
}

/// One change to the wave list, applied by a single reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaveUpdate {
    /// Result of the bulk historical fetch, in chain order.
    History(Vec<WaveRecord>),
    /// A `NewWave` event from the live subscription.
    Live(WaveRecord),
}

/// Insertion-ordered list of waves.
///
/// Records are never deduplicated: a wave seen by both the historical fetch and
/// the live subscription is listed twice.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct WaveCollection {
    waves: Vec<WaveRecord>,
}

impl WaveCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, update: WaveUpdate) {
        match update {
            WaveUpdate::History(records) => self.waves.extend(records),
            WaveUpdate::Live(record) => self.waves.push(record),
        }
    }

    pub fn len(&self) -> usize {
        self.waves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waves.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WaveRecord> {
        self.waves.iter()
    }

    pub fn as_slice(&self) -> &[WaveRecord] {
        &self.waves
    }
}

impl<'a> IntoIterator for &'a WaveCollection {
    type Item = &'a WaveRecord;
    type IntoIter = std::slice::Iter<'a, WaveRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.waves.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;
    use chrono::TimeZone;

    fn record(secs: u64, message: &str) -> WaveRecord {
        WaveRecord::from_raw(
            address!("0x5fbdb2315678afecb367f032d93f642f64180aa3"),
            U256::from(secs),
            message.to_string(),
        )
        .unwrap()
    }

    #[test]
    fn timestamp_is_seconds_not_millis() {
        let ts = timestamp_from_secs(U256::from(1_700_000_000u64)).unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2023, 11, 14, 22, 13, 20).unwrap());
        assert_eq!(ts.timestamp(), 1_700_000_000);
    }

    #[test]
    fn oversized_timestamp_is_rejected() {
        assert!(matches!(
            timestamp_from_secs(U256::MAX),
            Err(WaveError::InvalidTimestamp(_))
        ));
        assert!(matches!(
            timestamp_from_secs(U256::from(u64::MAX)),
            Err(WaveError::InvalidTimestamp(_))
        ));
    }

    #[test]
    fn length_is_history_plus_live() {
        let mut waves = WaveCollection::new();
        waves.apply(WaveUpdate::History(vec![record(1, "a"), record(2, "b"), record(3, "c")]));
        waves.apply(WaveUpdate::Live(record(4, "d")));
        waves.apply(WaveUpdate::Live(record(5, "e")));

        assert_eq!(waves.len(), 5);
        let messages: Vec<_> = waves.iter().map(|w| w.message.as_str()).collect();
        assert_eq!(messages, ["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn live_event_matching_history_is_kept_twice() {
        let dup = record(1_700_000_000, "hello");
        let mut waves = WaveCollection::new();
        waves.apply(WaveUpdate::History(vec![dup.clone()]));
        waves.apply(WaveUpdate::Live(dup.clone()));

        assert_eq!(waves.len(), 2);
        assert_eq!(waves.as_slice(), [dup.clone(), dup]);
    }

    #[test]
    fn live_before_history_keeps_arrival_order() {
        let mut waves = WaveCollection::new();
        waves.apply(WaveUpdate::Live(record(9, "live")));
        waves.apply(WaveUpdate::History(vec![record(1, "old")]));

        assert_eq!(waves.as_slice()[0].message, "live");
        assert_eq!(waves.as_slice()[1].message, "old");
    }

    #[test]
    fn account_keeps_provider_string() {
        let account = Account::from("0xABC");
        assert_eq!(account.as_str(), "0xABC");
        assert_eq!(serde_json::to_string(&account).unwrap(), "\"0xABC\"");
    }
}
