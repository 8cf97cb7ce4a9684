//! `WavePortal` contract interface and the conversions between its ABI types
//! and [`WaveRecord`].

use alloy_primitives::{Bytes, U256};
use alloy_sol_types::{sol, SolCall, SolEvent};

use crate::error::WaveError;
use crate::models::WaveRecord;
use crate::protocol::RpcLog;

sol! {
    /// The deployed wave portal.
    contract WavePortal {
        #[derive(Debug, PartialEq, Eq)]
        struct Wave {
            address waver;
            string message;
            uint256 timestamp;
        }

        #[derive(Debug, PartialEq, Eq)]
        event NewWave(address indexed from, uint256 timestamp, string message);

        function wave(string _message) public;
        function getAllWaves() public view returns (Wave[] memory);
        function getTotalWaves() public view returns (uint256);
    }
}

impl TryFrom<WavePortal::Wave> for WaveRecord {
    type Error = WaveError;

    fn try_from(wave: WavePortal::Wave) -> Result<Self, Self::Error> {
        WaveRecord::from_raw(wave.waver, wave.timestamp, wave.message)
    }
}

impl TryFrom<WavePortal::NewWave> for WaveRecord {
    type Error = WaveError;

    fn try_from(event: WavePortal::NewWave) -> Result<Self, Self::Error> {
        WaveRecord::from_raw(event.from, event.timestamp, event.message)
    }
}

/// Calldata for `wave(message)`.
pub fn encode_wave(message: &str) -> Bytes {
    WavePortal::waveCall {
        _message: message.to_string(),
    }
    .abi_encode()
    .into()
}

/// Calldata for `getAllWaves()`.
pub fn encode_get_all_waves() -> Bytes {
    WavePortal::getAllWavesCall {}.abi_encode().into()
}

/// Calldata for `getTotalWaves()`.
pub fn encode_get_total_waves() -> Bytes {
    WavePortal::getTotalWavesCall {}.abi_encode().into()
}

/// Decode the `getAllWaves()` return data into records, keeping chain order.
pub fn decode_all_waves(data: &[u8]) -> Result<Vec<WaveRecord>, WaveError> {
    WavePortal::getAllWavesCall::abi_decode_returns(data)?
        .into_iter()
        .map(WaveRecord::try_from)
        .collect()
}

/// Decode the `getTotalWaves()` return data.
pub fn decode_total_waves(data: &[u8]) -> Result<U256, WaveError> {
    Ok(WavePortal::getTotalWavesCall::abi_decode_returns(data)?)
}

/// Decode a `NewWave` log. The log's topics must start with the event signature.
pub fn decode_new_wave(log: &RpcLog) -> Result<WaveRecord, WaveError> {
    let event = WavePortal::NewWave::decode_raw_log(log.topics.iter().copied(), &log.data)?;
    WaveRecord::try_from(event)
}
