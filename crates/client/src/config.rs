//! Portal configuration.
//!
//! The contract address is fixed at build time. Desktop builds additionally read
//! the process environment at startup, which takes precedence.
//!
//! Variables:
//! - `WAVE_PORTAL_CONTRACT_ADDRESS`: deployed `WavePortal` address (required)
//! - `WAVE_PORTAL_RPC_URL`: JSON-RPC node for desktop builds (optional)
//! - `WAVE_PORTAL_POLL_MS`: event and receipt poll interval (default: 4000)

use std::time::Duration;

use alloy_primitives::Address;
use url::Url;
use wave_portal_shared::WaveError;

pub const CONTRACT_ADDRESS_VAR: &str = "WAVE_PORTAL_CONTRACT_ADDRESS";
pub const RPC_URL_VAR: &str = "WAVE_PORTAL_RPC_URL";
pub const POLL_MS_VAR: &str = "WAVE_PORTAL_POLL_MS";

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(4000);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalConfig {
    /// Address of the deployed `WavePortal` contract.
    pub contract_address: Address,
    /// Node to talk to when no wallet is injected (desktop).
    pub rpc_url: Option<Url>,
    /// How often the live subscription and the confirmation wait poll the provider.
    pub poll_interval: Duration,
}

impl PortalConfig {
    pub fn new(contract_address: Address) -> Self {
        Self {
            contract_address,
            rpc_url: None,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_rpc_url(mut self, rpc_url: Url) -> Self {
        self.rpc_url = Some(rpc_url);
        self
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Build the configuration from build-time values, overridden by the
    /// process environment on desktop.
    pub fn from_env() -> Result<Self, WaveError> {
        Self::from_lookup(|key| runtime_var(key).or_else(|| build_var(key)))
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, WaveError> {
        let raw_address = lookup(CONTRACT_ADDRESS_VAR)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| WaveError::Config(format!("{CONTRACT_ADDRESS_VAR} is not set")))?;
        let contract_address = raw_address.trim().parse::<Address>().map_err(|e| {
            WaveError::Config(format!("{CONTRACT_ADDRESS_VAR}={raw_address:?} is invalid: {e}"))
        })?;

        let mut config = Self::new(contract_address);

        if let Some(raw_url) = lookup(RPC_URL_VAR).filter(|v| !v.trim().is_empty()) {
            let url = Url::parse(raw_url.trim())
                .map_err(|e| WaveError::Config(format!("{RPC_URL_VAR}={raw_url:?} is invalid: {e}")))?;
            config = config.with_rpc_url(url);
        }

        if let Some(raw_ms) = lookup(POLL_MS_VAR).filter(|v| !v.trim().is_empty()) {
            let ms = raw_ms
                .trim()
                .parse::<u64>()
                .map_err(|e| WaveError::Config(format!("{POLL_MS_VAR}={raw_ms:?} is invalid: {e}")))?;
            config = config.with_poll_interval(Duration::from_millis(ms));
        }

        Ok(config)
    }
}

fn build_var(key: &str) -> Option<String> {
    let value = match key {
        CONTRACT_ADDRESS_VAR => option_env!("WAVE_PORTAL_CONTRACT_ADDRESS"),
        RPC_URL_VAR => option_env!("WAVE_PORTAL_RPC_URL"),
        POLL_MS_VAR => option_env!("WAVE_PORTAL_POLL_MS"),
        _ => None,
    };
    value.map(str::to_string)
}

#[cfg(not(target_arch = "wasm32"))]
fn runtime_var(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

#[cfg(target_arch = "wasm32")]
fn runtime_var(_key: &str) -> Option<String> {
    None
}
