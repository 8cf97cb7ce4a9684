//! The portal's chain-facing core.
//!
//! Every operation returns a `Result`; deciding whether a failure is logged,
//! alerted or ignored is left to the caller (see [`crate::actions`]).

use std::rc::Rc;

use alloy_primitives::{Address, B256, U256};
use wave_portal_shared::{Account, WaveError, WaveRecord};

use crate::config::PortalConfig;
use crate::contract::{NewWaveWatcher, WavePortalHandle};
use crate::provider::{get_provider, Eip1193Provider, EthClient};

/// Outcome of a confirmed `wave` transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaveReceipt {
    pub hash: B256,
    pub block_number: Option<u64>,
    pub total_waves: U256,
}

#[derive(Debug, Clone)]
pub struct WaveClient {
    eth: Option<EthClient>,
    config: PortalConfig,
    config_error: Option<WaveError>,
}

impl WaveClient {
    pub fn new(provider: Option<Rc<dyn Eip1193Provider>>, config: PortalConfig) -> Self {
        Self {
            eth: provider.map(EthClient::new),
            config,
            config_error: None,
        }
    }

    /// A client whose configuration could not be read. Every operation fails
    /// with `error`, whether or not a wallet is present.
    pub fn misconfigured(error: WaveError) -> Self {
        Self {
            eth: None,
            config: PortalConfig::new(Address::ZERO),
            config_error: Some(error),
        }
    }

    /// Bind to whatever provider the host environment offers.
    pub fn discover(config: PortalConfig) -> Self {
        let provider = get_provider(&config);
        Self::new(provider, config)
    }

    /// Configure from the environment and discover a provider. A configuration
    /// error is logged and yields a [`misconfigured`](Self::misconfigured) client.
    pub fn from_env() -> Self {
        match PortalConfig::from_env() {
            Ok(config) => Self::discover(config),
            Err(e) => {
                crate::log_error!("Wave portal is not configured: {e}");
                Self::misconfigured(e)
            }
        }
    }

    /// `Ok` if operations can reach the chain: the client is configured and a
    /// provider is present.
    pub fn ready(&self) -> Result<(), WaveError> {
        self.eth().map(|_| ())
    }

    fn eth(&self) -> Result<&EthClient, WaveError> {
        if let Some(e) = &self.config_error {
            return Err(e.clone());
        }
        self.eth.as_ref().ok_or(WaveError::NoProvider)
    }

    /// Contract handle bound to the configured address.
    pub fn portal(&self) -> Result<WavePortalHandle, WaveError> {
        Ok(WavePortalHandle::new(
            self.eth()?.clone(),
            self.config.contract_address,
            self.config.poll_interval,
        ))
    }

    /// First account the provider has already authorized, if any.
    pub async fn authorized_account(&self) -> Result<Option<Account>, WaveError> {
        let accounts = self.eth()?.accounts().await?;
        Ok(accounts.into_iter().next())
    }

    /// Ask the wallet to authorize an account and return the first one.
    pub async fn connect(&self) -> Result<Account, WaveError> {
        let accounts = self.eth()?.request_accounts().await?;
        accounts.into_iter().next().ok_or(WaveError::NoAccount)
    }

    /// Subscribe to `NewWave` events from the current block on.
    pub async fn watch_new_waves(&self) -> Result<NewWaveWatcher, WaveError> {
        Ok(self.portal()?.watch_new_waves().await)
    }

    /// Every wave recorded so far, in chain order.
    pub async fn fetch_waves(&self) -> Result<Vec<WaveRecord>, WaveError> {
        self.portal()?.get_all_waves().await
    }

    pub async fn total_waves(&self) -> Result<U256, WaveError> {
        self.portal()?.total_waves().await
    }

    /// Send `wave(message)` and wait for it to be mined.
    pub async fn submit_wave(&self, message: &str) -> Result<WaveReceipt, WaveError> {
        let portal = self.portal()?;

        let count = portal.total_waves().await?;
        crate::log_info!("Retrieved total wave count... {count}");

        let from = self
            .eth()?
            .accounts()
            .await?
            .into_iter()
            .next()
            .ok_or(WaveError::NoAccount)?;

        let pending = portal.wave(&from, message).await?;
        let hash = pending.hash();
        crate::log_info!("Mining... {hash}");

        let receipt = pending.confirmed().await?;
        crate::log_info!("Mined -- {hash}");

        let total_waves = portal.total_waves().await?;
        crate::log_info!("Retrieved total wave count... {total_waves}");

        Ok(WaveReceipt {
            hash,
            block_number: receipt.block_number.map(|n| n.to::<u64>()),
            total_waves,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::mock::MockProvider;
    use alloy_primitives::{address, Bytes};
    use alloy_sol_types::{SolCall, SolValue};
    use serde_json::{json, Value};
    use wave_portal_shared::{ProviderRpcError, RpcMethod, WavePortal};

    fn config() -> PortalConfig {
        PortalConfig::new(address!("0x5fbdb2315678afecb367f032d93f642f64180aa3"))
            .with_poll_interval(std::time::Duration::from_millis(1))
    }

    fn client(mock: &Rc<MockProvider>) -> WaveClient {
        WaveClient::new(Some(mock.clone() as Rc<dyn Eip1193Provider>), config())
    }

    fn total(n: u64) -> Value {
        json!(Bytes::from(U256::from(n).abi_encode()))
    }

    #[tokio::test]
    async fn no_provider_is_reported_by_every_operation() {
        let client = WaveClient::new(None, config());
        assert_eq!(client.ready(), Err(WaveError::NoProvider));
        assert_eq!(client.authorized_account().await, Err(WaveError::NoProvider));
        assert_eq!(client.connect().await, Err(WaveError::NoProvider));
        assert_eq!(client.fetch_waves().await, Err(WaveError::NoProvider));
        assert_eq!(client.submit_wave("hi").await, Err(WaveError::NoProvider));
    }

    #[tokio::test]
    async fn authorized_account_takes_first() {
        let mock = Rc::new(MockProvider::new());
        mock.respond(RpcMethod::Accounts, Ok(json!(["0xABC", "0xDEF"])));
        assert_eq!(
            client(&mock).authorized_account().await,
            Ok(Some(Account::from("0xABC")))
        );
    }

    #[tokio::test]
    async fn connect_with_empty_list_is_no_account() {
        let mock = Rc::new(MockProvider::new());
        mock.respond(RpcMethod::RequestAccounts, Ok(json!([])));
        assert_eq!(client(&mock).connect().await, Err(WaveError::NoAccount));
    }

    #[tokio::test]
    async fn submit_wave_runs_count_send_confirm_count() {
        let mock = Rc::new(MockProvider::new());
        mock.respond_call(WavePortal::getTotalWavesCall::SELECTOR, Ok(total(3)))
            .respond_call(WavePortal::getTotalWavesCall::SELECTOR, Ok(total(4)));
        mock.respond(RpcMethod::Accounts, Ok(json!(["0xABC"])));
        mock.respond(RpcMethod::SendTransaction, Ok(json!(B256::repeat_byte(0xaa))));
        mock.respond(
            RpcMethod::GetTransactionReceipt,
            Ok(json!({
                "transactionHash": B256::repeat_byte(0xaa),
                "blockNumber": "0x9",
                "status": "0x1",
            })),
        );

        let receipt = client(&mock).submit_wave("hello").await.unwrap();
        assert_eq!(
            receipt,
            WaveReceipt {
                hash: B256::repeat_byte(0xaa),
                block_number: Some(9),
                total_waves: U256::from(4),
            }
        );
        assert_eq!(
            mock.methods(),
            [
                "eth_call",
                "eth_accounts",
                "eth_sendTransaction",
                "eth_getTransactionReceipt",
                "eth_call",
            ]
        );
    }

    #[tokio::test]
    async fn submit_wave_without_account_sends_nothing() {
        let mock = Rc::new(MockProvider::new());
        mock.respond_call(WavePortal::getTotalWavesCall::SELECTOR, Ok(total(0)));
        mock.respond(RpcMethod::Accounts, Ok(json!([])));

        assert_eq!(client(&mock).submit_wave("hi").await, Err(WaveError::NoAccount));
        assert!(mock.calls(RpcMethod::SendTransaction).is_empty());
    }

    #[tokio::test]
    async fn rejected_signature_surfaces_rpc_error() {
        let mock = Rc::new(MockProvider::new());
        mock.respond_call(WavePortal::getTotalWavesCall::SELECTOR, Ok(total(0)));
        mock.respond(RpcMethod::Accounts, Ok(json!(["0xABC"])));
        mock.respond(
            RpcMethod::SendTransaction,
            Err(ProviderRpcError::new(4001, "User denied transaction signature.").into()),
        );

        let err = client(&mock).submit_wave("hi").await.unwrap_err();
        assert!(matches!(err, WaveError::Rpc(e) if e.is_user_rejection()));
        assert!(mock.calls(RpcMethod::GetTransactionReceipt).is_empty());
    }

    #[tokio::test]
    async fn misconfigured_client_reports_config_error() {
        let error = WaveError::Config("WAVE_PORTAL_CONTRACT_ADDRESS is not set".into());
        let client = WaveClient::misconfigured(error.clone());

        assert_eq!(client.ready(), Err(error.clone()));
        assert_eq!(client.connect().await, Err(error.clone()));
        assert_eq!(client.submit_wave("hi").await, Err(error));
    }
}
