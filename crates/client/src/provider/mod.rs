//! Wallet provider discovery and the typed JSON-RPC layer on top of it.
//!
//! Everything that reaches the chain goes through [`Eip1193Provider::request`],
//! the single `request({ method, params })` entry point injected wallets expose.
//! [`EthClient`] wraps a provider with typed helpers for the methods the portal
//! uses.

#[cfg(not(target_arch = "wasm32"))]
mod http;
#[cfg(target_arch = "wasm32")]
mod injected;
#[cfg(test)]
pub(crate) mod mock;

#[cfg(not(target_arch = "wasm32"))]
pub use http::HttpProvider;
#[cfg(target_arch = "wasm32")]
pub use injected::InjectedProvider;

use std::fmt;
use std::rc::Rc;

use alloy_primitives::{Address, Bytes, B256, U64};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use wave_portal_shared::{
    Account, BlockTag, CallRequest, LogFilter, RpcLog, RpcMethod, TransactionReceipt,
    TransactionRequest, WaveError,
};

use crate::config::PortalConfig;

/// An EIP-1193 style provider: one async `request` call, JSON in, JSON out.
#[async_trait(?Send)]
pub trait Eip1193Provider {
    async fn request(&self, method: &str, params: Value) -> Result<Value, WaveError>;
}

/// Find a provider in the host environment.
///
/// On web this is the injected `window.ethereum`. Desktop builds have no
/// injected wallet and fall back to the configured JSON-RPC node, if any.
pub fn get_provider(config: &PortalConfig) -> Option<Rc<dyn Eip1193Provider>> {
    #[cfg(target_arch = "wasm32")]
    {
        let _ = config;
        InjectedProvider::detect().map(|p| Rc::new(p) as Rc<dyn Eip1193Provider>)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        config
            .rpc_url
            .clone()
            .map(|url| Rc::new(HttpProvider::new(url)) as Rc<dyn Eip1193Provider>)
    }
}

/// Typed access to a provider.
#[derive(Clone)]
pub struct EthClient {
    provider: Rc<dyn Eip1193Provider>,
}

impl fmt::Debug for EthClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EthClient").finish_non_exhaustive()
    }
}

impl EthClient {
    pub fn new(provider: Rc<dyn Eip1193Provider>) -> Self {
        Self { provider }
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: RpcMethod,
        params: Value,
    ) -> Result<T, WaveError> {
        let value = self.provider.request(method.as_str(), params).await?;
        serde_json::from_value(value).map_err(|e| WaveError::Decode(format!("{method}: {e}")))
    }

    /// Accounts the provider has already authorized for this origin.
    pub async fn accounts(&self) -> Result<Vec<Account>, WaveError> {
        self.request(RpcMethod::Accounts, json!([])).await
    }

    /// Ask the provider to authorize accounts. May prompt the user.
    pub async fn request_accounts(&self) -> Result<Vec<Account>, WaveError> {
        self.request(RpcMethod::RequestAccounts, json!([])).await
    }

    pub async fn block_number(&self) -> Result<u64, WaveError> {
        let number: U64 = self.request(RpcMethod::BlockNumber, json!([])).await?;
        Ok(number.to::<u64>())
    }

    /// Read-only contract call against the latest block.
    pub async fn call(&self, to: Address, data: Bytes) -> Result<Bytes, WaveError> {
        let call = CallRequest { to, data };
        self.request(RpcMethod::Call, json!([call, BlockTag::Latest]))
            .await
    }

    /// Hand a transaction to the wallet for signing and broadcast.
    pub async fn send_transaction(&self, tx: &TransactionRequest) -> Result<B256, WaveError> {
        self.request(RpcMethod::SendTransaction, json!([tx])).await
    }

    /// `None` while the transaction is still pending.
    pub async fn transaction_receipt(
        &self,
        hash: B256,
    ) -> Result<Option<TransactionReceipt>, WaveError> {
        self.request(RpcMethod::GetTransactionReceipt, json!([hash]))
            .await
    }

    pub async fn logs(&self, filter: &LogFilter) -> Result<Vec<RpcLog>, WaveError> {
        self.request(RpcMethod::GetLogs, json!([filter])).await
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockProvider;
    use super::*;
    use wave_portal_shared::ProviderRpcError;

    #[tokio::test]
    async fn accounts_are_returned_in_provider_order() {
        let mock = Rc::new(MockProvider::new());
        mock.respond(RpcMethod::Accounts, Ok(json!(["0xABC", "0xDEF"])));
        let eth = EthClient::new(mock.clone());

        let accounts = eth.accounts().await.unwrap();
        assert_eq!(accounts, vec![Account::from("0xABC"), Account::from("0xDEF")]);
        assert_eq!(mock.calls(RpcMethod::Accounts), vec![json!([])]);
    }

    #[tokio::test]
    async fn malformed_result_is_a_decode_error() {
        let mock = Rc::new(MockProvider::new());
        mock.respond(RpcMethod::BlockNumber, Ok(json!({ "not": "a number" })));
        let eth = EthClient::new(mock);

        let err = eth.block_number().await.unwrap_err();
        assert!(matches!(err, WaveError::Decode(msg) if msg.starts_with("eth_blockNumber")));
    }

    #[tokio::test]
    async fn call_targets_latest_block() {
        let mock = Rc::new(MockProvider::new());
        mock.respond(RpcMethod::Call, Ok(json!("0x01")));
        let eth = EthClient::new(mock.clone());
        let to = Address::repeat_byte(0x11);

        let out = eth.call(to, Bytes::from(vec![0xde, 0xad])).await.unwrap();
        assert_eq!(out, Bytes::from(vec![0x01]));
        let params = &mock.calls(RpcMethod::Call)[0];
        assert_eq!(params[0]["data"], json!("0xdead"));
        assert_eq!(params[1], json!("latest"));
    }

    #[tokio::test]
    async fn provider_rejection_passes_through() {
        let mock = Rc::new(MockProvider::new());
        mock.respond(
            RpcMethod::RequestAccounts,
            Err(ProviderRpcError::new(4001, "User rejected the request.").into()),
        );
        let eth = EthClient::new(mock);

        let err = eth.request_accounts().await.unwrap_err();
        assert!(matches!(err, WaveError::Rpc(e) if e.is_user_rejection()));
    }

    #[tokio::test]
    async fn pending_receipt_is_none() {
        let mock = Rc::new(MockProvider::new());
        mock.respond(RpcMethod::GetTransactionReceipt, Ok(Value::Null));
        let eth = EthClient::new(mock);

        assert_eq!(eth.transaction_receipt(B256::ZERO).await.unwrap(), None);
    }
}
