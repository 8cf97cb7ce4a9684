//! JSON-RPC over HTTP provider for desktop builds.
//!
//! Talks to a node directly (typically a local dev node with unlocked
//! accounts). Nodes have no interactive authorization, so
//! `eth_requestAccounts` is answered with `eth_accounts`.

use std::cell::Cell;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use url::Url;
use wave_portal_shared::{JsonRpcRequest, JsonRpcResponse, RpcMethod, WaveError};

use super::Eip1193Provider;

#[derive(Debug)]
pub struct HttpProvider {
    client: Client,
    url: Url,
    next_id: Cell<u64>,
}

impl HttpProvider {
    pub fn new(url: Url) -> Self {
        Self {
            client: Client::new(),
            url,
            next_id: Cell::new(1),
        }
    }
}

#[async_trait(?Send)]
impl Eip1193Provider for HttpProvider {
    async fn request(&self, method: &str, params: Value) -> Result<Value, WaveError> {
        let method = node_method(method);
        let id = self.next_id.get();
        self.next_id.set(id + 1);

        let body = JsonRpcRequest::new(id, method, params);
        let resp = self
            .client
            .post(self.url.clone())
            .json(&body)
            .send()
            .await
            .map_err(WaveError::transport)?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| WaveError::Transport(format!("failed to read body: {e}")))?;

        if !status.is_success() {
            return Err(WaveError::Transport(format!("HTTP {}: {}", status.as_u16(), text)));
        }

        let response: JsonRpcResponse = serde_json::from_str(&text)?;
        Ok(response.into_result()?)
    }
}

fn node_method(method: &str) -> &str {
    if method == RpcMethod::RequestAccounts.as_str() {
        RpcMethod::Accounts.as_str()
    } else {
        method
    }
}
