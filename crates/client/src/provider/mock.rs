//! Scripted in-memory provider for tests.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

use alloy_primitives::hex;
use async_trait::async_trait;
use serde_json::Value;
use wave_portal_shared::{ProviderRpcError, RpcMethod, WaveError, UNSUPPORTED_METHOD};

use super::Eip1193Provider;

/// Replays queued responses per method. The last queued response for a key is
/// sticky so polling loops keep seeing it.
///
/// `eth_call` responses can be keyed by function selector with
/// [`MockProvider::respond_call`]; those take precedence over plain
/// [`MockProvider::respond`] entries for `eth_call`.
#[derive(Default)]
pub struct MockProvider {
    responses: RefCell<HashMap<String, VecDeque<Result<Value, WaveError>>>>,
    calls: RefCell<Vec<(String, Value)>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, method: RpcMethod, response: Result<Value, WaveError>) -> &Self {
        self.push(method.as_str().to_string(), response)
    }

    pub fn respond_call(&self, selector: [u8; 4], response: Result<Value, WaveError>) -> &Self {
        self.push(call_key(&selector), response)
    }

    /// Params of every request made for `method`, in order.
    pub fn calls(&self, method: RpcMethod) -> Vec<Value> {
        self.calls
            .borrow()
            .iter()
            .filter(|(m, _)| m == method.as_str())
            .map(|(_, params)| params.clone())
            .collect()
    }

    /// Method names in the order they were requested.
    pub fn methods(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|(m, _)| m.clone()).collect()
    }

    fn push(&self, key: String, response: Result<Value, WaveError>) -> &Self {
        self.responses
            .borrow_mut()
            .entry(key)
            .or_default()
            .push_back(response);
        self
    }

    fn next(&self, key: &str) -> Option<Result<Value, WaveError>> {
        let mut responses = self.responses.borrow_mut();
        let queue = responses.get_mut(key)?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

fn call_key(selector: &[u8]) -> String {
    format!("eth_call:0x{}", hex::encode(selector))
}

#[async_trait(?Send)]
impl Eip1193Provider for MockProvider {
    async fn request(&self, method: &str, params: Value) -> Result<Value, WaveError> {
        self.calls
            .borrow_mut()
            .push((method.to_string(), params.clone()));

        if method == RpcMethod::Call.as_str() {
            let selector = params[0]["data"]
                .as_str()
                .and_then(|data| data.get(..10))
                .map(|s| format!("eth_call:{s}"));
            if let Some(response) = selector.and_then(|key| self.next(&key)) {
                return response;
            }
        }

        self.next(method).unwrap_or_else(|| {
            Err(ProviderRpcError::new(UNSUPPORTED_METHOD, format!("{method} not scripted")).into())
        })
    }
}
