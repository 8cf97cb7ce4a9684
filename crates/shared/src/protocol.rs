//! EIP-1193 / Ethereum JSON-RPC wire types.
//!
//! Only the handful of methods the portal issues are modelled. Quantities are
//! hex strings on the wire, which the `alloy_primitives` serde impls handle.

use alloy_primitives::{Address, Bytes, B256, U64};
use serde::{Deserialize, Serialize};

use crate::error::ProviderRpcError;

/// Provider methods the portal calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RpcMethod {
    /// Read-only list of already authorized accounts.
    Accounts,
    /// Interactive authorization prompt.
    RequestAccounts,
    BlockNumber,
    Call,
    SendTransaction,
    GetTransactionReceipt,
    GetLogs,
}

impl RpcMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Accounts => "eth_accounts",
            Self::RequestAccounts => "eth_requestAccounts",
            Self::BlockNumber => "eth_blockNumber",
            Self::Call => "eth_call",
            Self::SendTransaction => "eth_sendTransaction",
            Self::GetTransactionReceipt => "eth_getTransactionReceipt",
            Self::GetLogs => "eth_getLogs",
        }
    }
}

impl std::fmt::Display for RpcMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Block tag or number for `eth_call` / `eth_getLogs`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockTag {
    Number(U64),
    Latest,
}

impl Serialize for BlockTag {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Number(number) => number.serialize(serializer),
            Self::Latest => serializer.serialize_str("latest"),
        }
    }
}

impl From<u64> for BlockTag {
    fn from(number: u64) -> Self {
        Self::Number(U64::from(number))
    }
}

/// `eth_call` request object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallRequest {
    pub to: Address,
    pub data: Bytes,
}

/// `eth_sendTransaction` request object. Gas, nonce and fees are left to the wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRequest {
    pub from: String,
    pub to: Address,
    pub data: Bytes,
}

/// `eth_getLogs` filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogFilter {
    pub address: Address,
    pub topics: Vec<B256>,
    pub from_block: BlockTag,
    pub to_block: BlockTag,
}

/// A log entry as returned by `eth_getLogs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcLog {
    pub address: Address,
    pub topics: Vec<B256>,
    pub data: Bytes,
    #[serde(default)]
    pub block_number: Option<U64>,
    #[serde(default)]
    pub transaction_hash: Option<B256>,
    #[serde(default)]
    pub log_index: Option<U64>,
    #[serde(default)]
    pub removed: bool,
}

/// The fields of a transaction receipt the portal reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub transaction_hash: B256,
    #[serde(default)]
    pub block_number: Option<U64>,
    /// `0x1` success, `0x0` reverted. Absent on pre-Byzantium chains.
    #[serde(default)]
    pub status: Option<U64>,
}

impl TransactionReceipt {
    pub fn succeeded(&self) -> bool {
        self.status.map_or(true, |status| status != U64::ZERO)
    }
}

/// JSON-RPC 2.0 request envelope, used when talking to a node directly.
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcRequest<'a> {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: &'a str,
    pub params: serde_json::Value,
}

impl<'a> JsonRpcRequest<'a> {
    pub fn new(id: u64, method: &'a str, params: serde_json::Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            method,
            params,
        }
    }
}

/// JSON-RPC 2.0 response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcResponse {
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    #[serde(default)]
    pub result: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<ProviderRpcError>,
}

impl JsonRpcResponse {
    /// Split into the EIP-1193 shape: the result value, or the error object.
    pub fn into_result(self) -> Result<serde_json::Value, ProviderRpcError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.result.unwrap_or(serde_json::Value::Null)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;
    use serde_json::json;

    #[test]
    fn log_filter_uses_hex_quantities() {
        let portal = address!("0x5fbdb2315678afecb367f032d93f642f64180aa3");
        let filter = LogFilter {
            address: portal,
            topics: vec![B256::ZERO],
            from_block: BlockTag::from(16),
            to_block: BlockTag::Latest,
        };
        let value = serde_json::to_value(&filter).unwrap();
        assert_eq!(value["fromBlock"], json!("0x10"));
        assert_eq!(value["toBlock"], json!("latest"));
        assert_eq!(value["address"], json!(portal));
    }

    #[test]
    fn receipt_status_zero_is_failure() {
        let receipt: TransactionReceipt = serde_json::from_value(json!({
            "transactionHash": format!("0x{}", "11".repeat(32)),
            "blockNumber": "0x2",
            "status": "0x0",
        }))
        .unwrap();
        assert!(!receipt.succeeded());
        assert_eq!(receipt.block_number, Some(U64::from(2)));
    }

    #[test]
    fn response_error_wins_over_result() {
        let response: JsonRpcResponse = serde_json::from_value(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": { "code": -32601, "message": "Method not found" }
        }))
        .unwrap();
        let err = response.into_result().unwrap_err();
        assert_eq!(err.code, -32601);
    }
}
