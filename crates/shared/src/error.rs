//! Error types for wallet and contract plumbing.

use alloy_primitives::B256;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// EIP-1193: the user rejected the request.
pub const USER_REJECTED_REQUEST: i64 = 4001;
/// EIP-1193: the requested method or account has not been authorized.
pub const UNAUTHORIZED: i64 = 4100;
/// EIP-1193: the provider does not support the requested method.
pub const UNSUPPORTED_METHOD: i64 = 4200;
/// EIP-1193: the provider is disconnected from all chains.
pub const DISCONNECTED: i64 = 4900;
/// EIP-1193: the provider is not connected to the requested chain.
pub const CHAIN_DISCONNECTED: i64 = 4901;

/// Error object a provider rejects a `request` with.
///
/// Injected wallets use the EIP-1193 codes above; plain JSON-RPC nodes use the
/// JSON-RPC 2.0 range (`-32xxx`). Both share the `{ code, message, data }` shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Error)]
#[error("provider error {code}: {message}")]
pub struct ProviderRpcError {
    pub code: i64,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl ProviderRpcError {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    pub fn is_user_rejection(&self) -> bool {
        self.code == USER_REJECTED_REQUEST
    }

    pub fn is_unauthorized(&self) -> bool {
        self.code == UNAUTHORIZED
    }

    pub fn is_disconnected(&self) -> bool {
        matches!(self.code, DISCONNECTED | CHAIN_DISCONNECTED)
    }
}

/// Everything that can go wrong between the UI and the chain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WaveError {
    #[error("no wallet provider found")]
    NoProvider,
    #[error("no authorized account")]
    NoAccount,
    #[error("message input holds no value")]
    EmptyInput,
    #[error(transparent)]
    Rpc(#[from] ProviderRpcError),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("decode error: {0}")]
    Decode(String),
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
    #[error("transaction {hash} reverted")]
    TransactionReverted { hash: B256 },
    #[error("configuration error: {0}")]
    Config(String),
}

impl WaveError {
    pub fn decode(err: impl std::fmt::Display) -> Self {
        Self::Decode(err.to_string())
    }

    pub fn transport(err: impl std::fmt::Display) -> Self {
        Self::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for WaveError {
    fn from(err: serde_json::Error) -> Self {
        Self::decode(err)
    }
}

impl From<alloy_sol_types::Error> for WaveError {
    fn from(err: alloy_sol_types::Error) -> Self {
        Self::decode(err)
    }
}
