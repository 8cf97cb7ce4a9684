//! Shared types for the wave portal client: domain models, the `WavePortal`
//! contract interface and the EIP-1193 wire types.

pub mod contract;
pub mod error;
pub mod models;
pub mod protocol;

pub use contract::*;
pub use error::*;
pub use models::*;
pub use protocol::*;
