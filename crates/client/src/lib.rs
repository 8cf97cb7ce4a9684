//! Wave Portal Client - Dioxus web application
//!
//! This crate contains the web/desktop client for the wave portal: connect a
//! wallet, read the waves recorded by the `WavePortal` contract, watch for new
//! ones and send your own.

pub mod actions;
pub mod config;
pub mod contract;
pub mod feed;
pub mod logging;
pub mod provider;
pub mod time;
pub mod wave_client;

pub mod components;
pub mod hooks;
pub mod stores;
pub mod views;

pub use config::PortalConfig;
pub use provider::{get_provider, Eip1193Provider, EthClient};
pub use wave_client::{WaveClient, WaveReceipt};
