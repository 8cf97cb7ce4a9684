//! View components for the application.

pub mod portal;

pub use portal::{WaveForm, WavePortal};
