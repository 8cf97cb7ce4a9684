//! Global stores for application state.

pub mod account;
pub mod waves;

pub use account::{set_current_account, CURRENT_ACCOUNT};
pub use waves::{publish_waves, WAVES};
