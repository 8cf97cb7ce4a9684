//! Cross-platform logging.
//!
//! `log_info!` and friends dispatch to `web_sys::console` on web and to
//! `tracing` on desktop. [`alert`] is the one blocking notice the portal shows.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

#[cfg(target_arch = "wasm32")]
pub fn log_impl(level: Level, msg: &str) {
    let msg = wasm_bindgen::JsValue::from_str(msg);
    match level {
        Level::Debug => web_sys::console::debug_1(&msg),
        Level::Info => web_sys::console::log_1(&msg),
        Level::Warn => web_sys::console::warn_1(&msg),
        Level::Error => web_sys::console::error_1(&msg),
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn log_impl(level: Level, msg: &str) {
    match level {
        Level::Debug => tracing::debug!("{}", msg),
        Level::Info => tracing::info!("{}", msg),
        Level::Warn => tracing::warn!("{}", msg),
        Level::Error => tracing::error!("{}", msg),
    }
}

/// Sink for blocking user-facing notices.
pub trait Alert {
    fn alert(&self, msg: &str);
}

/// Alerts through the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostAlert;

impl Alert for HostAlert {
    fn alert(&self, msg: &str) {
        alert(msg);
    }
}

/// `window.alert`, falling back to a warning if there is no window.
#[cfg(target_arch = "wasm32")]
pub fn alert(msg: &str) {
    let shown = web_sys::window().is_some_and(|window| window.alert_with_message(msg).is_ok());
    if !shown {
        log_impl(Level::Warn, msg);
    }
}

/// Desktop has no blocking dialog; the notice goes to the log.
#[cfg(not(target_arch = "wasm32"))]
pub fn alert(msg: &str) {
    tracing::warn!(target: "alert", "{}", msg);
}

/// Log an info message
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::logging::log_impl($crate::logging::Level::Info, &format!($($arg)*))
    };
}

/// Log an error message
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::logging::log_impl($crate::logging::Level::Error, &format!($($arg)*))
    };
}

/// Log a warning message
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        $crate::logging::log_impl($crate::logging::Level::Warn, &format!($($arg)*))
    };
}

/// Log a debug message
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        $crate::logging::log_impl($crate::logging::Level::Debug, &format!($($arg)*))
    };
}
