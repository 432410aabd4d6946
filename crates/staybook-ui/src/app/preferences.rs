//! Environment helpers for the app shell.

use crate::core::config::{ClientConfig, ConfigOverrides};
use crate::core::telemetry::Severity;
use gloo::console;
use gloo::utils::window;

const FALLBACK_ORIGIN: &str = "http://localhost:3000";

pub(crate) fn page_origin() -> String {
    window()
        .location()
        .origin()
        .unwrap_or_else(|_| FALLBACK_ORIGIN.to_string())
}

pub(crate) fn client_config() -> ClientConfig {
    ClientConfig::resolve(&page_origin(), ConfigOverrides::from_build_env())
}

pub(crate) fn console_sink(severity: Severity, line: &str) {
    match severity {
        Severity::Error => console::error!(line),
        Severity::Warn => console::warn!(line),
        Severity::Info => console::log!(line),
        Severity::Debug => console::debug!(line),
    }
}

/// Send the browser to an external URL (identity or payment provider).
pub(crate) fn redirect_to(url: &str) -> bool {
    match window().location().set_href(url) {
        Ok(()) => true,
        Err(err) => {
            tracing::error!(error = ?err, "browser redirect failed");
            false
        }
    }
}
