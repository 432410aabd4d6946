//! Client configuration resolved once at boot.
//!
//! # Design
//! - Build-time overrides (`STAYBOOK_API_URL`, `STAYBOOK_AUTH_URL`, `STAYBOOK_LOG`)
//!   win; otherwise values derive from the page origin.
//! - Resolution is pure so the app shell only supplies the origin.

/// Identity provider used when no override is compiled in.
pub const DEFAULT_AUTH_PROVIDER_URL: &str = "https://auth.emergentagent.com";
/// Log filter used when no override is compiled in.
pub const DEFAULT_LOG_LEVEL: &str = "info";
/// Path the identity provider redirects back to.
pub const LOGIN_RETURN_PATH: &str = "/dashboard";

/// Values that replace the origin-derived defaults.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    /// Backend base URL, including any `/api` prefix.
    pub api_base_url: Option<String>,
    /// Identity provider URL.
    pub auth_provider_url: Option<String>,
    /// `tracing` filter directive.
    pub log_level: Option<String>,
}

impl ConfigOverrides {
    /// Overrides compiled into the bundle through environment variables.
    #[must_use]
    pub fn from_build_env() -> Self {
        Self {
            api_base_url: option_env!("STAYBOOK_API_URL").map(str::to_string),
            auth_provider_url: option_env!("STAYBOOK_AUTH_URL").map(str::to_string),
            log_level: option_env!("STAYBOOK_LOG").map(str::to_string),
        }
    }
}

/// Effective client configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Page origin, e.g. `https://staybook.example`.
    pub origin: String,
    /// Backend base URL without trailing slash.
    pub api_base_url: String,
    /// Identity provider URL without trailing slash.
    pub auth_provider_url: String,
    /// `tracing` filter directive.
    pub log_level: String,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().trim_end_matches('/').to_string())
        .filter(|v| !v.is_empty())
}

impl ClientConfig {
    /// Resolve the configuration for a page served from `origin`.
    #[must_use]
    pub fn resolve(origin: &str, overrides: ConfigOverrides) -> Self {
        let origin = origin.trim().trim_end_matches('/').to_string();
        let api_base_url =
            non_blank(overrides.api_base_url).unwrap_or_else(|| format!("{origin}/api"));
        let auth_provider_url = non_blank(overrides.auth_provider_url)
            .unwrap_or_else(|| DEFAULT_AUTH_PROVIDER_URL.to_string());
        let log_level = overrides
            .log_level
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());
        Self {
            origin,
            api_base_url,
            auth_provider_url,
            log_level,
        }
    }

    /// Identity-provider URL that returns to the dashboard after login.
    #[must_use]
    pub fn login_url(&self) -> String {
        let redirect = format!("{}{LOGIN_RETURN_PATH}", self.origin);
        format!(
            "{}/?redirect={}",
            self.auth_provider_url,
            urlencoding::encode(&redirect)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_derive_from_origin() {
        let config = ClientConfig::resolve("https://staybook.example/", ConfigOverrides::default());
        assert_eq!(config.origin, "https://staybook.example");
        assert_eq!(config.api_base_url, "https://staybook.example/api");
        assert_eq!(config.auth_provider_url, DEFAULT_AUTH_PROVIDER_URL);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn overrides_win_and_lose_trailing_slash() {
        let config = ClientConfig::resolve(
            "http://localhost:8080",
            ConfigOverrides {
                api_base_url: Some("http://localhost:8001/api/".to_string()),
                auth_provider_url: Some(" ".to_string()),
                log_level: Some("staybook_ui=debug".to_string()),
            },
        );
        assert_eq!(config.api_base_url, "http://localhost:8001/api");
        assert_eq!(config.auth_provider_url, DEFAULT_AUTH_PROVIDER_URL);
        assert_eq!(config.log_level, "staybook_ui=debug");
    }

    #[test]
    fn login_url_encodes_dashboard_redirect() {
        let config = ClientConfig::resolve("https://staybook.example", ConfigOverrides::default());
        assert_eq!(
            config.login_url(),
            "https://auth.emergentagent.com/?redirect=https%3A%2F%2Fstaybook.example%2Fdashboard"
        );
    }
}
