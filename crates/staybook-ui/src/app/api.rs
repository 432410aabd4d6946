//! API client context for sharing a singleton client instance.
//!
//! # Design
//! - Create exactly one API client per app boot.
//! - The bearer token changes through interior mutability, never by rebuilding the client.
//! - The resolved configuration travels with the client so views need one context.

use crate::core::config::ClientConfig;
use crate::services::api::ApiClient;
use std::rc::Rc;

/// Shared API client context for UI services.
#[derive(Clone)]
pub(crate) struct ApiCtx {
    /// Singleton API client instance.
    pub client: Rc<ApiClient>,
    /// Boot-time configuration.
    pub config: Rc<ClientConfig>,
}

impl ApiCtx {
    /// Create a new context from the resolved configuration.
    pub(crate) fn new(config: ClientConfig) -> Self {
        Self {
            client: Rc::new(ApiClient::new(config.api_base_url.clone())),
            config: Rc::new(config),
        }
    }
}

impl PartialEq for ApiCtx {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.client, &other.client)
    }
}
