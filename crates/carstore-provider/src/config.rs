//! Provider configuration handshake and the shared configuration holder.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use url::Url;

use carstore_core::{Attribute, Diagnostics, Schema};

/// Declarative schema for provider-level configuration: one required
/// `base_url` string.
pub fn provider_schema() -> Schema {
    Schema::new().with_attribute("base_url", Attribute::required_string())
}

/// Provider-level configuration as supplied by the host during the
/// configuration handshake.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    /// Base URL of the carstore API. Required; there is no default.
    pub base_url: String,
}

/// Resolved provider state: the validated base URL plus the HTTP handle
/// shared by every resource the provider serves.
///
/// Built once by [`ProviderHandle::configure`] and never mutated afterwards.
/// Resources hold an [`Arc`] to it, so any number of in-flight lifecycle
/// calls may use the handle concurrently.
#[derive(Debug)]
pub struct ProviderHandle {
    base_url: Url,
    http: reqwest::Client,
}

impl ProviderHandle {
    /// Runs the configuration handshake on a raw configuration value.
    ///
    /// The value is validated against [`provider_schema`] and decoded. The
    /// handshake fails with the collected diagnostics before any resource
    /// can be constructed, so no resource ever observes a missing or
    /// malformed base URL.
    pub fn configure(config: &Value) -> Result<Arc<Self>, Diagnostics> {
        let mut diagnostics = provider_schema().validate(config);
        if diagnostics.has_errors() {
            return Err(diagnostics);
        }

        let config: ProviderConfig = match serde_json::from_value(config.clone()) {
            Ok(config) => config,
            Err(e) => {
                diagnostics.add_error(
                    "Invalid provider configuration",
                    format!("Could not decode configuration: {e}"),
                );
                return Err(diagnostics);
            }
        };

        Self::from_config(&config)
    }

    /// Builds a handle from an already decoded configuration.
    pub fn from_config(config: &ProviderConfig) -> Result<Arc<Self>, Diagnostics> {
        let mut diagnostics = Diagnostics::new();

        let trimmed = config.base_url.trim();
        if trimmed.is_empty() {
            diagnostics.add_error("Invalid provider configuration", "base_url must not be empty");
            return Err(diagnostics);
        }

        let base_url = match Url::parse(trimmed) {
            Ok(url) => url,
            Err(e) => {
                diagnostics.add_error(
                    "Invalid provider configuration",
                    format!("base_url \"{trimmed}\" is not a valid URL: {e}"),
                );
                return Err(diagnostics);
            }
        };

        if base_url.scheme() != "http" && base_url.scheme() != "https" {
            diagnostics.add_error(
                "Invalid provider configuration",
                format!("base_url must use http or https, got \"{}\"", base_url.scheme()),
            );
            return Err(diagnostics);
        }

        let http = match reqwest::Client::builder()
            .timeout(carstore_client::DEFAULT_TIMEOUT)
            .build()
        {
            Ok(http) => http,
            Err(e) => {
                diagnostics.add_error(
                    "Failed to configure provider",
                    format!("Could not create HTTP client: {e}"),
                );
                return Err(diagnostics);
            }
        };

        tracing::debug!("Configured carstore provider with base URL {}", base_url);
        Ok(Arc::new(Self { base_url, http }))
    }

    /// The resolved API base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The shared HTTP handle. Applies the provider-wide request timeout
    /// and is safe for concurrent use.
    pub fn http_client(&self) -> &reqwest::Client {
        &self.http
    }
}
