//! # Application Configuration
//!
//! Configuration is loaded from environment variables with sensible defaults
//! and validated on startup to fail fast if misconfigured.

use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    /// Address the HTTP server binds to
    pub bind_address: String,

    /// Base URL of the upstream exchange API
    pub upstream_base_url: String,

    /// Domain the generic proxy endpoint is allowed to target
    pub upstream_host: String,

    /// Skip TLS certificate verification toward the upstream.
    ///
    /// The original deployment ran with verification disabled; here it is
    /// opt-in and off by default.
    pub insecure_upstream_tls: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let bind_address = env::var("PROXY_BIND_ADDRESS")
            .unwrap_or_else(|_| "127.0.0.1:3000".to_string());

        let upstream_base_url = env::var("UPSTREAM_BASE_URL")
            .unwrap_or_else(|_| "https://indodax.com".to_string());

        let upstream_host = env::var("UPSTREAM_HOST")
            .unwrap_or_else(|_| "indodax.com".to_string());

        let insecure_upstream_tls = env::var("UPSTREAM_INSECURE_TLS")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Ok(Self {
            bind_address,
            upstream_base_url,
            upstream_host,
            insecure_upstream_tls,
        })
    }

    pub fn validate(&self) -> Result<(), String> {
        if !self.upstream_base_url.starts_with("http://")
            && !self.upstream_base_url.starts_with("https://")
        {
            return Err("UPSTREAM_BASE_URL must start with http:// or https://".to_string());
        }

        if self.upstream_base_url.ends_with('/') {
            return Err("UPSTREAM_BASE_URL must not end with a trailing slash".to_string());
        }

        if self.upstream_host.is_empty() {
            return Err("UPSTREAM_HOST must not be empty".to_string());
        }

        if self.bind_address.parse::<std::net::SocketAddr>().is_err() {
            return Err(format!(
                "PROXY_BIND_ADDRESS is not a valid socket address: {}",
                self.bind_address
            ));
        }

        Ok(())
    }
}
