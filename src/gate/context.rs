//! Per-request snapshot of the signals the gate inspects.

use std::net::{IpAddr, SocketAddr};

use axum::http::HeaderMap;

/// Request header set by proxies that forward the caller address.
pub const CLIENT_IP_HEADER: &str = "client-ip";

/// Standard forwarding header.
pub const X_FORWARDED_FOR_HEADER: &str = "x-forwarded-for";

/// Environment variable naming the serving mode for [`RequestContext::from_env`].
pub const SAPI_ENV_VAR: &str = "DEV_GATE_SAPI";

/// Serving mode reported for a process started from a shell.
pub const DEFAULT_ENV_SAPI: &str = "cli";

/// Read-only view of a single request, built by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub has_client_ip_header: bool,
    pub has_x_forwarded_for_header: bool,
    /// Caller address; `None` when unknown.
    pub remote_addr: Option<String>,
    /// Identifier of the interface serving the request (e.g. `cli-server`).
    pub sapi_name: String,
}

impl RequestContext {
    /// Context with no proxy headers and no remote address.
    pub fn new(sapi_name: impl Into<String>) -> Self {
        Self {
            has_client_ip_header: false,
            has_x_forwarded_for_header: false,
            remote_addr: None,
            sapi_name: sapi_name.into(),
        }
    }

    pub fn with_remote_addr(mut self, addr: impl Into<String>) -> Self {
        self.remote_addr = Some(addr.into());
        self
    }

    pub fn with_client_ip_header(mut self, present: bool) -> Self {
        self.has_client_ip_header = present;
        self
    }

    pub fn with_x_forwarded_for_header(mut self, present: bool) -> Self {
        self.has_x_forwarded_for_header = present;
        self
    }

    /// Build from CGI-style process environment variables.
    pub fn from_env() -> Self {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup.
    ///
    /// Reads `REMOTE_ADDR`, the presence of `HTTP_CLIENT_IP` and
    /// `HTTP_X_FORWARDED_FOR`, and the serving mode from `DEV_GATE_SAPI`.
    pub fn from_env_with<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            has_client_ip_header: lookup("HTTP_CLIENT_IP").is_some(),
            has_x_forwarded_for_header: lookup("HTTP_X_FORWARDED_FOR").is_some(),
            remote_addr: lookup("REMOTE_ADDR").filter(|addr| !addr.is_empty()),
            sapi_name: lookup(SAPI_ENV_VAR).unwrap_or_else(|| DEFAULT_ENV_SAPI.to_string()),
        }
    }

    /// Build from HTTP request headers and the peer socket address.
    ///
    /// Only the peer IP is kept; IPv4-mapped IPv6 peers are reported as IPv4.
    pub fn from_parts(
        headers: &HeaderMap,
        peer: Option<SocketAddr>,
        sapi_name: impl Into<String>,
    ) -> Self {
        Self {
            has_client_ip_header: headers.contains_key(CLIENT_IP_HEADER),
            has_x_forwarded_for_header: headers.contains_key(X_FORWARDED_FOR_HEADER),
            remote_addr: peer.map(|addr| canonical_ip(addr.ip()).to_string()),
            sapi_name: sapi_name.into(),
        }
    }
}

fn canonical_ip(ip: IpAddr) -> IpAddr {
    match ip {
        IpAddr::V6(v6) => v6
            .to_ipv4_mapped()
            .map(IpAddr::V4)
            .unwrap_or(IpAddr::V6(v6)),
        v4 => v4,
    }
}
