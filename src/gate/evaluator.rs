//! Access decision for the debug entry point.
//!
//! Guards run in a fixed order and the first failing one decides:
//! 1. security disabled → allow
//! 2. `Client-IP` header present and not allowed → deny
//! 3. `X-Forwarded-For` header present and not allowed → deny
//! 4. remote address unknown or not allow-listed → deny
//! 5. serving mode disallowed → deny
//! 6. allow

use std::fmt;

use crate::config::Settings;
use crate::gate::context::RequestContext;

/// Fixed body of the denial response.
pub const FORBIDDEN_MESSAGE: &str =
    "You are not allowed to access this file. Check app_dev.php for more information.";

/// Fixed status line of the denial response.
pub const FORBIDDEN_STATUS_LINE: &str = "HTTP/1.0 403 Forbidden";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllowReason {
    SecurityDisabled,
    Trusted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    ClientIpHeader,
    ForwardedForHeader,
    MissingRemoteAddr,
    RemoteAddrNotAllowed,
    DisallowedSapi,
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            DenyReason::ClientIpHeader => "client-ip header not allowed",
            DenyReason::ForwardedForHeader => "x-forwarded-for header not allowed",
            DenyReason::MissingRemoteAddr => "remote address unknown",
            DenyReason::RemoteAddrNotAllowed => "remote address not allowed",
            DenyReason::DisallowedSapi => "serving mode not allowed",
        };
        f.write_str(reason)
    }
}

/// Outcome of a single check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Allowed(AllowReason),
    Denied(DenyReason),
}

impl Verdict {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Verdict::Allowed(_))
    }
}

/// Run the guard sequence and report which guard decided.
pub fn evaluate(settings: &Settings, request: &RequestContext) -> Verdict {
    if settings.security_disabled {
        return Verdict::Allowed(AllowReason::SecurityDisabled);
    }

    if request.has_client_ip_header && !settings.allow_http_client_ip {
        return Verdict::Denied(DenyReason::ClientIpHeader);
    }

    if request.has_x_forwarded_for_header && !settings.allow_http_x_forwarded_for {
        return Verdict::Denied(DenyReason::ForwardedForHeader);
    }

    match request.remote_addr.as_deref() {
        None => return Verdict::Denied(DenyReason::MissingRemoteAddr),
        Some(addr) if !settings.allowed_remote_addrs.contains(addr) => {
            return Verdict::Denied(DenyReason::RemoteAddrNotAllowed);
        }
        Some(_) => {}
    }

    if settings.disallowed_sapi_names.contains(&request.sapi_name) {
        return Verdict::Denied(DenyReason::DisallowedSapi);
    }

    Verdict::Allowed(AllowReason::Trusted)
}

pub fn is_accessible(settings: &Settings, request: &RequestContext) -> bool {
    evaluate(settings, request).is_allowed()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local(sapi: &str) -> RequestContext {
        RequestContext::new(sapi).with_remote_addr("127.0.0.1")
    }

    #[test]
    fn test_scenario_local_fpm_allowed() {
        let verdict = evaluate(&Settings::default(), &local("fpm-fcgi"));
        assert_eq!(verdict, Verdict::Allowed(AllowReason::Trusted));
    }

    #[test]
    fn test_scenario_foreign_addr_denied() {
        let ctx = RequestContext::new("fpm-fcgi").with_remote_addr("203.0.113.5");
        assert_eq!(
            evaluate(&Settings::default(), &ctx),
            Verdict::Denied(DenyReason::RemoteAddrNotAllowed)
        );
    }

    #[test]
    fn test_scenario_cli_server_denied() {
        assert_eq!(
            evaluate(&Settings::default(), &local("cli-server")),
            Verdict::Denied(DenyReason::DisallowedSapi)
        );
    }

    #[test]
    fn test_scenario_disabled_allows_anything() {
        let settings = Settings::disabled();
        let contexts = [
            RequestContext::new("cli-server"),
            RequestContext::new("cli-server")
                .with_remote_addr("203.0.113.5")
                .with_client_ip_header(true)
                .with_x_forwarded_for_header(true),
        ];
        for ctx in &contexts {
            assert_eq!(
                evaluate(&settings, ctx),
                Verdict::Allowed(AllowReason::SecurityDisabled)
            );
        }
    }

    #[test]
    fn test_scenario_client_ip_allowed() {
        let settings = Settings {
            allow_http_client_ip: true,
            ..Settings::default()
        };
        let ctx = RequestContext::new("fpm-fcgi")
            .with_remote_addr("::1")
            .with_client_ip_header(true);
        assert!(is_accessible(&settings, &ctx));
    }

    #[test]
    fn test_client_ip_header_denied_before_addr() {
        // Allow-listed address and mode do not rescue a forged header.
        let ctx = local("fpm-fcgi").with_client_ip_header(true);
        assert_eq!(
            evaluate(&Settings::default(), &ctx),
            Verdict::Denied(DenyReason::ClientIpHeader)
        );

        let ctx = RequestContext::new("cli-server").with_client_ip_header(true);
        assert_eq!(
            evaluate(&Settings::default(), &ctx),
            Verdict::Denied(DenyReason::ClientIpHeader)
        );
    }

    #[test]
    fn test_forwarded_for_header() {
        let ctx = local("fpm-fcgi").with_x_forwarded_for_header(true);
        assert_eq!(
            evaluate(&Settings::default(), &ctx),
            Verdict::Denied(DenyReason::ForwardedForHeader)
        );

        let settings = Settings {
            allow_http_x_forwarded_for: true,
            ..Settings::default()
        };
        assert!(is_accessible(&settings, &ctx));
    }

    #[test]
    fn test_client_ip_checked_before_forwarded_for() {
        let ctx = local("fpm-fcgi")
            .with_client_ip_header(true)
            .with_x_forwarded_for_header(true);
        assert_eq!(
            evaluate(&Settings::default(), &ctx),
            Verdict::Denied(DenyReason::ClientIpHeader)
        );
    }

    #[test]
    fn test_missing_remote_addr_denied() {
        assert_eq!(
            evaluate(&Settings::default(), &RequestContext::new("fpm-fcgi")),
            Verdict::Denied(DenyReason::MissingRemoteAddr)
        );
    }

    #[test]
    fn test_addr_match_is_exact() {
        for addr in ["127.0.0.2", " 127.0.0.1", "::0001", "localhost"] {
            let ctx = RequestContext::new("fpm-fcgi").with_remote_addr(addr);
            assert!(!is_accessible(&Settings::default(), &ctx), "{addr}");
        }
        for addr in ["fe80::1", "::1"] {
            let ctx = RequestContext::new("fpm-fcgi").with_remote_addr(addr);
            assert!(is_accessible(&Settings::default(), &ctx), "{addr}");
        }
    }

    #[test]
    fn test_custom_disallowed_sapis() {
        let settings = Settings {
            disallowed_sapi_names: ["embed".to_string()].into_iter().collect(),
            ..Settings::default()
        };
        assert!(is_accessible(&settings, &local("cli-server")));
        assert!(!is_accessible(&settings, &local("embed")));
    }

    #[test]
    fn test_deny_reason_display() {
        assert_eq!(DenyReason::DisallowedSapi.to_string(), "serving mode not allowed");
    }
}
