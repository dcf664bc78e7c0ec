//! Request host interpretation for tenant routing.
//!
//! Turns a raw `Host` header (or `domain` query parameter) into the lookup a
//! resolver should perform. Nothing here touches the database: hosts that can
//! never match a store are rejected up front.

use std::net::IpAddr;

use super::subdomain::Subdomain;

/// Rules for mapping hosts onto stores.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostRules {
    /// Platform domain whose first-level labels are store subdomains,
    /// e.g. `orbit360.com` for `toys.orbit360.com`.
    pub base_domain: Option<String>,
    /// Store served for `localhost`, IP literals and the bare base domain.
    pub default_subdomain: Option<Subdomain>,
}

impl HostRules {
    /// Create rules from an optional base domain and default subdomain.
    ///
    /// The base domain is normalized the same way request hosts are.
    #[must_use]
    pub fn new(base_domain: Option<&str>, default_subdomain: Option<Subdomain>) -> Self {
        Self {
            base_domain: base_domain.and_then(normalize_host),
            default_subdomain,
        }
    }
}

/// What a resolver should look up for a given host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TenantTarget {
    /// Look up the store by subdomain.
    Subdomain(Subdomain),
    /// Look up the store by custom domain, then by the host's first label.
    CustomDomain {
        /// Normalized host name.
        domain: String,
        /// First label of the host, when it is a valid subdomain.
        fallback: Option<Subdomain>,
    },
    /// The host can never match a store.
    Unroutable,
}

/// Normalize a raw host: strip the port, brackets and trailing dot, lowercase.
///
/// Returns `None` for an empty host.
///
/// ```
/// use orbit_core::normalize_host;
///
/// assert_eq!(normalize_host("Toys.Orbit360.com:3000").as_deref(), Some("toys.orbit360.com"));
/// assert_eq!(normalize_host("[::1]:8080").as_deref(), Some("::1"));
/// assert_eq!(normalize_host("  "), None);
/// ```
#[must_use]
pub fn normalize_host(raw: &str) -> Option<String> {
    let raw = raw.trim();

    let host = if let Some(rest) = raw.strip_prefix('[') {
        // Bracketed IPv6 literal, optionally followed by a port
        rest.split(']').next().unwrap_or_default()
    } else if raw.matches(':').count() == 1 {
        raw.split(':').next().unwrap_or_default()
    } else {
        // No port, or a bare IPv6 literal
        raw
    };

    let host = host.trim_end_matches('.').to_ascii_lowercase();
    if host.is_empty() { None } else { Some(host) }
}

/// Classify a raw host into the lookup that resolves its store.
///
/// Order of precedence:
/// 1. `localhost` and IP literals use the default subdomain.
/// 2. `<label>.localhost` uses `<label>`.
/// 3. The bare base domain (or `www.` + base domain) uses the default subdomain.
/// 4. `<label>.<base domain>` uses the first label.
/// 5. Anything else is a custom domain, with the first label as a fallback.
#[must_use]
pub fn classify_host(raw: &str, rules: &HostRules) -> TenantTarget {
    let Some(host) = normalize_host(raw) else {
        return TenantTarget::Unroutable;
    };

    if host == "localhost" || host.parse::<IpAddr>().is_ok() {
        return default_target(rules);
    }

    if let Some(prefix) = host.strip_suffix(".localhost") {
        return subdomain_target(first_label(prefix));
    }

    if let Some(base) = rules.base_domain.as_deref() {
        if host == base || host.strip_prefix("www.") == Some(base) {
            return default_target(rules);
        }

        if let Some(prefix) = host
            .strip_suffix(base)
            .and_then(|p| p.strip_suffix('.'))
        {
            return subdomain_target(first_label(prefix));
        }
    }

    let fallback = Subdomain::parse(first_label(&host)).ok();
    TenantTarget::CustomDomain {
        domain: host,
        fallback,
    }
}

fn first_label(host: &str) -> &str {
    host.split('.').next().unwrap_or_default()
}

fn subdomain_target(label: &str) -> TenantTarget {
    Subdomain::parse(label).map_or(TenantTarget::Unroutable, TenantTarget::Subdomain)
}

fn default_target(rules: &HostRules) -> TenantTarget {
    rules
        .default_subdomain
        .clone()
        .map_or(TenantTarget::Unroutable, TenantTarget::Subdomain)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn rules() -> HostRules {
        HostRules::new(Some("Orbit360.com"), Some(Subdomain::parse("demo").unwrap()))
    }

    fn sub(s: &str) -> TenantTarget {
        TenantTarget::Subdomain(Subdomain::parse(s).unwrap())
    }

    #[test]
    fn test_normalize_strips_port_and_case() {
        assert_eq!(
            normalize_host("TOYS.orbit360.com:443").as_deref(),
            Some("toys.orbit360.com")
        );
        assert_eq!(normalize_host("toys.orbit360.com.").as_deref(), Some("toys.orbit360.com"));
        assert_eq!(normalize_host("2001:db8::1").as_deref(), Some("2001:db8::1"));
        assert_eq!(normalize_host(""), None);
    }

    #[test]
    fn test_platform_subdomain() {
        assert_eq!(classify_host("toys.orbit360.com", &rules()), sub("toys"));
        assert_eq!(classify_host("Toys.Orbit360.com:3000", &rules()), sub("toys"));
        assert_eq!(classify_host("shop.toys.orbit360.com", &rules()), sub("shop"));
    }

    #[test]
    fn test_base_domain_uses_default() {
        assert_eq!(classify_host("orbit360.com", &rules()), sub("demo"));
        assert_eq!(classify_host("www.orbit360.com", &rules()), sub("demo"));
    }

    #[test]
    fn test_local_hosts_use_default() {
        assert_eq!(classify_host("localhost:3000", &rules()), sub("demo"));
        assert_eq!(classify_host("127.0.0.1:3000", &rules()), sub("demo"));
        assert_eq!(classify_host("[::1]:3000", &rules()), sub("demo"));
    }

    #[test]
    fn test_local_hosts_without_default_are_unroutable() {
        let rules = HostRules::new(Some("orbit360.com"), None);
        assert_eq!(classify_host("localhost", &rules), TenantTarget::Unroutable);
        assert_eq!(classify_host("10.0.0.7", &rules), TenantTarget::Unroutable);
        assert_eq!(classify_host("orbit360.com", &rules), TenantTarget::Unroutable);
    }

    #[test]
    fn test_localhost_subdomain() {
        assert_eq!(classify_host("toys.localhost:3000", &rules()), sub("toys"));
    }

    #[test]
    fn test_custom_domain_with_fallback() {
        assert_eq!(
            classify_host("shop.example.com", &rules()),
            TenantTarget::CustomDomain {
                domain: "shop.example.com".to_string(),
                fallback: Some(Subdomain::parse("shop").unwrap()),
            }
        );
    }

    #[test]
    fn test_custom_domain_without_valid_fallback() {
        assert_eq!(
            classify_host("my_shop.example.com", &HostRules::default()),
            TenantTarget::CustomDomain {
                domain: "my_shop.example.com".to_string(),
                fallback: None,
            }
        );
    }

    #[test]
    fn test_invalid_platform_label_is_unroutable() {
        assert_eq!(
            classify_host("-bad.orbit360.com", &rules()),
            TenantTarget::Unroutable
        );
        assert_eq!(classify_host("", &rules()), TenantTarget::Unroutable);
    }

    #[test]
    fn test_lookalike_base_domain_is_custom() {
        // `evilorbit360.com` must not be treated as under `orbit360.com`
        assert!(matches!(
            classify_host("evilorbit360.com", &rules()),
            TenantTarget::CustomDomain { .. }
        ));
    }
}
