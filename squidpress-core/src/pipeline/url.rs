//! Permissive URL decomposition for domain extraction.

use once_cell::sync::Lazy;
use regex::Regex;

// Anchored pattern with optional scheme, userinfo, port and path around a
// required domain. Group order matters: userinfo must be consumed before the
// domain so `user@host` never yields `user` as the domain.
static URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:(?P<proto>[^:\s]+)://)?(?:(?P<user>[^:@\s]+)(?::(?P<pass>[^@\s]+))?@)?(?P<domain>[^:/\s]+)(?::(?P<port>[0-9]+))?(?P<request>/.*)?$",
    )
    .unwrap()
});

/// Extracts the domain from a URL-like token.
///
/// Returns `None` when the token does not look like a URL at all (empty,
/// or containing whitespace). Callers treat that as an empty domain rather
/// than an error - the fallback is deliberately lossy.
pub fn extract_domain(url: &str) -> Option<&str> {
    URL_RE
        .captures(url)
        .and_then(|caps| caps.name("domain"))
        .map(|m| m.as_str())
}
