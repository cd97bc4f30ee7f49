//! Origin normalization for user-entered domains
//!
//! Raw input like `Example.com/pricing` becomes the origin
//! `http://example.com`. Input that cannot be parsed is kept in a trimmed,
//! lower-cased form instead of being rejected.

use std::borrow::Cow;

use url::{Origin, Url};

/// Result of sanitizing one raw domain string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sanitized {
    /// Parsed as a URL; holds `scheme://host[:port]`
    Origin(String),
    /// Parse failed; holds the trimmed, lower-cased input
    Fallback(String),
}

impl Sanitized {
    /// Normalized value regardless of how it was produced
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Origin(s) | Self::Fallback(s) => s,
        }
    }

    /// Consume into the normalized value
    #[inline]
    #[must_use]
    pub fn into_string(self) -> String {
        match self {
            Self::Origin(s) | Self::Fallback(s) => s,
        }
    }

    /// Check if the value came from the fallback path
    #[inline]
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }
}

/// Normalize raw input to an origin, reporting which path produced it
///
/// Input without an `http://` or `https://` prefix (case-insensitive) is
/// parsed as `http://<input>`. Path, query, fragment and default ports are
/// discarded; the host is lower-cased.
#[must_use]
pub fn sanitize_detailed(raw: &str) -> Sanitized {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Sanitized::Fallback(String::new());
    }

    let candidate = if has_web_scheme(trimmed) {
        Cow::Borrowed(trimmed)
    } else {
        Cow::Owned(format!("http://{trimmed}"))
    };

    match Url::parse(&candidate) {
        Ok(url) => match url.origin() {
            origin @ Origin::Tuple(..) => Sanitized::Origin(origin.ascii_serialization()),
            Origin::Opaque(_) => Sanitized::Fallback(trimmed.to_lowercase()),
        },
        Err(error) => {
            tracing::debug!(raw = trimmed, "domain did not parse as url: {}", error);
            Sanitized::Fallback(trimmed.to_lowercase())
        }
    }
}

/// Normalize raw input to an origin string
///
/// # Examples
/// ```
/// # use chatlab_domains::sanitize;
/// assert_eq!(sanitize("example.com"), "http://example.com");
/// assert_eq!(sanitize("https://Example.com/path?q=1"), "https://example.com");
/// ```
#[inline]
#[must_use]
pub fn sanitize(raw: &str) -> String {
    sanitize_detailed(raw).into_string()
}

/// Host part of an origin for display, scheme removed
#[must_use]
pub fn display_host(origin: &str) -> &str {
    origin
        .strip_prefix("https://")
        .or_else(|| origin.strip_prefix("http://"))
        .unwrap_or(origin)
}

fn has_web_scheme(value: &str) -> bool {
    ["http://", "https://"].iter().any(|scheme| {
        value
            .get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn bare_host_gets_http() {
        assert_eq!(sanitize("example.com"), "http://example.com");
    }

    #[test]
    fn path_and_query_are_stripped() {
        assert_eq!(sanitize("https://Example.com/path?q=1"), "https://example.com");
        assert_eq!(sanitize("example.com/a/b#frag"), "http://example.com");
    }

    #[test]
    fn scheme_prefix_is_case_insensitive() {
        assert_eq!(sanitize("HTTPS://Example.COM"), "https://example.com");
        assert_eq!(sanitize("Http://Example.com"), "http://example.com");
    }

    #[test]
    fn explicit_port_is_kept_default_port_elided() {
        assert_eq!(sanitize("localhost:3000"), "http://localhost:3000");
        assert_eq!(sanitize("https://example.com:443/x"), "https://example.com");
        assert_eq!(sanitize("https://example.com:8443"), "https://example.com:8443");
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert_eq!(sanitize("  example.com  "), "http://example.com");
    }

    #[test]
    fn empty_input_is_empty() {
        assert_eq!(sanitize(""), "");
        assert_eq!(sanitize("   "), "");
    }

    #[test]
    fn unparseable_input_falls_back_to_lowercase() {
        let result = sanitize_detailed("  Bad Host.COM ");
        assert!(result.is_fallback());
        assert_eq!(result.as_str(), "bad host.com");
    }

    #[test]
    fn parsed_input_is_not_fallback() {
        assert!(!sanitize_detailed("example.com").is_fallback());
    }

    #[test]
    fn display_host_strips_scheme() {
        assert_eq!(display_host("https://example.com"), "example.com");
        assert_eq!(display_host("http://localhost:3000"), "localhost:3000");
        assert_eq!(display_host("bad host.com"), "bad host.com");
    }

    proptest! {
        #[test]
        fn prop_sanitize_is_idempotent_on_origins(
            host in "[a-z][a-z0-9]{0,10}(\\.[a-z]{2,5}){1,2}",
            https in any::<bool>(),
        ) {
            let scheme = if https { "https" } else { "http" };
            let once = sanitize(&format!("{scheme}://{host}/some/path"));
            prop_assert_eq!(&once, &format!("{scheme}://{host}"));
            prop_assert_eq!(sanitize(&once), once);
        }

        #[test]
        fn prop_bare_host_uppercase_normalizes(host in "[a-z][a-z0-9]{0,10}\\.[a-z]{2,5}") {
            prop_assert_eq!(sanitize(&host.to_uppercase()), format!("http://{host}"));
        }
    }
}
