use std::fmt;

use url::Url;

use super::LinkError;

/// The target of a link: an absolute URL or a relative reference.
///
/// Absolute URLs are validated and normalized by [`url::Url`]. Relative
/// references (`/about`, `//host/path`, `page#top`) cannot be represented by
/// `Url` without a base, so they are kept as written after the same syntax
/// checks.
///
/// Alongside the normalized parts, the host as written and the decoded path
/// are kept for showing the URL to people.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkUrl {
    href: String,
    scheme: Option<String>,
    host: Option<String>,
    path: String,
    query: Option<String>,
    fragment: Option<String>,
    written_host: Option<String>,
    decoded_path: String,
}

impl LinkUrl {
    pub fn parse(token: &str) -> Result<Self, LinkError> {
        let parts = Reference::split(token);
        check_escapes(token, parts.path)?;
        if let Some(fragment) = parts.fragment {
            check_escapes(token, fragment)?;
        }
        if let Some(authority) = parts.authority {
            // Userinfo may carry escapes, the host may not.
            let host = authority.rsplit('@').next().unwrap_or(authority);
            if host.contains('%') {
                return Err(malformed(token, "percent-escape in host"));
            }
        }

        match Url::parse(token) {
            Ok(url) => Ok(Self::from_absolute(&url, &parts)),
            Err(url::ParseError::RelativeUrlWithoutBase) => Ok(Self::from_relative(token, &parts)),
            Err(e) => Err(malformed(token, &e.to_string())),
        }
    }

    fn from_absolute(url: &Url, parts: &Reference<'_>) -> Self {
        // Opaque URLs (mailto:, tel:) have no meaningful path, and an
        // authority-only URL gets "/" from normalization.
        let opaque = url.cannot_be_a_base();
        let path = if opaque || parts.path.is_empty() {
            String::new()
        } else {
            url.path().to_string()
        };

        Self {
            href: url.as_str().to_string(),
            scheme: Some(url.scheme().to_string()),
            host: url.host_str().map(str::to_string),
            path,
            query: url.query().map(str::to_string),
            fragment: url.fragment().map(str::to_string),
            written_host: parts.written_host(),
            decoded_path: if opaque {
                String::new()
            } else {
                decode(parts.path)
            },
        }
    }

    fn from_relative(token: &str, parts: &Reference<'_>) -> Self {
        Self {
            href: token.to_string(),
            scheme: None,
            host: parts.written_host(),
            path: parts.path.to_string(),
            query: parts.query.map(str::to_string),
            fragment: parts.fragment.map(str::to_string),
            written_host: parts.written_host(),
            decoded_path: decode(parts.path),
        }
    }

    /// The normalized URL string.
    pub fn as_str(&self) -> &str {
        &self.href
    }

    pub fn scheme(&self) -> Option<&str> {
        self.scheme.as_deref()
    }

    /// Host without port.
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    pub fn is_relative(&self) -> bool {
        self.scheme.is_none()
    }

    /// Host as it appeared in the link, without userinfo or port.
    pub fn written_host(&self) -> Option<&str> {
        self.written_host.as_deref()
    }

    /// Path with percent-escapes decoded and dot-segments left in place.
    pub fn decoded_path(&self) -> &str {
        &self.decoded_path
    }
}

impl fmt::Display for LinkUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.href)
    }
}

/// A URI reference split into its raw components (RFC 3986, appendix B).
#[derive(Debug, Default, PartialEq)]
struct Reference<'a> {
    scheme: Option<&'a str>,
    authority: Option<&'a str>,
    path: &'a str,
    query: Option<&'a str>,
    fragment: Option<&'a str>,
}

impl<'a> Reference<'a> {
    fn split(s: &'a str) -> Self {
        let mut parts = Reference::default();

        let (rest, fragment) = match s.split_once('#') {
            Some((rest, fragment)) => (rest, Some(fragment)),
            None => (s, None),
        };
        parts.fragment = fragment;

        let (mut rest, query) = match rest.split_once('?') {
            Some((rest, query)) => (rest, Some(query)),
            None => (rest, None),
        };
        parts.query = query;

        if let Some((scheme, after)) = rest.split_once(':')
            && is_scheme(scheme)
        {
            parts.scheme = Some(scheme);
            rest = after;
        }

        if let Some(after) = rest.strip_prefix("//") {
            let end = after.find('/').unwrap_or(after.len());
            parts.authority = Some(&after[..end]);
            rest = &after[end..];
        }

        parts.path = rest;
        parts
    }

    fn written_host(&self) -> Option<String> {
        self.authority.map(|authority| {
            let host_port = authority.rsplit('@').next().unwrap_or(authority);
            strip_port(host_port).to_string()
        })
    }
}

/// Invalid UTF-8 in the decoded bytes becomes U+FFFD.
fn decode(path: &str) -> String {
    String::from_utf8_lossy(&urlencoding::decode_binary(path.as_bytes())).into_owned()
}

fn is_scheme(s: &str) -> bool {
    let mut chars = s.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

fn strip_port(host_port: &str) -> &str {
    if host_port.starts_with('[') {
        // IPv6 literal
        return match host_port.find(']') {
            Some(end) => &host_port[..=end],
            None => host_port,
        };
    }
    match host_port.rsplit_once(':') {
        Some((host, port)) if port.chars().all(|c| c.is_ascii_digit()) => host,
        _ => host_port,
    }
}

/// Every `%` must introduce two hex digits.
fn check_escapes(token: &str, s: &str) -> Result<(), LinkError> {
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let valid = bytes.len() > i + 2
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit();
            if !valid {
                let end = (i + 3).min(bytes.len());
                let escape = String::from_utf8_lossy(&bytes[i..end]);
                return Err(malformed(token, &format!("invalid URL escape {escape:?}")));
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    Ok(())
}

fn malformed(token: &str, reason: &str) -> LinkError {
    LinkError::MalformedUrl {
        url: token.to_string(),
        reason: reason.to_string(),
    }
}
