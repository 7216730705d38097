use super::{
    notation::LinkNotation,
    types::{Link, LinkError},
    url::LinkUrl,
};

/// Parses a single `((URL label))` token.
///
/// The whole of `text` must be the token: it has to start with `((`, end
/// with `))` and hold something other than whitespace in between, or
/// [`LinkError::NotALink`] is returned. A URL that fails to parse yields
/// [`LinkError::MalformedUrl`].
///
/// # Label derivation
/// 1. The text after the first whitespace, trimmed, if any.
/// 2. The URL's host as written (sans port) followed by its decoded path.
/// 3. The full normalized URL.
pub fn parse_link(text: &str) -> Result<Link, LinkError> {
    if text.len() <= LinkNotation::OPEN.len() + LinkNotation::CLOSE.len() {
        return Err(LinkError::NotALink);
    }

    let interior = text
        .strip_prefix(LinkNotation::OPEN)
        .and_then(|rest| rest.strip_suffix(LinkNotation::CLOSE))
        .ok_or(LinkError::NotALink)?
        .trim_matches(LinkNotation::WHITESPACE);
    if interior.is_empty() {
        return Err(LinkError::NotALink);
    }

    let (token, label) = interior
        .split_once(|c| LinkNotation::WHITESPACE.contains(&c))
        .unwrap_or((interior, ""));

    let url = LinkUrl::parse(token.trim_matches(LinkNotation::WHITESPACE))?;
    let label = derive_label(&url, label.trim_matches(LinkNotation::WHITESPACE));

    Ok(Link { url, label })
}

fn derive_label(url: &LinkUrl, explicit: &str) -> String {
    if !explicit.is_empty() {
        return explicit.to_string();
    }

    let host_path = format!(
        "{}{}",
        url.written_host().unwrap_or_default(),
        url.decoded_path()
    );
    if !host_path.is_empty() {
        return host_path;
    }

    url.to_string()
}
