use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use regex::{Captures, Regex};
use sha2::{Digest, Sha256};

use super::{
    notation::LinkNotation,
    parser::parse_link,
    render::{RenderTemplate, render_link},
    types::LinkError,
};

/// Escape function for text output.
pub fn escape_none(s: &str) -> String {
    s.to_string()
}

/// Escape function for HTML output. Escapes `&`, `<`, `>`, `"` and `'` only.
pub fn escape_html(s: &str) -> String {
    html_escape::encode_quoted_attribute(s).into_owned()
}

fn link_pattern() -> &'static Regex {
    static LINK_PATTERN: OnceLock<Regex> = OnceLock::new();
    LINK_PATTERN.get_or_init(|| Regex::new(r"\(\(.+?\)\)").expect("Invalid link regex"))
}

/// Content-derived stand-in for a link while the surrounding text is escaped.
///
/// Only hex digits and the sentinel, so no escaper alters it.
pub fn placeholder(raw: &str) -> String {
    let digest = Sha256::digest(raw.as_bytes());
    let sentinel = LinkNotation::PLACEHOLDER_SENTINEL;
    format!("{sentinel}{}{sentinel}", hex::encode(digest))
}

/// Rendered links keyed by placeholder, for one linkify pass.
#[derive(Debug, Default)]
struct PlaceholderMap {
    rendered: HashMap<String, String>,
}

impl PlaceholderMap {
    fn get_or_render(&mut self, raw: &str, render: impl FnOnce() -> String) -> String {
        let id = placeholder(raw);
        self.rendered.entry(id.clone()).or_insert_with(render);
        id
    }

    fn restore(&self, mut escaped: String) -> String {
        for (id, link) in &self.rendered {
            escaped = escaped.replace(id.as_str(), link);
        }
        escaped
    }
}

/// Replaces every `((URL label))` in `text` with the output of the `link`
/// template, escaping everything else with `escape`.
///
/// Rendered links are not passed through `escape`; they are the template's
/// output and already suit the output context. Each distinct token is
/// rendered once, however often it occurs.
///
/// Tokens that aren't links or whose URL is malformed stay in the text as
/// written and are escaped like the rest of it. Links that fail to render
/// are replaced by their escaped label.
pub fn linkify<R, E>(text: &str, renderer: &R, escape: E) -> String
where
    R: RenderTemplate + ?Sized,
    E: Fn(&str) -> String,
{
    let mut placeholders = PlaceholderMap::default();
    let mut unparsed: HashSet<String> = HashSet::new();

    let masked = link_pattern().replace_all(text, |caps: &Captures<'_>| {
        let raw = &caps[0];
        if unparsed.contains(raw) {
            return raw.to_string();
        }

        match parse_link(raw) {
            Ok(link) => placeholders.get_or_render(raw, || match render_link(&link, renderer) {
                Ok(rendered) => rendered,
                Err(err) => {
                    log::warn!("{err}");
                    escape(link.label.as_str())
                }
            }),
            Err(err) => {
                if let LinkError::MalformedUrl { .. } = err {
                    log::warn!("error parsing link {raw:?}: {err}");
                }
                unparsed.insert(raw.to_string());
                raw.to_string()
            }
        }
    });

    placeholders.restore(escape(masked.as_ref()))
}
