use serde::{Serialize, Serializer};

use super::{render::RenderError, url::LinkUrl};

/// A link parsed from `((URL label))` notation.
///
/// The label is never empty: when none is written it is derived from the
/// URL (see [`parse_link`](super::parse_link)).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub url: LinkUrl,
    pub label: String,
}

impl Link {
    pub fn url(&self) -> &LinkUrl {
        &self.url
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

/// Templates see a link as a flat mapping rather than a nested URL object.
#[derive(Serialize)]
struct LinkContext<'a> {
    url: &'a str,
    label: &'a str,
    scheme: Option<&'a str>,
    host: Option<&'a str>,
    path: &'a str,
    query: Option<&'a str>,
    fragment: Option<&'a str>,
}

impl Serialize for Link {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        LinkContext {
            url: self.url.as_str(),
            label: &self.label,
            scheme: self.url.scheme(),
            host: self.url.host(),
            path: self.url.path(),
            query: self.url.query(),
            fragment: self.url.fragment(),
        }
        .serialize(serializer)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    #[error("not a link")]
    NotALink,
    #[error("malformed URL {url:?}: {reason}")]
    MalformedUrl { url: String, reason: String },
    #[error("cannot render link {label:?}: {source}")]
    RenderFailed {
        label: String,
        #[source]
        source: RenderError,
    },
}
