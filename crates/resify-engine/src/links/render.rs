use serde::Serialize;

use super::types::{Link, LinkError};

/// Name of the template used to render every link.
pub const LINK_TEMPLATE: &str = "link";

/// Renders a named template with arbitrary serializable data.
///
/// Escaping is the implementor's business: it knows the output context of
/// its own templates, so callers take the result as-is.
pub trait RenderTemplate {
    fn render_template<S: Serialize + ?Sized>(
        &self,
        name: &str,
        data: &S,
    ) -> Result<String, RenderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error(transparent)]
    Template(#[from] minijinja::Error),
    #[error("template {0:?} is not defined")]
    Undefined(String),
}

/// Renders `link` through the [`LINK_TEMPLATE`] template.
///
/// On failure the error carries the link's label, which callers substitute
/// for the rendered output.
pub fn render_link<R: RenderTemplate + ?Sized>(link: &Link, renderer: &R) -> Result<String, LinkError> {
    renderer
        .render_template(LINK_TEMPLATE, link)
        .map_err(|source| LinkError::RenderFailed {
            label: link.label.clone(),
            source,
        })
}
