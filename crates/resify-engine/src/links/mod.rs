//! # Inline Links
//!
//! Free-text fields may embed links as `((URL label))`. Each token is parsed
//! into a [`Link`], rendered through the user's `link` template and spliced
//! back into the escaped text by [`linkify`].
//!
//! - **`notation`**: delimiter constants, kept out of parser code
//! - **`url`**: absolute URLs and relative references
//! - **`parser`**: one token to one [`Link`]
//! - **`render`**: the [`RenderTemplate`] seam and [`render_link`]
//! - **`linkify`**: placeholder masking, escaping and substitution

pub mod linkify;
pub mod notation;
pub mod parser;
pub mod render;
pub mod types;
pub mod url;

pub use linkify::{escape_html, escape_none, linkify, placeholder};
pub use notation::LinkNotation;
pub use parser::parse_link;
pub use render::{LINK_TEMPLATE, RenderError, RenderTemplate, render_link};
pub use types::{Link, LinkError};
pub use url::LinkUrl;
