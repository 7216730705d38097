pub mod dates;
pub mod io;
pub mod links;
pub mod models;
mod scalar;
pub mod templates;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use dates::{DateError, DateLayout, DateRange, Moment};
pub use io::*;
pub use links::{Link, LinkError, RenderError, RenderTemplate, linkify, parse_link};
pub use models::*;
pub use templates::{OutputMode, TemplateError, TemplateSet};
