use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tempfile::TempDir;

use crate::links::{RenderError, RenderTemplate};

/// Create a temporary data directory for templates and embedded files
pub fn create_test_data_dir() -> TempDir {
    tempfile::tempdir().unwrap()
}

/// Create a test file with content
pub fn create_test_file(data_dir: &TempDir, filename: &str, content: &str) -> PathBuf {
    let file_path = data_dir.path().join(filename);
    fs::write(&file_path, content).unwrap();
    file_path
}

/// The fields of a link as a template sees them.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LinkData {
    pub url: String,
    pub label: String,
    pub scheme: Option<String>,
    pub host: Option<String>,
    pub path: String,
}

type LinkTemplate = Box<dyn Fn(&LinkData) -> String>;

/// A renderer that records which templates were asked for.
///
/// Renders links with a closure instead of a real template engine, or fails
/// every call when built with [`FakeRenderer::failing`].
pub struct FakeRenderer {
    calls: RefCell<Vec<String>>,
    template: Option<LinkTemplate>,
}

impl FakeRenderer {
    pub fn new() -> Self {
        Self::with_template(|link| format!(r#"<a href="{}">{}</a>"#, link.url, link.label))
    }

    pub fn with_template(template: impl Fn(&LinkData) -> String + 'static) -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            template: Some(Box::new(template)),
        }
    }

    pub fn failing() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            template: None,
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl RenderTemplate for FakeRenderer {
    fn render_template<S: Serialize + ?Sized>(
        &self,
        name: &str,
        data: &S,
    ) -> Result<String, RenderError> {
        self.calls.borrow_mut().push(name.to_string());

        let Some(template) = &self.template else {
            return Err(RenderError::Undefined(name.to_string()));
        };
        let value = serde_yaml::to_value(data).unwrap();
        let link: LinkData = serde_yaml::from_value(value).unwrap();
        Ok(template(&link))
    }
}
