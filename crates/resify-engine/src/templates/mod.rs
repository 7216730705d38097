//! Loading and rendering the user's `*.tem` templates.

mod helpers;

use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use minijinja::{AutoEscape, Environment, ErrorKind, Value};
use serde::Serialize;

use crate::links::{RenderError, RenderTemplate, escape_html, escape_none};

pub const TEMPLATE_EXTENSION: &str = "tem";

/// Whether templates produce plain text or HTML.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputMode {
    #[default]
    Html,
    Text,
}

impl OutputMode {
    /// The escape function applied to prose around links.
    pub fn escape(self) -> fn(&str) -> String {
        match self {
            OutputMode::Html => escape_html,
            OutputMode::Text => escape_none,
        }
    }

    fn auto_escape(self) -> AutoEscape {
        match self {
            OutputMode::Html => AutoEscape::Html,
            OutputMode::Text => AutoEscape::None,
        }
    }

    /// Wraps already-escaped output so auto-escaping leaves it alone.
    fn trust(self, s: String) -> Value {
        match self {
            OutputMode::Html => Value::from_safe_string(s),
            OutputMode::Text => Value::from(s),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("cannot read template directory {}: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot read template {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("no *.tem templates in {}", .0.display())]
    NoTemplates(PathBuf),
    #[error("cannot compile template {name:?}: {source}")]
    Compile {
        name: String,
        source: minijinja::Error,
    },
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Every template in a data directory, ready to render.
///
/// A template is reachable by its file name (`index.tem`) and, unless that
/// clashes with another file name, by its stem (`index`). Templates see the
/// helpers `embed`, `html`, `attr`, `css`, `js` and `linkify`.
pub struct TemplateSet {
    env: Environment<'static>,
    mode: OutputMode,
    data_dir: PathBuf,
}

impl TemplateSet {
    /// Loads every `*.tem` file directly under `data_dir`.
    pub fn load(data_dir: impl Into<PathBuf>, mode: OutputMode) -> Result<Self, TemplateError> {
        let data_dir = data_dir.into();
        let read_dir_error = |source| TemplateError::ReadDir {
            path: data_dir.clone(),
            source,
        };

        let mut sources = BTreeMap::new();
        for entry in fs::read_dir(&data_dir).map_err(read_dir_error)? {
            let path = entry.map_err(read_dir_error)?.path();
            if !path.is_file() || path.extension() != Some(OsStr::new(TEMPLATE_EXTENSION)) {
                continue;
            }
            let Some(name) = path.file_name().and_then(OsStr::to_str) else {
                log::warn!("skipping template with non-UTF-8 name: {}", path.display());
                continue;
            };

            let name = name.to_string();
            let source = fs::read_to_string(&path)
                .map_err(|source| TemplateError::Read { path, source })?;
            log::debug!("loaded template {name}");
            sources.insert(name, source);
        }

        if sources.is_empty() {
            return Err(TemplateError::NoTemplates(data_dir));
        }
        Self::from_sources(data_dir, mode, sources)
    }

    /// Builds a set from `(file name, source)` pairs; `embed` reads from `data_dir`.
    pub fn from_sources<I, N, S>(
        data_dir: impl Into<PathBuf>,
        mode: OutputMode,
        sources: I,
    ) -> Result<Self, TemplateError>
    where
        I: IntoIterator<Item = (N, S)>,
        N: Into<String>,
        S: Into<String>,
    {
        let data_dir = data_dir.into();
        let sources: BTreeMap<String, String> = sources
            .into_iter()
            .map(|(name, source)| (name.into(), source.into()))
            .collect();

        let mut env = Environment::new();
        env.set_auto_escape_callback(move |_| mode.auto_escape());
        helpers::register(&mut env, &data_dir, mode);

        for (name, source) in &sources {
            add_template(&mut env, name, source)?;
        }
        let suffix = format!(".{TEMPLATE_EXTENSION}");
        for (name, source) in &sources {
            if let Some(stem) = name.strip_suffix(&suffix)
                && !sources.contains_key(stem)
            {
                add_template(&mut env, stem, source)?;
            }
        }

        Ok(Self {
            env,
            mode,
            data_dir,
        })
    }

    pub fn render<S: Serialize + ?Sized>(
        &self,
        name: &str,
        data: &S,
    ) -> Result<String, TemplateError> {
        Ok(self.env.render_template(name, data)?)
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

fn add_template(
    env: &mut Environment<'static>,
    name: &str,
    source: &str,
) -> Result<(), TemplateError> {
    env.add_template_owned(name.to_string(), source.to_string())
        .map_err(|source| TemplateError::Compile {
            name: name.to_string(),
            source,
        })
}

impl RenderTemplate for Environment<'_> {
    fn render_template<S: Serialize + ?Sized>(
        &self,
        name: &str,
        data: &S,
    ) -> Result<String, RenderError> {
        let template = self.get_template(name).map_err(|err| match err.kind() {
            ErrorKind::TemplateNotFound => RenderError::Undefined(name.to_string()),
            _ => RenderError::Template(err),
        })?;
        Ok(template.render(data)?)
    }
}

impl RenderTemplate for TemplateSet {
    fn render_template<S: Serialize + ?Sized>(
        &self,
        name: &str,
        data: &S,
    ) -> Result<String, RenderError> {
        self.env.render_template(name, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{create_test_data_dir, create_test_file};
    use pretty_assertions::assert_eq;
    use serde_yaml::Value as Yaml;

    fn record(yaml: &str) -> Yaml {
        serde_yaml::from_str(yaml).unwrap()
    }

    fn set(mode: OutputMode, templates: &[(&str, &str)]) -> TemplateSet {
        TemplateSet::from_sources("", mode, templates.iter().copied()).unwrap()
    }

    #[test]
    fn text_mode_linkifies_without_escaping() {
        let templates = set(
            OutputMode::Text,
            &[
                ("index.tem", "{{ desc | linkify }}"),
                ("link.tem", "<{{ label }}>"),
            ],
        );
        let data = record("desc: Built systems & things. ((http://example.com/x?q#f))");

        let out = templates.render("index.tem", &data).unwrap();

        assert_eq!(out, "Built systems & things. <example.com/x>");
    }

    #[test]
    fn html_mode_escapes_prose_and_link_fields_once() {
        let templates = set(
            OutputMode::Html,
            &[
                ("index.tem", "<p>{{ desc | linkify }}</p>"),
                ("link.tem", "<a>{{ label }}</a>"),
            ],
        );
        let data = record("desc: Fish & ((http://a.com chips & dip))");

        let out = templates.render("index", &data).unwrap();

        assert_eq!(out, "<p>Fish &amp; <a>chips &amp; dip</a></p>");
    }

    #[test]
    fn html_mode_auto_escapes_plain_fields() {
        let templates = set(
            OutputMode::Html,
            &[("index.tem", "{{ desc }}|{{ desc | html }}|{{ attr(desc) }}")],
        );
        let out = templates.render("index", &record("desc: a < b")).unwrap();
        assert_eq!(out, "a &lt; b|a < b|a < b");
    }

    #[test]
    fn text_mode_leaves_fields_alone() {
        let templates = set(OutputMode::Text, &[("index.tem", "{{ desc }}")]);
        let out = templates.render("index", &record("desc: a < b")).unwrap();
        assert_eq!(out, "a < b");
    }

    #[test]
    fn missing_link_template_falls_back_to_label() {
        let templates = set(OutputMode::Html, &[("index.tem", "{{ desc | linkify }}")]);
        let out = templates
            .render("index", &record("desc: see ((http://x.com a<b))"))
            .unwrap();
        assert_eq!(out, "see a&lt;b");
    }

    #[test]
    fn linkify_of_missing_field_is_empty() {
        let templates = set(OutputMode::Text, &[("index.tem", "[{{ nope | linkify }}]")]);
        assert_eq!(templates.render("index", &record("{}")).unwrap(), "[]");
    }

    #[test]
    fn unknown_template_is_undefined() {
        let templates = set(OutputMode::Text, &[("index.tem", "x")]);
        let err = templates.render("resume.tem", &record("{}")).unwrap_err();
        assert!(matches!(
            err,
            TemplateError::Render(RenderError::Undefined(name)) if name == "resume.tem"
        ));
    }

    #[test]
    fn compile_error_names_the_template() {
        let result = TemplateSet::from_sources("", OutputMode::Text, [("bad.tem", "{{ oops")]);
        match result {
            Err(TemplateError::Compile { name, .. }) => assert_eq!(name, "bad.tem"),
            Err(other) => panic!("expected compile error, got {other}"),
            Ok(_) => panic!("expected compile error"),
        }
    }

    #[test]
    fn embeds_files_from_data_dir() {
        let data_dir = create_test_data_dir();
        create_test_file(&data_dir, "style.css", "p > a { color: red }");

        let templates = TemplateSet::from_sources(
            data_dir.path(),
            OutputMode::Html,
            [("index.tem", "<style>{{ embed('style.css') | css }}</style>")],
        )
        .unwrap();

        let out = templates.render("index", &record("{}")).unwrap();
        assert_eq!(out, "<style>p > a { color: red }</style>");
    }

    #[test]
    fn embed_outside_data_dir_fails_render() {
        let data_dir = create_test_data_dir();
        let templates = TemplateSet::from_sources(
            data_dir.path(),
            OutputMode::Text,
            [("index.tem", "{{ embed('../secret') }}")],
        )
        .unwrap();

        let err = templates.render("index", &record("{}")).unwrap_err();
        assert!(matches!(err, TemplateError::Render(RenderError::Template(_))));
        assert!(err.to_string().contains("leave data directory"));
    }

    #[test]
    fn load_registers_file_names_and_stems() {
        let data_dir = create_test_data_dir();
        create_test_file(&data_dir, "index.tem", "{{ me.chosen }}");
        create_test_file(&data_dir, "notes.txt", "{{ not a template");

        let templates = TemplateSet::load(data_dir.path(), OutputMode::Text).unwrap();
        let data = record("me: {chosen: Jo}");

        assert_eq!(templates.render("index.tem", &data).unwrap(), "Jo");
        assert_eq!(templates.render("index", &data).unwrap(), "Jo");
        assert!(templates.render("notes.txt", &data).is_err());
        assert_eq!(templates.data_dir(), data_dir.path());
        assert_eq!(templates.mode(), OutputMode::Text);
    }

    #[test]
    fn stem_never_shadows_a_file_name() {
        let templates = set(
            OutputMode::Text,
            &[("a.tem", "plain"), ("a.tem.tem", "doubled")],
        );
        assert_eq!(templates.render("a.tem", &record("{}")).unwrap(), "plain");
        assert_eq!(templates.render("a", &record("{}")).unwrap(), "plain");
    }

    #[test]
    fn load_empty_dir_is_an_error() {
        let data_dir = create_test_data_dir();
        let result = TemplateSet::load(data_dir.path(), OutputMode::Html);
        assert!(matches!(result, Err(TemplateError::NoTemplates(_))));
    }

    #[test]
    fn load_missing_dir_is_an_error() {
        let result = TemplateSet::load("/this/path/does/not/exist", OutputMode::Html);
        assert!(matches!(result, Err(TemplateError::ReadDir { .. })));
    }

    #[test]
    fn escape_follows_mode() {
        assert_eq!(OutputMode::Html.escape()("<b>"), "&lt;b&gt;");
        assert_eq!(OutputMode::Text.escape()("<b>"), "<b>");
        assert_eq!(OutputMode::default(), OutputMode::Html);
    }
}
