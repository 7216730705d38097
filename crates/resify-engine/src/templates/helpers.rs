use std::path::Path;

use minijinja::{Environment, Error, ErrorKind, State, Value};

use super::OutputMode;
use crate::io::read_embedded;
use crate::links::linkify;

/// Names of the helpers that mark a value as already safe for its context.
const TRUST_HELPERS: [&str; 4] = ["html", "attr", "css", "js"];

/// Makes the template helpers available as both filters and functions,
/// so `{{ desc | html }}` and `{{ html(desc) }}` are equivalent.
pub(super) fn register(env: &mut Environment<'static>, data_dir: &Path, mode: OutputMode) {
    let root = data_dir.to_path_buf();
    let embed = move |path: String| -> Result<String, Error> {
        read_embedded(&root, &path)
            .map_err(|err| Error::new(ErrorKind::InvalidOperation, err.to_string()))
    };
    env.add_function("embed", embed.clone());
    env.add_filter("embed", embed);

    for name in TRUST_HELPERS {
        let trust = move |value: Value| mode.trust(text_of(&value));
        env.add_function(name, trust);
        env.add_filter(name, trust);
    }

    let linkify_text = move |state: &State, value: Value| {
        mode.trust(linkify(&text_of(&value), state.env(), mode.escape()))
    };
    env.add_function("linkify", linkify_text);
    env.add_filter("linkify", linkify_text);
}

/// Undefined and none read as empty text.
fn text_of(value: &Value) -> String {
    if value.is_undefined() || value.is_none() {
        String::new()
    } else if let Some(s) = value.as_str() {
        s.to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn text_of_values() {
        assert_eq!(text_of(&Value::UNDEFINED), "");
        assert_eq!(text_of(&Value::from(())), "");
        assert_eq!(text_of(&Value::from("a & b")), "a & b");
        assert_eq!(text_of(&Value::from(2012)), "2012");
    }

    #[test]
    fn trust_marks_safe_only_in_html_mode() {
        assert!(OutputMode::Html.trust("<b>".into()).is_safe());
        assert!(!OutputMode::Text.trust("<b>".into()).is_safe());
    }
}
