use std::path::PathBuf;

use pretty_assertions::assert_eq;
use resify_engine::{OutputMode, Resume, TemplateSet, read_resume, write_yaml};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn render_fixture(templates: &str, mode: OutputMode) -> String {
    let resume = read_resume(&fixture("resume.yaml")).unwrap();
    let templates = TemplateSet::load(fixture(templates), mode).unwrap();
    templates.render("index.tem", &resume).unwrap()
}

#[test]
fn html_fixture_escapes_fields_and_renders_links() {
    let html = render_fixture("html", OutputMode::Html);

    for expected in [
        "<style>h1 > a { color: red; }",
        "<h1>Jo Public</h1>",
        "<p>I build things.</p>",
        r#"<a href="https://jo.example.com/">Home &amp; away</a>"#,
        "<h2>Engineer, Widgets &amp; Co (2012-03 to 2015)</h2>",
        r#"<p>Shipped <a href="https://widgets.example.com/">widgets</a> to &lt;everyone&gt;.</p>"#,
        "<h2>Intern, Gadgets (2011 to now)</h2>",
        r#"<p>Made coffee, see <a href="/coffee">the pot</a>.</p>"#,
        "<h2>B.Sc., Some College (Physics, History)</h2>",
    ] {
        assert!(html.contains(expected), "missing {expected:?} in:\n{html}");
    }
}

#[test]
fn html_fixture_lists_profiles_in_order() {
    let html = render_fixture("html", OutputMode::Html);

    let site = html.find("jo.example.com").unwrap();
    let github = html.find("github.com/jo").unwrap();
    assert!(site < github);
}

#[test]
fn text_fixture_is_not_escaped() {
    let text = render_fixture("text", OutputMode::Text);

    let lines: Vec<&str> = text.trim().lines().collect();
    assert_eq!(
        lines,
        vec![
            "Jo Public <jo@example.com> +15551234567",
            "* Engineer at Widgets & Co: Shipped widgets <https://widgets.example.com/> to <everyone>.",
            "* Intern at Gadgets: Made coffee, see the pot </coffee>.",
        ]
    );
}

#[test]
fn example_resume_renders_with_fixture_templates() {
    let example = Resume::example().unwrap();
    let mut yaml = Vec::new();
    write_yaml(&example, &mut yaml).unwrap();
    let back: Resume = serde_yaml::from_slice(&yaml).unwrap();

    let templates = TemplateSet::load(fixture("text"), OutputMode::Text).unwrap();
    let text = templates.render("index", &back).unwrap();

    insta::assert_snapshot!(
        text.lines().nth(1).unwrap(),
        @"* Software Engineer at Example Studios: Built and ran the request pipeline for our storefront <https://example.com/>, serving a few billion requests a day."
    );
}
