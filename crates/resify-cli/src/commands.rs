use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use resify_engine::{Resume, TemplateSet, read_resume, write_yaml};

use crate::cli::Options;

/// Stripped from both ends of each rendered file. Other Unicode spaces are kept.
const OUTPUT_TRIM: &[char] = &['\r', '\n', '\t', ' '];

/// Renders each file through the main template, trimmed, one after another.
pub fn run_render(options: &Options, files: &[PathBuf], out: &mut dyn Write) -> Result<()> {
    let templates = TemplateSet::load(&options.data_dir, options.mode).with_context(|| {
        format!(
            "cannot load templates from {}",
            options.data_dir.display()
        )
    })?;

    for file in files {
        let resume = read_resume(file)?;
        log::info!("rendering {} with {}", file.display(), options.template);

        let rendered = templates
            .render(&options.template, &resume)
            .with_context(|| format!("cannot execute template {}", options.template))?;
        out.write_all(rendered.trim_matches(OUTPUT_TRIM).as_bytes())
            .context("cannot write to output")?;
    }

    finish(options, out)
}

/// Writes the example resume.
pub fn run_yaml(options: &Options, out: &mut dyn Write) -> Result<()> {
    let example = Resume::example().context("cannot build example resume")?;
    write_yaml(&example, &mut *out)?;
    finish(options, out)
}

fn finish(options: &Options, out: &mut dyn Write) -> Result<()> {
    if options.newline {
        out.write_all(b"\n").context("cannot write to output")?;
    }
    out.flush().context("cannot flush output")
}
