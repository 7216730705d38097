//! Command-line arguments.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use resify_config::Config;
use resify_engine::OutputMode;

#[derive(Debug, Parser)]
#[command(
    name = "resify",
    version,
    about = "Render resume YAML through templates",
    long_about = "Render resume YAML through templates.\n\n\
                  Templates are the *.tem files in the data directory. Free-text \
                  fields may contain links written as ((URL label))."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Template to render for each input file.
    #[arg(long, value_name = "TEMPLATE", global = true)]
    pub template: Option<String>,

    /// Directory containing templates and other data.
    #[arg(long = "data-dir", value_name = "DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Path to write output to (stdout when omitted or "-").
    #[arg(short = 'o', value_name = "PATH", global = true)]
    pub output: Option<PathBuf>,

    /// Skip HTML-specific escaping in templates.
    #[arg(long, global = true, conflicts_with = "html")]
    pub text: bool,

    /// Escape for HTML even if the config file asks for text.
    #[arg(long, global = true)]
    pub html: bool,

    /// Don't write a trailing newline at the end of the output.
    #[arg(long = "no-newline", global = true)]
    pub no_newline: bool,

    /// Read settings from this file instead of ~/.config/resify/config.toml.
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render resume YAML files (stdin when none or "-" is given).
    Render {
        #[arg(value_name = "FILE", default_value = "-")]
        files: Vec<PathBuf>,
    },

    /// Write an example resume as YAML.
    Yaml,
}

/// Settings after flags have been laid over the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub data_dir: PathBuf,
    pub template: String,
    pub mode: OutputMode,
    pub newline: bool,
    pub output: Option<PathBuf>,
}

impl Options {
    pub fn resolve(cli: &Cli, config: Config) -> Self {
        let text = if cli.text {
            true
        } else if cli.html {
            false
        } else {
            config.text
        };

        Self {
            data_dir: cli.data_dir.clone().unwrap_or(config.data_dir),
            template: cli.template.clone().unwrap_or(config.template),
            mode: if text {
                OutputMode::Text
            } else {
                OutputMode::Html
            },
            newline: config.newline && !cli.no_newline,
            output: cli
                .output
                .clone()
                .filter(|path| !resify_engine::is_stdin(path)),
        }
    }

    pub fn output_path(&self) -> Option<&Path> {
        self.output.as_deref()
    }
}
