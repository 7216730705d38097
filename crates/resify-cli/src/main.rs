use anyhow::{Context, Result};
use clap::Parser;
use resify_config::Config;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::process;

mod cli;
mod commands;

use crate::cli::{Cli, Command, Options};
use crate::commands::{run_render, run_yaml};

fn main() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        log::error!("{e:#}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from_path(path)?
            .with_context(|| format!("config file {} does not exist", path.display()))?,
        None => Config::load()?,
    };
    let options = Options::resolve(cli, config);
    log::debug!("resolved options: {options:?}");

    let mut out: Box<dyn Write> = match options.output_path() {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot open {} for writing", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    match &cli.command {
        Command::Render { files } => run_render(&options, files, &mut out),
        Command::Yaml => run_yaml(&options, &mut out),
    }
}
