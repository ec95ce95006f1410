mod def;
include!(concat!(env!("OUT_DIR"), "/rustc_version.rs"));
use crate::backend::{env::EnvSource, file::FileSource, KeySource};
use crate::engine::{yaml::YamlEngine, Engine};
use crate::template::{self, Format, Renderer};
use clap::Parser;

pub mod log;

impl From<template::Error> for String {
    fn from(e: template::Error) -> Self {
        e.to_string()
    }
}

fn backend(args: &def::Args) -> Result<Box<dyn KeySource>, String> {
    match args.backend.as_str() {
        "env" => Ok(Box::new(EnvSource::new())),
        "file" => Ok(Box::new(FileSource::new(args.files.clone())?)),
        other => Err(format!(
            "unsupported backend type '{}': expected env or file",
            other
        )),
    }
}

fn engine(format: Format, args: &def::Args) -> Box<dyn Engine> {
    match format {
        Format::Yaml => Box::new(YamlEngine::new(args.optional)),
    }
}

pub fn run() -> Result<(), String> {
    let cli = def::Args::parse();

    // Split log strings upon comma, trim them and flatten all in
    // `logs`, remove empty values
    let logs = cli.log.clone().unwrap_or_default();
    let logs = logs
        .iter()
        .flat_map(|log| log.split(','))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<&str>>();

    log::setup(cli.verbose, logs, cli.log_time)?;

    if cli.color && cli.no_color {
        return Err("Cannot use both --color and --no-color".to_string());
    }
    if cli.color {
        colored::control::set_override(true);
    }
    if cli.no_color {
        colored::control::set_override(false);
    }

    if cli.version {
        println!("version: {}", env!("CARGO_PKG_VERSION"));
        println!("Rust: {}", RUSTC_VERSION);
        return Ok(());
    }

    let config = template::Config {
        delimiter: cli.delimiter.clone(),
        filter: cli.filter.clone(),
        format: cli.format.clone(),
        outfile: cli.outfile.clone(),
        prefix: cli.prefix.clone(),
    };
    let renderer = Renderer::new(config)?;
    let backend = backend(&cli).map_err(|e| format!("error creating backend: {}", e))?;
    let engine = engine(renderer.template().format, &cli);
    ::log::info!(
        "rendering {} template for keys under {}",
        renderer.template().format,
        renderer.template().prefix
    );
    renderer.render(backend.as_ref(), engine.as_ref())?;
    Ok(())
}
