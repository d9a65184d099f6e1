//! src/main.rs
//!
//! Entrypoint: error reporting, logging, then `app::run()`.

mod app;
mod cli;
mod config;
mod graph;
mod panels;
mod render;
mod stream;
mod ui;

use std::fs::File;

use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::WrapErr;

use cli::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    let mut logger = env_logger::Builder::new();
    logger.filter_level(log_level).format_timestamp(None);
    if let Some(path) = &cli.log_file {
        let file = File::create(path)
            .wrap_err_with(|| format!("cannot create log file {}", path.display()))?;
        logger.target(env_logger::Target::Pipe(Box::new(file)));
    }
    logger.init();

    app::run(&cli)
}
