mod cli;
mod commands;

use anyhow::{anyhow, Result};
use clap::Parser;

use site_timeline::config::AppSettings;
use site_timeline::logging;

fn main() -> Result<()> {
    let args = cli::Cli::parse();
    let settings_path = args.config.clone().unwrap_or_else(AppSettings::default_path);
    let settings = AppSettings::load(&settings_path);

    let fallback = settings
        .log_level
        .as_deref()
        .unwrap_or(logging::default_log_level());
    let _logger =
        logging::init_logging(args.log_level.as_deref(), fallback).map_err(|e| anyhow!(e))?;

    match args.command {
        cli::Command::Layout {
            snapshot,
            view,
            json,
        } => commands::layout(&settings, &snapshot, &view, json),
        cli::Command::Export {
            snapshot,
            output,
            view,
        } => commands::export(&settings, &snapshot, &output, &view),
        cli::Command::Import {
            input,
            output,
            project_name,
        } => commands::import(&input, &output, project_name),
    }
}
