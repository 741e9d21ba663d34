use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use uuid::Uuid;

use site_timeline::engine::parse_calendar_date;
use site_timeline::ViewMode;

#[derive(Parser, Debug)]
#[command(name = "site-timeline", version, about = "Gantt timeline layout for construction projects")]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Settings file (defaults to the OS config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Lay out a snapshot and print it
    Layout {
        /// Snapshot JSON file
        snapshot: PathBuf,
        #[command(flatten)]
        view: ViewArgs,
        /// Print the layout as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Lay out a snapshot and write the rows to a CSV file
    Export {
        /// Snapshot JSON file
        snapshot: PathBuf,
        /// Destination CSV file
        output: PathBuf,
        #[command(flatten)]
        view: ViewArgs,
    },
    /// Convert a CSV task list into a snapshot
    Import {
        /// Source CSV file
        input: PathBuf,
        /// Destination snapshot JSON file
        output: PathBuf,
        /// Put tasks without a project column into a project with this name
        #[arg(long)]
        project_name: Option<String>,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ViewArgs {
    /// daily, weekly, monthly or full (defaults to the settings file)
    #[arg(long)]
    pub view: Option<ViewMode>,
    /// Date to centre the view on, YYYY-MM-DD (defaults to today)
    #[arg(long, value_parser = parse_date_arg)]
    pub reference: Option<NaiveDate>,
    /// Only show tasks of this project
    #[arg(long)]
    pub project: Option<Uuid>,
    /// Pretend today is this date, YYYY-MM-DD
    #[arg(long, value_parser = parse_date_arg)]
    pub today: Option<NaiveDate>,
}

fn parse_date_arg(raw: &str) -> Result<NaiveDate, String> {
    parse_calendar_date("argument", raw).map_err(|e| e.to_string())
}
