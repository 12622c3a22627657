//! CLI definition using clap

use bcsort_types::OutputFormat;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bcsort")]
#[command(version)]
#[command(about = "Classify vehicle registration plates as bus, coach, minibus or other")]
#[command(long_about = None)]
pub struct Cli {
    /// Input CSV or spreadsheet, or TEST to try the built-in plate list
    #[arg(required_unless_present = "show_config")]
    pub input: Option<String>,

    /// Registration plate column
    #[arg(long)]
    pub plate_col: Option<String>,

    /// Decision column (read for earlier decisions, written on export)
    #[arg(long)]
    pub bc_col: Option<String>,

    /// Body type column
    #[arg(long)]
    pub body_col: Option<String>,

    #[arg(long)]
    pub make_col: Option<String>,

    #[arg(long)]
    pub model_col: Option<String>,

    #[arg(long)]
    pub seats_col: Option<String>,

    #[arg(long)]
    pub gross_weight_col: Option<String>,

    #[arg(long)]
    pub unladen_weight_col: Option<String>,

    /// Accepted body types, comma separated (e.g. "MINIBUS,S/D BUS/COACH")
    #[arg(long, value_delimiter = ',')]
    pub body_types: Option<Vec<String>>,

    /// Accept every body type
    #[arg(long, conflicts_with = "body_types")]
    pub all_body_types: bool,

    /// Ask about light minibuses instead of classifying them automatically
    #[arg(long)]
    pub no_auto_minibus: bool,

    /// Ignore earlier decisions in the input and the decision store
    #[arg(long)]
    pub start_new: bool,

    /// Decision store CSV (Plate,BusCoach,City)
    #[arg(long)]
    pub store: Option<PathBuf>,

    /// City label recorded with new store entries (default: input file name)
    #[arg(long)]
    pub city: Option<String>,

    /// Image search URL; the plate is appended
    #[arg(long)]
    pub search_url: Option<String>,

    /// Output format. Uses config value if not specified.
    #[arg(long, short = 'f')]
    pub output_format: Option<OutputFormat>,

    /// Print search URLs instead of opening a browser
    #[arg(long)]
    pub no_browser: bool,

    /// Read answers a line at a time instead of single keystrokes
    #[arg(long)]
    pub line_input: bool,

    /// Config file (default: ~/.config/bcsort/config.json)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Show the effective configuration and exit
    #[arg(long)]
    pub show_config: bool,

    /// Verbose output
    #[arg(long, short = 'v')]
    pub verbose: bool,
}
