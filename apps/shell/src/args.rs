//! # CLI Argument Definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "portico")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Inspect, normalize, copy and re-layout site page XML documents")]
pub struct Cli {
    /// Configuration file (TOML, YAML or JSON); `PORTICO__*` variables override it
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print a summary of a page and its tools
    Inspect {
        #[command(flatten)]
        page: PageSource,
    },
    /// Re-emit a page in canonical form
    Normalize {
        #[command(flatten)]
        page: PageSource,
        #[command(flatten)]
        output: Output,
    },
    /// Copy a page, either exactly or under fresh ids for another site
    Copy {
        #[command(flatten)]
        page: PageSource,
        /// Keep page and tool ids
        #[arg(long, conflicts_with = "site")]
        exact: bool,
        /// Target site id; ids are regenerated and the source site id is rewritten
        #[arg(long, required_unless_present = "exact")]
        site: Option<String>,
        #[command(flatten)]
        output: Output,
    },
    /// Change the column layout of a page (0 = single, 1 = double)
    Layout {
        #[command(flatten)]
        page: PageSource,
        #[arg(long, allow_negative_numbers = true)]
        mode: i32,
        #[command(flatten)]
        output: Output,
    },
}

#[derive(Debug, Args)]
pub struct PageSource {
    /// Page XML file
    pub file: PathBuf,
    /// Site the page belongs to
    #[arg(long = "from-site")]
    pub from_site: Option<String>,
}

#[derive(Debug, Args)]
pub struct Output {
    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
