use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Sets the level of tracing.
    #[arg(short, long, global = true)]
    pub trace: Option<TraceLevel>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Collect company profiles, financials and filing history from SEC EDGAR into the
    /// document store (dossier).
    Collect {
        /// CIKs to collect, comma separated.
        ///
        /// If no CIKs are provided, the built-in list is collected.
        #[arg(short, long, value_delimiter = ',')]
        ciks: Option<Vec<String>>,

        /// Read payloads from unzipped SEC bulk archives in this directory instead of the API.
        #[arg(short, long)]
        buffer: Option<PathBuf>,

        /// Keep documents in memory and print them, rather than writing to the database.
        #[arg(long)]
        dry_run: bool,
    },
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
#[clap(rename_all = "UPPERCASE")]
pub enum TraceLevel {
    DEBUG,
    ERROR,
    INFO,
    TRACE,
    WARN,
}
