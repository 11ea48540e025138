use std::path::PathBuf;

use clap::Parser;

#[derive(Clone, Debug, Parser)]
#[command(name = "apod", version = env!("CARGO_PKG_VERSION"), about, long_about = None)]
pub struct App {
    /// First day of the range (YYYY-MM-DD)
    #[arg(short, long, value_name = "DATE")]
    pub start: Option<String>,

    /// Last day of the range (YYYY-MM-DD); ranges span at most 30 days
    #[arg(short, long, value_name = "DATE")]
    pub end: Option<String>,

    /// Configuration file, instead of ./apod.toml
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Credential for the primary API
    #[arg(long, value_name = "KEY")]
    pub api_key: Option<String>,

    /// Print records as JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// Also print each explanation and copyright
    #[arg(short, long)]
    pub details: bool,

    /// Do not show the progress spinner
    #[arg(long)]
    pub no_progress: bool,
}

impl App {
    pub fn range(&self) -> apod_fetch::RangeInput {
        apod_fetch::RangeInput {
            start: self.start.clone(),
            end: self.end.clone(),
        }
    }
}
