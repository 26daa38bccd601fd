use std::path::PathBuf;

use clap::Parser;

use crate::platform::logging::LogDestination;

#[derive(Debug, Parser, Clone)]
#[command(
    name = "summarizer",
    version,
    about = "Upload a PDF or text document to a summarization service"
)]
pub struct Cli {
    /// Document to summarize. Without it an interactive prompt starts.
    pub file: Option<PathBuf>,

    /// Origin of the summarization service
    #[arg(long, env = "SUMMARIZER_BASE_URL")]
    pub base_url: Option<String>,

    /// Path of the upload endpoint on the service
    #[arg(long)]
    pub upload_path: Option<String>,

    /// Copy the summary to the clipboard when it arrives
    #[arg(long)]
    pub copy: bool,

    /// Also write the summary to this file
    #[arg(long, value_name = "PATH")]
    pub save: Option<PathBuf>,

    /// Configuration file (RON)
    #[arg(long, default_value = "summarizer.ron")]
    pub config: PathBuf,

    /// Where log records go
    #[arg(long, value_enum)]
    pub log: Option<LogDestination>,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Write the effective configuration to --config and exit
    #[arg(long)]
    pub write_config: bool,
}
