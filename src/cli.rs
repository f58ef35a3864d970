// cli.rs - command-line interface configuration
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "dunes")]
#[command(about = "Interactive desert scene viewer", long_about = None)]
pub struct Cli {
    /// Disable the stats/mode overlay
    #[arg(long = "no-ui", default_value = "false")]
    pub no_ui: bool,

    /// Scene configuration file (JSON); the built-in scene when omitted
    #[arg(long)]
    pub config: Option<PathBuf>,
}
