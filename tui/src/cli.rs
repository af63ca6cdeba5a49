use std::path::PathBuf;

use clap::Parser;

use crate::config::BackendKind;

#[derive(Parser, Debug)]
#[command(name = "task-view", version, about = "Terminal task manager")]
pub struct Cli {
    /// TOML config file (default: ./task-view.toml if present)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Base URL of the task REST resource
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Where tasks come from
    #[arg(long, value_enum)]
    pub backend: Option<BackendKind>,

    /// Write logs here; nothing is logged otherwise
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}
