//! Command line options and the files derived from them.

use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, Parser)]
#[command(name = "crud-console", version, about = "Manage products and users through a REST API")]
pub struct Cli {
    /// Base URL of the REST backend.
    #[arg(long, env = "CRUD_CONSOLE_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Directory for theme.conf, keybinds.conf and the log file.
    #[arg(long, env = "CRUD_CONSOLE_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    /// Log file name, created inside the config directory.
    #[arg(long, default_value = "crud-console.log")]
    pub log_file: String,
}

impl Cli {
    pub fn config_dir(&self) -> PathBuf {
        self.config_dir.clone().unwrap_or_else(crate::app::default_config_dir)
    }

    pub fn theme_path(&self) -> PathBuf {
        self.config_dir().join("theme.conf")
    }

    pub fn keybinds_path(&self) -> PathBuf {
        self.config_dir().join("keybinds.conf")
    }
}
