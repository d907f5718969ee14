//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// ColorHeart Can: color-psychology career diagnosis in the terminal
#[derive(Parser, Debug, Clone)]
#[command(name = "colorheart", version, about)]
pub struct Cli {
    /// Gemini API key (falls back to API_KEY)
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Model used for report generation
    #[arg(long, env = "COLORHEART_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Base URL of the generateContent API
    #[arg(long, env = "COLORHEART_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Seconds to wait for a report before giving up
    #[arg(long, env = "COLORHEART_TIMEOUT_SECS", default_value_t = 60)]
    pub timeout_secs: u64,

    /// Directory for exported print documents
    #[arg(long, env = "COLORHEART_EXPORT_DIR")]
    pub export_dir: Option<PathBuf>,

    /// Write logs to this file instead of stderr
    #[arg(long, env = "COLORHEART_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Pre-fill the name on the entry screen
    #[arg(long)]
    pub name: Option<String>,

    /// Pre-select the age group (1-3, DREAM_TREE, CAREER_PATH, MIND_RESET)
    #[arg(long)]
    pub group: Option<String>,
}
