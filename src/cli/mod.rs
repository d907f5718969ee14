//! Command-line surface: argument parsing and the interactive session loop.

mod app;
mod args;

pub use app::App;
pub use args::{Cli, DEFAULT_BASE_URL, DEFAULT_MODEL};
