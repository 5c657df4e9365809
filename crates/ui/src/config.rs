use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "chess_ui", about = "Two-player chess board with full rules enforcement")]
pub struct Config {
    /// Window edge length in pixels
    #[arg(long, default_value_t = 800.0)]
    pub size: f32,

    /// Directory that saved game logs are written to
    #[arg(long, default_value = "logs")]
    pub log_dir: PathBuf,

    /// Record a board snapshot after every move
    #[arg(long)]
    pub verbose: bool,
}
