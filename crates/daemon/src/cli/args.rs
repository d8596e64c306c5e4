pub use clap::Parser;

use std::path::PathBuf;
use url::Url;

#[derive(Parser, Debug)]
#[command(name = "bakery")]
#[command(about = "Bakery inventory and order service")]
pub struct Args {
    /// API base URL (defaults to localhost on the configured port)
    #[arg(long, global = true)]
    pub remote: Option<Url>,

    /// API key sent in the Authorization header (defaults to the configured key)
    #[arg(long, global = true, env = "BAKERY_API_KEY")]
    pub api_key: Option<String>,

    /// Path to the bakery config directory (defaults to ~/.bakery)
    #[arg(long, global = true)]
    pub config_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: crate::Command,
}
