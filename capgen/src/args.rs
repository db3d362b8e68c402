use std::path::PathBuf;

use clap::Parser;

/// Capgen caption and account server
#[derive(Debug, Parser)]
#[command(name = "capgen", about = "Caption generation and subscription service")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "capgen.toml", env = "CAPGEN_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "CAPGEN_LISTEN")]
    pub listen: Option<std::net::SocketAddr>,
}
