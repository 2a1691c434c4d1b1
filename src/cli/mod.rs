use std::path::PathBuf;

use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the Pub/Sub push endpoint
    Serve {
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Defaults to $PORT when set, otherwise 8080
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Process one envelope read from a file (or stdin) and exit
    Handle {
        /// Envelope JSON file; reads stdin when omitted
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

const DEFAULT_PORT: u16 = 8080;

/// Port used when `--port` is not given: `$PORT` (set by serverless
/// platforms), then 8080.
pub fn default_port() -> u16 {
    std::env::var("PORT")
        .ok()
        .and_then(|p| p.trim().parse().ok())
        .unwrap_or(DEFAULT_PORT)
}
