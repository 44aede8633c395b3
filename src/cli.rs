use clap::{Parser, Subcommand};
use std::path::PathBuf;

use tracker_probe::DEFAULT_PORT;

/// Query HTTP BitTorrent trackers for peers
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Announce one or more info hashes to a tracker and report the peers
    Announce {
        /// Tracker announce URL (http or https)
        tracker_url: String,
        /// Info hashes, as 40-character hex strings
        #[arg(required = true)]
        info_hashes: Vec<String>,
        /// Port reported to the tracker
        #[arg(short, long, default_value_t = DEFAULT_PORT)]
        port: u16,
        /// Request timeout in seconds
        #[arg(short, long, default_value_t = 10)]
        timeout: u64,
        /// Write the session log as CSV
        #[arg(long)]
        csv: Option<PathBuf>,
        /// Write the session log as JSON
        #[arg(long)]
        json: Option<PathBuf>,
    },
    /// Print a bencoded file (e.g. a saved tracker response) as JSON
    Decode {
        /// The path to the bencoded file
        path: PathBuf,
    },
}

impl Args {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }
}
