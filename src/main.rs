use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use tracker_probe::bencode::Bencode;
use tracker_probe::{export, AnnounceResult, ClientConfig, SessionLog, TrackerClient};

mod cli;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = cli::Args::parse();
    info!("Command: {:?}", args.command);

    match args.command {
        cli::Command::Announce {
            tracker_url,
            info_hashes,
            port,
            timeout,
            csv,
            json,
        } => announce(&tracker_url, &info_hashes, port, timeout, csv, json),
        cli::Command::Decode { path } => {
            let bytes =
                std::fs::read(&path).with_context(|| format!("read {}", path.display()))?;
            let value = Bencode::decode_bytes(&bytes)?;
            println!("{}", serde_json::to_string_pretty(&value.to_json())?);
            Ok(())
        }
    }
}

fn announce(
    tracker_url: &str,
    info_hashes: &[String],
    port: u16,
    timeout: u64,
    csv: Option<PathBuf>,
    json: Option<PathBuf>,
) -> Result<()> {
    let config = ClientConfig {
        timeout: Duration::from_secs(timeout),
        ..Default::default()
    };
    let log = Arc::new(SessionLog::new());
    let client = TrackerClient::new(config, log.clone()).context("build HTTP client")?;

    for info_hash in info_hashes {
        let result = client.announce(info_hash.trim(), tracker_url.trim(), port);
        print_result(info_hash, &result);
    }

    let entries = log.all();
    let succeeded = entries.iter().filter(|e| e.result.is_success()).count();
    println!(
        "Sessions: {} ({} succeeded, {} failed)",
        entries.len(),
        succeeded,
        entries.len() - succeeded
    );

    if let Some(path) = csv {
        export::write_csv(&path, &log.export_rows())?;
        println!("CSV report written to {}", path.display());
    }
    if let Some(path) = json {
        export::write_json(&path, &entries)?;
        println!("JSON report written to {}", path.display());
    }
    Ok(())
}

fn print_result(info_hash: &str, result: &AnnounceResult) {
    println!("Info Hash: {}", info_hash);
    match result {
        AnnounceResult::Success(response) => {
            println!("Peers: {}", response.peers.len());
            println!("Seeders: {}", response.complete);
            println!("Leechers: {}", response.incomplete);
            println!("Interval: {}s", response.interval);
            for peer in &response.peers {
                println!("  {}", peer);
            }
        }
        AnnounceResult::Failure { reason } => println!("Error: {}", reason),
    }
    println!();
}
