//! CLI wrapper around the extraction core.
//!
//! `semblocks INPUT [OUTPUT] [-c CONFIG.json]` - reads an HTML file (bytes,
//! with charset sniffing), writes pretty-printed JSON to OUTPUT or stdout.
//! Exit 0 on success, 1 on I/O or config errors.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use semblocks::{extract_bytes_with_config, Error, ExtractorConfig};

#[derive(Parser)]
#[command(name = "semblocks", version, about = "Extract semantic block JSON from HTML")]
struct Args {
    /// Input HTML file
    input: PathBuf,

    /// Output JSON file (defaults to stdout)
    output: Option<PathBuf>,

    /// JSON config file path
    #[arg(short, long, value_name = "CONFIG.json")]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> semblocks::Result<()> {
    let config = match &args.config {
        Some(path) => {
            let raw = fs::read_to_string(path)?;
            serde_json::from_str::<ExtractorConfig>(&raw).map_err(Error::Config)?
        }
        None => ExtractorConfig::default(),
    };

    let html = fs::read(&args.input)?;
    let document = extract_bytes_with_config(&html, &config);
    let json = serde_json::to_string_pretty(&document).map_err(Error::Serialize)?;

    match &args.output {
        Some(path) => {
            fs::write(path, &json)?;
            eprintln!("Output saved to: {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
