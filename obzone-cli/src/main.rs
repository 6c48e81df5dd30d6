//! obzone CLI: extract internal and swing order block zones from OHLCV JSON.
//!
//! Input is a JSON array of bars, read from stdin when data is piped in,
//! otherwise from the file given as the positional argument. The text
//! report goes to stdout; logging goes to stderr (`RUST_LOG`, default `warn`).

use anyhow::Result;
use clap::Parser;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};

use obzone_core::config::AnalysisConfig;
use obzone_core::data::{bars_from_records, parse_records};
use obzone_core::domain::MitigationMode;
use obzone_core::engine::Analyzer;
use obzone_core::report::{render_json, render_report};

#[derive(Parser, Debug)]
#[command(
    name = "obzone",
    about = "Extract order block zones at internal and swing scales"
)]
struct Cli {
    /// JSON file with an array of OHLCV bars. Ignored when data is piped on stdin.
    input: Option<PathBuf>,

    /// TOML config file (mitigation_mode, internal_lookback, swing_lookback).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Mitigate zones on closing prices instead of wicks.
    #[arg(long, default_value_t = false)]
    close_mitigation: bool,

    /// Swing lookback of the internal pass. Defaults to 5.
    #[arg(long)]
    internal_lookback: Option<usize>,

    /// Swing lookback of the swing pass. Defaults to 20.
    #[arg(long)]
    swing_lookback: Option<usize>,

    /// Emit the analysis as JSON instead of the text report.
    #[arg(long, default_value_t = false)]
    json: bool,
}

impl Cli {
    /// Config file values (or defaults), overridden by explicit flags.
    fn analysis_config(&self) -> Result<AnalysisConfig> {
        let mut config = match &self.config {
            Some(path) => AnalysisConfig::from_file(path)?,
            None => AnalysisConfig::default(),
        };
        if self.close_mitigation {
            config.mitigation_mode = MitigationMode::Close;
        }
        if let Some(n) = self.internal_lookback {
            config.internal_lookback = n;
        }
        if let Some(n) = self.swing_lookback {
            config.swing_lookback = n;
        }
        config.validate()?;
        Ok(config)
    }
}

/// Where the bar document was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    Stdin,
    File,
}

impl Origin {
    fn error_prefix(&self) -> &'static str {
        match self {
            Origin::Stdin => "Error reading JSON from stdin",
            Origin::File => "Error reading JSON file",
        }
    }
}

/// Pick the input and read it. `None` means no source is available.
///
/// Piped stdin wins over the file argument, except that an empty pipe
/// falls through to the file when one is given.
fn read_input(stdin_piped: bool, file: Option<&Path>) -> Option<(Origin, io::Result<String>)> {
    if stdin_piped {
        log::debug!("Reading JSON from stdin");
        let mut text = String::new();
        match io::stdin().read_to_string(&mut text) {
            Ok(_) if text.trim().is_empty() && file.is_some() => {
                log::debug!("stdin is empty, using file argument");
            }
            result => return Some((Origin::Stdin, result.map(|_| text))),
        }
    }
    let path = file?;
    log::debug!("Reading JSON from file: {}", path.display());
    Some((Origin::File, std::fs::read_to_string(path)))
}

fn parse_input(text: io::Result<String>) -> Result<Vec<serde_json::Value>> {
    let text = text?;
    Ok(parse_records(&text)?)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = cli.analysis_config()?;
    log::debug!("config: {config:?}");

    let stdin_piped = !io::stdin().is_terminal();
    let Some((origin, text)) = read_input(stdin_piped, cli.input.as_deref()) else {
        println!("Usage: obzone data.json");
        println!("  or pipe JSON data: cat data.json | obzone");
        std::process::exit(1);
    };

    let records = match parse_input(text) {
        Ok(records) => records,
        Err(e) => {
            println!("{}: {e}", origin.error_prefix());
            std::process::exit(1);
        }
    };
    log::debug!("{} records read", records.len());

    // Bad records leave both sections empty; the run still succeeds.
    let bars = match bars_from_records(&records) {
        Ok(bars) => bars,
        Err(e) => {
            if cli.json {
                eprintln!("Error processing data: {e}");
            } else {
                println!("Error processing data: {e}");
            }
            Vec::new()
        }
    };

    let analysis = Analyzer::default().analyze(&bars, &config);

    if cli.json {
        println!("{}", render_json(&bars, &analysis)?);
        return Ok(());
    }

    for result in analysis.scales() {
        if let Some(e) = result.error() {
            println!("Error computing {} OB: {e}", result.scale);
        }
    }
    print!("{}", render_report(&bars, &analysis));

    Ok(())
}
