//! Command-line interface for year-mapping
//! Converts the chronology workbook into `year_mapping.json`.
//!
//! Usage:
//!   year-mapping [--config <file>] [--input <xlsx>] [--output <json>] [--sheet <pattern>] [--split-yun]
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};
use year_mapping::config::Config;
use year_mapping::pipeline;

#[derive(Parser, Debug)]
#[command(name = "year-mapping", version, about = "Convert the Huangji Jingshi workbook into a JSON year mapping")]
struct Cli {
    /// YAML file overriding the built-in layout and paths
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Workbook to read (.xlsx)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// JSON file to write
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Glob pattern selecting the sheet (default: first sheet)
    #[arg(short, long)]
    sheet: Option<String>,

    /// Add a structured `yun` object split from the 运 label
    #[arg(long)]
    split_yun: bool,
}

impl Cli {
    fn into_config(self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        if let Some(input) = self.input {
            config.input = input;
        }
        if let Some(output) = self.output {
            config.output = output;
        }
        if self.sheet.is_some() {
            config.sheet = self.sheet;
        }
        config.split_yun |= self.split_yun;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    let config = Cli::parse().into_config()?;
    info!(input = %config.input.display(), output = %config.output.display(), "startup");

    let summary = pipeline::convert(&config)
        .with_context(|| format!("Failed to convert '{}'", config.input.display()))?;
    println!("Extracted {} records.", summary.records.len());
    if let Some(output) = summary.output {
        println!("Saved to {}", output.display());
    }
    Ok(())
}
