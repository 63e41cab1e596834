use std::fs;
use std::io::{self, Read};

use anyhow::{bail, Context, Result};
use clap::Parser;
use env_logger::Env;
use log::{error, info};

use linkparser::{explode_sub, OutputFormat, ProxyList, Settings};

/// Decode proxy share links into a Clash-style `proxies` document
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the configuration file (TOML or YAML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<String>,

    /// Output format, overrides the configuration file
    #[arg(short, long, value_name = "yaml|json")]
    format: Option<OutputFormat>,

    /// Output file path, defaults to stdout
    #[arg(short, long, value_name = "OUTPUT_FILE")]
    output: Option<String>,

    /// File with one share link per line (or a Base64 subscription), defaults to stdin
    #[arg(value_name = "INPUT")]
    input: Option<String>,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    let mut settings = match args.config.as_deref() {
        Some(path) => Settings::load_from_file(path)
            .with_context(|| format!("Failed to load settings from {}", path))?,
        None => Settings::default(),
    };
    if let Some(format) = args.format {
        settings.output_format = format;
    }

    // Initialize the logger
    env_logger::init_from_env(Env::default().default_filter_or(settings.log_level.as_str()));

    let content = match args.input.as_deref() {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file {}", path))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read links from stdin")?;
            buf
        }
    };

    let batch = explode_sub(&content, settings.try_base64_batch);
    if let Some(failure) = batch.failures.first() {
        if !settings.skip_failed_links {
            bail!(
                "Failed to decode link on line {}: {}",
                failure.line,
                failure.error
            );
        }
        for failure in &batch.failures {
            error!("line {}: {}", failure.line, failure.error);
        }
    }
    info!(
        "Decoded {} proxies, {} links failed",
        batch.proxies.len(),
        batch.failures.len()
    );

    let document = render(
        &ProxyList {
            proxies: batch.proxies,
        },
        settings.output_format,
    )?;

    match args.output.as_deref() {
        Some(path) => {
            fs::write(path, document)
                .with_context(|| format!("Failed to write output file {}", path))?;
            info!("Successfully wrote proxies to {}", path);
        }
        None => print!("{}", document),
    }
    Ok(())
}

fn render(list: &ProxyList, format: OutputFormat) -> Result<String> {
    let document = match format {
        OutputFormat::Yaml => {
            serde_yaml::to_string(list).context("Failed to serialize proxies as YAML")?
        }
        OutputFormat::Json => {
            let mut json =
                serde_json::to_string_pretty(list).context("Failed to serialize proxies as JSON")?;
            json.push('\n');
            json
        }
    };
    Ok(document)
}
