use anyhow::{Context, Result};
use clap::Parser;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use fastfeed::config::Config;
use fastfeed::{parse_with_options, Feed, ParseOptions};

/// SEC-017: Maximum feed document size read from disk or stdin (50 MB).
const MAX_INPUT_SIZE: u64 = 50 * 1024 * 1024;

#[derive(Parser, Debug)]
#[command(name = "fastfeed", about = "Extract RSS/Atom feeds into JSON records")]
struct Args {
    /// Feed files to parse (reads stdin when none are given)
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Skip body fields (description, summary, content)
    #[arg(long)]
    no_content: bool,

    /// Harvest namespaced extension elements
    #[arg(long)]
    extensions: bool,

    /// Print one JSON document per line instead of pretty output
    #[arg(long)]
    compact: bool,

    /// Config file (defaults to ~/.config/fastfeed/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn load_config(args: &Args) -> Result<Config> {
    match args.config.clone().or_else(Config::default_path) {
        Some(path) => Config::load(&path)
            .with_context(|| format!("Failed to load config file: {}", path.display())),
        None => Ok(Config::default()),
    }
}

/// Config supplies the defaults, flags only ever switch features on or off on top of it.
fn resolve_options(args: &Args, config: &Config) -> (ParseOptions, bool) {
    let mut options = config.parse_options();
    if args.no_content {
        options = options.extract_content(false);
    }
    if args.extensions {
        options = options.extract_extensions(true);
    }
    (options, config.pretty && !args.compact)
}

fn read_input(path: Option<&Path>) -> Result<String> {
    let mut content = String::new();
    match path {
        Some(path) => {
            let metadata = std::fs::metadata(path)
                .with_context(|| format!("Failed to read feed file: {}", path.display()))?;
            if metadata.len() > MAX_INPUT_SIZE {
                anyhow::bail!(
                    "Feed file '{}' is {} bytes (max {} bytes)",
                    path.display(),
                    metadata.len(),
                    MAX_INPUT_SIZE
                );
            }
            std::fs::File::open(path)
                .and_then(|mut file| file.read_to_string(&mut content))
                .with_context(|| format!("Failed to read feed file: {}", path.display()))?;
        }
        None => {
            let read = std::io::stdin()
                .take(MAX_INPUT_SIZE + 1)
                .read_to_string(&mut content)
                .context("Failed to read feed from stdin")?;
            if read as u64 > MAX_INPUT_SIZE {
                anyhow::bail!("Feed on stdin exceeds {} bytes", MAX_INPUT_SIZE);
            }
        }
    }
    Ok(content)
}

fn write_feed(out: &mut impl Write, feed: &Feed, pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, feed)?;
    } else {
        serde_json::to_writer(&mut *out, feed)?;
    }
    writeln!(out)?;
    Ok(())
}

fn run_one(
    out: &mut impl Write,
    path: Option<&Path>,
    options: &ParseOptions,
    pretty: bool,
) -> Result<()> {
    let label = path.map_or_else(|| "<stdin>".to_string(), |p| p.display().to_string());
    let content = read_input(path)?;

    let feed = parse_with_options(&content, options)
        .with_context(|| format!("Failed to parse feed: {label}"))?;
    tracing::info!(source = %label, kind = ?feed.kind, items = feed.items.len(), "Parsed feed");

    write_feed(out, &feed, pretty).context("Failed to write JSON output")
}

/// Attempts every file, reporting failures on stderr. Returns how many failed.
fn run_files(
    out: &mut impl Write,
    files: &[PathBuf],
    options: &ParseOptions,
    pretty: bool,
) -> usize {
    let mut failures = 0usize;
    for path in files {
        if let Err(e) = run_one(&mut *out, Some(path), options, pretty) {
            eprintln!("Error: {:#}", e);
            failures += 1;
        }
    }
    failures
}

fn main() -> Result<()> {
    // Initialize tracing for debug logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;
    let (options, pretty) = resolve_options(&args, &config);
    tracing::debug!(?options, pretty, "Resolved parse options");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if args.files.is_empty() {
        return run_one(&mut out, None, &options, pretty);
    }

    let failures = run_files(&mut out, &args.files, &options, pretty);
    if failures > 0 {
        anyhow::bail!("{} of {} feeds failed", failures, args.files.len());
    }
    Ok(())
}
