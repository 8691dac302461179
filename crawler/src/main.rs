//! Job listing crawler
//!
//! Crawls search-result pages for every configured city and job position
//! and saves the listings to data/jobs.json

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use common::{ErrorLog, ResultTable};
use crawler::{crawl, CrawlConfig, HttpFetcher};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(about = "Scrape job listings into a JSON table")]
struct Args {
    /// TOML file overriding the default search
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where to write the scraped listings
    #[arg(long, default_value = "data/jobs.json")]
    output: PathBuf,
}

#[derive(Serialize)]
struct Snapshot<'a> {
    scraped_at: DateTime<Utc>,
    listings: &'a ResultTable,
    failed_urls: &'a ErrorLog,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => CrawlConfig::from_toml_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => CrawlConfig::default(),
    };

    println!("🔍 Starting job crawler...\n");

    let fetcher = HttpFetcher::new(&config.user_agent)?;
    let report = crawl::run(&config, &fetcher, Utc::now())?;

    println!("\n{}", report.summary());
    println!("📊 Total listings found: {}", report.table.len());

    if let Some(dir) = args.output.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }

    let snapshot = Snapshot {
        scraped_at: report.started_at,
        listings: &report.table,
        failed_urls: &report.error_log,
    };
    let json_output = serde_json::to_string_pretty(&snapshot).context("serializing listings")?;
    fs::write(&args.output, json_output)
        .with_context(|| format!("writing {}", args.output.display()))?;

    println!("💾 Saved {} listings to {:?}", report.table.len(), args.output);
    Ok(())
}
