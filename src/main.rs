use anyhow::Result;
use clap::{Arg, Command};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};

use comic_cataloger::config::Config;
use comic_cataloger::issue::IssueBuilder;
use comic_cataloger::pdf::MutoolEngine;
use comic_cataloger::sanitizer::Sanitizer;
use comic_cataloger::scanner::DirectoryScanner;
use comic_cataloger::stories;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter("comic_cataloger=info,warn")
        .init();

    let matches = Command::new("Comic Cataloger")
        .version("0.1.0")
        .about("Catalogs comic-book issues from their table-of-contents bookmarks")
        .arg(
            Arg::new("issue-dir")
                .short('d')
                .long("issue-dir")
                .value_name("DIR")
                .help("Directory containing issue PDFs to catalog")
                .required(true),
        )
        .arg(
            Arg::new("output-dir")
                .short('o')
                .long("output-dir")
                .value_name("DIR")
                .help("Output directory for the catalog")
                .default_value("./output"),
        )
        .arg(
            Arg::new("workers")
                .short('w')
                .long("workers")
                .value_name("NUM")
                .help("Number of parallel workers"),
        )
        .arg(
            Arg::new("max-files")
                .short('n')
                .long("max-files")
                .value_name("NUM")
                .help("Catalog at most this many issues"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let issue_dir = PathBuf::from(matches.get_one::<String>("issue-dir").unwrap());
    let output_dir = PathBuf::from(matches.get_one::<String>("output-dir").unwrap());
    let verbose = matches.get_flag("verbose");

    if verbose {
        info!("Verbose logging enabled");
    }

    // Load configuration
    let mut config = Config::load().unwrap_or_else(|e| {
        warn!("Failed to load config, using defaults: {}", e);
        Config::default()
    });

    // CLI flags override the config file
    if let Some(workers) = matches.get_one::<String>("workers") {
        config.performance.max_workers = workers.parse()?;
    }
    if let Some(max_files) = matches.get_one::<String>("max-files") {
        config.scan.max_to_scan = Some(max_files.parse()?);
    }
    config.validate()?;

    info!("🚀 Comic Cataloger starting...");
    info!("📁 Issue directory: {}", issue_dir.display());
    info!("📂 Output directory: {}", output_dir.display());
    info!("🔧 {}", config.summary());

    // Validate input directory
    if !issue_dir.exists() {
        error!("Issue directory does not exist: {}", issue_dir.display());
        return Err(anyhow::anyhow!("Issue directory not found"));
    }

    // Create output directory
    tokio::fs::create_dir_all(&output_dir).await?;

    let engine = Arc::new(MutoolEngine::new());
    let builder = IssueBuilder::new(
        config.titles.skip_series.clone(),
        config.titles.known_titles.clone(),
    )
    .with_extension(config.scan.extension.clone());
    let scanner = DirectoryScanner::new(engine, builder, config.performance.max_workers);

    // Scan issues
    let start_time = std::time::Instant::now();
    let mut issues = scanner.scan(&issue_dir, config.scan.max_to_scan).await?;

    // Reconcile near-duplicate titles across the run
    let sanitizer = Sanitizer::new(config.titles.known_titles.clone());
    let renames = sanitizer.sanitize(&mut issues).len();

    // Aggregate episodes into stories
    let catalog = stories::aggregate(&issues);
    let duration = start_time.elapsed();

    for story in &catalog {
        info!(
            "📖 {} - {} ({} episodes, issues {})",
            story.series,
            story.title,
            story.episodes.len(),
            story.issue_summary()
        );
    }

    // Write the catalog
    let catalog_path = output_dir.join("catalog.json");
    let json = serde_json::to_string_pretty(&catalog)?;
    tokio::fs::write(&catalog_path, json).await?;

    info!("🎉 Cataloging completed in {:.2}s", duration.as_secs_f64());
    info!("✅ Issues cataloged: {}", issues.len());
    info!("✏️ Titles reconciled: {}", renames);
    info!("📚 Stories found: {}", catalog.len());
    info!("💾 Catalog written to {}", catalog_path.display());

    Ok(())
}
