//! ratsinfo-bot CLI
//!
//! Runs one fetch-filter-publish cycle per invocation and exits; scheduling
//! is left to cron or a systemd timer.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use ratsinfo_bot::{
    config::Config,
    error::Result,
    pipeline::run_publish,
    services::{MastodonClient, OparlClient, PaperSource},
    status::build_status,
    storage::{FileWatermarkStore, WatermarkStore},
    utils::url::extract_paper_id,
};

/// ratsinfo-bot - Council Paper Announcement Bot
#[derive(Parser, Debug)]
#[command(
    name = "ratsinfo-bot",
    version,
    about = "Announces newly published city council papers on Mastodon"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "data/config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch new papers and post them
    Run,

    /// Print would-be statuses without posting
    Preview,

    /// Validate the configuration file
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load_or_default(&cli.config);
    config.apply_env();

    match cli.command {
        Command::Run => run(&config).await?,
        Command::Preview => preview(&config).await?,
        Command::Validate => validate(&config)?,
    }

    Ok(())
}

/// Run one full publish cycle.
async fn run(config: &Config) -> Result<()> {
    log::info!("ratsinfo-bot starting...");

    let source = OparlClient::new(config.api.clone())?;
    let publisher = MastodonClient::new(config.mastodon.clone())?;
    let store = FileWatermarkStore::new(&config.bot.state_file);

    let outcome = run_publish(config, &source, &publisher, &store).await;

    log::info!(
        "Run complete: {} fetched, {} skipped, {} published, {} failed, watermark {}",
        outcome.fetched,
        outcome.skipped,
        outcome.published,
        outcome.failed,
        outcome.watermark
    );

    Ok(())
}

/// Fetch recent papers and print their statuses without posting.
async fn preview(config: &Config) -> Result<()> {
    let source = OparlClient::new(config.api.clone())?;
    let store = FileWatermarkStore::new(&config.bot.state_file);

    let papers = source.fetch_recent().await?;
    let watermark = store.load().await;
    log::info!("{} paper(s) fetched, watermark {}", papers.len(), watermark);

    for paper in &papers {
        let id = extract_paper_id(&paper.id);
        let status = build_status(paper, &config.bot.hashtags);
        println!("=== PREVIEW (id {}) ===", id);
        println!("{}", status);
        println!();
    }

    Ok(())
}

/// Validate the configuration file.
fn validate(config: &Config) -> Result<()> {
    config.validate()?;
    log::info!("Configuration OK");
    Ok(())
}
