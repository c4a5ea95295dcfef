mod catalog;
mod feed;
mod orbit;
mod telemetry;
mod web;

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};

use crate::catalog::CatalogStore;
use crate::feed::{FeedFetcher, FetchError, RefreshScheduler, RefreshStatus};
use crate::web::Config;

#[derive(Parser)]
#[command(name = "satwatch")]
#[command(about = "Multi-satellite tracking and telemetry service")]
struct Cli {
    /// YAML config file. Built-in defaults apply when omitted.
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP service
    Serve,
    /// Refresh feeds once and print a summary
    Fetch {
        /// Restrict the refresh to one group key
        group: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Config error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Commands::Serve => serve(config).await,
        Commands::Fetch { group } => fetch(config, group.as_deref()).await,
    }
}

fn load_config(path: Option<&str>) -> Result<Config, web::config::ConfigError> {
    match path {
        Some(path) => Config::from_file(path),
        None => Ok(Config::default()),
    }
}

fn build_service(config: &Config) -> Result<(Arc<CatalogStore>, Arc<RefreshScheduler>), FetchError> {
    let catalog = Arc::new(CatalogStore::new(config.feeds.groups.clone()));
    let fetcher = FeedFetcher::new(config.feeds.fetch_timeout)?;
    let refresher = Arc::new(RefreshScheduler::new(
        Arc::clone(&catalog),
        fetcher,
        config.feeds.cache_max_age,
    ));
    Ok((catalog, refresher))
}

async fn serve(config: Config) -> ExitCode {
    let (catalog, refresher) = match build_service(&config) {
        Ok(parts) => parts,
        Err(e) => {
            eprintln!("Startup error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    initial_load(&config, &catalog, &refresher).await;
    spawn_refresh_trigger(config.feeds.cache_max_age, Arc::clone(&refresher));

    match web::run_server(config, catalog, refresher).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Loads the configured startup groups so the catalog is usable before
/// the first request, then logs what arrived.
async fn initial_load(config: &Config, catalog: &CatalogStore, refresher: &RefreshScheduler) {
    for group in &config.feeds.initial_groups {
        let report = refresher.refresh(Some(group), true).await;
        if report.status == RefreshStatus::Error {
            log::warn!("Initial load of {} failed: {}", group, report.errors.join("; "));
        }
    }

    match catalog.resolve_record("ISS") {
        Some(record) => log::info!("ISS found as: {}", record.name),
        None => log::warn!("No ISS entry in the catalog yet"),
    }

    log::info!(
        "Loaded {} satellites across {} groups",
        catalog.total_satellites(),
        catalog.group_count()
    );
}

/// Forces a full refresh every `period`, starting one period from now.
fn spawn_refresh_trigger(period: Duration, refresher: Arc<RefreshScheduler>) {
    // interval() panics on a zero period.
    if period.is_zero() {
        return;
    }

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        // The first tick completes immediately; skip it.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            log::info!("Scheduled feed refresh starting");
            let report = refresher.refresh(None, true).await;
            log::info!(
                "Scheduled refresh finished: {:?}, {} satellites",
                report.status,
                report.total_satellites
            );
        }
    });
}

async fn fetch(config: Config, group: Option<&str>) -> ExitCode {
    let (_catalog, refresher) = match build_service(&config) {
        Ok(parts) => parts,
        Err(e) => {
            eprintln!("Startup error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let report = refresher.refresh(group, true).await;

    for error in &report.errors {
        eprintln!("{}", error);
    }
    println!(
        "Updated {} group(s): {}",
        report.updated_groups.len(),
        report.updated_groups.join(", ")
    );
    println!("{} satellites in catalog", report.total_satellites);

    match report.status {
        RefreshStatus::Error => ExitCode::FAILURE,
        _ => ExitCode::SUCCESS,
    }
}
