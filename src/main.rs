//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `case_locator` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use std::io::{self, BufRead, Write};
use std::process;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use case_locator::config::{Command, Opt, GEOCODING_API_KEY_ENV};
use case_locator::geocode::GoogleGeocoder;
use case_locator::initialization::{init_client, init_logger_with};
use case_locator::notifications::{generate_topic, LoggingSubscriber, TopicSubscriptions};
use case_locator::reports::CovidApiSource;
use case_locator::storage::{JsonFileStore, KeyValueStore};
use case_locator::{Config, LocationHierarchy, Resolver};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file (if it exists)
    // This allows setting GEOCODING_API_KEY in .env without exporting it manually
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let opt = Opt::parse();
    init_logger_with(opt.log_level.clone().into(), opt.log_format.clone())
        .context("Failed to initialize logger")?;

    if let Err(e) = run(opt).await {
        eprintln!("case_locator error: {:#}", e);
        process::exit(1);
    }
    Ok(())
}

async fn run(opt: Opt) -> Result<()> {
    let (lat, long, is_home) = match &opt.command {
        Command::Topic { names } => {
            println!("{}", generate_topic(names.as_slice()));
            return Ok(());
        }
        Command::Home { lat, long } => (*lat, *long, true),
        Command::Region { lat, long } => (*lat, *long, false),
    };

    let api_key = std::env::var(GEOCODING_API_KEY_ENV).unwrap_or_default();
    if api_key.is_empty() {
        log::warn!(
            "{} is not set; the geocoding service will likely reject requests",
            GEOCODING_API_KEY_ENV
        );
    }
    let config = opt.to_config(api_key);
    let resolver = build_resolver(&config)?;

    if is_home {
        run_home(&resolver, &config, lat, long).await?;
    } else {
        run_region(&resolver, lat, long).await?;
    }

    resolver.stats().log_summary();
    Ok(())
}

fn build_resolver(config: &Config) -> Result<Resolver> {
    let client = init_client(config).context("Failed to initialize HTTP client")?;
    let geocoder = GoogleGeocoder::new(
        client.clone(),
        &config.geocoding_base_url,
        config.geocoding_api_key.clone(),
    );
    let reports = CovidApiSource::new(client, &config.reports_base_url);
    Ok(Resolver::new(Arc::new(geocoder), Arc::new(reports), config))
}

async fn run_home(resolver: &Resolver, config: &Config, lat: f64, long: f64) -> Result<()> {
    let store: Arc<dyn KeyValueStore> = Arc::new(JsonFileStore::new(&config.store_path));

    let resolution = resolver
        .resolve_home(lat, long, store.as_ref(), confirm_new_location)
        .await
        .with_context(|| format!("Failed to resolve home location for ({}, {})", lat, long))?;

    let Some(home) = resolution else {
        println!("No location or report available for ({}, {})", lat, long);
        return Ok(());
    };

    let subscriptions = TopicSubscriptions::new(Arc::new(LoggingSubscriber), store.clone());
    home.subscribe(&subscriptions, store.as_ref())
        .await
        .context("Failed to update topic subscriptions")?;

    let summary = &home.summary;
    println!("{}", describe(&home.location));
    println!(
        "{} confirmed ({:+}), {} deaths ({:+}) as of {}",
        summary.confirmed, summary.confirmed_diff, summary.deaths, summary.deaths_diff, summary.date
    );
    println!(
        "{} marker(s); home location {}",
        home.markers.len(),
        if home.updated { "saved" } else { "unchanged" }
    );
    Ok(())
}

async fn run_region(resolver: &Resolver, lat: f64, long: f64) -> Result<()> {
    let resolution = resolver
        .resolve_region(lat, long)
        .await
        .with_context(|| format!("Failed to resolve region for ({}, {})", lat, long))?;

    match resolution {
        Some(region) => {
            let entity = &region.matched.entity;
            println!("{}", describe(&region.location));
            println!(
                "{} ({:?}): {} confirmed, {} deaths as of {}",
                entity.name, region.matched.level, entity.confirmed, entity.deaths, entity.date
            );
            println!("{} marker(s)", region.markers.len());
        }
        None => println!("No location or report available for ({}, {})", lat, long),
    }
    Ok(())
}

fn describe(location: &LocationHierarchy) -> String {
    [
        location.country.as_ref(),
        location.state.as_ref(),
        location.county.as_ref(),
        location.city.as_ref(),
    ]
    .into_iter()
    .flatten()
    .map(|node| node.name.as_str())
    .collect::<Vec<_>>()
    .join(" / ")
}

/// Asks on stdin whether a changed home location should replace the stored one.
fn confirm_new_location(stored: &LocationHierarchy, new: &LocationHierarchy) -> bool {
    print!(
        "Your location has changed from {} to {}. Use the new location? [y/N] ",
        stored.resolved_name, new.resolved_name
    );
    if io::stdout().flush().is_err() {
        return false;
    }

    let mut answer = String::new();
    match io::stdin().lock().read_line(&mut answer) {
        Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
        Err(_) => false,
    }
}
