//! Shutdown alerts CLI
//!
//! Local entry point for checking addresses and managing the address book.

use std::path::PathBuf;
use std::time::Duration;

use chrono::Utc;
use clap::{Parser, Subcommand};
use shutdown_alerts::{
    error::{AppError, Result},
    models::{City, Config, Service, User},
    pipeline,
    services::{CachedFetcher, HttpFetcher, PageExtractor, report},
    storage::{AddressBook, LocalStorage, PageCache},
};

/// Planned utility shutdowns for your addresses
#[derive(Parser, Debug)]
#[command(
    name = "shutdown-alerts",
    version,
    about = "Planned utility shutdown alerts"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "storage/config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check addresses for upcoming shutdowns
    Check {
        /// Free-text addresses, e.g. "Lenina, д.11"
        #[arg(required = true)]
        addresses: Vec<String>,

        /// City code (SPB, RND); defaults to the configured city
        #[arg(long)]
        city: Option<City>,

        /// Services to check; defaults to the configured list
        #[arg(long = "service")]
        services: Vec<Service>,

        /// Print matches as JSON instead of a report
        #[arg(long)]
        json: bool,
    },

    /// Extract shutdown records from a saved provider page
    Extract {
        /// HTML file to read
        file: PathBuf,

        #[arg(long)]
        city: Option<City>,

        /// Use the selectors configured for this service
        #[arg(long, default_value = "electricity")]
        service: Service,

        #[arg(long)]
        json: bool,
    },

    /// Manage stored addresses
    Address {
        #[command(subcommand)]
        action: AddressAction,
    },

    /// Check every stored address of a user and print the report
    Notify {
        #[arg(long)]
        user: i64,

        #[arg(long)]
        city: Option<City>,

        #[arg(long = "service")]
        services: Vec<Service>,
    },

    /// Validate configuration and source selectors
    Validate,
}

#[derive(Subcommand, Debug)]
enum AddressAction {
    /// Store an address for a user
    Add {
        #[arg(long)]
        user: i64,
        address: String,
    },
    /// Forget one address of a user
    Remove {
        #[arg(long)]
        user: i64,
        address: String,
    },
    /// List a user's addresses
    List {
        #[arg(long)]
        user: i64,
    },
    /// Forget every address of a user
    Clear {
        #[arg(long)]
        user: i64,
    },
}

/// Initialize logging; `RUST_LOG` overrides `level`.
fn init_logging(level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn build_fetcher(config: &Config) -> Result<CachedFetcher<HttpFetcher>> {
    Ok(CachedFetcher::new(
        HttpFetcher::new(&config.fetcher)?,
        PageCache::new(&config.paths.cache_dir),
        Duration::from_secs(config.fetcher.cache_ttl_secs),
    ))
}

/// Run a check and print either the rendered report or JSON matches.
async fn check_and_print(
    config: &Config,
    city: City,
    addresses: &[String],
    services: &[Service],
    json: bool,
) -> Result<()> {
    let fetcher = build_fetcher(config)?;
    let now = Utc::now();
    let outcome = pipeline::run_check(config, &fetcher, city, addresses, services, now).await?;

    log::info!(
        "Fetched {}/{} page(s), {} record(s) extracted",
        outcome.page_total - outcome.page_failures,
        outcome.page_total,
        outcome.records_total
    );

    if json {
        let upcoming: Vec<_> = outcome.reports.iter().map(|r| r.upcoming(&now)).collect();
        println!("{}", serde_json::to_string_pretty(&upcoming)?);
    } else {
        println!("{}", report::render_report(addresses, &outcome.reports, &now));
    }
    Ok(())
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let loaded = Config::load(&cli.config);
    let level = match (&loaded, cli.verbose) {
        (_, true) => "debug".to_string(),
        (Ok(config), false) => config.logging.level.clone(),
        (Err(_), false) => "info".to_string(),
    };
    init_logging(&level);

    let config = match loaded {
        Ok(config) => {
            log::info!("Loaded configuration from {}", cli.config.display());
            config
        }
        Err(e) => {
            log::warn!(
                "Config load failed from {}: {}. Using defaults.",
                cli.config.display(),
                e
            );
            Config::default()
        }
    };
    let book = LocalStorage::new(&config.paths.address_book);

    match cli.command {
        Command::Check {
            addresses,
            city,
            services,
            json,
        } => {
            let city = city.unwrap_or(config.default_city);
            let services = if services.is_empty() {
                config.services.clone()
            } else {
                services
            };
            check_and_print(&config, city, &addresses, &services, json).await?;
        }

        Command::Extract {
            file,
            city,
            service,
            json,
        } => {
            let city = city.unwrap_or(config.default_city);
            let selectors = config
                .source(city, service)
                .map(|source| source.selectors.clone())
                .unwrap_or_default();
            let extractor = PageExtractor::new(city, config.timezone(city)?, &selectors)?;

            let html = std::fs::read_to_string(&file)?;
            let (schedule, stats) = extractor.extract_records_with_stats(&html);
            log::info!(
                "{} row(s) seen, {} used, {} skipped",
                stats.rows_seen,
                stats.rows_used,
                stats.rows_skipped
            );

            if json {
                println!("{}", serde_json::to_string_pretty(&schedule)?);
            } else {
                for entry in &schedule {
                    println!("{} ({})", entry.address.raw, entry.address.normalized_street());
                    for range in &entry.ranges {
                        println!("    {range}");
                    }
                }
            }
        }

        Command::Address { action } => match action {
            AddressAction::Add { user, address } => {
                let parsed = User::new(user, config.default_city, &address);
                if !parsed.address.is_resolved() {
                    log::warn!(
                        "'{}' has no recognizable street and house; it will never match",
                        address
                    );
                }
                if book.add(user, &address).await? {
                    log::info!("Added '{}' for user {}", address, user);
                } else {
                    log::info!("'{}' is already stored for user {}", address, user);
                }
            }
            AddressAction::Remove { user, address } => {
                if !book.remove(user, &address).await? {
                    return Err(AppError::validation(format!(
                        "'{address}' is not stored for user {user}"
                    )));
                }
                log::info!("Removed '{}' for user {}", address, user);
            }
            AddressAction::List { user } => {
                for address in book.list(user).await? {
                    println!("{address}");
                }
            }
            AddressAction::Clear { user } => {
                book.clear(user).await?;
                log::info!("Cleared addresses of user {}", user);
            }
        },

        Command::Notify {
            user,
            city,
            services,
        } => {
            let city = city.unwrap_or(config.default_city);
            let services = if services.is_empty() {
                config.services.clone()
            } else {
                services
            };
            let addresses = book.list(user).await?;
            if addresses.is_empty() {
                println!("{}", report::render_report(&[], &[], &Utc::now()));
            } else {
                check_and_print(&config, city, &addresses, &services, false).await?;
            }
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            match pipeline::run_validate(&config) {
                Ok(summary) => log::info!(
                    "✓ {} cities, {} sources, {} services enabled",
                    summary.cities,
                    summary.sources,
                    summary.services
                ),
                Err(e) => {
                    log::error!("Config validation failed: {}", e);
                    return Err(e);
                }
            }

            log::info!("All validations passed!");
        }
    }

    Ok(())
}
