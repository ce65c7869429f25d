//! Command-line front end for the quote browser.
//!
//! # Responsibility
//! - Translate subcommands into `quotebook_core` service calls.
//! - Render results as plain text; no business rules live here.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use quotebook_core::config::DEFAULT_CONFIG_FILE;
use quotebook_core::{
    init_logging, Config, HttpRemoteSource, ImportMode, LogNotifier, MemoryKeyValueStore,
    QuoteError, QuoteService, SqliteKeyValueStore, StatusNotifier, SyncOutcome, SyncScheduler,
    SyncService, ALL_CATEGORIES, EXPORT_FILE_NAME,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

#[derive(Debug, Parser)]
#[command(name = "quotebook", version, about = "Browse, collect and sync quotes")]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List quotes, optionally switching the active category.
    List {
        #[arg(long)]
        category: Option<String>,
    },
    /// List known categories.
    Categories,
    /// Show a random quote from the active (or given) category.
    Random {
        #[arg(long)]
        category: Option<String>,
    },
    /// Add a new quote.
    Add {
        text: String,
        category: String,
        /// Also publish the quote to the remote collection.
        #[arg(long)]
        push: bool,
    },
    /// Write all quotes to a JSON file.
    Export {
        #[arg(long, default_value = EXPORT_FILE_NAME)]
        out: PathBuf,
    },
    /// Read quotes from a JSON file.
    Import {
        file: PathBuf,
        /// Replace the current list instead of appending.
        #[arg(long)]
        replace: bool,
    },
    /// Run one sync cycle against the remote collection.
    Sync,
    /// Sync periodically until interrupted.
    Watch {
        #[arg(long)]
        interval_secs: Option<u64>,
    },
}

/// Prints sync outcomes for the user and forwards them to the log.
struct ConsoleNotifier;

impl StatusNotifier for ConsoleNotifier {
    fn notify(&self, outcome: &SyncOutcome) {
        LogNotifier.notify(outcome);
        match outcome {
            SyncOutcome::Applied { changes } => {
                println!("Synced: {} new quote(s) from server.", changes.len());
                for change in changes {
                    println!("  + {}", change.quote.text);
                }
            }
            SyncOutcome::UpToDate => println!("Synced: already up to date."),
            SyncOutcome::NoData => println!("Sync: server returned no data."),
            SyncOutcome::Skipped => println!("Sync: previous sync still running, skipped."),
            SyncOutcome::Failed(err) => eprintln!("Sync failed: {err}"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load_or_default(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;

    if let Some(dir) = &config.logging.dir {
        if let Err(err) = init_logging(&config.logging.level, dir) {
            eprintln!("warning: file logging disabled: {err}");
        }
    }

    let durable = Arc::new(
        SqliteKeyValueStore::open(&config.storage.db_path)
            .with_context(|| format!("opening {}", config.storage.db_path.display()))?,
    );
    let service = QuoteService::open(durable, Arc::new(MemoryKeyValueStore::new()))?;

    match cli.command {
        Command::List { category } => list(service, category),
        Command::Categories => {
            categories(&service);
            Ok(())
        }
        Command::Random { category } => random(service, category),
        Command::Add {
            text,
            category,
            push,
        } => add(&config, service, &text, &category, push).await,
        Command::Export { out } => {
            std::fs::write(&out, service.export_json()?)
                .with_context(|| format!("writing {}", out.display()))?;
            println!("Exported {} quote(s) to {}.", service.store().len(), out.display());
            Ok(())
        }
        Command::Import { file, replace } => {
            let mut service = service;
            let document = std::fs::read_to_string(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            let mode = if replace {
                ImportMode::Replace
            } else {
                ImportMode::Append
            };
            match service.import_json(&document, mode) {
                Ok(count) => println!("Quotes imported successfully! ({count} imported)"),
                Err(QuoteError::Parse(reason)) => anyhow::bail!(
                    "Error importing file. Please ensure it's a valid JSON file. ({reason})"
                ),
                Err(other) => return Err(other.into()),
            }
            Ok(())
        }
        Command::Sync => {
            let sync = build_sync(&config, service)?;
            cycle_result(sync.run_cycle().await)
        }
        Command::Watch { interval_secs } => {
            let interval = interval_secs
                .map(Duration::from_secs)
                .unwrap_or_else(|| config.sync.interval());
            let sync = build_sync(&config, service)?;
            let mut scheduler = SyncScheduler::new(sync);
            if !scheduler.start(interval) {
                anyhow::bail!("sync interval must be greater than zero");
            }
            println!(
                "Syncing every {}s; press Ctrl-C to stop.",
                interval.as_secs_f64()
            );
            tokio::signal::ctrl_c().await?;
            scheduler.shutdown().await;
            Ok(())
        }
    }
}

fn list(mut service: QuoteService, category: Option<String>) -> Result<()> {
    let quotes = match category {
        Some(category) => service.filter(&category)?,
        None => service.filtered(),
    };
    if quotes.is_empty() {
        println!("No quotes available in this category.");
    }
    for quote in quotes {
        println!("[{}] {}", quote.category, quote.text);
    }
    Ok(())
}

fn categories(service: &QuoteService) {
    let current = service.current_category();
    let mark = |name: &str| if name == current { "*" } else { " " };
    println!("{} {}", mark(ALL_CATEGORIES), ALL_CATEGORIES);
    for category in service.categories() {
        println!("{} {}", mark(&category), category);
    }
}

fn random(mut service: QuoteService, category: Option<String>) -> Result<()> {
    if let Some(category) = category {
        service.filter(&category)?;
    }
    match service.show_random() {
        Ok(quote) => {
            println!("\"{}\"", quote.text);
            println!("Category: {}", quote.category.to_uppercase());
        }
        Err(QuoteError::EmptyCollection) => println!("No quotes available in this category."),
        Err(other) => return Err(other.into()),
    }
    Ok(())
}

async fn add(
    config: &Config,
    mut service: QuoteService,
    text: &str,
    category: &str,
    push: bool,
) -> Result<()> {
    let quote = match service.add_quote(text, category) {
        Ok(quote) => quote,
        Err(QuoteError::Validation(_)) => {
            anyhow::bail!("Please fill in both the quote text and category.")
        }
        Err(other) => return Err(other.into()),
    };
    println!("Quote added successfully!");

    if push {
        let sync = build_sync(config, service)?;
        match sync.post_quote(&quote).await {
            Ok(receipt) => println!("Published to server (id {:?}).", receipt.id),
            Err(err) => eprintln!("Could not publish to server: {err}"),
        }
    }
    Ok(())
}

/// A failed one-shot cycle fails the command; every other outcome is success.
fn cycle_result(outcome: SyncOutcome) -> Result<()> {
    match outcome {
        SyncOutcome::Failed(err) => Err(anyhow::Error::new(err).context("sync failed")),
        _ => Ok(()),
    }
}

fn build_sync(config: &Config, service: QuoteService) -> Result<SyncService> {
    let remote = HttpRemoteSource::new(&config.sync.endpoint, config.sync.timeout())
        .context("building HTTP client")?;
    Ok(SyncService::new(
        Arc::new(remote),
        Arc::new(Mutex::new(service)),
        Arc::new(ConsoleNotifier),
        config.sync.fetch_limit,
    ))
}
