//! Deep link router (host simulator)
//!
//! Plays the role of the host application: builds the navigation roots from
//! config, feeds deep links through the container the way system callbacks
//! would, and prints the resulting navigation state.
//!
//! # Architecture Overview
//!
//! ```text
//!   URL open / push / shortcut
//!   ─────────────────────────────┐
//!                                ▼
//!   ┌──────────┐   ┌──────────────────────┐   ┌───────────────┐
//!   │ deeplink │──▶│ RootModuleContainer  │──▶│  Navigator    │
//!   │  parser  │   │  owner lookup        │   │ active root   │
//!   └──────────┘   └──────────┬───────────┘   └───────────────┘
//!                             │ route(context)
//!                             ▼
//!                  ┌──────────────────────┐   ┌───────────────┐
//!                  │  router tree (root)  │──▶│ EntityFetcher │
//!                  │  local → children    │   │  (data layer) │
//!                  └──────────┬───────────┘   └───────────────┘
//!                             │ push / present / alert (activates the root)
//!                             ▼
//!                  ┌──────────────────────┐
//!                  │ NavigationRoot stack │──▶ NavigationEvent stream
//!                  └──────────────────────┘
//! ```

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

use deeplink_router::config::{load_config, AppConfig};
use deeplink_router::data::InMemoryCatalog;
use deeplink_router::observability::logging::init_logging;
use deeplink_router::{RawDeepLinkPayload, RootModuleContainer};

#[derive(Parser)]
#[command(name = "deeplink-router")]
#[command(about = "Route deep links through the navigation roots and print the result", long_about = None)]
struct Cli {
    /// TOML config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// URL deep link (repeatable).
    #[arg(short, long = "url")]
    urls: Vec<String>,

    /// Home screen shortcut type, e.g. "bookings" or "restaurant:42" (repeatable).
    #[arg(short, long = "shortcut")]
    shortcuts: Vec<String>,

    /// Push notification payload as JSON (repeatable).
    #[arg(short, long = "notification")]
    notifications: Vec<String>,

    /// Deliver all links at once instead of one after another.
    #[arg(long)]
    concurrent: bool,

    /// Print the navigation events produced by the run.
    #[arg(long)]
    events: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };
    init_logging(&config.observability)?;

    tracing::info!(
        scheme = %config.deeplinks.scheme,
        tabs = config.navigation.tabs.len(),
        initial_root = %config.navigation.initial_root,
        "Configuration loaded"
    );

    let catalog = InMemoryCatalog::from_config(&config.data);
    let container = RootModuleContainer::from_config(&config, Arc::new(catalog));

    let mut payloads: Vec<RawDeepLinkPayload> = Vec::new();
    payloads.extend(cli.urls.into_iter().map(RawDeepLinkPayload::Url));
    payloads.extend(cli.shortcuts.into_iter().map(RawDeepLinkPayload::Shortcut));
    for raw in cli.notifications {
        payloads.push(RawDeepLinkPayload::Notification(serde_json::from_str(&raw)?));
    }

    let mut events = cli.events.then(|| container.navigator().subscribe());

    if cli.concurrent {
        let handles: Vec<_> = payloads
            .into_iter()
            .map(|raw| container.spawn_deep_link(raw))
            .collect();
        for handle in handles {
            handle.await?;
        }
    } else {
        for raw in payloads {
            match container.dispatch_raw(raw.clone()).await {
                Ok(report) => println!("{}", serde_json::to_string(&report)?),
                Err(error) => eprintln!("ignored {}: {}", raw, error),
            }
        }
    }

    if let Some(rx) = events.as_mut() {
        while let Ok(event) = rx.try_recv() {
            println!("{}", serde_json::to_string(&event)?);
        }
    }

    let snapshot = container.navigator().snapshot();
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
