// CLI module - command-line argument parsing and handlers
//
// Provides:
// - config --show: Display effective configuration
// - config --reset: Regenerate config file with defaults
// - config --path: Print the config file location
// - snapshot <feed>: Fetch one feed and print a page of it, no TUI

use crate::config::{Config, VERSION};
use crate::feeds::{FeedClient, FeedItem, FeedKind, GithubRepo, HnStory, NewsItem, TickerData};
use crate::fetch::FetchSnapshot;
use crate::paging::{NavAction, PaginatedListController, Presentation};
use crate::tui::components::controls;
use crate::tui::theme::Theme;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::time::{Duration, Instant};

/// tickerdash - terminal dashboard for markets, news and trending code
#[derive(Parser)]
#[command(name = "tickerdash")]
#[command(version = VERSION)]
#[command(about = "Terminal dashboard for markets, news and trending code", long_about = None)]
pub struct Cli {
    /// Serve bundled sample data instead of calling the backend
    #[arg(long, global = true)]
    pub demo: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },

    /// Print one page of a feed and exit
    Snapshot {
        /// Feed to fetch
        #[arg(value_enum)]
        feed: FeedKind,

        /// 1-based page number (clamped to the available pages)
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
}

/// Handle config commands. Returns true if a command was handled (exit after).
///
/// `snapshot` needs the runtime and a loaded config, so it is left to the caller.
pub fn handle_cli(cli: &Cli) -> bool {
    match &cli.command {
        Some(Commands::Config { show, reset, path }) => {
            if *path {
                handle_config_path();
            } else if *show {
                handle_config_show();
            } else if *reset {
                handle_config_reset();
            } else {
                // No flag provided, show help
                println!("Usage: tickerdash config [--show|--reset|--path]");
                println!();
                println!("Options:");
                println!("  --show    Display effective configuration");
                println!("  --reset   Reset config file to defaults");
                println!("  --path    Show config file path");
            }
            true
        }
        Some(Commands::Snapshot { .. }) | None => false,
    }
}

fn handle_config_path() {
    match Config::config_path() {
        Some(path) => println!("{}", path.display()),
        None => {
            eprintln!("Error: Could not determine config path");
            std::process::exit(1);
        }
    }
}

fn handle_config_show() {
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };

    println!("# Effective configuration (env > file > defaults)");
    println!();
    print!("{}", config.to_toml());

    // Show source info
    println!();
    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("# Source: {}", path.display());
        } else {
            println!("# Source: defaults (no config file)");
        }
    }
}

fn confirm_overwrite(path: &std::path::Path) -> bool {
    eprint!(
        "Config file exists at {}. Overwrite? [y/N] ",
        path.display()
    );
    // Without a prompt or an answer, take the safe default
    if std::io::stderr().flush().is_err() {
        return false;
    }
    let mut input = String::new();
    if std::io::stdin().read_line(&mut input).is_err() {
        return false;
    }
    input.trim().eq_ignore_ascii_case("y")
}

fn handle_config_reset() {
    let Some(path) = Config::config_path() else {
        eprintln!("Error: Could not determine config path");
        std::process::exit(1);
    };

    if path.exists() && !confirm_overwrite(&path) {
        println!("Aborted.");
        return;
    }

    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            eprintln!("Error creating directory: {}", e);
            std::process::exit(1);
        }
    }

    // Write the default config (using Config's single source of truth)
    if let Err(e) = std::fs::write(&path, Config::default().to_toml()) {
        eprintln!("Error writing config: {}", e);
        std::process::exit(1);
    }

    println!("Config reset to defaults: {}", path.display());
}

// ─────────────────────────────────────────────────────────────────────────────
// Snapshot
// ─────────────────────────────────────────────────────────────────────────────

/// Fetch `kind` once (with the panel's retry policy) and render `page` as text
pub async fn snapshot(
    config: &Config,
    client: &FeedClient,
    kind: FeedKind,
    page: usize,
) -> Result<String> {
    match kind {
        FeedKind::Tickers => snapshot_feed::<TickerData>(config, client, page).await,
        FeedKind::News => snapshot_feed::<NewsItem>(config, client, page).await,
        FeedKind::Github => snapshot_feed::<GithubRepo>(config, client, page).await,
        FeedKind::HackerNews => snapshot_feed::<HnStory>(config, client, page).await,
    }
}

async fn snapshot_feed<T: FeedItem>(
    config: &Config,
    client: &FeedClient,
    page: usize,
) -> Result<String> {
    let kind = T::KIND;
    let panel = config.panels.get(kind);
    let policy = panel.fetch_policy(kind).with_refetch_interval(None);

    let mut query = client.query::<T>(policy);
    let settled = wait_settled(&mut query.subscribe()).await;
    query.dispose();
    let snapshot = settled?;

    let mut controller = PaginatedListController::new(
        panel
            .controller_config(Duration::ZERO)
            .with_context(|| format!("Invalid [panels.{}] settings", kind.key()))?,
    )?;
    let now = Instant::now();
    controller.observe(&snapshot, now);
    controller.navigate(NavAction::Goto(page), now);

    let variant = panel.controls;
    let theme = Theme::default();
    let presentation = controller.render(
        &snapshot,
        now,
        |item: &T| item.summary(),
        |nav| {
            controls::render(variant, nav, &theme)
                .spans
                .iter()
                .map(|s| s.content.as_ref())
                .collect()
        },
    );
    controller.dispose();

    let mut out = format!("{}\n", kind.title());
    match presentation {
        Presentation::Loading => out.push_str("Loading…\n"),
        Presentation::Empty if snapshot.is_error() => {
            out.push_str("No data available\nUnable to fetch data. Please try again later.\n")
        }
        Presentation::Empty => out.push_str("No data available\n"),
        Presentation::Populated {
            items, controls, ..
        } => {
            for line in items {
                out.push_str(&format!("  {}\n", line));
            }
            if let Some(controls) = controls {
                out.push_str(&format!("{}\n", controls));
            }
        }
    }
    Ok(out)
}

/// Wait until the first fetch cycle finishes, successfully or not
async fn wait_settled<T>(
    rx: &mut tokio::sync::watch::Receiver<FetchSnapshot<T>>,
) -> Result<FetchSnapshot<T>> {
    loop {
        {
            let snapshot = rx.borrow_and_update();
            if !snapshot.is_loading() && !snapshot.is_fetching {
                return Ok(snapshot.clone());
            }
        }
        rx.changed()
            .await
            .context("Feed task stopped before producing a result")?;
    }
}
