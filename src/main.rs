// tickerdash binary - parse the command line, load config, run the dashboard

use anyhow::Result;
use clap::Parser;
use tickerdash::cli::{self, Cli, Commands};
use tickerdash::config::Config;
use tickerdash::feeds::FeedClient;
use tickerdash::logging::{self, LogBuffer, LogSink};
use tickerdash::tui;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Config subcommands print and exit
    if cli::handle_cli(&cli) {
        return Ok(());
    }

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    // A config that does not parse is fatal; say where and stop
    let mut config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("tickerdash: invalid configuration");
            eprintln!("  {:#}", e);
            if let Some(path) = Config::config_path() {
                eprintln!("  Fix or reset {} (tickerdash config --reset)", path.display());
            }
            std::process::exit(1);
        }
    };
    config.demo_mode |= cli.demo;

    let client = FeedClient::new(&config.backend_url, config.demo_mode)?;

    if let Some(Commands::Snapshot { feed, page }) = cli.command {
        // Headless: logs go to stderr so stdout stays clean for the output
        let _file_guard = logging::init(&config.logging, LogSink::Stderr);
        let out = cli::snapshot(&config, &client, feed, page).await?;
        print!("{}", out);
        return Ok(());
    }

    // In TUI mode logs are captured to a buffer (prevents garbling the display)
    let log_buffer = LogBuffer::new();
    let _file_guard = logging::init(&config.logging, LogSink::Buffer(log_buffer.clone()));

    if config.demo_mode {
        tracing::info!("Running in DEMO MODE - serving sample data");
    }

    if let Err(e) = tui::run_tui(config, log_buffer, client).await {
        tracing::error!("TUI error: {:?}", e);
        return Err(e);
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
