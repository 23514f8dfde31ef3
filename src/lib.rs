// tickerdash - terminal dashboard for markets, news and trending code
//
// Architecture:
// - Feeds (reqwest): Typed clients for each backend endpoint, plus demo data
// - Fetch: Background query per feed with retry, staleness and refetch timers
// - Paging: Page slicing, transitions and auto-rotation, independent of the UI
// - TUI (ratatui): Four paginated panels driven by a periodic tick
// - Config/logging: TOML + env configuration, tracing into the TUI or stderr

pub mod cli;
pub mod config;
pub mod feeds;
pub mod fetch;
pub mod logging;
pub mod paging;
pub mod tui;
