//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::{Config, PanelConfig};
use crate::feeds::FeedKind;

impl Config {
    /// Serialize one `[panels.<feed>]` section
    fn panel_to_toml(kind: FeedKind, panel: &PanelConfig) -> String {
        format!(
            r#"
[panels.{key}]
page_size = {page_size}
rotate = {rotate}
rotate_interval_secs = {rotate_interval}
controls = "{controls}"  # simple, numbered
refetch_interval_secs = {refetch}  # 0 disables scheduled refetch
stale_secs = {stale}
retries = {retries}
"#,
            key = kind.key(),
            page_size = panel.page_size,
            rotate = panel.rotate,
            rotate_interval = panel.rotate_interval_secs,
            controls = panel.controls.as_str(),
            refetch = panel.refetch_interval_secs,
            stale = panel.stale_secs,
            retries = panel.retries,
        )
    }

    /// Serialize config to TOML format
    pub fn to_toml(&self) -> String {
        let panels: String = FeedKind::ALL
            .iter()
            .map(|&kind| Self::panel_to_toml(kind, self.panels.get(kind)))
            .collect();

        format!(
            r#"# tickerdash configuration

# Backend serving /tickers, /news, /github/trending, /hackernews/top
backend_url = "{backend_url}"

# Serve built-in mock data instead of calling the backend
demo_mode = {demo_mode}

# UI tick in milliseconds (rotation and animation timers resolve to this)
tick_ms = {tick_ms}

# Page transition animation length in milliseconds
transition_ms = {transition_ms}

# Logging configuration (RUST_LOG env var overrides)
[logging]
level = "{log_level}"
# File logging (JSON lines, in addition to the TUI buffer or stderr)
file_enabled = {log_file_enabled}
file_dir = "{log_file_dir}"
file_rotation = "{log_file_rotation}"  # hourly, daily, never
file_prefix = "{log_file_prefix}"

# ─────────────────────────────────────────────────────────────────────────────
# PANELS
# ─────────────────────────────────────────────────────────────────────────────
# One section per feed: tickers, news, github, hackernews
{panels}"#,
            backend_url = self.backend_url,
            demo_mode = self.demo_mode,
            tick_ms = self.tick_ms,
            transition_ms = self.transition_ms,
            log_level = self.logging.level,
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = self.logging.file_dir.display().to_string().replace('\\', "/"),
            log_file_rotation = self.logging.file_rotation.as_str(),
            log_file_prefix = self.logging.file_prefix,
            panels = panels,
        )
    }
}
