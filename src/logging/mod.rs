// Logging module - in-memory log capture for the dashboard footer
//
// A custom tracing layer captures events into a bounded ring buffer that the
// TUI reads each frame. This keeps log output off the alternate screen.
// Headless commands log to stderr instead; both modes can add rolling JSON
// files.

use crate::config::{LogRotation, LoggingConfig};
use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use std::fmt::Write as _;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{Level, Metadata, Subscriber};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Maximum number of log entries to keep in memory
const MAX_LOG_ENTRIES: usize = 500;

/// A single log entry captured from tracing
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    /// Value of the `feed` field, when the event carried one
    pub feed: Option<String>,
    pub message: String,
}

impl LogEntry {
    /// `[news] fetch failed, retrying: ...` style line for the footer
    pub fn display_line(&self) -> String {
        match &self.feed {
            Some(feed) => format!("[{}] {}", feed, self.message),
            None => self.message.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<&Level> for LogLevel {
    fn from(level: &Level) -> Self {
        match *level {
            Level::ERROR => LogLevel::Error,
            Level::WARN => LogLevel::Warn,
            Level::INFO => LogLevel::Info,
            Level::DEBUG => LogLevel::Debug,
            Level::TRACE => LogLevel::Trace,
        }
    }
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Trace => "TRACE",
        }
    }
}

/// In-memory log buffer with bounded size (ring buffer)
#[derive(Clone, Default)]
pub struct LogBuffer {
    entries: Arc<Mutex<VecDeque<LogEntry>>>,
}

impl LogBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    // A panic while holding the lock leaves the deque intact; keep using it
    fn lock(&self) -> MutexGuard<'_, VecDeque<LogEntry>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Add a log entry, dropping the oldest when full
    pub fn add(&self, entry: LogEntry) {
        let mut entries = self.lock();
        if entries.len() >= MAX_LOG_ENTRIES {
            entries.pop_front();
        }
        entries.push_back(entry);
    }

    /// Most recent entry at or above `min_level` severity
    pub fn latest(&self, min_level: LogLevel) -> Option<LogEntry> {
        self.lock()
            .iter()
            .rev()
            .find(|e| e.level <= min_level)
            .cloned()
    }

    /// Up to `n` most recent entries, oldest first
    pub fn recent(&self, n: usize) -> Vec<LogEntry> {
        let entries = self.lock();
        let skip = entries.len().saturating_sub(n);
        entries.iter().skip(skip).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

/// Tracing layer that captures events into a [`LogBuffer`]
pub struct TuiLogLayer {
    buffer: LogBuffer,
}

impl TuiLogLayer {
    pub fn new(buffer: LogBuffer) -> Self {
        Self { buffer }
    }
}

impl<S> Layer<S> for TuiLogLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = EntryVisitor::default();
        event.record(&mut visitor);

        let mut message = visitor.message;
        if !visitor.fields.is_empty() {
            if !message.is_empty() {
                message.push(' ');
            }
            message.push_str(&visitor.fields);
        }

        self.buffer.add(LogEntry {
            timestamp: Utc::now(),
            level: LogLevel::from(event.metadata().level()),
            feed: visitor.feed,
            message,
        });
    }

    fn enabled(&self, _metadata: &Metadata<'_>, _ctx: Context<'_, S>) -> bool {
        // Filtering happens at the subscriber level
        true
    }
}

/// Splits an event into its message, the `feed` field and the remaining fields
#[derive(Default)]
struct EntryVisitor {
    message: String,
    feed: Option<String>,
    fields: String,
}

impl EntryVisitor {
    fn push_field(&mut self, name: &str, value: std::fmt::Arguments<'_>) {
        if !self.fields.is_empty() {
            self.fields.push(' ');
        }
        let _ = write!(self.fields, "{}={}", name, value);
    }
}

impl tracing::field::Visit for EntryVisitor {
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        match field.name() {
            "message" => self.message = value.to_string(),
            "feed" => self.feed = Some(value.to_string()),
            name => self.push_field(name, format_args!("{}", value)),
        }
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        match field.name() {
            "message" => self.message = format!("{:?}", value),
            // `feed = %name` arrives here as a Display wrapper
            "feed" => self.feed = Some(format!("{:?}", value)),
            name => self.push_field(name, format_args!("{:?}", value)),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Subscriber setup
// ─────────────────────────────────────────────────────────────────────────────

/// Where interactive log output goes
pub enum LogSink {
    /// In-memory buffer read by the TUI
    Buffer(LogBuffer),
    /// Human-readable lines on stderr
    Stderr,
}

/// Install the global subscriber
///
/// Precedence: RUST_LOG env var > config file level > "info". The returned
/// guard must be kept alive for file logs to flush.
pub fn init(config: &LoggingConfig, sink: LogSink) -> Option<WorkerGuard> {
    let default_filter = format!("tickerdash={}", config.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let (buffer_layer, stderr_layer) = match sink {
        LogSink::Buffer(buffer) => (Some(TuiLogLayer::new(buffer)), None),
        LogSink::Stderr => (
            None,
            Some(tracing_subscriber::fmt::layer().with_writer(std::io::stderr)),
        ),
    };

    let (file_layer, guard) = if config.file_enabled {
        match std::fs::create_dir_all(&config.file_dir) {
            Ok(()) => {
                let appender = match config.file_rotation {
                    LogRotation::Hourly => {
                        tracing_appender::rolling::hourly(&config.file_dir, &config.file_prefix)
                    }
                    LogRotation::Daily => {
                        tracing_appender::rolling::daily(&config.file_dir, &config.file_prefix)
                    }
                    LogRotation::Never => {
                        tracing_appender::rolling::never(&config.file_dir, &config.file_prefix)
                    }
                };
                // Writes happen on a background thread
                let (writer, guard) = tracing_appender::non_blocking(appender);
                let layer = tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(writer)
                    .with_ansi(false);
                (Some(layer), Some(guard))
            }
            Err(e) => {
                eprintln!(
                    "Warning: Could not create log directory {:?}: {}",
                    config.file_dir, e
                );
                (None, None)
            }
        }
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(buffer_layer)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    guard
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::layer::SubscriberExt;

    fn capture(f: impl FnOnce()) -> LogBuffer {
        let buffer = LogBuffer::new();
        let subscriber = tracing_subscriber::registry().with(TuiLogLayer::new(buffer.clone()));
        tracing::subscriber::with_default(subscriber, f);
        buffer
    }

    #[test]
    fn test_captures_message_feed_and_fields() {
        let buffer = capture(|| {
            let name = "news".to_string();
            tracing::warn!(feed = %name, attempt = 2, "fetch failed, retrying");
        });

        let entry = buffer.latest(LogLevel::Trace).unwrap();
        assert_eq!(entry.level, LogLevel::Warn);
        assert_eq!(entry.feed.as_deref(), Some("news"));
        assert_eq!(entry.message, "fetch failed, retrying attempt=2");
        assert_eq!(entry.display_line(), "[news] fetch failed, retrying attempt=2");
    }

    #[test]
    fn test_latest_respects_min_level() {
        let buffer = capture(|| {
            tracing::warn!("warned");
            tracing::debug!("noise");
        });

        assert_eq!(buffer.latest(LogLevel::Debug).unwrap().message, "noise");
        assert_eq!(buffer.latest(LogLevel::Info).unwrap().message, "warned");
        assert!(buffer.latest(LogLevel::Error).is_none());
    }

    #[test]
    fn test_ring_buffer_is_bounded() {
        let buffer = capture(|| {
            for i in 0..(MAX_LOG_ENTRIES + 10) {
                tracing::info!("line {}", i);
            }
        });

        assert_eq!(buffer.len(), MAX_LOG_ENTRIES);
        let recent = buffer.recent(2);
        assert_eq!(recent[0].message, format!("line {}", MAX_LOG_ENTRIES + 8));
        assert_eq!(recent[1].message, format!("line {}", MAX_LOG_ENTRIES + 9));
    }
}
